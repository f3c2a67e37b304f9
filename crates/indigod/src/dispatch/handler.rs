//! Datagram handler that runs requests through the dispatcher.

use std::sync::Arc;

use indigo_protocol::Packet;
use tracing::{debug, warn};

use crate::transport::{DatagramHandler, DatagramReply};

use super::dispatcher::Dispatcher;
use super::reply::acknowledgement;
use super::router::DISPATCH_TARGET;

/// Serves controller datagrams: acknowledge, dispatch, respond.
///
/// When acknowledgements are enabled, a request that decodes is answered with
/// an ACK datagram before its handler runs. Every request, decodable or not,
/// gets exactly one response datagram.
pub struct AgentDatagramHandler {
    dispatcher: Arc<Dispatcher>,
    acknowledge: bool,
}

impl AgentDatagramHandler {
    /// Creates a handler around `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher>, acknowledge: bool) -> Self {
        Self {
            dispatcher,
            acknowledge,
        }
    }
}

impl DatagramHandler for AgentDatagramHandler {
    fn handle(&self, datagram: &[u8], reply: &DatagramReply<'_>) {
        debug!(
            target: DISPATCH_TARGET,
            peer = %reply.peer(),
            bytes = datagram.len(),
            "request received"
        );
        let response = match Packet::decode(datagram) {
            Ok(packet) => {
                if self.acknowledge {
                    send(reply, &acknowledgement(packet.sequence()).encode());
                }
                self.dispatcher.dispatch_packet(&packet)
            }
            Err(error) => self.dispatcher.reject_malformed(datagram, error),
        };
        send(reply, &response.encode());
    }
}

fn send(reply: &DatagramReply<'_>, datagram: &[u8]) {
    if let Err(error) = reply.send(datagram) {
        warn!(
            target: DISPATCH_TARGET,
            %error,
            peer = %reply.peer(),
            "failed to send datagram"
        );
    }
}
