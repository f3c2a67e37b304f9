//! Request/response orchestration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indigo_protocol::{ApiCommand, DecodeError, Packet, PacketBuilder, peek_sequence};
use tracing::{debug, warn};

use crate::context::AgentContext;
use crate::health::HealthReporter;

use super::errors::DispatchError;
use super::reply::Reply;
use super::request::Request;
use super::router::{DISPATCH_TARGET, handler_for};

/// Decodes requests, runs the matching handler and encodes the reply.
///
/// The context sits behind a mutex so that one request is fully handled
/// before the next observes the platform state.
pub struct Dispatcher {
    context: Mutex<AgentContext>,
    reporter: Arc<dyn HealthReporter>,
}

impl Dispatcher {
    /// Creates a dispatcher owning `context`.
    #[must_use]
    pub fn new(context: AgentContext, reporter: Arc<dyn HealthReporter>) -> Self {
        Self {
            context: Mutex::new(context),
            reporter,
        }
    }

    /// Turns one request datagram into one response datagram.
    ///
    /// Never fails: malformed or unsupported requests produce a NOT_OK reply.
    #[must_use]
    pub fn dispatch(&self, request: &[u8]) -> Vec<u8> {
        let response = match Packet::decode(request) {
            Ok(packet) => self.dispatch_packet(&packet),
            Err(error) => self.reject_malformed(request, error),
        };
        response.encode()
    }

    /// Runs the handler for an already decoded request.
    pub fn dispatch_packet(&self, packet: &Packet) -> PacketBuilder {
        let sequence = packet.sequence();
        let reply = match ApiCommand::from_code(packet.command()) {
            Some(command) => self.run(command, packet),
            None => {
                let error = DispatchError::unknown_command(packet.command());
                warn!(target: DISPATCH_TARGET, %error, sequence, "rejecting request");
                error.into_reply()
            }
        };
        self.reporter
            .request_completed(packet.command(), sequence, reply.status());
        reply.into_packet(sequence)
    }

    /// Builds the failure reply for a datagram that did not decode.
    pub fn reject_malformed(&self, request: &[u8], error: DecodeError) -> PacketBuilder {
        let sequence = peek_sequence(request).unwrap_or_default();
        let error = DispatchError::from(error);
        warn!(target: DISPATCH_TARGET, %error, sequence, "rejecting request");
        let reply = error.into_reply();
        let command = peek_command(request);
        self.reporter
            .request_completed(command, sequence, reply.status());
        reply.into_packet(sequence)
    }

    fn run(&self, command: ApiCommand, packet: &Packet) -> Reply {
        let Some(handler) = handler_for(command) else {
            let error = DispatchError::unsupported(command);
            warn!(target: DISPATCH_TARGET, %error, "rejecting request");
            return error.into_reply();
        };
        debug!(
            target: DISPATCH_TARGET,
            command = command.name(),
            sequence = packet.sequence(),
            fields = packet.tlvs().len(),
            "dispatching request"
        );
        let mut context = self.lock_context();
        match handler(&Request::new(packet), &mut context) {
            Ok(reply) => reply,
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command = command.name(),
                    %error,
                    "command failed"
                );
                error.into_reply()
            }
        }
    }

    fn lock_context(&self) -> MutexGuard<'_, AgentContext> {
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[expect(
    clippy::big_endian_bytes,
    reason = "the wire format fixes network byte order"
)]
fn peek_command(request: &[u8]) -> u16 {
    match request {
        [high, low, ..] => u16::from_be_bytes([*high, *low]),
        _ => 0,
    }
}
