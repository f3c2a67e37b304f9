//! Datagram handling abstractions for the listener.

use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Sends datagrams back to the peer that issued a request.
#[derive(Debug, Clone, Copy)]
pub struct DatagramReply<'a> {
    socket: &'a UdpSocket,
    peer: SocketAddr,
}

impl<'a> DatagramReply<'a> {
    pub(crate) const fn new(socket: &'a UdpSocket, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }

    /// Address the request came from.
    #[must_use]
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Sends one datagram to the requesting peer.
    ///
    /// # Errors
    ///
    /// Returns the socket error when the datagram cannot be sent.
    pub fn send(&self, datagram: &[u8]) -> io::Result<()> {
        self.socket.send_to(datagram, self.peer).map(|_| ())
    }
}

/// Handles datagrams received by the listener.
pub trait DatagramHandler: Send + Sync + 'static {
    /// Handles one request datagram. Implementations should avoid panicking.
    fn handle(&self, datagram: &[u8], reply: &DatagramReply<'_>);
}
