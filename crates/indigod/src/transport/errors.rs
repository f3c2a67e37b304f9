//! Error types for listener operations.

use std::io;
use std::net::SocketAddr;

use indigo_config::EndpointResolveError;
use thiserror::Error;

/// Errors surfaced while binding or running the UDP listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Resolve(#[from] EndpointResolveError),
    #[error("failed to bind UDP socket at {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to set receive timeout: {source}")]
    Timeout {
        #[source]
        source: io::Error,
    },
    #[error("listener thread panicked")]
    ThreadPanic,
}
