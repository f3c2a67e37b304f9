//! UDP listener for controller requests.
//!
//! The listener binds the configured endpoint and serves datagrams on one
//! background thread. Each datagram is handled to completion before the next
//! is read, so requests never overlap.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub use self::handler::{DatagramHandler, DatagramReply};
pub use self::listener::{DatagramListener, ListenerHandle};
#[cfg(test)]
pub(crate) use self::test_utils::CountingHandler;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
