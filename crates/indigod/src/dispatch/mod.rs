//! Request dispatch for controller commands.
//!
//! A request datagram decodes into a [`indigo_protocol::Packet`], its command
//! code selects a handler through a closed table, and the handler's
//! [`Reply`] is encoded into exactly one response echoing the request
//! sequence. Decode failures, unknown codes and handler errors all end in a
//! NOT_OK reply; nothing propagates past the dispatcher.
//!
//! ## Exchange
//!
//! ```text
//! controller -> agent   command, sequence, request TLVs
//! agent -> controller   0x0001, sequence, status OK, "ACK: Command received"
//! agent -> controller   0x0000, sequence, status, message, result TLVs
//! ```
//!
//! The acknowledgement is optional and only sent for requests that decode.

mod dispatcher;
mod errors;
mod handler;
mod reply;
mod request;
mod router;

pub use self::dispatcher::Dispatcher;
pub use self::errors::{
    DispatchError, HandlerError, INSUFFICIENT_TLV, INVALID_TLV, MALFORMED_REQUEST,
    PlatformResultExt, UNSUPPORTED_COMMAND,
};
pub use self::handler::AgentDatagramHandler;
pub use self::reply::{ACK_MESSAGE, Reply, acknowledgement};
pub use self::request::Request;
pub(crate) use self::router::DISPATCH_TARGET;
