//! Wire codec for the Indigo test-agent control protocol.
//!
//! A test controller drives the agent with small datagrams. Each datagram
//! carries a fixed four-byte header followed by a run of tag-length-value
//! records until the end of the buffer:
//!
//! ```text
//! +----------------+----------------+------------------------------+
//! | command (u16)  | sequence (u16) | TLV records ...              |
//! +----------------+----------------+------------------------------+
//!
//! TLV: +-----------+---------------+---------------------+
//!      | id (u16)  | length (u16)  | value (length bytes) |
//!      +-----------+---------------+---------------------+
//! ```
//!
//! All integers travel in network byte order. This crate performs no I/O; it
//! turns bytes into [`Packet`] values and [`PacketBuilder`] values back into
//! bytes.
//!
//! # Core types
//!
//! - [`Packet`] and [`PacketHeader`] for decoded requests
//! - [`Tlv`] and [`TlvId`] for individual records
//! - [`PacketBuilder`] for assembling responses
//! - [`ApiCommand`] for the closed set of command codes
//!
//! # Example
//!
//! ```
//! use indigo_protocol::{Packet, PacketBuilder, Status, TlvId};
//!
//! let mut builder = PacketBuilder::new_response(7);
//! builder.append_byte(TlvId::STATUS, Status::Ok.as_byte());
//! let bytes = builder.encode();
//! let packet = Packet::decode(&bytes).expect("response should decode");
//! assert_eq!(packet.sequence(), 7);
//! ```

mod command;
mod error;
mod ids;
mod packet;
mod tlv;

pub use command::{ACK_COMMAND, ApiCommand, RESPONSE_COMMAND, Status};
pub use error::{DecodeError, EncodeError, ValueError};
pub use packet::{HEADER_LEN, Packet, PacketBuilder, PacketHeader, peek_sequence};
pub use tlv::{MAX_TEXT_VALUE_LEN, TLV_HEADER_LEN, Tlv, TlvId, TlvReader};

#[cfg(test)]
mod tests;
