//! Error types for packet decoding, encoding and TLV value inspection.

use std::str::Utf8Error;

use thiserror::Error;

use crate::tlv::TlvId;

/// Errors surfaced while decoding a datagram into a [`crate::Packet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The datagram is shorter than the fixed packet header.
    #[error("packet header needs {expected} bytes, got {available}")]
    TruncatedHeader {
        /// Bytes required for the header.
        expected: usize,
        /// Bytes present in the datagram.
        available: usize,
    },
    /// A TLV header was cut short by the end of the datagram.
    #[error("TLV header at payload offset {offset} needs 4 bytes, got {available}")]
    TruncatedTlv {
        /// Offset of the TLV within the payload.
        offset: usize,
        /// Bytes remaining at that offset.
        available: usize,
    },
    /// A TLV declares more value bytes than remain in the datagram.
    #[error("TLV {id} declares {declared} bytes but only {available} remain")]
    LengthExceedsBuffer {
        /// Identifier of the offending TLV.
        id: TlvId,
        /// Length carried in the TLV header.
        declared: usize,
        /// Bytes remaining after the TLV header.
        available: usize,
    },
}

/// Errors surfaced while appending fields to a [`crate::PacketBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value cannot be described by a 16-bit length field.
    #[error("TLV {id} value of {len} bytes exceeds the 65535 byte limit")]
    ValueTooLong {
        /// Identifier of the rejected TLV.
        id: TlvId,
        /// Length of the rejected value.
        len: usize,
    },
}

/// Errors surfaced when a TLV value is read as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value is longer than the caller's inspection limit.
    #[error("value of {len} bytes exceeds the {limit} byte limit")]
    TooLong {
        /// Length of the value.
        len: usize,
        /// Limit requested by the caller.
        limit: usize,
    },
    /// The value is not valid UTF-8.
    #[error("value is not valid UTF-8: {source}")]
    NotText {
        /// Underlying conversion error.
        #[source]
        source: Utf8Error,
    },
}
