//! TLV records and the reader that walks a packet payload.

use std::fmt;

use crate::error::{DecodeError, EncodeError, ValueError};

/// Size of a TLV header: a 16-bit id followed by a 16-bit length.
pub const TLV_HEADER_LEN: usize = 4;

/// Largest value, in bytes, accepted when a TLV is read as text.
///
/// Values longer than this are rejected rather than cut short.
pub const MAX_TEXT_VALUE_LEN: usize = 256;

/// Numeric identifier of a TLV record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TlvId(u16);

impl TlvId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TlvId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "0x{:04x}", self.0)
    }
}

impl From<u16> for TlvId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// A single tag-length-value record.
///
/// The length is implied by the owned value so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    id: TlvId,
    value: Vec<u8>,
}

impl Tlv {
    /// Builds a record from an id and raw value bytes.
    #[must_use]
    pub fn new(id: TlvId, value: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> TlvId {
        self.id
    }

    /// Returns the raw value bytes.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the value length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` when the value carries no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Reads the value as UTF-8 text no longer than [`MAX_TEXT_VALUE_LEN`].
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooLong`] for oversize values and
    /// [`ValueError::NotText`] for values that are not UTF-8.
    pub fn text(&self) -> Result<&str, ValueError> {
        self.text_within(MAX_TEXT_VALUE_LEN)
    }

    /// Reads the value as UTF-8 text no longer than `limit` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooLong`] for values over `limit` and
    /// [`ValueError::NotText`] for values that are not UTF-8.
    pub fn text_within(&self, limit: usize) -> Result<&str, ValueError> {
        if self.value.len() > limit {
            return Err(ValueError::TooLong {
                len: self.value.len(),
                limit,
            });
        }
        std::str::from_utf8(&self.value).map_err(|source| ValueError::NotText { source })
    }

    /// Size of this record once encoded, header included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_LEN + self.value.len()
    }

    /// Returns the value length as carried on the wire.
    pub(crate) fn wire_len(&self) -> Result<u16, EncodeError> {
        u16::try_from(self.value.len()).map_err(|_| EncodeError::ValueTooLong {
            id: self.id,
            len: self.value.len(),
        })
    }

    pub(crate) fn write_to(&self, buffer: &mut Vec<u8>) -> Result<(), EncodeError> {
        let len = self.wire_len()?;
        self.write_with_len(len, buffer);
        Ok(())
    }

    #[expect(
        clippy::big_endian_bytes,
        reason = "the wire format fixes network byte order"
    )]
    pub(crate) fn write_with_len(&self, len: u16, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.id.get().to_be_bytes());
        buffer.extend_from_slice(&len.to_be_bytes());
        buffer.extend_from_slice(&self.value);
    }
}

/// Reads TLV records from a packet payload in arrival order.
#[derive(Debug)]
pub struct TlvReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> TlvReader<'a> {
    /// Creates a reader positioned at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Returns the next record, or `None` once the payload is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TruncatedTlv`] when fewer than four header bytes
    /// remain and [`DecodeError::LengthExceedsBuffer`] when the declared length
    /// overruns the payload.
    #[expect(
        clippy::big_endian_bytes,
        reason = "the wire format fixes network byte order"
    )]
    pub fn next_tlv(&mut self) -> Result<Option<Tlv>, DecodeError> {
        let remaining = self.bytes.get(self.offset..).unwrap_or_default();
        if remaining.is_empty() {
            return Ok(None);
        }
        let Some((header, rest)) = remaining.split_first_chunk::<TLV_HEADER_LEN>() else {
            return Err(DecodeError::TruncatedTlv {
                offset: self.offset,
                available: remaining.len(),
            });
        };
        let [id_high, id_low, len_high, len_low] = *header;
        let id = TlvId::new(u16::from_be_bytes([id_high, id_low]));
        let declared = usize::from(u16::from_be_bytes([len_high, len_low]));
        let Some(value) = rest.get(..declared) else {
            return Err(DecodeError::LengthExceedsBuffer {
                id,
                declared,
                available: rest.len(),
            });
        };
        self.offset += TLV_HEADER_LEN + declared;
        Ok(Some(Tlv::new(id, value)))
    }

    /// Reads every remaining record.
    ///
    /// # Errors
    ///
    /// Propagates the first error reported by [`Self::next_tlv`].
    pub fn read_all(mut self) -> Result<Vec<Tlv>, DecodeError> {
        let mut records = Vec::new();
        while let Some(record) = self.next_tlv()? {
            records.push(record);
        }
        Ok(records)
    }
}
