//! Packet envelope: header decoding, lookup and response assembly.

use crate::command::RESPONSE_COMMAND;
use crate::error::{DecodeError, EncodeError};
use crate::tlv::{Tlv, TlvId, TlvReader};

/// Size of the fixed packet header.
pub const HEADER_LEN: usize = 4;

/// Fixed header preceding the TLV payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Command code, or [`RESPONSE_COMMAND`] for responses.
    pub command: u16,
    /// Sequence number echoed from request to response.
    pub sequence: u16,
}

impl PacketHeader {
    #[expect(
        clippy::big_endian_bytes,
        reason = "the wire format fixes network byte order"
    )]
    fn parse(bytes: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        let Some((header, payload)) = bytes.split_first_chunk::<HEADER_LEN>() else {
            return Err(DecodeError::TruncatedHeader {
                expected: HEADER_LEN,
                available: bytes.len(),
            });
        };
        let [command_high, command_low, sequence_high, sequence_low] = *header;
        let parsed = Self {
            command: u16::from_be_bytes([command_high, command_low]),
            sequence: u16::from_be_bytes([sequence_high, sequence_low]),
        };
        Ok((parsed, payload))
    }

    #[expect(
        clippy::big_endian_bytes,
        reason = "the wire format fixes network byte order"
    )]
    fn write_to(self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.command.to_be_bytes());
        buffer.extend_from_slice(&self.sequence.to_be_bytes());
    }
}

/// A decoded datagram: header plus TLV records in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    header: PacketHeader,
    tlvs: Vec<Tlv>,
}

impl Packet {
    /// Assembles a packet from parts.
    #[must_use]
    pub const fn new(header: PacketHeader, tlvs: Vec<Tlv>) -> Self {
        Self { header, tlvs }
    }

    /// Decodes a complete datagram.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for a truncated header, a truncated TLV
    /// header, or a TLV whose length overruns the datagram.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (header, payload) = PacketHeader::parse(bytes)?;
        let tlvs = TlvReader::new(payload).read_all()?;
        Ok(Self { header, tlvs })
    }

    /// Returns the packet header.
    #[must_use]
    pub const fn header(&self) -> PacketHeader {
        self.header
    }

    /// Returns the header command code.
    #[must_use]
    pub const fn command(&self) -> u16 {
        self.header.command
    }

    /// Returns the header sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.header.sequence
    }

    /// Returns every record in arrival order.
    #[must_use]
    pub fn tlvs(&self) -> &[Tlv] {
        &self.tlvs
    }

    /// Returns the first record carrying `id`.
    ///
    /// Later records with the same id are ignored.
    #[must_use]
    pub fn find(&self, id: TlvId) -> Option<&Tlv> {
        self.tlvs.iter().find(|tlv| tlv.id() == id)
    }

    /// Serialises the header followed by every record in order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ValueTooLong`] when a value cannot be described
    /// by a 16-bit length.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let capacity = HEADER_LEN + self.tlvs.iter().map(Tlv::encoded_len).sum::<usize>();
        let mut buffer = Vec::with_capacity(capacity);
        self.header.write_to(&mut buffer);
        for tlv in &self.tlvs {
            tlv.write_to(&mut buffer)?;
        }
        Ok(buffer)
    }
}

/// Reads the sequence number from a datagram that may not fully decode.
///
/// Used to echo the sequence in failure responses to malformed requests.
#[must_use]
#[expect(
    clippy::big_endian_bytes,
    reason = "the wire format fixes network byte order"
)]
pub fn peek_sequence(bytes: &[u8]) -> Option<u16> {
    let sequence = bytes.get(2..HEADER_LEN)?;
    let [high, low] = <[u8; 2]>::try_from(sequence).ok()?;
    Some(u16::from_be_bytes([high, low]))
}

/// Accumulates TLV records for an outgoing packet.
///
/// Values are length-checked on append, so a built packet always encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketBuilder {
    header: PacketHeader,
    fields: Vec<(Tlv, u16)>,
    encoded_len: usize,
}

impl PacketBuilder {
    /// Starts a packet with an arbitrary command code.
    #[must_use]
    pub const fn new(command: u16, sequence: u16) -> Self {
        Self {
            header: PacketHeader { command, sequence },
            fields: Vec::new(),
            encoded_len: HEADER_LEN,
        }
    }

    /// Starts a response echoing the request's sequence number.
    #[must_use]
    pub const fn new_response(sequence: u16) -> Self {
        Self::new(RESPONSE_COMMAND, sequence)
    }

    /// Appends a single-byte field.
    pub fn append_byte(&mut self, id: TlvId, value: u8) -> &mut Self {
        self.push(Tlv::new(id, [value]), 1);
        self
    }

    /// Appends a field carrying raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ValueTooLong`] when `value` is longer than a
    /// 16-bit length can describe; the builder is left unchanged.
    pub fn append_bytes(
        &mut self,
        id: TlvId,
        value: impl AsRef<[u8]>,
    ) -> Result<&mut Self, EncodeError> {
        let tlv = Tlv::new(id, value.as_ref());
        let len = tlv.wire_len()?;
        self.push(tlv, len);
        Ok(self)
    }

    fn push(&mut self, tlv: Tlv, len: u16) {
        self.encoded_len += tlv.encoded_len();
        self.fields.push((tlv, len));
    }

    /// Returns the size of the packet once encoded.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Returns the sequence number the packet will carry.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.header.sequence
    }

    /// Finishes the builder into a [`Packet`].
    #[must_use]
    pub fn build(self) -> Packet {
        let tlvs = self.fields.into_iter().map(|(tlv, _)| tlv).collect();
        Packet::new(self.header, tlvs)
    }

    /// Serialises the header followed by the fields in append order.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_len);
        self.header.write_to(&mut buffer);
        for (tlv, len) in &self.fields {
            tlv.write_with_len(*len, &mut buffer);
        }
        buffer
    }
}
