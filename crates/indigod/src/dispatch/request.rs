//! Typed access to the fields of a decoded request.

use indigo_protocol::{Packet, Tlv, TlvId};

use super::errors::HandlerError;

/// Borrowed view over a request packet.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    packet: &'a Packet,
}

impl<'a> Request<'a> {
    /// Wraps a decoded packet.
    #[must_use]
    pub const fn new(packet: &'a Packet) -> Self {
        Self { packet }
    }

    /// Request sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.packet.sequence()
    }

    /// Every field in arrival order.
    #[must_use]
    pub fn tlvs(&self) -> &'a [Tlv] {
        self.packet.tlvs()
    }

    /// Reads a mandatory text field.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::MissingField`] when absent and
    /// [`HandlerError::UnreadableField`] when oversize or not text.
    pub fn required_text(&self, id: TlvId) -> Result<&'a str, HandlerError> {
        self.optional_text(id)?
            .ok_or_else(|| HandlerError::missing(id))
    }

    /// Reads an optional text field.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnreadableField`] when present but oversize or
    /// not text.
    pub fn optional_text(&self, id: TlvId) -> Result<Option<&'a str>, HandlerError> {
        self.packet
            .find(id)
            .map(|tlv| {
                tlv.text()
                    .map_err(|source| HandlerError::UnreadableField { id, source })
            })
            .transpose()
    }

    /// Reads an optional field, treating an empty value as absent.
    ///
    /// # Errors
    ///
    /// As for [`Self::optional_text`].
    pub fn non_empty_text(&self, id: TlvId) -> Result<Option<&'a str>, HandlerError> {
        Ok(self.optional_text(id)?.filter(|value| !value.is_empty()))
    }

    /// Reads and parses a mandatory field.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidValue`] when the text does not parse.
    pub fn required_parsed<T: std::str::FromStr>(&self, id: TlvId) -> Result<T, HandlerError> {
        let text = self.required_text(id)?;
        text.trim()
            .parse()
            .map_err(|_| HandlerError::invalid(id, text))
    }

    /// Reads and parses an optional field, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidValue`] when present text does not parse.
    pub fn parsed_or<T: std::str::FromStr>(&self, id: TlvId, default: T) -> Result<T, HandlerError> {
        match self.non_empty_text(id)? {
            Some(text) => text
                .trim()
                .parse()
                .map_err(|_| HandlerError::invalid(id, text)),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indigo_protocol::PacketHeader;

    fn packet(tlvs: Vec<Tlv>) -> Packet {
        Packet::new(
            PacketHeader {
                command: 0x5001,
                sequence: 3,
            },
            tlvs,
        )
    }

    #[test]
    fn required_field_reports_absence() {
        let packet = packet(Vec::new());
        let error = Request::new(&packet)
            .required_text(TlvId::ROLE)
            .expect_err("role is missing");
        assert!(matches!(error, HandlerError::MissingField { id } if id == TlvId::ROLE));
    }

    #[test]
    fn first_duplicate_wins() {
        let packet = packet(vec![
            Tlv::new(TlvId::ROLE, b"1".as_slice()),
            Tlv::new(TlvId::ROLE, b"2".as_slice()),
        ]);
        assert_eq!(Request::new(&packet).required_text(TlvId::ROLE).ok(), Some("1"));
    }

    #[test]
    fn parsed_fields_fall_back_and_validate() {
        let packet = packet(vec![Tlv::new(TlvId::PACKET_COUNT, b"abc".as_slice())]);
        let request = Request::new(&packet);
        assert_eq!(request.parsed_or(TlvId::UDP_PACKET_SIZE, 1000_usize).ok(), Some(1000));
        assert!(matches!(
            request.parsed_or(TlvId::PACKET_COUNT, 10_u32),
            Err(HandlerError::InvalidValue { .. })
        ));
    }
}
