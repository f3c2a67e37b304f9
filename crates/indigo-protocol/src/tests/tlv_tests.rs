//! Tests for [`Tlv`] and [`TlvReader`].

use rstest::rstest;

use crate::{DecodeError, MAX_TEXT_VALUE_LEN, Tlv, TlvId, TlvReader, ValueError};

#[test]
fn reader_yields_records_in_arrival_order() {
    let bytes = [0x00, 0x01, 0x00, 0x02, b'h', b'i', 0x00, 0x02, 0x00, 0x00];
    let records = TlvReader::new(&bytes).read_all().expect("payload should decode");
    assert_eq!(
        records,
        vec![Tlv::new(TlvId::SSID, *b"hi"), Tlv::new(TlvId::CHANNEL, Vec::new())]
    );
}

#[test]
fn empty_payload_has_no_records() {
    let records = TlvReader::new(&[]).read_all().expect("empty payload");
    assert!(records.is_empty());
}

#[rstest]
#[case::one_byte(&[0x00])]
#[case::three_bytes(&[0x00, 0x01, 0x00])]
fn short_tlv_header_is_truncated(#[case] bytes: &[u8]) {
    let error = TlvReader::new(bytes).read_all().expect_err("should fail");
    assert_eq!(
        error,
        DecodeError::TruncatedTlv {
            offset: 0,
            available: bytes.len(),
        }
    );
}

#[test]
fn truncation_after_a_full_record_reports_offset() {
    let bytes = [0x00, 0x01, 0x00, 0x01, b'x', 0x00, 0x02];
    let error = TlvReader::new(&bytes).read_all().expect_err("should fail");
    assert_eq!(
        error,
        DecodeError::TruncatedTlv {
            offset: 5,
            available: 2,
        }
    );
}

#[test]
fn declared_length_past_the_buffer_is_rejected() {
    let bytes = [0x00, 0x01, 0x00, 0x08, b'a', b'b'];
    let error = TlvReader::new(&bytes).read_all().expect_err("should fail");
    assert_eq!(
        error,
        DecodeError::LengthExceedsBuffer {
            id: TlvId::SSID,
            declared: 8,
            available: 2,
        }
    );
}

#[test]
fn text_reads_utf8_values() {
    let tlv = Tlv::new(TlvId::SSID, "Indigo");
    assert_eq!(tlv.text(), Ok("Indigo"));
}

#[test]
fn text_rejects_values_over_the_limit() {
    let tlv = Tlv::new(TlvId::SSID, vec![b'a'; MAX_TEXT_VALUE_LEN + 1]);
    assert_eq!(
        tlv.text(),
        Err(ValueError::TooLong {
            len: MAX_TEXT_VALUE_LEN + 1,
            limit: MAX_TEXT_VALUE_LEN,
        })
    );
}

#[test]
fn text_accepts_values_at_the_limit() {
    let tlv = Tlv::new(TlvId::SSID, vec![b'a'; MAX_TEXT_VALUE_LEN]);
    assert_eq!(tlv.text().map(str::len), Ok(MAX_TEXT_VALUE_LEN));
}

#[test]
fn text_rejects_invalid_utf8() {
    let tlv = Tlv::new(TlvId::SSID, vec![0xff_u8, 0xfe]);
    assert!(matches!(tlv.text(), Err(ValueError::NotText { .. })));
}

#[rstest]
#[case(TlvId::SSID, "0x0001")]
#[case(TlvId::MESSAGE, "0xa000")]
#[case(TlvId::new(0xffff), "0xffff")]
fn ids_display_as_hex(#[case] id: TlvId, #[case] expected: &str) {
    assert_eq!(id.to_string(), expected);
}
