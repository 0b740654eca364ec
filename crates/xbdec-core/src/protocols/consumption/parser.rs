use crate::field::{self, FieldMap};
use crate::protocols::{annotate_uint, header, require_len};
use crate::semantics;
use crate::{DecodeError, Frame, ProtocolRecord, hex};

use super::layout;

/// Decode a consumption-record frame from a raw hex capture.
///
/// Phase 1 extracts the header and body per the layout tables; phase 2
/// annotates the enumerated fields. Timestamp rendering is declared in the
/// table itself via the field kind.
pub fn decode_consumption(input: &str) -> Result<ProtocolRecord, DecodeError> {
    let buffer = hex::clean(input);
    require_len(&buffer, layout::MIN_HEX_CHARS)?;

    let header = FieldMap::from_table(&buffer, &header::HOST_HEADER)?;
    let mut body = FieldMap::from_table(&buffer, &layout::BODY)?;
    annotate(&mut body);
    let checksum = field::checksum(&buffer)?;

    Ok(ProtocolRecord::Consumption(Frame {
        header,
        body,
        checksum,
        raw_data: buffer,
    }))
}

/// Semantic annotation pass, applied in this declared order.
fn annotate(body: &mut FieldMap) {
    annotate_uint(body, "consumptionType", semantics::consumption_type);
    annotate_uint(body, "deviceStatus", semantics::device_status);
    annotate_uint(body, "discountFlag", semantics::discount_flag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    fn base(len_bytes: usize) -> String {
        "0".repeat(len_bytes * 2)
    }

    fn patch(buffer: &mut String, byte_offset: usize, hex: &str) {
        let start = byte_offset * 2;
        buffer.replace_range(start..start + hex.len(), hex);
    }

    fn frame(record: ProtocolRecord) -> Frame {
        match record {
            ProtocolRecord::Consumption(frame) => frame,
            other => panic!("expected consumption record, got {other:?}"),
        }
    }

    #[test]
    fn decodes_all_body_fields() {
        let mut buffer = base(111);
        patch(&mut buffer, 16, "0000abcd");
        patch(&mut buffer, 31, "02");
        patch(&mut buffer, 36, "00010203");
        patch(&mut buffer, 45, "000003e8");
        patch(&mut buffer, 73, "240103203220");
        patch(&mut buffer, 81, "80");
        patch(&mut buffer, 90, "07");
        patch(&mut buffer, 91, "991231235959");
        patch(&mut buffer, 105, "0000000a");
        patch(&mut buffer, 109, "beef");

        let frame = frame(decode_consumption(&buffer).unwrap());
        assert_eq!(frame.body.len(), 25);
        assert_eq!(
            frame.header.get("deviceId").unwrap().value,
            FieldValue::Uint(0xabcd)
        );
        assert_eq!(
            frame.body.get("accountId").unwrap().value,
            FieldValue::Uint(0x0001_0203)
        );
        assert_eq!(
            frame.body.get("totalAmount").unwrap().value,
            FieldValue::Uint(1000)
        );
        assert_eq!(
            frame.body.get("usageDuration").unwrap().value,
            FieldValue::Uint(10)
        );
        assert_eq!(frame.checksum.raw_hex, "beef");
        assert_eq!(frame.checksum.byte_length, 2);
        assert_eq!(frame.raw_data, buffer);
    }

    #[test]
    fn timestamps_render_as_bcd_dates() {
        let mut buffer = base(111);
        patch(&mut buffer, 73, "240103203220");
        patch(&mut buffer, 91, "991231235959");

        let frame = frame(decode_consumption(&buffer).unwrap());
        assert_eq!(
            frame.body.get("consumptionTime").unwrap().value,
            FieldValue::Text("2024-01-03 20:32:20".to_string())
        );
        assert_eq!(
            frame.body.get("currentDeviceTime").unwrap().value,
            FieldValue::Text("2099-12-31 23:59:59".to_string())
        );
    }

    #[test]
    fn annotations_follow_decoded_values() {
        let mut buffer = base(111);
        patch(&mut buffer, 31, "02");
        patch(&mut buffer, 81, "80");
        patch(&mut buffer, 90, "07");

        let frame = frame(decode_consumption(&buffer).unwrap());
        assert_eq!(
            frame.body.get("consumptionType").unwrap().description.as_deref(),
            Some("subsidy wallet consumption")
        );
        assert_eq!(
            frame.body.get("discountFlag").unwrap().description.as_deref(),
            Some("discount applied")
        );
        let status = frame.body.get("deviceStatus").unwrap();
        let description = status.description.as_deref().unwrap();
        assert!(description.contains("blacklist transfer complete"));
        assert!(description.contains("terminal has subsidy authorization"));
        assert!(description.contains("terminal has online registration authorization"));
    }

    #[test]
    fn zero_device_status_reads_no_flags() {
        let buffer = base(111);
        let frame = frame(decode_consumption(&buffer).unwrap());
        assert_eq!(
            frame.body.get("deviceStatus").unwrap().description.as_deref(),
            Some("no flags set")
        );
    }

    #[test]
    fn minimum_length_boundary() {
        let short = "0".repeat(199);
        let err = decode_consumption(&short).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                needed: 100,
                actual: 99
            }
        ));

        let exact = "0".repeat(200);
        let frame = frame(decode_consumption(&exact).unwrap());
        assert_eq!(frame.checksum.raw_hex, "0000");
    }

    #[test]
    fn cleans_formatted_input() {
        let buffer = base(111);
        let spaced: String = buffer
            .as_bytes()
            .chunks(2)
            .map(|pair| format!("{} ", std::str::from_utf8(pair).unwrap()))
            .collect();

        let frame = frame(decode_consumption(&spaced).unwrap());
        assert_eq!(frame.raw_data, buffer);
    }

    #[test]
    fn trailing_fields_truncate_on_exact_minimum_frame() {
        // A 100-byte frame ends before the usage fields; the tail shrinks
        // instead of failing.
        let buffer = "0".repeat(200);
        let frame = frame(decode_consumption(&buffer).unwrap());
        let usage_duration = frame.body.get("usageDuration").unwrap();
        assert_eq!(usage_duration.byte_length, 0);
        assert_eq!(usage_duration.value, FieldValue::Uint(0));
    }
}
