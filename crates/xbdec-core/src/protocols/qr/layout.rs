//! QR-payment command layouts.
//!
//! Request body offsets start at byte 36 (2-byte frame type plus 4-byte
//! random code after offset 30); the response body starts at byte 38 (4-byte
//! frame type plus 4-byte random code). All offsets are absolute buffer
//! offsets, per the split request/response parsers of the device vendor's
//! documentation.

use crate::field::{FieldKind, FieldSpec};

/// Marker carried in the frame-type word of a host request.
pub const REQUEST_MARKER: &str = "df0d";
/// Marker carried in the frame-type word of a device response.
pub const RESPONSE_MARKER: &str = "03df0d01";

/// Minimum request frame size, in hex characters (100 bytes).
pub const REQUEST_MIN_HEX_CHARS: usize = 200;
/// Minimum response frame size, in hex characters (25 bytes).
pub const RESPONSE_MIN_HEX_CHARS: usize = 50;

pub const REQUEST_BODY: [FieldSpec; 23] = [
    FieldSpec {
        key: "cardType",
        offset: 36,
        len: 1,
        label: "Ticket type",
        kind: FieldKind::Uint,
        description: Some("00: direct use (ID card, or account and password); 01: reserved use"),
    },
    FieldSpec {
        key: "accountId",
        offset: 37,
        len: 4,
        label: "Account ID",
        kind: FieldKind::Uint,
        description: Some("4-byte physical card number"),
    },
    FieldSpec {
        key: "cardId",
        offset: 41,
        len: 4,
        label: "Card ID",
        kind: FieldKind::Uint,
        description: Some("4-byte physical card number"),
    },
    FieldSpec {
        key: "cardCategory",
        offset: 45,
        len: 1,
        label: "Card category",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "mode",
        offset: 46,
        len: 1,
        label: "Mode",
        kind: FieldKind::Uint,
        description: Some("usage mode"),
    },
    FieldSpec {
        key: "rate",
        offset: 47,
        len: 4,
        label: "Rate",
        kind: FieldKind::Uint,
        description: Some("cents per second in time mode, cents per pulse in flow mode"),
    },
    FieldSpec {
        key: "cardCounter",
        offset: 51,
        len: 2,
        label: "Card counter",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "mainWalletBalance",
        offset: 53,
        len: 4,
        label: "Main wallet balance",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "subsidyCounter",
        offset: 57,
        len: 2,
        label: "Subsidy counter",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "subsidyBalance",
        offset: 59,
        len: 4,
        label: "Subsidy wallet balance",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "usageAmount",
        offset: 63,
        len: 4,
        label: "Usage amount",
        kind: FieldKind::Uint,
        description: Some("amount used this session"),
    },
    FieldSpec {
        key: "tapIndex",
        offset: 67,
        len: 2,
        label: "Tap index",
        kind: FieldKind::Uint,
        description: Some("first byte tap index, second byte its complement"),
    },
    FieldSpec {
        key: "cardStatus",
        offset: 69,
        len: 1,
        label: "Card status",
        kind: FieldKind::Uint,
        description: Some("0: normal; 1: reported lost; 2: card not found"),
    },
    FieldSpec {
        key: "studentWorkIdCrc",
        offset: 70,
        len: 22,
        label: "Student/staff ID block",
        kind: FieldKind::Hex,
        description: Some("4-byte account, 4-byte card, 2-byte CRC, 1-byte consumption type"),
    },
    FieldSpec {
        key: "waterUsage",
        offset: 92,
        len: 4,
        label: "Water usage",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "waterUsageTime",
        offset: 96,
        len: 4,
        label: "Water usage time",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "userId",
        offset: 100,
        len: 15,
        label: "User ID",
        kind: FieldKind::Ascii,
        description: None,
    },
    FieldSpec {
        key: "userPassword",
        offset: 115,
        len: 6,
        label: "User password",
        kind: FieldKind::Ascii,
        description: None,
    },
    FieldSpec {
        key: "reservationTimeSlot",
        offset: 121,
        len: 8,
        label: "Reservation time slot",
        kind: FieldKind::Uint,
        description: Some("4-byte start time, 4-byte end time"),
    },
    FieldSpec {
        key: "reservationExpiryTime",
        offset: 129,
        len: 2,
        label: "Reservation expiry",
        kind: FieldKind::Uint,
        description: Some("invalidation delay after reservation"),
    },
    FieldSpec {
        key: "waterTemperature",
        offset: 131,
        len: 2,
        label: "Water temperature control",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "timestamp",
        offset: 133,
        len: 4,
        label: "Timestamp",
        kind: FieldKind::Epoch2000,
        description: Some("seconds since 2000-01-01"),
    },
    FieldSpec {
        key: "userName",
        offset: 137,
        len: 10,
        label: "User name",
        kind: FieldKind::Ascii,
        description: None,
    },
];

pub const RESPONSE_BODY: [FieldSpec; 3] = [
    FieldSpec {
        key: "status",
        offset: 38,
        len: 1,
        label: "Device status",
        kind: FieldKind::Uint,
        description: Some("00: idle; 01: in use"),
    },
    FieldSpec {
        key: "cardId",
        offset: 39,
        len: 4,
        label: "Card ID",
        kind: FieldKind::Uint,
        description: Some("card currently using the device"),
    },
    FieldSpec {
        key: "timestamp",
        offset: 43,
        len: 4,
        label: "Timestamp",
        kind: FieldKind::Epoch2000,
        description: Some("seconds since 2000-01-01"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_rows_are_contiguous() {
        let mut expected = 36;
        for spec in REQUEST_BODY.iter() {
            assert_eq!(spec.offset, expected, "gap before {}", spec.key);
            expected += spec.len;
        }
        assert_eq!(expected, 147);
    }

    #[test]
    fn response_body_rows_are_contiguous() {
        let mut expected = 38;
        for spec in RESPONSE_BODY.iter() {
            assert_eq!(spec.offset, expected, "gap before {}", spec.key);
            expected += spec.len;
        }
    }

    #[test]
    fn request_marker_is_substring_of_response_marker() {
        assert!(RESPONSE_MARKER.contains(REQUEST_MARKER));
    }
}
