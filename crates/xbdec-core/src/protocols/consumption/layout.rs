//! Consumption-record frame layout.
//!
//! The header occupies bytes 0..30; body offsets are absolute buffer
//! offsets. The first two body bytes overlap the header's frame-type word,
//! which is how the wire format is documented.

use crate::field::{FieldKind, FieldSpec};

/// Minimum viable frame size, in hex characters (100 bytes).
pub const MIN_HEX_CHARS: usize = 200;

pub const BODY: [FieldSpec; 25] = [
    FieldSpec {
        key: "recordFrame",
        offset: 30,
        len: 1,
        label: "Record frame",
        kind: FieldKind::Uint,
        description: Some("frame type tag"),
    },
    FieldSpec {
        key: "consumptionType",
        offset: 31,
        len: 1,
        label: "Consumption type",
        kind: FieldKind::Uint,
        description: Some("1: main wallet; 2: subsidy wallet; 3: mixed"),
    },
    FieldSpec {
        key: "randomCodeData",
        offset: 32,
        len: 4,
        label: "Random code data",
        kind: FieldKind::Uint,
        description: Some("internal random identifier"),
    },
    FieldSpec {
        key: "accountId",
        offset: 36,
        len: 4,
        label: "Account ID",
        kind: FieldKind::Uint,
        description: Some("user account identifier"),
    },
    FieldSpec {
        key: "cardId",
        offset: 40,
        len: 4,
        label: "Card ID",
        kind: FieldKind::Uint,
        description: Some("unique card identifier"),
    },
    FieldSpec {
        key: "cardNo",
        offset: 44,
        len: 1,
        label: "Card sequence number",
        kind: FieldKind::Uint,
        description: None,
    },
    FieldSpec {
        key: "totalAmount",
        offset: 45,
        len: 4,
        label: "Card total",
        kind: FieldKind::Uint,
        description: Some("total amount on the card"),
    },
    FieldSpec {
        key: "walletBalance",
        offset: 49,
        len: 4,
        label: "Wallet balance",
        kind: FieldKind::Uint,
        description: Some("current wallet balance"),
    },
    FieldSpec {
        key: "managementFee",
        offset: 53,
        len: 4,
        label: "Management fee",
        kind: FieldKind::Uint,
        description: Some("discount or service fee amount"),
    },
    FieldSpec {
        key: "subsidyBalance",
        offset: 57,
        len: 4,
        label: "Subsidy balance",
        kind: FieldKind::Uint,
        description: Some("current subsidy wallet balance"),
    },
    FieldSpec {
        key: "mainWalletConsumption",
        offset: 61,
        len: 4,
        label: "Main wallet consumption",
        kind: FieldKind::Uint,
        description: Some("amount spent from the main wallet"),
    },
    FieldSpec {
        key: "mainWalletCounter",
        offset: 65,
        len: 2,
        label: "Main wallet counter",
        kind: FieldKind::Uint,
        description: Some("main wallet purchase counter"),
    },
    FieldSpec {
        key: "subsidyCounter",
        offset: 67,
        len: 2,
        label: "Subsidy counter",
        kind: FieldKind::Uint,
        description: Some("subsidy wallet purchase counter"),
    },
    FieldSpec {
        key: "subsidyConsumption",
        offset: 69,
        len: 4,
        label: "Subsidy consumption",
        kind: FieldKind::Uint,
        description: Some("amount spent from the subsidy wallet"),
    },
    FieldSpec {
        key: "consumptionTime",
        offset: 73,
        len: 6,
        label: "Consumption time",
        kind: FieldKind::BcdDateTime,
        description: Some("BCD-style timestamp"),
    },
    FieldSpec {
        key: "recordNo",
        offset: 79,
        len: 2,
        label: "Record number",
        kind: FieldKind::Uint,
        description: Some("unique consumption record number"),
    },
    FieldSpec {
        key: "discountFlag",
        offset: 81,
        len: 1,
        label: "Discount flag",
        kind: FieldKind::Uint,
        description: Some("high bit set: discount; clear: service fee"),
    },
    FieldSpec {
        key: "unsentRecordCount",
        offset: 82,
        len: 2,
        label: "Unsent record count",
        kind: FieldKind::Uint,
        description: Some("records not yet uploaded from the device"),
    },
    FieldSpec {
        key: "latestBatchBlacklist",
        offset: 84,
        len: 2,
        label: "Latest blacklist batch",
        kind: FieldKind::Uint,
        description: Some("most recent blacklist batch number"),
    },
    FieldSpec {
        key: "lastIncrementalBlacklist",
        offset: 86,
        len: 4,
        label: "Last incremental blacklist",
        kind: FieldKind::Uint,
        description: Some("last processed incremental blacklist id"),
    },
    FieldSpec {
        key: "deviceStatus",
        offset: 90,
        len: 1,
        label: "Device status",
        kind: FieldKind::Uint,
        description: Some(
            "bit0: blacklist sent; bit1: subsidy authorization; \
             bit2: online registration authorization",
        ),
    },
    FieldSpec {
        key: "currentDeviceTime",
        offset: 91,
        len: 6,
        label: "Current device time",
        kind: FieldKind::BcdDateTime,
        description: Some("BCD-style timestamp"),
    },
    FieldSpec {
        key: "physicalCardNo",
        offset: 97,
        len: 4,
        label: "Physical card number",
        kind: FieldKind::Uint,
        description: Some("physical card identifier"),
    },
    FieldSpec {
        key: "usageAmount",
        offset: 101,
        len: 4,
        label: "Usage amount",
        kind: FieldKind::Uint,
        description: Some("resource amount consumed"),
    },
    FieldSpec {
        key: "usageDuration",
        offset: 105,
        len: 4,
        label: "Usage duration",
        kind: FieldKind::Uint,
        description: Some("duration of use"),
    },
];
