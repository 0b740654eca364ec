//! Shared frame header: eight fixed fields in front of every variant body.
//!
//! The frame-type marker differs by direction. A host-originated request
//! carries 2 marker bytes, a device-originated response 4, which shifts the
//! random code that follows it.

use crate::field::{FieldKind, FieldSpec};

/// Byte offset of the frame-type marker in every variant.
pub const FRAME_TYPE_OFFSET: usize = 30;

/// Header layout for host-originated frames (2-byte frame type).
pub const HOST_HEADER: [FieldSpec; 8] = [
    FieldSpec {
        key: "staticId",
        offset: 0,
        len: 16,
        label: "Static ID",
        kind: FieldKind::Uint,
        description: Some("fixed device identifier"),
    },
    FieldSpec {
        key: "deviceId",
        offset: 16,
        len: 4,
        label: "Device ID",
        kind: FieldKind::Uint,
        description: Some("unique device identifier"),
    },
    FieldSpec {
        key: "fromDeviceId",
        offset: 20,
        len: 4,
        label: "From-device ID",
        kind: FieldKind::Uint,
        description: Some("00000000 for the master device, non-zero for a relay"),
    },
    FieldSpec {
        key: "protocolType",
        offset: 24,
        len: 2,
        label: "Protocol type",
        kind: FieldKind::Uint,
        description: Some("0000 for the master protocol, non-zero for a relay protocol"),
    },
    FieldSpec {
        key: "deviceType",
        offset: 26,
        len: 2,
        label: "Device type",
        kind: FieldKind::Uint,
        description: Some("device category identifier"),
    },
    FieldSpec {
        key: "dataLength",
        offset: 28,
        len: 2,
        label: "Data length",
        kind: FieldKind::Uint,
        description: Some("byte count of the following data"),
    },
    FieldSpec {
        key: "frameType",
        offset: FRAME_TYPE_OFFSET,
        len: 2,
        label: "Frame type",
        kind: FieldKind::Uint,
        description: Some("also called the key frame"),
    },
    FieldSpec {
        key: "randomCode",
        offset: 32,
        len: 4,
        label: "Random code",
        kind: FieldKind::Uint,
        description: Some("random identifier of the frame"),
    },
];

/// Header layout for device-originated frames (4-byte frame type).
pub const DEVICE_HEADER: [FieldSpec; 8] = [
    FieldSpec {
        key: "staticId",
        offset: 0,
        len: 16,
        label: "Static ID",
        kind: FieldKind::Uint,
        description: Some("fixed device identifier"),
    },
    FieldSpec {
        key: "deviceId",
        offset: 16,
        len: 4,
        label: "Device ID",
        kind: FieldKind::Uint,
        description: Some("unique device identifier"),
    },
    FieldSpec {
        key: "fromDeviceId",
        offset: 20,
        len: 4,
        label: "From-device ID",
        kind: FieldKind::Uint,
        description: Some("00000000 for the master device, non-zero for a relay"),
    },
    FieldSpec {
        key: "protocolType",
        offset: 24,
        len: 2,
        label: "Protocol type",
        kind: FieldKind::Uint,
        description: Some("0000 for the master protocol, non-zero for a relay protocol"),
    },
    FieldSpec {
        key: "deviceType",
        offset: 26,
        len: 2,
        label: "Device type",
        kind: FieldKind::Uint,
        description: Some("device category identifier"),
    },
    FieldSpec {
        key: "dataLength",
        offset: 28,
        len: 2,
        label: "Data length",
        kind: FieldKind::Uint,
        description: Some("byte count of the following data"),
    },
    FieldSpec {
        key: "frameType",
        offset: FRAME_TYPE_OFFSET,
        len: 4,
        label: "Frame type",
        kind: FieldKind::Uint,
        description: Some("03df0d01 marks a QR payment device response"),
    },
    FieldSpec {
        key: "randomCode",
        offset: 34,
        len: 4,
        label: "Random code",
        kind: FieldKind::Uint,
        description: Some("random identifier of the frame"),
    },
];
