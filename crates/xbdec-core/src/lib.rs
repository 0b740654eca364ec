//! Core decoding library for XB vending-terminal frame captures.
//!
//! The crate turns a raw hex capture (free-form text with spaces, newlines,
//! `0x` markers) into a typed record of labeled fields: shared header,
//! variant body, trailing checksum. Decoding is table-driven and two-phase:
//! declarative layout tables feed one generic extractor, then a fixed list
//! of semantic annotation steps patches descriptions and timestamp
//! renderings. Parsers are pure and perform no I/O; wire transport and frame
//! re-assembly belong to the capture tooling upstream.
//!
//! Invariants:
//! - Layout offsets are byte offsets into the cleaned buffer, which is
//!   stored as lowercase hex text end to end.
//! - Length and variant gates abort a decode; field-level issues degrade to
//!   sentinel values, so a gated decode always yields a renderable record.
//! - `Field::raw_hex` always holds exactly `byte_length * 2` characters.
//!
//! # Examples
//! ```
//! use xbdec_core::{ProtocolRecord, decode_consumption};
//!
//! let capture = "00".repeat(111);
//! let ProtocolRecord::Consumption(frame) = decode_consumption(&capture)? else {
//!     unreachable!()
//! };
//! assert_eq!(frame.body.len(), 25);
//! assert_eq!(frame.checksum.byte_length, 2);
//! # Ok::<(), xbdec_core::DecodeError>(())
//! ```

use serde::Serialize;

pub mod hex;

mod field;
mod protocols;
mod semantics;

pub use field::{Field, FieldKind, FieldMap, FieldSpec, FieldValue};
pub use protocols::consumption::decode_consumption;
pub use protocols::error::DecodeError;
pub use protocols::qr::{decode_qr, decode_qr_request, decode_qr_response};

/// One fully decoded frame: shared header, variant body, trailing checksum.
///
/// Constructed in one decode pass and not mutated afterwards; display layers
/// iterate the field maps in layout order.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub header: FieldMap,
    pub body: FieldMap,
    pub checksum: Field,
    /// The full cleaned buffer, retained for raw-bytes display.
    pub raw_data: String,
}

/// Tagged union over the supported protocol variants.
///
/// Callers pattern-match on the variant instead of probing placeholder
/// fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "variant", content = "frame", rename_all = "snake_case")]
pub enum ProtocolRecord {
    Consumption(Frame),
    QrRequest(Frame),
    QrResponse(Frame),
}

impl ProtocolRecord {
    /// The decoded frame, whatever the variant.
    pub fn frame(&self) -> &Frame {
        match self {
            ProtocolRecord::Consumption(frame)
            | ProtocolRecord::QrRequest(frame)
            | ProtocolRecord::QrResponse(frame) => frame,
        }
    }
}

/// Protocol variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Consumption,
    QrRequest,
    QrResponse,
}

impl Variant {
    /// Decode a capture as this variant.
    pub fn decode(self, input: &str) -> Result<ProtocolRecord, DecodeError> {
        match self {
            Variant::Consumption => decode_consumption(input),
            Variant::QrRequest => decode_qr_request(input),
            Variant::QrResponse => decode_qr_response(input),
        }
    }
}

/// Sniff the most plausible variant for a capture.
///
/// The response marker wins outright since the request marker is one of its
/// substrings; a buffer without a QR marker in the frame-type word is
/// treated as a consumption record.
pub fn detect_variant(input: &str) -> Variant {
    let buffer = hex::clean(input);
    if buffer.contains(protocols::qr::layout::RESPONSE_MARKER) {
        Variant::QrResponse
    } else if protocols::qr::parser::has_request_marker(&buffer) {
        Variant::QrRequest
    } else {
        Variant::Consumption
    }
}
