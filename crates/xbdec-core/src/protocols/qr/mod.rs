//! QR-payment command decoding: host request and device response.
//!
//! The host request frame-type marker is `df0d`; the device response carries
//! `03df0d01`. The short marker is a substring of the long one, so request
//! detection must also reject buffers holding the response marker. The
//! dispatcher in `parser` sniffs the long marker to pick a branch.

pub mod layout;
pub mod parser;

pub use parser::{decode_qr, decode_qr_request, decode_qr_response};
