use thiserror::Error;

use crate::hex::HexError;

/// Errors returned by the frame decoders.
///
/// Only the eager length and variant gates surface here; field-level issues
/// (bad timestamp length, unknown enumeration value) degrade to sentinel
/// values so a gated decode always yields a renderable record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("data packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("not a valid {expected} for this command")]
    WrongVariant { expected: &'static str },
    #[error("{branch} decode failed: {source}")]
    Dispatch {
        branch: &'static str,
        #[source]
        source: Box<DecodeError>,
    },
    #[error(transparent)]
    Hex(#[from] HexError),
}
