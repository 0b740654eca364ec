//! Protocol variant decoders.
//!
//! Each variant follows the same layered structure:
//! - `layout`: byte offsets, lengths, and markers (source of truth)
//! - `parser`: table-driven extraction plus a fixed annotation pass
//! - `error`: explicit, actionable errors shared by every variant
//!
//! Parsers are pure and contain no I/O; input acquisition and rendering
//! belong to the CLI.

pub mod consumption;
pub mod error;
pub(crate) mod header;
pub mod qr;

use crate::field::FieldMap;
use error::DecodeError;

/// Gate a cleaned buffer against a variant's minimum frame size.
///
/// A buffer below the minimum makes every subsequent offset meaningless, so
/// this aborts the decode; no partial record is returned.
pub(crate) fn require_len(buffer: &str, min_hex_chars: usize) -> Result<(), DecodeError> {
    if buffer.len() < min_hex_chars {
        return Err(DecodeError::TooShort {
            needed: min_hex_chars / 2,
            actual: buffer.len() / 2,
        });
    }
    Ok(())
}

/// Overwrite a numeric field's description from its decoded value.
///
/// Missing keys and non-numeric values are skipped; annotation never fails a
/// decode that passed the gates.
pub(crate) fn annotate_uint(map: &mut FieldMap, key: &str, describe: fn(u8) -> String) {
    if let Some(field) = map.get_mut(key) {
        if let Some(value) = field.value.as_uint() {
            field.description = Some(describe(value as u8));
        }
    }
}
