//! Hex-text utilities shared by every frame decoder.
//!
//! Captures arrive as free-form text (spaces, newlines, `0x` markers).
//! [`clean`] reduces that to a lowercase hex byte buffer; the remaining
//! helpers decode sub-ranges of it. The buffer stays hex text end to end, so
//! everything here works in hex characters, two per byte.

use thiserror::Error;
use time::OffsetDateTime;

/// Sentinel substituted when a timestamp field has an unexpected length.
///
/// Timestamp decoding never aborts a frame decode; display layers expect a
/// string in all cases.
pub const INVALID_DATE: &str = "invalid date format";

/// Seconds between the Unix epoch and 2000-01-01T00:00:00Z.
pub const EPOCH_2000_OFFSET: i64 = 946_684_800;

/// Errors from numeric hex decoding.
#[derive(Debug, Error)]
pub enum HexError {
    #[error("empty hex field")]
    Empty,
    #[error("hex field too wide for an integer: {digits} digits")]
    Overflow { digits: usize },
    #[error("not valid hex: {text}")]
    Malformed { text: String },
}

/// Strip everything that is not a hex digit and normalize to lowercase.
///
/// Never fails; an input without a single hex digit yields an empty buffer.
/// Idempotent, so re-cleaning an already clean buffer is a no-op.
pub fn clean(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse a hex substring as a big-endian unsigned integer.
///
/// Zero-length fields are the caller's problem; guard before calling.
pub fn to_uint(hex: &str) -> Result<u128, HexError> {
    if hex.is_empty() {
        return Err(HexError::Empty);
    }
    if hex.len() > 32 {
        return Err(HexError::Overflow { digits: hex.len() });
    }
    u128::from_str_radix(hex, 16).map_err(|_| HexError::Malformed {
        text: hex.to_string(),
    })
}

/// Decode byte pairs as ASCII character codes.
///
/// Null bytes are dropped rather than rendered, matching the protocol's
/// fixed-width null-padded string fields. An incomplete trailing pair is
/// ignored.
pub fn to_ascii(hex: &str) -> String {
    let mut out = String::new();
    for pair in hex.as_bytes().chunks_exact(2) {
        let hi = (pair[0] as char).to_digit(16);
        let lo = (pair[1] as char).to_digit(16);
        if let (Some(hi), Some(lo)) = (hi, lo) {
            let code = (hi * 16 + lo) as u8;
            if code != 0 {
                out.push(char::from(code));
            }
        }
    }
    out
}

/// Decode a 6-byte BCD-style timestamp into `20YY-MM-DD HH:MM:SS`.
///
/// Each byte's two hex digits are read as the literal decimal component, not
/// as packed BCD nibbles: `"240103203220"` renders as
/// `2024-01-03 20:32:20`. Wrong-length input degrades to [`INVALID_DATE`].
pub fn bcd_datetime(hex: &str) -> String {
    if hex.len() != 12 {
        return INVALID_DATE.to_string();
    }
    format!(
        "20{}-{}-{} {}:{}:{}",
        &hex[0..2],
        &hex[2..4],
        &hex[4..6],
        &hex[6..8],
        &hex[8..10],
        &hex[10..12]
    )
}

/// Decode a 4-byte seconds-since-2000 counter into `YYYY-MM-DD HH:MM:SS` UTC.
///
/// Wrong-length input degrades to [`INVALID_DATE`].
pub fn epoch2000_datetime(hex: &str) -> String {
    if hex.len() != 8 {
        return INVALID_DATE.to_string();
    }
    let secs = match to_uint(hex) {
        Ok(value) => value as i64,
        Err(_) => return INVALID_DATE.to_string(),
    };
    match OffsetDateTime::from_unix_timestamp(EPOCH_2000_OFFSET + secs) {
        Ok(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        Err(_) => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_formatting() {
        assert_eq!(clean("0x55 AA\n01,ff"), "055aa01ff");
        assert_eq!(clean("ghost input!"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn clean_is_idempotent() {
        for input in ["55aa01", "0x 55 AA", "zz", ""] {
            let once = clean(input);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn to_uint_decodes_big_endian() {
        assert_eq!(to_uint("ff").unwrap(), 255);
        assert_eq!(to_uint("0100").unwrap(), 256);
        assert_eq!(to_uint(&"f".repeat(32)).unwrap(), u128::MAX);
    }

    #[test]
    fn to_uint_rejects_empty_and_oversized() {
        assert!(matches!(to_uint(""), Err(HexError::Empty)));
        assert!(matches!(
            to_uint(&"0".repeat(33)),
            Err(HexError::Overflow { digits: 33 })
        ));
    }

    #[test]
    fn to_ascii_drops_null_padding() {
        assert_eq!(to_ascii("414200"), "AB");
        assert_eq!(to_ascii("00000000"), "");
        assert_eq!(to_ascii("757365722d303037"), "user-007");
    }

    #[test]
    fn to_ascii_ignores_incomplete_trailing_pair() {
        assert_eq!(to_ascii("4142f"), "AB");
    }

    #[test]
    fn bcd_datetime_formats_literal_digits() {
        assert_eq!(bcd_datetime("240103203220"), "2024-01-03 20:32:20");
        assert_eq!(bcd_datetime("991231235959"), "2099-12-31 23:59:59");
    }

    #[test]
    fn bcd_datetime_wrong_length_is_sentinel() {
        assert_eq!(bcd_datetime(""), INVALID_DATE);
        assert_eq!(bcd_datetime("2401032032"), INVALID_DATE);
        assert_eq!(bcd_datetime("24010320322000"), INVALID_DATE);
    }

    #[test]
    fn epoch2000_datetime_decodes_utc() {
        assert_eq!(epoch2000_datetime("00000000"), "2000-01-01 00:00:00");
        assert_eq!(epoch2000_datetime("00000001"), "2000-01-01 00:00:01");
        assert_eq!(epoch2000_datetime("0001518f"), "2000-01-02 00:00:15");
    }

    #[test]
    fn epoch2000_datetime_wrong_length_is_sentinel() {
        assert_eq!(epoch2000_datetime("000000"), INVALID_DATE);
        assert_eq!(epoch2000_datetime(""), INVALID_DATE);
    }
}
