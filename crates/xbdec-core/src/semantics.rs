//! Semantic annotation of raw field values.
//!
//! Pure and total: every mapping covers its whole input domain with an
//! explicit unknown arm, so new wire values degrade to a readable label
//! instead of breaking a decode.

/// Consumption-type byte of a consumption record.
pub fn consumption_type(value: u8) -> String {
    match value {
        1 => "main wallet consumption",
        2 => "subsidy wallet consumption",
        3 => "mixed consumption",
        _ => "unknown consumption type",
    }
    .to_string()
}

/// Device-status bitmask of a consumption record.
///
/// Joins every set flag; a zero mask reads "no flags set".
pub fn device_status(value: u8) -> String {
    let mut flags = Vec::new();
    if value & 0x01 != 0 {
        flags.push("blacklist transfer complete");
    }
    if value & 0x02 != 0 {
        flags.push("terminal has subsidy authorization");
    }
    if value & 0x04 != 0 {
        flags.push("terminal has online registration authorization");
    }
    if flags.is_empty() {
        "no flags set".to_string()
    } else {
        flags.join(", ")
    }
}

/// Discount flag: only the high bit is meaningful.
pub fn discount_flag(value: u8) -> String {
    match value & 0x80 {
        0x80 => "discount applied",
        _ => "service fee applied",
    }
    .to_string()
}

/// Card-status byte of a QR payment host request.
pub fn card_status(value: u8) -> String {
    match value {
        0 => "normal card",
        1 => "reported lost",
        2 => "card not found",
        _ => "unknown card status",
    }
    .to_string()
}

/// Device-status byte of a QR payment device response.
///
/// An in-use status with an all-ones card id means the record store is full;
/// otherwise the decoded card id is named.
pub fn response_status(status: u8, card_raw_hex: &str, card_id: u128) -> String {
    match status {
        0 => "device idle".to_string(),
        1 if card_raw_hex == "ffffffff" => "data full, cannot consume".to_string(),
        1 => format!("in use by card {card_id}"),
        _ => "unknown device status".to_string(),
    }
}
