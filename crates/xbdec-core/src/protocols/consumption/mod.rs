//! Consumption-record frame decoding.
//!
//! Decodes the record a terminal uploads after a purchase: wallet balances,
//! counters, blacklist state, two BCD-style timestamps, and usage totals.
//! Offsets live in `layout`; `parser` applies the table and then annotates
//! the consumption type, device-status bitmask, and discount flag.

pub mod layout;
pub mod parser;

pub use parser::decode_consumption;
