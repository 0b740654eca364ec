//! Field extraction driven by declarative layout tables.
//!
//! A protocol variant is described by rows of [`FieldSpec`]; one generic
//! extractor walks the table and produces [`Field`] records collected into an
//! insertion-ordered [`FieldMap`]. Adding a protocol variant means adding a
//! table, not branching code.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::hex::{self, HexError};

/// Decoded value of a single protocol field.
///
/// Numeric fields decode to an unsigned big-endian integer; string and
/// timestamp fields to text. Serialized untagged so JSON output carries the
/// plain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Uint(u128),
    Text(String),
}

impl FieldValue {
    /// Integer view, used by annotation steps keyed on numeric fields.
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            FieldValue::Uint(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    /// Text view for string and timestamp fields.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Uint(_) => None,
            FieldValue::Text(text) => Some(text),
        }
    }
}

/// How a layout row turns raw hex into a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Big-endian unsigned integer, the default for numeric fields.
    Uint,
    /// Null-padded ASCII text.
    Ascii,
    /// Opaque bytes kept as hex text (composite blobs).
    Hex,
    /// 6-byte BCD-style calendar timestamp.
    BcdDateTime,
    /// 4-byte seconds-since-2000 timestamp.
    Epoch2000,
}

/// One row of a protocol layout table.
///
/// Offsets are byte offsets from the start of the cleaned buffer, never
/// relative to the body start; header length varies by frame direction.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub offset: usize,
    pub len: usize,
    pub label: &'static str,
    pub kind: FieldKind,
    pub description: Option<&'static str>,
}

/// One decoded protocol element.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    /// Human name for display.
    pub label: String,
    /// Bytes actually consumed; equals the layout length unless the capture
    /// ended early.
    pub byte_length: usize,
    /// Exact hex substring consumed, always `byte_length * 2` characters.
    pub raw_hex: String,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Extract one field from a cleaned hex buffer.
///
/// Slicing is clamped to the buffer, so a trailing field in a slightly short
/// capture yields a truncated `raw_hex` instead of an error; only the
/// per-variant minimum-length gates hard-fail. A fully truncated numeric
/// field decodes as zero.
pub fn extract(buffer: &str, spec: &FieldSpec) -> Result<Field, HexError> {
    let start = (spec.offset * 2).min(buffer.len());
    let end = ((spec.offset + spec.len) * 2).min(buffer.len());
    let raw = &buffer[start..end];

    let value = match spec.kind {
        FieldKind::Uint => {
            if raw.is_empty() {
                FieldValue::Uint(0)
            } else {
                FieldValue::Uint(hex::to_uint(raw)?)
            }
        }
        FieldKind::Ascii => FieldValue::Text(hex::to_ascii(raw)),
        FieldKind::Hex => FieldValue::Text(raw.to_string()),
        FieldKind::BcdDateTime => FieldValue::Text(hex::bcd_datetime(raw)),
        FieldKind::Epoch2000 => FieldValue::Text(hex::epoch2000_datetime(raw)),
    };

    Ok(Field {
        label: spec.label.to_string(),
        byte_length: raw.len() / 2,
        raw_hex: raw.to_string(),
        value,
        description: spec.description.map(str::to_string),
    })
}

/// Extract the trailing 2-byte integrity checksum.
///
/// The checksum is exposed as a field; validating it against a CRC algorithm
/// is out of scope.
pub(crate) fn checksum(buffer: &str) -> Result<Field, HexError> {
    let spec = FieldSpec {
        key: "checksum",
        offset: (buffer.len() / 2).saturating_sub(2),
        len: 2,
        label: "Checksum",
        kind: FieldKind::Uint,
        description: Some("frame integrity checksum"),
    };
    extract(buffer, &spec)
}

/// Insertion-ordered field collection, serialized as a JSON map.
///
/// Layout order is the render order, so an unordered map would scramble the
/// display; keys come from the layout tables and are unique per variant.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(&'static str, Field)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk a layout table and extract every row in declared order.
    pub fn from_table(buffer: &str, table: &[FieldSpec]) -> Result<Self, HexError> {
        let mut map = Self::new();
        for spec in table {
            map.insert(spec.key, extract(buffer, spec)?);
        }
        Ok(map)
    }

    pub fn insert(&mut self, key: &'static str, field: Field) {
        self.entries.push((key, field));
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.entries.iter().map(|(key, field)| (*key, field))
    }
}

impl Serialize for FieldMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, field) in &self.entries {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(offset: usize, len: usize, kind: FieldKind) -> FieldSpec {
        FieldSpec {
            key: "test",
            offset,
            len,
            label: "Test",
            kind,
            description: None,
        }
    }

    #[test]
    fn extract_slices_hex_characters() {
        let field = extract("aabbccdd", &spec(1, 2, FieldKind::Uint)).unwrap();
        assert_eq!(field.raw_hex, "bbcc");
        assert_eq!(field.byte_length, 2);
        assert_eq!(field.value, FieldValue::Uint(0xbbcc));
    }

    #[test]
    fn extract_raw_hex_matches_byte_length() {
        for (offset, len) in [(0, 1), (0, 4), (2, 2), (3, 4)] {
            let field = extract("aabbccdd", &spec(offset, len, FieldKind::Uint)).unwrap();
            assert_eq!(field.raw_hex.len(), field.byte_length * 2);
        }
    }

    #[test]
    fn extract_truncates_past_end_silently() {
        let field = extract("aabb", &spec(1, 4, FieldKind::Uint)).unwrap();
        assert_eq!(field.raw_hex, "bb");
        assert_eq!(field.byte_length, 1);

        let missing = extract("aabb", &spec(9, 2, FieldKind::Uint)).unwrap();
        assert_eq!(missing.raw_hex, "");
        assert_eq!(missing.byte_length, 0);
        assert_eq!(missing.value, FieldValue::Uint(0));
    }

    #[test]
    fn extract_string_field_drops_nulls() {
        let field = extract("41420000", &spec(0, 4, FieldKind::Ascii)).unwrap();
        assert_eq!(field.value, FieldValue::Text("AB".to_string()));
        assert_eq!(field.raw_hex, "41420000");
    }

    #[test]
    fn checksum_is_final_two_bytes() {
        let field = checksum("00112233beef").unwrap();
        assert_eq!(field.raw_hex, "beef");
        assert_eq!(field.byte_length, 2);
        assert_eq!(field.value, FieldValue::Uint(0xbeef));
    }

    #[test]
    fn field_map_preserves_table_order() {
        let table = [
            FieldSpec {
                key: "b",
                offset: 1,
                len: 1,
                label: "B",
                kind: FieldKind::Uint,
                description: None,
            },
            FieldSpec {
                key: "a",
                offset: 0,
                len: 1,
                label: "A",
                kind: FieldKind::Uint,
                description: None,
            },
        ];
        let map = FieldMap::from_table("0102", &table).unwrap();
        let keys: Vec<_> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);

        let json = serde_json::to_string(&map).unwrap();
        let b_pos = json.find("\"b\"").unwrap();
        let a_pos = json.find("\"a\"").unwrap();
        assert!(b_pos < a_pos);
    }
}
