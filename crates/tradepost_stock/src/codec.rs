//! Textual stock-unit encoding
//!
//! A stock unit persists as a flat JSON object with exactly three
//! string-valued keys: `type` (variant tag), `item` (the item
//! sub-encoding) and `entriesPerUnit` (decimal count). The key names are
//! wire constants read by external tooling and must not change.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub(crate) const KEY_TYPE: &str = "type";
pub(crate) const KEY_ITEM: &str = "item";
pub(crate) const KEY_ENTRIES_PER_UNIT: &str = "entriesPerUnit";

/// Encoding errors
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The item description failed to encode
    #[error("item description failed to encode: {0}")]
    Item(#[from] serde_json::Error),
}

/// Decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer text is not a valid flat object
    #[error("stock unit encoding is not a valid object: {0}")]
    Syntax(#[source] serde_json::Error),
    /// A required key is absent
    #[error("stock unit encoding is missing the `{0}` key")]
    MissingKey(&'static str),
    /// The variant tag names no known stock unit kind
    #[error("unknown stock unit kind `{0}`")]
    UnknownKind(String),
    /// The entries-per-unit value is non-numeric or below 1
    #[error("`entriesPerUnit` value `{0}` is not a usable count")]
    InvalidCount(String),
    /// The embedded item sub-encoding is invalid
    #[error("embedded item encoding is invalid: {0}")]
    InvalidItem(#[source] serde_json::Error),
}

/// Raw fields of one encoded stock unit
#[derive(Debug)]
pub(crate) struct StockFields {
    /// Variant tag, if present
    pub kind: Option<String>,
    /// Item sub-encoding
    pub item: String,
    /// Decimal entries-per-unit count
    pub entries_per_unit: String,
}

/// Render the three-key object. Infallible: every value is already a string.
pub(crate) fn encode_fields(kind: &str, item: String, entries_per_unit: u32) -> String {
    let mut map = serde_json::Map::new();
    map.insert(KEY_TYPE.to_string(), Value::String(kind.to_string()));
    map.insert(KEY_ITEM.to_string(), Value::String(item));
    map.insert(
        KEY_ENTRIES_PER_UNIT.to_string(),
        Value::String(entries_per_unit.to_string()),
    );
    Value::Object(map).to_string()
}

/// Parse the outer object. The variant tag is optional here; the decode
/// dispatcher insists on it, variant-specific decoders do not.
pub(crate) fn decode_fields(text: &str) -> Result<StockFields, DecodeError> {
    let map: BTreeMap<String, String> =
        serde_json::from_str(text).map_err(DecodeError::Syntax)?;

    Ok(StockFields {
        kind: map.get(KEY_TYPE).cloned(),
        item: required(&map, KEY_ITEM)?,
        entries_per_unit: required(&map, KEY_ENTRIES_PER_UNIT)?,
    })
}

/// Parse the entries-per-unit count; zero is as unusable as garbage.
pub(crate) fn parse_count(raw: &str) -> Result<u32, DecodeError> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| DecodeError::InvalidCount(raw.to_string()))?;
    if value == 0 {
        return Err(DecodeError::InvalidCount(raw.to_string()));
    }
    Ok(value)
}

fn required(map: &BTreeMap<String, String>, key: &'static str) -> Result<String, DecodeError> {
    map.get(key).cloned().ok_or(DecodeError::MissingKey(key))
}
