//! Item descriptions and transfer batches

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperty {
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Text value
    Text(String),
}

impl ItemProperty {
    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Description of exactly one base unit of a resource.
///
/// A spec never carries a quantity. Transfer quantities travel in
/// [`ItemBatch`] values built per container call, so a spec can be shared
/// freely between read-only queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Stable resource identifier (e.g. "minecraft.item.stone")
    id: String,
    /// Display name (empty = fall back to id)
    name: String,
    /// Largest quantity one container primitive call accepts (>= 1)
    max_batch: u32,
    /// Instance data (durability, enchantments, custom marks).
    /// Ordered map so the textual encoding is byte-reproducible.
    properties: BTreeMap<String, ItemProperty>,
}

impl ItemSpec {
    /// Create a new item spec
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_batch: 1,
            properties: BTreeMap::new(),
        }
    }

    /// Set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the maximum per-call transfer batch (clamped to at least 1)
    pub fn with_max_batch(mut self, max: u32) -> Self {
        self.max_batch = max.max(1);
        self
    }

    /// Add an instance property
    pub fn with_property(mut self, key: impl Into<String>, value: ItemProperty) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Get the resource identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Get the maximum per-call transfer batch
    pub fn max_batch(&self) -> u32 {
        self.max_batch
    }

    /// Get an instance property
    pub fn property(&self, key: &str) -> Option<&ItemProperty> {
        self.properties.get(key)
    }

    /// Get all instance properties
    pub fn properties(&self) -> &BTreeMap<String, ItemProperty> {
        &self.properties
    }

    /// Whether two specs describe the same concrete resource
    /// (same id and same instance data; display name is cosmetic)
    pub fn same_resource(&self, other: &ItemSpec) -> bool {
        self.id == other.id && self.properties == other.properties
    }

    /// Encode this spec as its textual sub-encoding
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a spec from its textual sub-encoding
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// A borrowed per-call transfer request: some quantity of one resource.
#[derive(Debug, Clone, Copy)]
pub struct ItemBatch<'a> {
    /// The resource being transferred
    pub spec: &'a ItemSpec,
    /// How many base units this call moves
    pub quantity: u32,
}

impl<'a> ItemBatch<'a> {
    /// Create a new batch
    pub fn new(spec: &'a ItemSpec, quantity: u32) -> Self {
        Self { spec, quantity }
    }
}
