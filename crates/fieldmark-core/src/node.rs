//! Structured node emitted for a `!{field...}` token

use crate::field::ParsedField;
use crate::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Type discriminator carried by every field node
pub const FIELD_NODE_TYPE: &str = "field";

/// Configuration payload parsed from the token
pub type Payload = Map<String, Value>;

/// A field token's payload, tagged with [`FIELD_NODE_TYPE`]
///
/// Serializes as the payload merged flat next to `"type"`. The discriminator
/// always wins over a payload key of the same name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldNode {
    pub payload: Payload,
}

impl FieldNode {
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    /// Node for `!{field}`, which carries no configuration
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node_type(&self) -> &'static str {
        FIELD_NODE_TYPE
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Typed view of the payload
    pub fn parsed_field(&self) -> Result<ParsedField> {
        ParsedField::from_payload(&self.payload)
    }

    /// Merged `{ "type": ..., ...payload }` object
    pub fn to_json(&self) -> Value {
        let mut merged = Map::with_capacity(self.payload.len() + 1);
        merged.insert("type".to_string(), Value::String(FIELD_NODE_TYPE.to_string()));
        for (key, value) in &self.payload {
            if key != "type" {
                merged.insert(key.clone(), value.clone());
            }
        }
        Value::Object(merged)
    }
}

impl TryFrom<ParsedField> for FieldNode {
    type Error = crate::Error;

    fn try_from(field: ParsedField) -> Result<Self> {
        field.to_payload().map(Self::new)
    }
}

impl Serialize for FieldNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = self.payload.keys().filter(|k| *k != "type").count();
        let mut map = serializer.serialize_map(Some(extra + 1))?;
        map.serialize_entry("type", FIELD_NODE_TYPE)?;
        for (key, value) in &self.payload {
            if key != "type" {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
