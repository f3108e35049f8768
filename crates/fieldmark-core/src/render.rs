//! Badge model handed to renderers

use crate::field::ParsedField;
use crate::node::FieldNode;
use crate::Result;
use serde::{Deserialize, Serialize};

/// What a renderer needs to draw a field badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Field name shown on the badge
    pub field: String,
    pub icon_type: Option<String>,
    /// Value as display text; numbers keep their JSON form
    pub value: Option<String>,
}

impl Badge {
    /// Build a badge from a scanned node
    ///
    /// Fails when the payload has no `name` or carries keys of the wrong type.
    pub fn from_node(node: &FieldNode) -> Result<Self> {
        Ok(Self::from(&node.parsed_field()?))
    }
}

impl From<&ParsedField> for Badge {
    fn from(field: &ParsedField) -> Self {
        Self {
            field: field.name.clone(),
            icon_type: field.icon().map(str::to_string),
            value: field.value.as_ref().map(|v| v.to_string()),
        }
    }
}
