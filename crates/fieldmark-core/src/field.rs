//! Typed view of a field payload
//!
//! The scanner hands back an untyped JSON object. Forms and renderers work
//! with [`ParsedField`], which names the keys they understand and carries
//! everything else (palette, categories, ...) through untouched.

use crate::node::Payload;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// An example field, `user.name`, encoded as markup
pub const EXAMPLE_USER_FIELD_MARKDOWN: &str = r#"!{field{"icon": "user", "name": "user.name", "value": "foozle", "operator": ":", "palette": "2", "categories": 5}}"#;

/// An example field, `process.name`, encoded as markup
pub const EXAMPLE_PROCESS_FIELD_MARKDOWN: &str = r#"!{field{"icon": "console", "name": "process.name", "value": "foo.exe", "operator": ":", "palette": "2", "categories": 5}}"#;

/// Query operator applied to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryOperator {
    /// `field: value`
    #[default]
    #[serde(rename = ":")]
    Is,
    /// `field:*`
    #[serde(rename = ":*")]
    Exists,
}

impl QueryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOperator::Is => ":",
            QueryOperator::Exists => ":*",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field value, either a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Number(Number),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n.into())
    }
}

/// A field as edited through the form and drawn by the badge renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedField {
    /// Icon name; an empty icon is treated as no icon
    #[serde(default, skip_serializing_if = "is_blank")]
    pub icon: Option<String>,
    /// Field name, e.g. `user.name`
    pub name: String,
    #[serde(default)]
    pub operator: QueryOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Keys this type does not model (palette, categories, ...)
    #[serde(flatten)]
    pub extra: Payload,
}

fn is_blank(icon: &Option<String>) -> bool {
    icon.as_deref().map_or(true, str::is_empty)
}

impl ParsedField {
    /// Create a field with no icon and no value
    pub fn new(name: impl Into<String>, operator: QueryOperator) -> Self {
        Self {
            icon: None,
            name: name.into(),
            operator,
            value: None,
            extra: Payload::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach an extra option such as `palette` or `categories`
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Icon, if one is set and non-empty
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|icon| !icon.is_empty())
    }

    /// Interpret an untyped payload
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        serde_json::from_value(Value::Object(payload.clone()))
            .map_err(|e| Error::InvalidField(e.to_string()))
    }

    /// Convert back into an untyped payload
    pub fn to_payload(&self) -> Result<Payload> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::InvalidField(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}
