//! Parser options

use crate::parser::scanner::JSON_PARSE_ERROR;
use crate::{Error, Result};
use fieldmark_core::FieldSerializer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for [`InlineParser`](crate::InlineParser) and the serializer
///
/// Every key is optional in JSON; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// Prefix of the diagnostic for malformed field configurations
    pub parse_error_message: String,
    /// Merge adjacent text nodes
    pub merge_text: bool,
    /// Recognize field tokens; when off, markers stay plain text
    pub field_tokenizer: bool,
    /// JSON indent used when writing fields back out; 0 is compact
    pub serialize_indent: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            parse_error_message: JSON_PARSE_ERROR.to_string(),
            merge_text: true,
            field_tokenizer: true,
            serialize_indent: 1,
        }
    }
}

impl ParserOptions {
    /// Parse options from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load options from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serializer configured with [`serialize_indent`](Self::serialize_indent)
    pub fn serializer(&self) -> FieldSerializer {
        FieldSerializer::new(self.serialize_indent)
    }
}
