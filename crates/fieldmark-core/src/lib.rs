//! Core model for `!{field...}` markup
//!
//! Payload and node types shared by the scanner, the serializer that writes
//! the literal markup back out, and the badge model consumed by renderers.

pub mod field;
pub mod node;
pub mod render;
pub mod serialize;

// Test utilities (available in tests and when used as a dependency with the testing feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use field::{FieldValue, ParsedField, QueryOperator};
pub use node::{FieldNode, Payload, FIELD_NODE_TYPE};
pub use render::Badge;
pub use serialize::{serialize_field, serialize_node, FieldSerializer, FIELD_MARKER};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid field configuration: {0}")]
    InvalidField(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
