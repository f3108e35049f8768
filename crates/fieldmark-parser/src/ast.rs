//! Inline syntax tree produced by [`InlineParser`](crate::InlineParser)

use crate::parser::{Diagnostic, Position};
use crate::Result;
use fieldmark_core::{Badge, FieldNode, FieldSerializer, FIELD_NODE_TYPE};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Content of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain text
    Text(String),
    /// A field token
    Field(FieldNode),
}

/// A node with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node holds
    pub kind: NodeKind,
    /// Where it came from
    pub position: Position,
}

impl Node {
    /// Create a node
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// `"text"` or the field discriminator
    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            NodeKind::Text(_) => "text",
            NodeKind::Field(_) => FIELD_NODE_TYPE,
        }
    }

    /// The field node, if this is one
    pub fn as_field(&self) -> Option<&FieldNode> {
        match &self.kind {
            NodeKind::Field(field) => Some(field),
            NodeKind::Text(_) => None,
        }
    }

    /// The text, if this is a text node
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Field(_) => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.node_type())?;
        match &self.kind {
            NodeKind::Text(text) => map.serialize_entry("value", text)?,
            NodeKind::Field(field) => {
                for (key, value) in &field.payload {
                    if key != "type" && key != "position" {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }
        map.serialize_entry("position", &self.position)?;
        map.end()
    }
}

/// A parsed document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Nodes in source order
    pub children: Vec<Node>,
    /// Problems recorded while parsing
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Field nodes in source order
    pub fn fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.children.iter().filter_map(Node::as_field)
    }

    /// Whether any diagnostics were recorded
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Badges for every field node
    ///
    /// Fails on the first field whose payload does not describe a field.
    pub fn badges(&self) -> Result<Vec<Badge>> {
        self.fields()
            .map(|field| Badge::from_node(field).map_err(crate::Error::from))
            .collect()
    }

    /// Write the document back out as markup
    ///
    /// Text is copied verbatim; fields are re-serialized with `serializer`.
    pub fn to_markup(&self, serializer: &FieldSerializer) -> Result<String> {
        let mut out = String::new();
        for node in &self.children {
            match &node.kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Field(field) => out.push_str(&serializer.serialize_node(field)?),
            }
        }
        Ok(out)
    }

    /// Root node as JSON, in the shape editors show as the AST
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| crate::Error::Core(e.into()))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "root")?;
        map.serialize_entry("children", &self.children)?;
        map.serialize_entry("messages", &self.diagnostics)?;
        map.end()
    }
}
