//! Writes nodes and form fields back out as `!{field{...}}` markup
//!
//! The scanner finds the end of a token by counting braces without looking
//! inside JSON strings, so braces inside string values are written as
//! `\u007b` / `\u007d` escapes. The output therefore always rescans to the
//! same payload.

use crate::field::ParsedField;
use crate::node::{FieldNode, Payload};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Value;
use std::io;

/// Literal prefix of every field token
pub const FIELD_MARKER: &str = "!{field";

/// Serializer for field markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSerializer {
    indent: usize,
}

impl Default for FieldSerializer {
    /// One-space indent, matching the markup produced by the field form
    fn default() -> Self {
        Self { indent: 1 }
    }
}

impl FieldSerializer {
    /// `indent` of zero writes compact JSON
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn serialize_node(&self, node: &FieldNode) -> Result<String> {
        self.serialize_payload(&node.payload)
    }

    pub fn serialize_field(&self, field: &ParsedField) -> Result<String> {
        self.serialize_payload(&field.to_payload()?)
    }

    /// An empty payload is written as the bare `!{field}` form
    pub fn serialize_payload(&self, payload: &Payload) -> Result<String> {
        if payload.is_empty() {
            return Ok(format!("{}}}", FIELD_MARKER));
        }

        let json = self.write_json(&Value::Object(payload.clone()))?;
        Ok(format!("{}{}}}", FIELD_MARKER, json))
    }

    fn write_json(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        if self.indent == 0 {
            let formatter = BraceEscaping::new(CompactFormatter);
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        } else {
            let indent = " ".repeat(self.indent);
            let formatter = BraceEscaping::new(PrettyFormatter::with_indent(indent.as_bytes()));
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
        String::from_utf8(buf).map_err(|e| Error::InvalidField(e.to_string()))
    }
}

/// Serialize a form field with the default serializer
pub fn serialize_field(field: &ParsedField) -> Result<String> {
    FieldSerializer::default().serialize_field(field)
}

/// Serialize a scanned node with the default serializer
pub fn serialize_node(node: &FieldNode) -> Result<String> {
    FieldSerializer::default().serialize_node(node)
}

/// Formatter wrapper that escapes braces inside strings
struct BraceEscaping<F> {
    inner: F,
}

impl<F: Formatter> BraceEscaping<F> {
    fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for BraceEscaping<F> {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, byte) in fragment.bytes().enumerate() {
            let escape: &[u8] = match byte {
                b'{' => b"\\u007b",
                b'}' => b"\\u007d",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..i])?;
            writer.write_all(escape)?;
            start = i + 1;
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}
