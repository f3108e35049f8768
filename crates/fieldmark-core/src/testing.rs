//! Test utilities and helper functions for fieldmark tests
//!
//! Shared builders for sample fields and documents so parser tests and
//! benchmarks do not each hand-write markup.

use crate::field::{ParsedField, QueryOperator};
use crate::serialize::FieldSerializer;

/// Create a typical `user.name` field with an icon and a value
pub fn sample_field(name: &str, value: &str) -> ParsedField {
    ParsedField::new(name, QueryOperator::Is)
        .with_icon("user")
        .with_value(value)
        .with_option("palette", "2")
        .with_option("categories", 5)
}

/// Compact markup for a field
pub fn field_markup(field: &ParsedField) -> String {
    // ParsedField always produces an object payload
    FieldSerializer::new(0)
        .serialize_field(field)
        .unwrap_or_else(|e| panic!("failed to serialize test field: {}", e))
}

/// Build a document with `fields` field tokens separated by prose
///
/// Every fourth paragraph also carries a malformed token and a bare
/// `!{field}` so parsers see all three outcomes.
pub fn sample_document(fields: usize) -> String {
    let mut doc = String::new();
    for i in 0..fields {
        let field = sample_field(&format!("host.name.{}", i), &format!("value-{}", i));
        doc.push_str("Event from ");
        doc.push_str(&field_markup(&field));
        doc.push_str(" was seen {with braces} and !{other} markers.\n");
        if i % 4 == 3 {
            doc.push_str("Broken !{field{oops}} and empty !{field} tokens.\n\n");
        }
    }
    doc
}
