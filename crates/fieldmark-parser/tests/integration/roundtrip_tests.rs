//! Serialize then rescan

use fieldmark_core::field::EXAMPLE_USER_FIELD_MARKDOWN;
use fieldmark_core::testing::sample_field;
use fieldmark_core::{
    serialize_field, serialize_node, FieldNode, FieldSerializer, ParsedField, QueryOperator,
};
use fieldmark_parser::{FieldScanner, InlineParser, ParserOptions};

fn rescan(markup: &str) -> FieldNode {
    let scan = FieldScanner::new().scan(markup, 0, false);
    let m = scan.token().cloned().unwrap_or_else(|| panic!("no token in {:?}: {:?}", markup, scan));
    assert_eq!(m.len, markup.len());
    m.node
}

#[test]
fn test_scanned_node_round_trips() {
    let original = FieldScanner::new()
        .scan(EXAMPLE_USER_FIELD_MARKDOWN, 0, false)
        .token()
        .cloned()
        .unwrap()
        .node;

    let markup = serialize_node(&original).unwrap();
    assert_eq!(rescan(&markup), original);
}

#[test]
fn test_empty_node_round_trips() {
    let markup = serialize_node(&FieldNode::empty()).unwrap();
    assert_eq!(markup, "!{field}");
    assert!(rescan(&markup).is_empty());
}

#[test]
fn test_form_field_round_trips() {
    let field = ParsedField::new("host.name", QueryOperator::Exists).with_icon("node");
    let markup = serialize_field(&field).unwrap();
    assert_eq!(rescan(&markup).parsed_field().unwrap(), field);
}

#[test]
fn test_braces_in_values_round_trip() {
    let field = ParsedField::new("message", QueryOperator::Is).with_value("}{ {nested} }}");
    for indent in [0, 1, 4] {
        let markup = FieldSerializer::new(indent).serialize_field(&field).unwrap();
        assert_eq!(rescan(&markup).parsed_field().unwrap(), field, "indent {}", indent);
    }
}

#[test]
fn test_numeric_and_extra_options_round_trip() {
    let field = sample_field("destination.port", "x").with_value(443i64);
    let markup = serialize_field(&field).unwrap();
    assert_eq!(rescan(&markup).parsed_field().unwrap(), field);
}

#[test]
fn test_document_round_trip() {
    let text = format!(
        "Seen {} on {} today.",
        serialize_field(&sample_field("user.name", "root")).unwrap(),
        "!{field}"
    );
    let options = ParserOptions::default();
    let parser = InlineParser::with_options(&options);

    let first = parser.parse(&text);
    let rewritten = first.to_markup(&options.serializer()).unwrap();
    assert_eq!(rewritten, text);

    let second = parser.parse(&rewritten);
    assert_eq!(
        first.fields().collect::<Vec<_>>(),
        second.fields().collect::<Vec<_>>()
    );
}
