//! Scanner behavior at arbitrary offsets

use fieldmark_core::field::{EXAMPLE_PROCESS_FIELD_MARKDOWN, EXAMPLE_USER_FIELD_MARKDOWN};
use fieldmark_core::{Badge, ParsedField, QueryOperator};
use fieldmark_parser::{FieldScanner, Scan};
use serde_json::json;

#[test]
fn test_no_prefix_at_any_offset() {
    let text = "plain {text} with !{other} and !{fiel";
    let scanner = FieldScanner::new();
    for offset in 0..=text.len() + 1 {
        assert_eq!(scanner.scan(text, offset, false), Scan::NoMatch, "offset {}", offset);
    }
}

#[test]
fn test_empty_field_consumes_eight() {
    let m = FieldScanner::new().scan("!{field}", 0, false);
    let m = m.token().unwrap();
    assert_eq!(m.len, 8);
    assert!(m.node.is_empty());
}

#[test]
fn test_named_field() {
    let text = r#"!{field{"name":"user.name"}}"#;
    let scan = FieldScanner::new().scan(text, 0, false);
    let m = scan.token().unwrap();
    assert_eq!(m.len, text.len());
    assert_eq!(m.node.to_json(), json!({"type": "field", "name": "user.name"}));
}

#[test]
fn test_nested_consumes_entire_span() {
    let text = r#"!{field{"a":{"b":1}}}"#;
    let scan = FieldScanner::new().scan(text, 0, false);
    assert_eq!(scan.token().unwrap().len, text.len());
}

#[test]
fn test_malformed_reports_column_without_token() {
    let scan = FieldScanner::new().scan("!{field{bad json}}", 0, false);
    assert!(scan.token().is_none());
    let diag = scan.diagnostic().unwrap();
    assert_eq!((diag.line(), diag.column()), (1, 9));
}

#[test]
fn test_example_fields() {
    let scanner = FieldScanner::new();

    let user = scanner.scan(EXAMPLE_USER_FIELD_MARKDOWN, 0, false);
    let user = user.token().unwrap();
    assert_eq!(user.len, EXAMPLE_USER_FIELD_MARKDOWN.len());

    let field = user.node.parsed_field().unwrap();
    assert_eq!(field.name, "user.name");
    assert_eq!(field.operator, QueryOperator::Is);
    assert_eq!(field.extra.get("categories"), Some(&json!(5)));

    let badge = Badge::from_node(&user.node).unwrap();
    assert_eq!(badge.icon_type.as_deref(), Some("user"));
    assert_eq!(badge.value.as_deref(), Some("foozle"));

    let process = scanner.scan(EXAMPLE_PROCESS_FIELD_MARKDOWN, 0, false);
    let process: ParsedField = process.token().unwrap().node.parsed_field().unwrap();
    assert_eq!(process.name, "process.name");
    assert_eq!(process.icon(), Some("console"));
}

#[test]
fn test_payload_order_is_preserved() {
    let scan = FieldScanner::new().scan(r#"!{field{"z":1,"a":2,"m":3}}"#, 0, false);
    let keys: Vec<_> = scan.token().unwrap().node.payload.keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_unicode_payload() {
    let text = r#"→ !{field{"name":"ユーザー"}} ←"#;
    let offset = text.find('!').unwrap();
    let scan = FieldScanner::new().scan(text, offset, false);
    let m = scan.token().unwrap();
    assert_eq!(&text[offset..offset + m.len], r#"!{field{"name":"ユーザー"}}"#);
}

#[test]
fn test_malformed_unicode_column_counts_chars() {
    let text = "é !{field{é}}";
    let offset = text.find('!').unwrap();
    let scan = FieldScanner::new().scan(text, offset, false);
    let diag = scan.diagnostic().unwrap();
    // `é` inside the braces is the 11th char
    assert_eq!(diag.column(), 11);
}
