//! Whole-document parsing

use fieldmark_core::testing::{field_markup, sample_document, sample_field};
use fieldmark_parser::{
    FieldTokenizer, InlineContext, InlineParser, InlineTokenizer, NodeKind, Tokenized,
};
use serde_json::json;

#[test]
fn test_sample_document() {
    let doc = InlineParser::new().parse(&sample_document(8));

    // 8 configured fields plus 2 bare ones
    assert_eq!(doc.fields().count(), 10);
    // one malformed token per four paragraphs
    assert_eq!(doc.diagnostics.len(), 2);
    assert!(doc.has_errors());

    let names: Vec<_> = doc
        .fields()
        .filter_map(|f| f.get("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(names.len(), 8);
    assert_eq!(names[0], "host.name.0");
    assert_eq!(names[7], "host.name.7");
}

#[test]
fn test_bad_token_does_not_stop_parsing() {
    let text = format!(
        "!{{field{{broken}}}}\n{}\n!{{field{{also: broken}}}}\n{}",
        field_markup(&sample_field("a", "1")),
        field_markup(&sample_field("b", "2")),
    );
    let doc = InlineParser::new().parse(&text);

    assert_eq!(doc.fields().count(), 2);
    assert_eq!(doc.diagnostics.len(), 2);
    assert_eq!(doc.diagnostics[0].line(), 1);
    assert_eq!(doc.diagnostics[1].line(), 3);
}

#[test]
fn test_positions_cover_document() {
    let text = "a\n!{field}\nb !{field{\"name\":\"x\"}}";
    let doc = InlineParser::new().parse(text);

    let mut expected_offset = 0;
    for node in &doc.children {
        assert_eq!(node.position.start.offset, expected_offset);
        expected_offset = node.position.end.offset;
    }
    assert_eq!(expected_offset, text.len());

    let last = doc.children.last().unwrap();
    assert_eq!(last.position.start.line, 3);
    assert_eq!(last.position.start.column, 3);
}

#[test]
fn test_ast_json() {
    let doc = InlineParser::new().parse(r#"hi !{field{"name":"n","type":"x"}}"#);
    let json = doc.to_json().unwrap();

    assert_eq!(json["type"], json!("root"));
    assert_eq!(json["children"][0]["type"], json!("text"));
    assert_eq!(json["children"][1]["type"], json!("field"));
    assert_eq!(json["children"][1]["name"], json!("n"));
    assert_eq!(json["children"][1]["position"]["start"]["offset"], json!(3));
}

#[test]
fn test_diagnostics_in_ast_json() {
    let doc = InlineParser::new().parse("!{field{x}}");
    let json = doc.to_json().unwrap();
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["tokenizer"], json!("field"));
    assert_eq!(messages[0]["point"]["column"], json!(9));
}

/// Recognizes `@@` as a field with no payload, to exercise registration order
struct MentionTokenizer;

impl InlineTokenizer for MentionTokenizer {
    fn name(&self) -> &'static str {
        "mention"
    }

    fn tokenize(&self, cx: &mut InlineContext<'_>, silent: bool) -> Tokenized {
        if !cx.rest().starts_with("@@") {
            return Tokenized::NoMatch;
        }
        if silent {
            return Tokenized::Probe;
        }
        Tokenized::Eat {
            len: 2,
            node: NodeKind::Text("<mention>".to_string()),
        }
    }

    fn locate(&self, text: &str, from: usize) -> Option<usize> {
        text.get(from..)?.find("@@").map(|i| from + i)
    }
}

#[test]
fn test_custom_tokenizer_registration() {
    let mut parser = InlineParser::text_only();
    parser.register_before("text", Box::new(FieldTokenizer::default()));
    parser.register_before("text", Box::new(MentionTokenizer));
    assert_eq!(parser.tokenizer_names(), vec!["field", "mention", "text"]);

    let doc = parser.parse("hey @@ see !{field}");
    assert_eq!(doc.fields().count(), 1);
    assert_eq!(doc.children[0].as_text(), Some("hey <mention> see "));
    assert_eq!(parser.probe("@@", 0), Some("mention"));
}

#[test]
fn test_parser_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InlineParser>();
}
