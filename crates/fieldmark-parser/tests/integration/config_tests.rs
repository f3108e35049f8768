//! Loading parser options from disk

use fieldmark_parser::{Error, InlineParser, ParserOptions};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"parse_error_message": "Bad field", "serialize_indent": 0}}"#
    )
    .unwrap();

    let options = ParserOptions::from_file(file.path()).unwrap();
    assert_eq!(options.parse_error_message, "Bad field");
    assert_eq!(options.serialize_indent, 0);
    assert!(options.merge_text);

    let doc = InlineParser::with_options(&options).parse("!{field{x}}");
    assert!(doc.diagnostics[0].message.starts_with("Bad field: "));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ParserOptions::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_invalid_file_names_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    match ParserOptions::from_file(file.path()) {
        Err(Error::Config { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected config error, got {:?}", other),
    }
}
