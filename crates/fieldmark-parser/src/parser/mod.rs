//! Field markup parser
//!
//! This module implements the field scanner and the inline host that drives it.

pub mod diagnostic;
pub mod inline;
pub mod position;
pub mod scanner;
pub mod tokenizer;

pub use diagnostic::Diagnostic;
pub use inline::InlineParser;
pub use position::{Point, Position};
pub use scanner::{locate_field, BraceFloor, FieldMatch, FieldScanner, Scan, ScanState};
pub use tokenizer::{FieldTokenizer, InlineContext, InlineTokenizer, TextTokenizer, Tokenized};
