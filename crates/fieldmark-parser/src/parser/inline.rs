//! Inline host parser
//!
//! Walks a document left to right. At each offset the registered tokenizers
//! are tried in order and the first one that eats wins. The text tokenizer
//! sits last and stops at the nearest offset any other tokenizer's locator
//! reports, so ordinary prose is consumed in runs rather than char by char.

use super::diagnostic::Diagnostic;
use super::position::{Point, Position};
use super::scanner::{BraceFloor, FieldScanner};
use super::tokenizer::{
    FieldTokenizer, InlineContext, InlineTokenizer, TextTokenizer, Tokenized, TEXT_TOKENIZER,
};
use crate::ast::{Document, Node, NodeKind};
use crate::config::ParserOptions;
use std::cell::OnceCell;
use tracing::debug;

/// Host for an ordered list of inline tokenizers
pub struct InlineParser {
    tokenizers: Vec<Box<dyn InlineTokenizer>>,
    merge_text: bool,
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineParser {
    /// Parser with the field tokenizer ahead of text
    pub fn new() -> Self {
        Self::with_options(&ParserOptions::default())
    }

    /// Parser built from `options`
    pub fn with_options(options: &ParserOptions) -> Self {
        let mut parser = Self::text_only();
        parser.merge_text = options.merge_text;
        if options.field_tokenizer {
            let scanner = FieldScanner::with_error_message(options.parse_error_message.clone());
            parser.register_before(TEXT_TOKENIZER, Box::new(FieldTokenizer::new(scanner)));
        }
        parser
    }

    /// Parser that only knows plain text
    pub fn text_only() -> Self {
        Self {
            tokenizers: vec![Box::new(TextTokenizer)],
            merge_text: true,
        }
    }

    /// Insert `tokenizer` ahead of the tokenizer named `anchor`
    ///
    /// Appends when no tokenizer has that name.
    pub fn register_before(&mut self, anchor: &str, tokenizer: Box<dyn InlineTokenizer>) {
        let index = self
            .tokenizers
            .iter()
            .position(|t| t.name() == anchor)
            .unwrap_or(self.tokenizers.len());
        self.tokenizers.insert(index, tokenizer);
    }

    /// Names of the registered tokenizers, in priority order
    pub fn tokenizer_names(&self) -> Vec<&'static str> {
        self.tokenizers.iter().map(|t| t.name()).collect()
    }

    /// Parse a whole document
    ///
    /// Never fails: malformed tokens are recorded as diagnostics and their
    /// text is kept as plain text. Runs in linear time for unclosed markers
    /// too, since their brace structure is indexed once per document.
    pub fn parse(&self, text: &str) -> Document {
        let mut children: Vec<Node> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let braces: OnceCell<BraceFloor> = OnceCell::new();
        let mut offset = 0;
        let mut now = Point::start();

        while offset < text.len() {
            let next_candidate = self.next_candidate(text, offset);
            let mut eaten = None;

            for tokenizer in &self.tokenizers {
                let mut cx = InlineContext::new(text, offset, now, next_candidate, &mut diagnostics)
                    .with_braces(&braces);
                cx.set_tokenizer(tokenizer.name());
                if let Tokenized::Eat { len, node } = tokenizer.tokenize(&mut cx, false) {
                    if let Some(consumed) = text.get(offset..offset + len).filter(|s| !s.is_empty()) {
                        eaten = Some((consumed, node));
                        break;
                    }
                }
            }

            // a list without a text tokenizer still has to make progress
            let (consumed, kind) = match eaten {
                Some(found) => found,
                None => {
                    let len = text[offset..].chars().next().map_or(1, char::len_utf8);
                    let consumed = &text[offset..offset + len];
                    (consumed, NodeKind::Text(consumed.to_string()))
                }
            };

            let end = now.advance(consumed);
            self.push(&mut children, Node::new(kind, Position::new(now, end)));
            offset = end.offset;
            now = end;
        }

        for diagnostic in &diagnostics {
            debug!(
                line = diagnostic.line(),
                column = diagnostic.column(),
                tokenizer = diagnostic.tokenizer,
                "{}",
                diagnostic.message
            );
        }
        debug!(
            nodes = children.len(),
            diagnostics = diagnostics.len(),
            bytes = text.len(),
            "parsed document"
        );

        Document {
            children,
            diagnostics,
        }
    }

    /// Name of the first tokenizer that would take `offset`, without eating
    /// anything or recording diagnostics
    pub fn probe(&self, text: &str, offset: usize) -> Option<&'static str> {
        let mut scratch = Vec::new();
        let now = Point::locate(text, offset);
        let next_candidate = self.next_candidate(text, offset);
        self.tokenizers.iter().find_map(|tokenizer| {
            let mut cx = InlineContext::new(text, offset, now, next_candidate, &mut scratch);
            match tokenizer.tokenize(&mut cx, true) {
                Tokenized::NoMatch => None,
                Tokenized::Probe | Tokenized::Eat { .. } => Some(tokenizer.name()),
            }
        })
    }

    /// Nearest locator hit after the char at `offset`
    fn next_candidate(&self, text: &str, offset: usize) -> Option<usize> {
        let first = text.get(offset..)?.chars().next()?;
        let from = offset + first.len_utf8();
        self.tokenizers
            .iter()
            .filter_map(|t| t.locate(text, from))
            .min()
    }

    fn push(&self, children: &mut Vec<Node>, node: Node) {
        if self.merge_text {
            if let (Some(last), NodeKind::Text(text)) = (children.last_mut(), &node.kind) {
                if let NodeKind::Text(previous) = &mut last.kind {
                    previous.push_str(text);
                    last.position.end = node.position.end;
                    return;
                }
            }
        }
        children.push(node);
    }
}
