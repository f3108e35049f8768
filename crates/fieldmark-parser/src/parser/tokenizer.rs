//! Inline tokenizer capability and the built-in tokenizers

use super::diagnostic::Diagnostic;
use super::position::Point;
use super::scanner::{locate_field, BraceFloor, FieldScanner, Scan, FIELD_TOKENIZER};
use crate::ast::NodeKind;
use fieldmark_core::FIELD_MARKER;
use std::cell::OnceCell;

/// Result of offering the current offset to a tokenizer
#[derive(Debug, Clone, PartialEq)]
pub enum Tokenized {
    /// Nothing recognized here
    NoMatch,
    /// Silent mode only: this tokenizer would take the offset
    Probe,
    /// Consume `len` bytes and record `node`
    Eat {
        /// Bytes consumed from the current offset
        len: usize,
        /// Node to record for the consumed span
        node: NodeKind,
    },
}

/// What the host exposes to a tokenizer for one attempt
pub struct InlineContext<'a> {
    text: &'a str,
    offset: usize,
    now: Point,
    next_candidate: Option<usize>,
    tokenizer: &'static str,
    diagnostics: &'a mut Vec<Diagnostic>,
    braces: Option<&'a OnceCell<BraceFloor>>,
}

impl<'a> InlineContext<'a> {
    pub(crate) fn new(
        text: &'a str,
        offset: usize,
        now: Point,
        next_candidate: Option<usize>,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            text,
            offset,
            now,
            next_candidate,
            tokenizer: "",
            diagnostics,
            braces: None,
        }
    }

    /// Share one lazily built brace index across every attempt on a document
    pub(crate) fn with_braces(mut self, braces: &'a OnceCell<BraceFloor>) -> Self {
        self.braces = Some(braces);
        self
    }

    pub(crate) fn set_tokenizer(&mut self, name: &'static str) {
        self.tokenizer = name;
    }

    /// The whole document
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Current byte offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Text from the current offset on
    pub fn rest(&self) -> &'a str {
        self.text.get(self.offset..).unwrap_or("")
    }

    /// Point of the current offset
    pub fn now(&self) -> Point {
        self.now
    }

    /// Nearest offset after the current char where some tokenizer's locator
    /// reported a candidate
    pub fn next_candidate(&self) -> Option<usize> {
        self.next_candidate
    }

    /// Brace index of the whole document, built on first use
    ///
    /// `None` when the host does not share one.
    pub fn brace_floor(&self) -> Option<&'a BraceFloor> {
        let text = self.text;
        self.braces.map(|cell| cell.get_or_init(|| BraceFloor::new(text)))
    }

    /// Record a diagnostic at `point`; parsing continues
    pub fn fail(&mut self, message: impl Into<String>, point: Point) {
        self.diagnostics
            .push(Diagnostic::new(message, point, self.tokenizer));
    }
}

/// A tokenizer the inline host can try at each offset
///
/// Tokenizers are tried in registration order; the first to eat wins.
pub trait InlineTokenizer: Send + Sync {
    /// Name used for ordering and in diagnostics
    fn name(&self) -> &'static str;

    /// Try to recognize a node at `cx.offset()`
    fn tokenize(&self, cx: &mut InlineContext<'_>, silent: bool) -> Tokenized;

    /// Next offset at or after `from` where this tokenizer could match
    ///
    /// Lets text consumption skip ahead without trying every char.
    fn locate(&self, _text: &str, _from: usize) -> Option<usize> {
        None
    }
}

/// Tokenizer for `!{field...}` tokens
#[derive(Debug, Clone, Default)]
pub struct FieldTokenizer {
    scanner: FieldScanner,
}

impl FieldTokenizer {
    /// Create a tokenizer using `scanner`
    pub fn new(scanner: FieldScanner) -> Self {
        Self { scanner }
    }
}

impl InlineTokenizer for FieldTokenizer {
    fn name(&self) -> &'static str {
        FIELD_TOKENIZER
    }

    fn tokenize(&self, cx: &mut InlineContext<'_>, silent: bool) -> Tokenized {
        let braces = if !silent && cx.rest().starts_with(FIELD_MARKER) {
            cx.brace_floor()
        } else {
            None
        };
        match self.scanner.scan_with(cx.text(), cx.offset(), silent, braces) {
            Scan::NoMatch => Tokenized::NoMatch,
            Scan::Probe => Tokenized::Probe,
            Scan::Token(m) => Tokenized::Eat {
                len: m.len,
                node: NodeKind::Field(m.node),
            },
            Scan::Invalid(diagnostic) => {
                cx.fail(diagnostic.message, diagnostic.point);
                Tokenized::NoMatch
            }
        }
    }

    fn locate(&self, text: &str, from: usize) -> Option<usize> {
        locate_field(text, from)
    }
}

/// Plain text, consumed up to the next candidate of another tokenizer
///
/// Always takes at least one char, so it belongs last in the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTokenizer;

/// Name of the text tokenizer
pub const TEXT_TOKENIZER: &str = "text";

impl InlineTokenizer for TextTokenizer {
    fn name(&self) -> &'static str {
        TEXT_TOKENIZER
    }

    fn tokenize(&self, cx: &mut InlineContext<'_>, silent: bool) -> Tokenized {
        let rest = cx.rest();
        if rest.is_empty() {
            return Tokenized::NoMatch;
        }
        if silent {
            return Tokenized::Probe;
        }

        let len = match cx.next_candidate() {
            Some(candidate) if candidate > cx.offset() => (candidate - cx.offset()).min(rest.len()),
            _ => rest.len(),
        };
        let len = if rest.is_char_boundary(len) { len } else { rest.len() };

        Tokenized::Eat {
            len,
            node: NodeKind::Text(rest[..len].to_string()),
        }
    }
}
