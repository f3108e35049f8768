//! Scanner for `!{field...}` tokens
//!
//! A token is the marker `!{field` followed either by `}` (no configuration)
//! or by a JSON object whose braces are counted until the `{` opened by the
//! marker is closed:
//!
//! ```text
//! !{field}                      empty payload
//! !{field{"name":"user.name"}}  payload {"name": "user.name"}
//!        ^------ config -----^
//! ```
//!
//! Braces are counted without regard to JSON strings.

use super::diagnostic::Diagnostic;
use super::position::Point;
use fieldmark_core::{FieldNode, Payload, FIELD_MARKER};
use tracing::trace;

/// Default prefix of the message reported for malformed configurations
pub const JSON_PARSE_ERROR: &str = "Unable to parse field JSON configuration";

/// Name the field tokenizer reports diagnostics under
pub const FIELD_TOKENIZER: &str = "field";

/// States of a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Checking for the literal marker
    ScanningPrefix,
    /// Marker found, the next char must be `{` or `}`
    ExpectBrace,
    /// Inside the configuration; `depth` counts unclosed `{` since the marker
    CollectingConfig {
        /// Open braces inside the configuration
        depth: usize,
    },
    /// A token was recognized
    Done,
    /// No token here; the caller treats the text as plain text
    Failed,
}

impl ScanState {
    /// Transition on one char of the configuration
    ///
    /// A `}` at depth zero closes the marker's brace and ends the token.
    pub fn step(self, ch: char) -> Self {
        match self {
            ScanState::CollectingConfig { depth } => match ch {
                '{' => ScanState::CollectingConfig { depth: depth + 1 },
                '}' if depth == 0 => ScanState::Done,
                '}' => ScanState::CollectingConfig { depth: depth - 1 },
                _ => self,
            },
            other => other,
        }
    }

    /// Whether the scan has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Done | ScanState::Failed)
    }
}

/// A recognized token
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Bytes consumed from the scan offset
    pub len: usize,
    /// Parsed node
    pub node: FieldNode,
}

/// Outcome of a scan
#[derive(Debug, Clone, PartialEq)]
pub enum Scan {
    /// No token starts here
    NoMatch,
    /// Silent scans only: a token would be attempted here
    Probe,
    /// A token was recognized
    Token(FieldMatch),
    /// The token's configuration is not valid JSON; nothing was emitted
    Invalid(Diagnostic),
}

impl Scan {
    /// The recognized token, if any
    pub fn token(&self) -> Option<&FieldMatch> {
        match self {
            Scan::Token(m) => Some(m),
            _ => None,
        }
    }

    /// The diagnostic, if the configuration was malformed
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Scan::Invalid(d) => Some(d),
            _ => None,
        }
    }
}

/// Recognizes field tokens at a given offset
#[derive(Debug, Clone)]
pub struct FieldScanner {
    error_message: String,
}

impl Default for FieldScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldScanner {
    /// Create a scanner reporting [`JSON_PARSE_ERROR`] on malformed payloads
    pub fn new() -> Self {
        Self::with_error_message(JSON_PARSE_ERROR)
    }

    /// Create a scanner with a custom malformed-payload message prefix
    pub fn with_error_message(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }

    /// Scan `text` at byte `offset`
    ///
    /// With `silent` set the scanner stops once the marker and the brace
    /// after it are seen, returning [`Scan::Probe`] without parsing the
    /// configuration or reporting anything. Offsets past the end or inside a
    /// char never match.
    ///
    /// An unclosed configuration is only found to be unclosed at the end of
    /// `text`, so scanning every marker of a document this way is quadratic
    /// in the worst case. Hosts scanning many offsets of one document use
    /// [`scan_with`](Self::scan_with).
    pub fn scan(&self, text: &str, offset: usize, silent: bool) -> Scan {
        self.scan_with(text, offset, silent, None)
    }

    /// [`scan`](Self::scan), rejecting unclosed configurations up front
    /// when `braces` is the [`BraceFloor`] of `text`
    pub fn scan_with(
        &self,
        text: &str,
        offset: usize,
        silent: bool,
        braces: Option<&BraceFloor>,
    ) -> Scan {
        let Some(rest) = text.get(offset..) else {
            return Scan::NoMatch;
        };

        let mut state = ScanState::ScanningPrefix;
        let mut config = None;

        while !state.is_terminal() {
            state = match state {
                ScanState::ScanningPrefix => {
                    if rest.starts_with(FIELD_MARKER) {
                        ScanState::ExpectBrace
                    } else {
                        ScanState::Failed
                    }
                }
                ScanState::ExpectBrace => match rest[FIELD_MARKER.len()..].chars().next() {
                    Some('{') | Some('}') if silent => return Scan::Probe,
                    Some('{') => ScanState::CollectingConfig { depth: 0 },
                    Some('}') => ScanState::Done,
                    _ => ScanState::Failed,
                },
                ScanState::CollectingConfig { .. } => {
                    let body_start = offset + FIELD_MARKER.len();
                    if braces.is_some_and(|b| !b.closes_enclosing(body_start)) {
                        trace!(offset, "unclosed field configuration");
                        return Scan::NoMatch;
                    }
                    match collect_config(&rest[FIELD_MARKER.len()..]) {
                        Some(found) => {
                            config = Some(found);
                            ScanState::Done
                        }
                        // unterminated; plain text
                        None => ScanState::Failed,
                    }
                }
                ScanState::Done | ScanState::Failed => state,
            };
        }

        if state == ScanState::Failed {
            return Scan::NoMatch;
        }

        let Some(config) = config else {
            trace!(offset, "empty field token");
            return Scan::Token(FieldMatch {
                len: FIELD_MARKER.len() + 1,
                node: FieldNode::empty(),
            });
        };

        match parse_config(config) {
            Ok(payload) => {
                let len = FIELD_MARKER.len() + config.len() + 1;
                trace!(offset, len, keys = payload.len(), "field token");
                Scan::Token(FieldMatch {
                    len,
                    node: FieldNode::new(payload),
                })
            }
            Err(e) => {
                let config_start = offset + FIELD_MARKER.len();
                let point = error_point(text, config_start, config, &e);
                let message = format!("{}: {}", self.error_message, describe(&e));
                Scan::Invalid(Diagnostic::new(message, point, FIELD_TOKENIZER))
            }
        }
    }
}

/// Brace balance of a document and the lowest balance reached from each
/// byte offset on
///
/// A configuration closes exactly when the balance after it drops below its
/// value at the configuration's first brace, which this answers without
/// walking the rest of the document.
#[derive(Debug, Clone, Default)]
pub struct BraceFloor {
    balance: Vec<isize>,
    floor: Vec<isize>,
}

impl BraceFloor {
    /// Index the braces of `text`
    pub fn new(text: &str) -> Self {
        let mut balance = Vec::with_capacity(text.len() + 1);
        let mut depth = 0isize;
        balance.push(depth);
        // braces are ASCII, so bytes inside multi-byte chars never match
        for byte in text.bytes() {
            match byte {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
            balance.push(depth);
        }

        let mut floor = balance.clone();
        for i in (0..text.len()).rev() {
            floor[i] = floor[i].min(floor[i + 1]);
        }

        Self { balance, floor }
    }

    /// Whether some `}` at or after byte `at` closes a brace opened before it
    ///
    /// Offsets past the end never close.
    pub fn closes_enclosing(&self, at: usize) -> bool {
        match (self.balance.get(at), self.floor.get(at)) {
            (Some(balance), Some(floor)) => floor < balance,
            _ => false,
        }
    }
}

/// Byte offset of the next field marker at or after `from`
///
/// Returns `None` when there is none or `from` is not a valid offset.
pub fn locate_field(text: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(FIELD_MARKER).map(|i| from + i)
}

/// Configuration text from its opening `{` up to (not including) the brace
/// that closes the marker
fn collect_config(body: &str) -> Option<&str> {
    let mut state = ScanState::CollectingConfig { depth: 0 };
    for (i, ch) in body.char_indices() {
        state = state.step(ch);
        if state == ScanState::Done {
            return Some(&body[..i]);
        }
    }
    None
}

fn parse_config(config: &str) -> Result<Payload, serde_json::Error> {
    serde_json::from_str(config)
}

/// serde_json's message without its own ` at line L column C` suffix
fn describe(e: &serde_json::Error) -> String {
    let full = e.to_string();
    let suffix = format!(" at line {} column {}", e.line(), e.column());
    match full.strip_suffix(&suffix) {
        Some(message) => message.to_string(),
        None => full,
    }
}

/// Absolute point of a JSON error inside the configuration
///
/// Points at the char serde_json stopped on, not at the configuration's
/// opening brace: `!{field{bad json}}` reports column 9.
fn error_point(text: &str, config_start: usize, config: &str, e: &serde_json::Error) -> Point {
    let mut line_start = 0;
    for _ in 1..e.line() {
        match config[line_start..].find('\n') {
            Some(i) => line_start += i + 1,
            None => break,
        }
    }

    // serde_json columns are 1-indexed bytes
    let mut index = (line_start + e.column().saturating_sub(1)).min(config.len());
    while !config.is_char_boundary(index) {
        index -= 1;
    }

    Point::locate(text, config_start + index)
}
