//! Positioned, non-fatal parse messages

use super::position::Point;
use serde::Serialize;
use thiserror::Error;

/// A message recorded while parsing, pinned to a point in the source
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}:{}: {}", .point.line, .point.column, .message)]
pub struct Diagnostic {
    /// Human readable description
    pub message: String,
    /// Where the problem is
    pub point: Point,
    /// Name of the tokenizer that reported it
    pub tokenizer: &'static str,
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(message: impl Into<String>, point: Point, tokenizer: &'static str) -> Self {
        Self {
            message: message.into(),
            point,
            tokenizer,
        }
    }

    /// Line number (1-indexed)
    pub fn line(&self) -> usize {
        self.point.line
    }

    /// Column number (1-indexed)
    pub fn column(&self) -> usize {
        self.point.column
    }
}
