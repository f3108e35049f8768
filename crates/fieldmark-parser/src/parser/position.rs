//! Source positions

use serde::Serialize;

/// A place in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number in chars (1-indexed)
    pub column: usize,
    /// Byte offset (0-indexed)
    pub offset: usize,
}

impl Default for Point {
    fn default() -> Self {
        Self::start()
    }
}

impl Point {
    /// The first char of a document
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// The point reached after consuming `consumed` from here
    pub fn advance(self, consumed: &str) -> Self {
        let mut point = self;
        for ch in consumed.chars() {
            if ch == '\n' {
                point.line += 1;
                point.column = 1;
            } else {
                point.column += 1;
            }
        }
        point.offset += consumed.len();
        point
    }

    /// The point of byte `offset` in `text`
    ///
    /// Offsets past the end clamp to the end; offsets inside a char clamp
    /// back to its start.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self::start().advance(&text[..end])
    }
}

/// Start and end of a node, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// First char of the node
    pub start: Point,
    /// Point just past the node
    pub end: Point,
}

impl Position {
    /// Create a position
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
