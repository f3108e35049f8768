// Fieldmark Parser - inline tokenizer for `!{field...}` markup

#![warn(missing_docs)]
//! Scans free-form text for `!{field{...}}` tokens.
//!
//! [`FieldScanner`] decides whether a token starts at a given offset and
//! parses its JSON configuration. [`InlineParser`] walks a whole document with
//! an ordered list of [`InlineTokenizer`]s, giving the field tokenizer first
//! refusal and falling back to plain text everywhere else. Malformed
//! configurations become [`Diagnostic`]s and never abort the parse.
//!
//! ```
//! use fieldmark_parser::InlineParser;
//!
//! let doc = InlineParser::new().parse(r#"user !{field{"name":"user.name"}} logged in"#);
//! assert_eq!(doc.children.len(), 3);
//! assert!(doc.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod config;
pub mod parser;

pub use ast::{Document, Node, NodeKind};
pub use config::ParserOptions;
pub use parser::{
    locate_field, BraceFloor, Diagnostic, FieldMatch, FieldScanner, FieldTokenizer, InlineContext,
    InlineParser, InlineTokenizer, Point, Position, Scan, ScanState, TextTokenizer, Tokenized,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside of document parsing
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration file could not be interpreted
    #[error("Configuration error in {path}: {message}")]
    Config {
        /// File that was being read
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Inline configuration could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading input failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Payload or serialization error from the core model
    #[error(transparent)]
    Core(#[from] fieldmark_core::Error),
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
