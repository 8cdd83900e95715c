//! Diagnostics for the Mova frontend.
//!
//! The parser never panics and never aborts on malformed input; it records
//! [`SyntaxError`]s in arrival order and keeps going where the grammar allows. Callers
//! inspect the ordered list (and the `has_errors` flag on the parse result) before
//! trusting the tree.

use thiserror::Error;

use crate::ast::SourcePos;

/// Classify where in the pipeline a diagnostic originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid character sequences surfaced by the lexer as `Invalid` tokens.
    Lexical,
    /// Grammar violations found by the parser.
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A frontend error with 1-based location information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message} (line {line}, column {column})")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub kind: ErrorKind,
}

impl SyntaxError {
    /// A grammar-level error at the given position.
    pub fn syntax(message: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            message: message.into(),
            line: pos.line,
            column: pos.column,
            kind: ErrorKind::Syntax,
        }
    }

    /// An error for an `Invalid` token consumed from the lexer.
    pub fn lexical(message: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            message: message.into(),
            line: pos.line,
            column: pos.column,
            kind: ErrorKind::Lexical,
        }
    }

    /// The error position as a [`SourcePos`].
    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }
}
