//! Error types for instruction generation.
//!
//! Generation errors are distinct from syntax errors: they occur after a syntactically
//! valid tree exists (undeclared symbols, unresolvable arguments, non-constant
//! conditions). The generator collects every error in one pass and returns them as a
//! [`GenErrors`] collection so callers can display all of them at once.

use thiserror::Error;

use mova_syntax::ast::SourcePos;

/// A single instruction-generation error.
#[derive(Debug, Clone, Error)]
#[error("generation error: {message}")]
pub struct GenError {
    pub message: String,
    /// Source positions of the statement (or expression) that failed to resolve.
    pub positions: Vec<SourcePos>,
}

impl GenError {
    pub fn new(message: impl Into<String>, positions: Vec<SourcePos>) -> Self {
        Self {
            message: message.into(),
            positions,
        }
    }

    /// First source position, if any (diagnostic rendering wants one anchor).
    pub fn pos(&self) -> Option<SourcePos> {
        self.positions.first().copied()
    }
}

/// Collection of generation errors from one pass.
#[derive(Debug)]
pub struct GenErrors(pub Vec<GenError>);

impl GenErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenError> {
        self.0.iter()
    }
}

impl std::fmt::Display for GenErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            writeln!(f, "{} generation errors:", self.0.len())?;
            for (i, err) in self.0.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, err)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for GenErrors {}

impl From<GenError> for GenErrors {
    fn from(e: GenError) -> Self {
        GenErrors(vec![e])
    }
}
