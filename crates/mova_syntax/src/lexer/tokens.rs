//! Token types for the Mova lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including word operators like `AND`)
//! - `Motion(MotionId)` for the eight motion verbs
//! - `TypeName(TypeId)` for data-type keywords
//! - `Operator(OperatorId)` / `Punctuation(PunctuationId)` for symbols
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser and generator.
//! - `Invalid` carries the offending lexeme; the parser turns it into a diagnostic when
//!   it is consumed, so the lexer itself never fails.

use crate::ast::Span;
use mova_core::lang::keywords::{self, KeywordId};
use mova_core::lang::motion::{self, MotionId};
use mova_core::lang::operators::OperatorId;
use mova_core::lang::punctuation::PunctuationId;
use mova_core::lang::types::{self, TypeId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Vocabulary (ID-based) ==========
    Keyword(KeywordId),
    Motion(MotionId),
    TypeName(TypeId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),

    // ========== Special ==========
    /// Statement separator (one per logical line; `&` continuations suppress it).
    Newline,
    Eof,
    /// A character sequence the lexer could not form a token from.
    Invalid(String),
}

/// A token with its kind and source span (1-based line/column).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve a scanned word to its vocabulary token, if reserved.
///
/// Keywords, motion verbs, and data-type keywords share the identifier shape; this is
/// the single dispatch point deciding which registry a spelling belongs to.
pub fn word_token(name: &str) -> Option<TokenKind> {
    if let Some(k) = keywords::from_str(name) {
        return Some(TokenKind::Keyword(k));
    }
    if let Some(m) = motion::from_str(name) {
        return Some(TokenKind::Motion(m));
    }
    types::from_str(name).map(TokenKind::TypeName)
}
