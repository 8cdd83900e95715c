//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the
//! lexer/parser: delimiters, separators, and access markers.
//!
//! ## Notes
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source
//!   text: `;` (comment) , `&` (line continuation) and `'` (string delimiter) never
//!   reach the token stream, so they are not listed here.
//! - `->` is lexed and reserved but currently has no grammar production; member access
//!   is spelled with `.`.

use super::registry::{Since, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`.
    Separator,
    /// Access markers like `.`.
    Access,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Arrow,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator, Stability::Stable),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access, Stability::Stable),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Access, Stability::Reserved),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION.iter().find(|p| p.id == id).expect("punctuation info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
    stability: Stability,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability,
    }
}
