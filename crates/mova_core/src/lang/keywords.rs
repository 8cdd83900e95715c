//! Define the reserved keyword vocabulary for the Mova language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical
//! spellings, categories, and stability.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; Mova keywords are spelled in upper
//!   case, matching the robot-controller heritage of the language.
//! - This registry is intentionally **pure** (no AST/IO/side effects).
//! - The word operators `AND`/`OR`/`NOT` also appear in [`crate::lang::operators`]; use
//!   that module when you need precedence/fixity metadata.
//!
//! ## Examples
//! ```rust
//! use mova_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("IF"), Some(KeywordId::If));
//! assert_eq!(keywords::as_str(KeywordId::If), "IF");
//! assert_eq!(keywords::from_str("if"), None); // case-sensitive
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Program structure
    Def,
    End,
    Decl,

    // Control flow
    If,
    Then,
    Else,
    Endif,
    For,
    To,
    Step,
    Endfor,
    While,
    Endwhile,
    Repeat,
    Until,
    Switch,
    Case,
    Default,
    Endswitch,
    Goto,
    Halt,
    Return,

    // System commands
    Wait,
    Delay,
    In,
    Out,

    // Word operators
    And,
    Or,
    Not,

    // Literals / constants
    True,
    False,
    Pi,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Structure,
    ControlFlow,
    System,
    Operator,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Program structure
    info(KeywordId::Def, "DEF", KeywordCategory::Structure, Stability::Stable),
    info(KeywordId::End, "END", KeywordCategory::Structure, Stability::Stable),
    info(KeywordId::Decl, "DECL", KeywordCategory::Structure, Stability::Stable),
    // Control flow
    info(KeywordId::If, "IF", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Then, "THEN", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Else, "ELSE", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Endif, "ENDIF", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::For, "FOR", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::To, "TO", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Step, "STEP", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Endfor, "ENDFOR", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::While, "WHILE", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Endwhile, "ENDWHILE", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Repeat, "REPEAT", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Until, "UNTIL", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Switch, "SWITCH", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Case, "CASE", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Default, "DEFAULT", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Endswitch, "ENDSWITCH", KeywordCategory::ControlFlow, Stability::Stable),
    // GOTO is lexed but has no statement production: the language exposes no
    // label-definition syntax to attach it to.
    info(KeywordId::Goto, "GOTO", KeywordCategory::ControlFlow, Stability::Reserved),
    info(KeywordId::Halt, "HALT", KeywordCategory::ControlFlow, Stability::Stable),
    info(KeywordId::Return, "RETURN", KeywordCategory::ControlFlow, Stability::Stable),
    // System commands
    info(KeywordId::Wait, "WAIT", KeywordCategory::System, Stability::Stable),
    info(KeywordId::Delay, "DELAY", KeywordCategory::System, Stability::Stable),
    info(KeywordId::In, "IN", KeywordCategory::System, Stability::Stable),
    info(KeywordId::Out, "OUT", KeywordCategory::System, Stability::Stable),
    // Word operators
    info(KeywordId::And, "AND", KeywordCategory::Operator, Stability::Stable),
    info(KeywordId::Or, "OR", KeywordCategory::Operator, Stability::Stable),
    info(KeywordId::Not, "NOT", KeywordCategory::Operator, Stability::Stable),
    // Literals / constants
    info(KeywordId::True, "TRUE", KeywordCategory::Literal, Stability::Stable),
    info(KeywordId::False, "FALSE", KeywordCategory::Literal, Stability::Stable),
    info(KeywordId::Pi, "PI", KeywordCategory::Literal, Stability::Stable),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry, `None` otherwise.
///
/// ## Notes
/// - Matching is **case-sensitive**: Mova reserves only the upper-case spellings, so
///   `pi` stays available as an identifier.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    stability: Stability,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_keywords() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "spelling {:?}", k.canonical);
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn test_lowercase_is_not_reserved() {
        assert_eq!(from_str("wait"), None);
        assert_eq!(from_str("Def"), None);
    }
}
