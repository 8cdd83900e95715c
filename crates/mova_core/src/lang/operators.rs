//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word
//! operators like `AND`) along with basic metadata such as precedence, associativity,
//! and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators (`AND`, `OR`, `NOT`) are spelled with reserved words and therefore
//!   also appear in the keyword registry ([`crate::lang::keywords`]); use this module
//!   when you need operator semantics like precedence.
//! - `=` (declaration binding) and `:=` (assignment) are distinct operators in Mova:
//!   `POS P1 = {...}` binds a declaration body, `X := 1` assigns.
//!
//! ## Examples
//! ```rust
//! use mova_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<>"), Some(OperatorId::NotEq));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::{Since, Stability};

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Binding / assignment
    Eq,
    Assign,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Word operators
    And,
    Or,
    Not,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    /// Binding power; larger binds tighter. `0` marks non-expression operators
    /// (`=`, `:=`) that the statement grammar consumes directly.
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    /// `true` when the spelling is a reserved word rather than a symbol.
    pub is_keyword_spelling: bool,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all operators, grouped by precedence level.
pub const OPERATORS: &[OperatorInfo] = &[
    // Binding / assignment (statement-level; never part of the expression ladder)
    info(OperatorId::Eq, "=", 0, Associativity::None, Fixity::Infix, false),
    info(OperatorId::Assign, ":=", 0, Associativity::None, Fixity::Infix, false),
    // Logical
    info(OperatorId::Or, "OR", 10, Associativity::Left, Fixity::Infix, true),
    info(OperatorId::And, "AND", 20, Associativity::Left, Fixity::Infix, true),
    // Equality
    info(OperatorId::EqEq, "==", 30, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::NotEq, "<>", 30, Associativity::Left, Fixity::Infix, false),
    // Comparison
    info(OperatorId::Lt, "<", 40, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::LtEq, "<=", 40, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::Gt, ">", 40, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::GtEq, ">=", 40, Associativity::Left, Fixity::Infix, false),
    // Additive
    info(OperatorId::Plus, "+", 50, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::Minus, "-", 50, Associativity::Left, Fixity::Infix, false),
    // Multiplicative
    info(OperatorId::Star, "*", 60, Associativity::Left, Fixity::Infix, false),
    info(OperatorId::Slash, "/", 60, Associativity::Left, Fixity::Infix, false),
    // Unary
    info(OperatorId::Not, "NOT", 70, Associativity::None, Fixity::Prefix, true),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by spelling (symbol or word spelling).
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

const fn info(
    id: OperatorId,
    canonical: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
