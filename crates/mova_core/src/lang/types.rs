//! Data-type keyword vocabulary.
//!
//! Mova declarations name one of a closed set of data types: four scalar types
//! (`INT`, `REAL`, `BOOL`, `CHAR`) and five aggregate coordinate types (`POS`,
//! `FRAME`, `AXIS`, and the extended `E6POS`/`E6AXIS` forms).
//!
//! ## Notes
//! - The scalar/aggregate split drives declaration parsing: scalars take an optional
//!   `:=` initializer, aggregates take a `= { NAME expr, ... }` component body.
//! - `E6POS`/`E6AXIS` share the parse/validation policy of their base types; they exist
//!   as distinct ids so diagnostics and tooling can echo the spelling the user wrote.
//!
//! ## Examples
//! ```rust
//! use mova_core::lang::types::{self, TypeId};
//!
//! assert_eq!(types::from_str("E6POS"), Some(TypeId::E6Pos));
//! assert!(types::info_for(TypeId::Frame).aggregate);
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every data-type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    // Scalars
    Int,
    Real,
    Bool,
    Char,

    // Aggregates
    Pos,
    Frame,
    Axis,
    E6Pos,
    E6Axis,
}

/// Metadata for a data-type keyword.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub id: TypeId,
    pub canonical: &'static str,
    /// `true` for coordinate aggregates declared with a `{...}` component body.
    pub aggregate: bool,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all data-type keywords.
pub const TYPES: &[TypeInfo] = &[
    info(TypeId::Int, "INT", false),
    info(TypeId::Real, "REAL", false),
    info(TypeId::Bool, "BOOL", false),
    info(TypeId::Char, "CHAR", false),
    info(TypeId::Pos, "POS", true),
    info(TypeId::Frame, "FRAME", true),
    info(TypeId::Axis, "AXIS", true),
    info(TypeId::E6Pos, "E6POS", true),
    info(TypeId::E6Axis, "E6AXIS", true),
];

/// Canonical spelling.
pub fn as_str(id: TypeId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: TypeId) -> &'static TypeInfo {
    TYPES.iter().find(|t| t.id == id).expect("type info missing")
}

/// Lookup by spelling (case-sensitive).
pub fn from_str(s: &str) -> Option<TypeId> {
    TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

const fn info(id: TypeId, canonical: &'static str, aggregate: bool) -> TypeInfo {
    TypeInfo {
        id,
        canonical,
        aggregate,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_aggregate_split() {
        assert!(!info_for(TypeId::Int).aggregate);
        assert!(!info_for(TypeId::Char).aggregate);
        assert!(info_for(TypeId::Pos).aggregate);
        assert!(info_for(TypeId::E6Axis).aggregate);
    }
}
