//! Mova language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords,
//! operators, punctuation, data-type keywords, and motion verbs.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler and
//! tooling. Instead, callers work with **stable IDs** (e.g. `KeywordId`, `MotionId`) and
//! look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects, and no
//!   mutation after initialization (they are `const` tables).
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for
//!   shared use (diagnostics, docs, instruction rendering).
//!
//! ## Examples
//! ```rust
//! use mova_core::lang::motion::{self, MotionId};
//!
//! assert_eq!(motion::from_str("LIN"), Some(MotionId::Lin));
//! assert_eq!(motion::as_str(MotionId::Lin), "LIN");
//! ```

pub mod keywords;
pub mod motion;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod types;
