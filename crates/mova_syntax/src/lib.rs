#![forbid(unsafe_code)]
//! Shared syntax frontend for the Mova language: lexer, token model, AST, parser,
//! diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler pipeline
//! and future tooling.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not resolve names, fold
//!   constants, or generate instructions: that is the job of the instruction generator
//!   in the root crate.
//! - Vocabulary identity (keywords/motion verbs/types/operators/punctuation) comes from
//!   the `mova_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use mova_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("DECL POS P1 = {X 100, Y 200, Z 300}\nPTP P1\nWAIT 2.5\n");
//! let result = parser::parse(&tokens);
//! assert!(!result.has_errors());
//! assert_eq!(result.program.statements.len(), 3);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
