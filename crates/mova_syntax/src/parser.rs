//! Parser for the Mova language.
//!
//! Converts a token stream into an AST. The parser is a recursive-descent machine with a
//! precedence-climbing expression ladder; it collects errors instead of aborting, so one
//! pass reports every problem the grammar can recover from.
//!
//! ## Examples
//!
//! ```rust
//! use mova_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("DECL POS P1 = {X 100, Y 200}\nPTP P1\n");
//! let result = parser::parse(&tokens);
//! assert!(!result.has_errors());
//! assert_eq!(result.program.statements.len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::SyntaxError;
use crate::lexer::{Token, TokenKind};
use mova_core::lang::keywords::KeywordId;
use mova_core::lang::motion::{self, MotionId};
use mova_core::lang::operators::OperatorId;
use mova_core::lang::punctuation::PunctuationId;
use mova_core::lang::types::{self, TypeId};
use mova_core::value::Value;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
