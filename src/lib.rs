#![forbid(unsafe_code)]
//! Mova: compiler and simulator for a robot motion-programming language.
//!
//! Mova programs declare coordinate entities (positions, frames, axis configurations),
//! drive them with motion commands (`PTP`, `LIN`, `CIRC`, `SPL` and their `_REL`
//! variants), and mix in structured control flow, timing, and digital I/O. This crate
//! turns source text into a flat, position-annotated instruction stream and can run it
//! on a simulation executor:
//!
//! ```text
//! lexer -> parser -> AST -> instruction generator -> executor
//! ```
//!
//! The syntax frontend (lexer, AST, parser, diagnostics) lives in `mova_syntax`; the
//! language vocabulary and value semantics live in `mova_core`. This crate owns the
//! instruction generator, the executor, and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: use `Result` or `Option` with `?` / `ok_or` / `map_err`. The
//!   `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: if a panic represents a compiler bug (logic error), use
//!   `.expect("reason")` with a clear explanation.

pub mod cli;
pub mod executor;
pub mod program;
pub mod version;

pub use executor::{ExecError, ExecSummary, Executor};
pub use program::{generate, DeclTable, GenError, GenErrors, Instruction, InstructionProgram, Symbol};
