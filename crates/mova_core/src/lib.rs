//! Provide shared, pure semantic helpers and canonical language vocabulary for the Mova
//! compiler and executor.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic
//! helpers that both:
//! - the instruction generator can use for constant folding and argument resolution, and
//! - the executor can use to enforce the same semantics when acting on instructions.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no compiler-specific
//!   types.
//! - Current scope: the [`value::Value`] sum type with its explicit promotion policy, and
//!   canonical language vocabulary (keywords, operators, punctuation, data types, motion
//!   verbs) under [`lang`].

pub mod lang;
pub mod value;

pub use value::{apply_binary, apply_unary, BinOp, UnOp, Value, ValueError};
