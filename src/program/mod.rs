//! The executable program model: flat instructions plus the declaration table.
//!
//! An [`Instruction`] is the durable artifact of the pipeline: an atomic named action
//! with keyword/value arguments and the source positions it came from. Declarations
//! never become instructions; they live in the [`DeclTable`] that the generator builds
//! and the executor seeds its state from.
//!
//! ## Notes
//! - Control flow is lowered to explicit `LABEL`/`JMP`/`JMPF` records in the flat
//!   stream; see [`lower`] for the lowering strategy.
//! - `Display` renders one instruction per line (`PTP target='P1' X=100 @ 1:1`); the
//!   `--emit` CLI flag and the snapshot tests rely on this format.

pub mod errors;
pub mod lower;

pub use errors::{GenError, GenErrors};
pub use lower::generate;

use std::collections::BTreeMap;
use std::fmt;

use mova_core::lang::types::TypeId;
use mova_core::value::Value;
use mova_syntax::ast::{EntityKind, SourcePos};

/// A flat, executable unit: command keyword, resolved arguments, source positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub command: String,
    pub args: Vec<(String, Value)>,
    pub positions: Vec<SourcePos>,
}

impl Instruction {
    pub fn new(command: impl Into<String>, positions: Vec<SourcePos>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            positions,
        }
    }

    /// Builder-style argument append (insertion order is preserved end to end).
    pub fn arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.push((name.into(), value));
        self
    }

    /// Look up an argument by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for (name, value) in &self.args {
            write!(f, " {name}={value}")?;
        }
        if !self.positions.is_empty() {
            write!(f, " @")?;
            for pos in &self.positions {
                write!(f, " {pos}")?;
            }
        }
        Ok(())
    }
}

/// A named definition registered during generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A coordinate entity (`POS`/`FRAME`/`AXIS`/`E6POS`/`E6AXIS`) with resolved,
    /// ordered components.
    Entity {
        kind: EntityKind,
        ty: TypeId,
        components: Vec<(String, Value)>,
    },
    /// A scalar variable.
    Variable {
        ty: TypeId,
        /// Current generation-time value; `None` until first assignment.
        value: Option<Value>,
        /// `true` once the variable was the target of an `IN` read: its value exists
        /// only at run time and can no longer be resolved by the generator.
        runtime: bool,
    },
}

/// Name → definition mapping built during generation.
///
/// Backed by a `BTreeMap` so iteration (debug output, tests) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclTable {
    entries: BTreeMap<String, Symbol>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.entries.get_mut(name)
    }

    pub fn insert(&mut self, name: String, symbol: Symbol) {
        self.entries.insert(name, symbol);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generator output: the instruction sequence plus the declaration table.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionProgram {
    /// Program name from the `DEF` header, if the source had one.
    pub name: Option<String>,
    pub instructions: Vec<Instruction>,
    pub declarations: DeclTable,
}

impl fmt::Display for InstructionProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{index:>4}  {instruction}")?;
        }
        Ok(())
    }
}
