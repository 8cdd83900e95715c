//! Simulation executor for generated instruction programs.
//!
//! The executor treats each [`Instruction`] as an atomic named action with
//! keyword/value arguments: it walks the stream with a program counter, honours the
//! `LABEL`/`JMP`/`JMPF` records the generator lowered control flow into, maintains a
//! variable store and digital I/O maps, and advances a simulated clock for
//! `WAIT`/`DELAY` (no real sleeping, no real robot).
//!
//! ## Notes
//! - Unknown command keywords are an executor-side error by contract; the
//!   parser/generator never validate them.
//! - Motions are logged through `tracing` and counted in the [`ExecSummary`].

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::program::{Instruction, InstructionProgram, Symbol};
use mova_core::value::Value;

/// Upper bound on executed steps; a jump cycle in a malformed stream becomes an error
/// instead of a hang.
const STEP_LIMIT: usize = 1_000_000;

/// Error raised while executing an instruction stream.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unknown command '{command}' at instruction {pc}")]
    UnknownCommand { command: String, pc: usize },

    #[error("instruction {pc} ({command}) is missing argument '{name}'")]
    MissingArg {
        command: String,
        name: &'static str,
        pc: usize,
    },

    #[error("instruction {pc} jumps to unknown label {label}")]
    UnknownLabel { label: i64, pc: usize },

    #[error("execution exceeded {STEP_LIMIT} steps (jump cycle?)")]
    StepLimit,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecSummary {
    /// Instructions actually executed (jumps included).
    pub steps: usize,
    /// Motion commands performed.
    pub motions: usize,
    /// Simulated seconds spent in `WAIT`/`DELAY`.
    pub elapsed_s: f64,
    /// Final state of the digital outputs.
    pub outputs: BTreeMap<i64, Value>,
}

/// A simulation executor instance.
///
/// Digital inputs can be preloaded with [`Executor::with_input`]; reads from channels
/// that were never set yield `FALSE`.
#[derive(Debug, Default)]
pub struct Executor {
    inputs: BTreeMap<i64, Value>,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a digital input channel for the simulation.
    pub fn with_input(mut self, channel: i64, value: Value) -> Self {
        self.inputs.insert(channel, value);
        self
    }

    /// Execute an instruction program to completion (or `HALT`/`RET`).
    #[tracing::instrument(skip_all, fields(instruction_count = program.instructions.len()))]
    pub fn execute(&self, program: &InstructionProgram) -> Result<ExecSummary, ExecError> {
        let labels = collect_labels(&program.instructions)?;

        // Seed the variable store from the declaration table.
        let mut vars: HashMap<String, Value> = HashMap::new();
        for (name, symbol) in program.declarations.iter() {
            if let Symbol::Variable { value: Some(v), .. } = symbol {
                vars.insert(name.clone(), v.clone());
            }
        }

        let mut summary = ExecSummary {
            steps: 0,
            motions: 0,
            elapsed_s: 0.0,
            outputs: BTreeMap::new(),
        };

        let mut pc = 0usize;
        while pc < program.instructions.len() {
            summary.steps += 1;
            if summary.steps > STEP_LIMIT {
                return Err(ExecError::StepLimit);
            }

            let instruction = &program.instructions[pc];
            match instruction.command.as_str() {
                "PTP" | "LIN" | "CIRC" | "SPL" | "PTP_REL" | "LIN_REL" | "CIRC_REL" | "SPL_REL" => {
                    summary.motions += 1;
                    tracing::info!(
                        command = %instruction.command,
                        target = %display_arg(instruction, "target"),
                        "motion"
                    );
                }

                "WAIT" | "DELAY" => {
                    let seconds = real_arg(instruction, "duration", pc)?;
                    summary.elapsed_s += seconds;
                    tracing::debug!(command = %instruction.command, seconds, "timing");
                }

                "SET" => {
                    let name = str_arg(instruction, "name", pc)?;
                    let value = arg(instruction, "value", pc)?.clone();
                    vars.insert(name.to_string(), value);
                }

                // Component overrides only affect the generator's table; at run time the
                // updated coordinates are already baked into later motion instructions.
                "SETM" => {
                    tracing::debug!(
                        target = %display_arg(instruction, "target"),
                        component = %display_arg(instruction, "component"),
                        "component override"
                    );
                }

                "IN" => {
                    let channel = int_arg(instruction, "channel", pc)?;
                    let into = str_arg(instruction, "into", pc)?;
                    let value = self.inputs.get(&channel).cloned().unwrap_or(Value::Bool(false));
                    tracing::info!(channel, into = %into, value = %value, "digital input");
                    vars.insert(into.to_string(), value);
                }

                "OUT" => {
                    let channel = int_arg(instruction, "channel", pc)?;
                    let value = arg(instruction, "value", pc)?.clone();
                    tracing::info!(channel, value = %value, "digital output");
                    summary.outputs.insert(channel, value);
                }

                "LABEL" => {}

                "JMP" => {
                    let label = int_arg(instruction, "label", pc)?;
                    pc = resolve_label(&labels, label, pc)?;
                    continue;
                }

                "JMPF" => {
                    let cond = matches!(arg(instruction, "cond", pc)?, Value::Bool(true));
                    if !cond {
                        let label = int_arg(instruction, "label", pc)?;
                        pc = resolve_label(&labels, label, pc)?;
                        continue;
                    }
                }

                "HALT" | "RET" => {
                    tracing::info!(command = %instruction.command, "program end");
                    break;
                }

                other => {
                    return Err(ExecError::UnknownCommand {
                        command: other.to_string(),
                        pc,
                    });
                }
            }

            pc += 1;
        }

        Ok(summary)
    }
}

// ============================================================================
// Argument access
// ============================================================================

fn arg<'a>(instruction: &'a Instruction, name: &'static str, pc: usize) -> Result<&'a Value, ExecError> {
    instruction.get(name).ok_or_else(|| ExecError::MissingArg {
        command: instruction.command.clone(),
        name,
        pc,
    })
}

fn int_arg(instruction: &Instruction, name: &'static str, pc: usize) -> Result<i64, ExecError> {
    match arg(instruction, name, pc)? {
        Value::Int(i) => Ok(*i),
        _ => Err(ExecError::MissingArg {
            command: instruction.command.clone(),
            name,
            pc,
        }),
    }
}

fn real_arg(instruction: &Instruction, name: &'static str, pc: usize) -> Result<f64, ExecError> {
    match arg(instruction, name, pc)?.as_real() {
        Some(r) => Ok(r),
        None => Err(ExecError::MissingArg {
            command: instruction.command.clone(),
            name,
            pc,
        }),
    }
}

fn str_arg<'a>(instruction: &'a Instruction, name: &'static str, pc: usize) -> Result<&'a str, ExecError> {
    match arg(instruction, name, pc)? {
        Value::Str(s) => Ok(s),
        _ => Err(ExecError::MissingArg {
            command: instruction.command.clone(),
            name,
            pc,
        }),
    }
}

fn display_arg(instruction: &Instruction, name: &str) -> String {
    instruction.get(name).map(Value::to_string).unwrap_or_default()
}

fn collect_labels(instructions: &[Instruction]) -> Result<HashMap<i64, usize>, ExecError> {
    let mut labels = HashMap::new();
    for (index, instruction) in instructions.iter().enumerate() {
        if instruction.command == "LABEL" {
            let id = int_arg(instruction, "id", index)?;
            labels.insert(id, index);
        }
    }
    Ok(labels)
}

fn resolve_label(labels: &HashMap<i64, usize>, label: i64, pc: usize) -> Result<usize, ExecError> {
    labels
        .get(&label)
        .copied()
        .ok_or(ExecError::UnknownLabel { label, pc })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::program::generate;
    use mova_syntax::{lexer, parser};

    fn run(source: &str) -> ExecSummary {
        let tokens = lexer::tokenize(source);
        let result = parser::parse(&tokens);
        assert!(!result.has_errors(), "parse errors: {:?}", result.errors);
        let program = generate(&result.program).unwrap();
        Executor::new().execute(&program).unwrap()
    }

    #[test]
    fn test_counts_motions_and_time() {
        let summary = run("DECL POS P1 = {X 100, Y 200, Z 300}\nPTP P1\nWAIT 2.5\nLIN P1\n");
        assert_eq!(summary.motions, 2);
        assert_eq!(summary.elapsed_s, 2.5);
    }

    #[test]
    fn test_takes_the_true_branch() {
        let summary = run("DECL INT X := 5\nIF X > 1 THEN\nWAIT 1\nELSE\nWAIT 10\nENDIF\n");
        assert_eq!(summary.elapsed_s, 1.0);
    }

    #[test]
    fn test_takes_the_else_branch() {
        let summary = run("DECL INT X := 0\nIF X > 1 THEN\nWAIT 1\nELSE\nWAIT 10\nENDIF\n");
        assert_eq!(summary.elapsed_s, 10.0);
    }

    #[test]
    fn test_halt_stops_execution() {
        let summary = run("WAIT 1\nHALT\nWAIT 5\n");
        assert_eq!(summary.elapsed_s, 1.0);
    }

    #[test]
    fn test_outputs_are_recorded() {
        let summary = run("OUT 3 TRUE\nOUT 7 42\n");
        assert_eq!(summary.outputs.get(&3), Some(&Value::Bool(true)));
        assert_eq!(summary.outputs.get(&7), Some(&Value::Int(42)));
    }

    #[test]
    fn test_input_read_uses_preloaded_channel() {
        let tokens = lexer::tokenize("DECL BOOL FLAG := FALSE\nIN 2 FLAG\n");
        let result = parser::parse(&tokens);
        let program = generate(&result.program).unwrap();
        let summary = Executor::new()
            .with_input(2, Value::Bool(true))
            .execute(&program)
            .unwrap();
        assert_eq!(summary.steps, 1);
    }

    #[test]
    fn test_unknown_command_is_an_executor_error() {
        use crate::program::{DeclTable, Instruction, InstructionProgram};
        let program = InstructionProgram {
            name: None,
            instructions: vec![Instruction::new("FROBNICATE", vec![])],
            declarations: DeclTable::new(),
        };
        let err = Executor::new().execute(&program).unwrap_err();
        assert!(matches!(err, ExecError::UnknownCommand { .. }));
    }

    #[test]
    fn test_unrolled_loop_executes_every_iteration() {
        let summary = run("DECL INT I\nFOR I := 1 TO 4\nWAIT 0.5\nENDFOR\n");
        assert_eq!(summary.elapsed_s, 2.0);
    }
}
