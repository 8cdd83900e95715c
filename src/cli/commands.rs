//! CLI command implementations.
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Frontend and generation diagnostics are rendered with source-context labels through
//! miette; a run with any syntax error never reaches instruction generation.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::executor::Executor;
use crate::program::{self, GenErrors, InstructionProgram};
use mova_syntax::ast::SourcePos;
use mova_syntax::diagnostics::SyntaxError;
use mova_syntax::{lexer, parser};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (16 MB).
///
/// Robot programs are small; anything beyond this is rejected rather than risking
/// out-of-memory conditions during compilation.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

// ============================================================================
// Commands
// ============================================================================

/// `--lex`: print the token stream.
pub fn lex_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    for token in lexer::tokenize(&source) {
        println!("{:>4}:{:<3} {:?}", token.span.start.line, token.span.start.column, token.kind);
    }
    Ok(ExitCode::SUCCESS)
}

/// `--parse`: parse and print the statement-level shape of the tree.
pub fn parse_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let tokens = lexer::tokenize(&source);
    let result = parser::parse(&tokens);

    for statement in &result.program.statements {
        let pos = statement
            .positions()
            .first()
            .copied()
            .unwrap_or_default();
        println!("{:>4}:{:<3} {:?}", pos.line, pos.column, statement.kind());
    }

    if result.has_errors() {
        report_syntax_errors(path, &source, &result.errors);
        return Err(CliError::failure(syntax_summary(path, result.errors.len())));
    }
    Ok(ExitCode::SUCCESS)
}

/// `check`: lex + parse, report every diagnostic.
pub fn check_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let result = parser::parse(&lexer::tokenize(&source));

    if result.has_errors() {
        report_syntax_errors(path, &source, &result.errors);
        return Err(CliError::failure(syntax_summary(path, result.errors.len())));
    }

    println!("{path}: OK ({} statements)", result.program.statements.len());
    Ok(ExitCode::SUCCESS)
}

/// `--emit`: compile and print the generated instruction stream.
pub fn emit_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = compile(path, &source)?;

    if let Some(name) = &program.name {
        println!("; program {name}");
    }
    print!("{program}");
    println!("; {} declarations, {} instructions", program.declarations.len(), program.instructions.len());
    Ok(ExitCode::SUCCESS)
}

/// `run`: compile and execute on the simulation executor.
pub fn run_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = compile(path, &source)?;

    let summary = Executor::new()
        .execute(&program)
        .map_err(|e| CliError::failure(format!("{path}: execution error: {e}")))?;

    println!(
        "{path}: executed {} instructions ({} motions, {:.3}s simulated)",
        summary.steps, summary.motions, summary.elapsed_s
    );
    for (channel, value) in &summary.outputs {
        println!("  OUT[{channel}] = {value}");
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Pipeline plumbing
// ============================================================================

/// Lex, parse, and generate; renders diagnostics and fails on the first stage that
/// reports any.
fn compile(path: &str, source: &str) -> CliResult<InstructionProgram> {
    let result = parser::parse(&lexer::tokenize(source));
    if result.has_errors() {
        report_syntax_errors(path, source, &result.errors);
        return Err(CliError::failure(syntax_summary(path, result.errors.len())));
    }

    program::generate(&result.program).map_err(|errors| {
        report_gen_errors(path, source, &errors);
        CliError::failure(format!("{path}: {} generation error(s)", errors.len()))
    })
}

fn read_source(path: &str) -> CliResult<String> {
    let meta = fs::metadata(Path::new(path))
        .map_err(|e| CliError::failure(format!("{path}: {e}")))?;
    if meta.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "{path}: file is larger than {MAX_SOURCE_SIZE} bytes"
        )));
    }
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("{path}: {e}")))
}

fn syntax_summary(path: &str, count: usize) -> String {
    format!("{path}: {count} syntax error(s)")
}

// ============================================================================
// Diagnostic rendering
// ============================================================================

/// A rendered diagnostic with a source-context label.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
struct SourceDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label]
    span: SourceSpan,
}

fn report_syntax_errors(path: &str, source: &str, errors: &[SyntaxError]) {
    for error in errors {
        render(path, source, error.to_string(), Some(error.pos()));
    }
}

fn report_gen_errors(path: &str, source: &str, errors: &GenErrors) {
    for error in errors.iter() {
        render(path, source, error.to_string(), error.pos());
    }
}

fn render(path: &str, source: &str, message: String, pos: Option<SourcePos>) {
    match pos {
        Some(pos) => {
            let offset = byte_offset(source, pos);
            let diagnostic = SourceDiagnostic {
                message,
                src: NamedSource::new(path, source.to_string()),
                span: SourceSpan::new(offset.into(), 1),
            };
            eprintln!("{:?}", miette::Report::new(diagnostic));
        }
        None => eprintln!("{path}: {message}"),
    }
}

/// Byte offset of a 1-based line/column position (clamped to the source length).
fn byte_offset(source: &str, pos: SourcePos) -> usize {
    let mut line = 1u32;
    let mut column = 1u32;
    for (offset, c) in source.char_indices() {
        if line == pos.line && column == pos.column {
            return offset;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    source.len().saturating_sub(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset() {
        let source = "WAIT 1\nPTP P1\n";
        assert_eq!(byte_offset(source, SourcePos::new(1, 1)), 0);
        assert_eq!(byte_offset(source, SourcePos::new(1, 6)), 5);
        assert_eq!(byte_offset(source, SourcePos::new(2, 1)), 7);
        assert_eq!(byte_offset(source, SourcePos::new(2, 5)), 11);
    }

    #[test]
    fn test_byte_offset_clamps_past_the_end() {
        let source = "WAIT 1\n";
        assert_eq!(byte_offset(source, SourcePos::new(9, 9)), source.len() - 1);
    }
}
