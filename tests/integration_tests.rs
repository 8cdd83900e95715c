//! Integration tests for the Mova pipeline: lexer → parser → generator → executor.

use std::fs;
use std::path::Path;

use mova::program::generate;
use mova::{Executor, InstructionProgram};
use mova_core::value::Value;
use mova_syntax::{lexer, parser};

/// Run the full frontend + generator on a source string.
fn compile_source(source: &str) -> Result<InstructionProgram, Vec<String>> {
    let tokens = lexer::tokenize(source);
    let result = parser::parse(&tokens);
    if result.has_errors() {
        return Err(result.errors.iter().map(|e| e.to_string()).collect());
    }
    generate(&result.program).map_err(|errs| errs.iter().map(|e| e.to_string()).collect())
}

fn compile_file(path: &Path) -> Result<InstructionProgram, Vec<String>> {
    let source = fs::read_to_string(path).map_err(|e| vec![e.to_string()])?;
    compile_source(&source)
}

/// Every fixture under `tests/fixtures/valid` must compile and execute.
#[test]
fn test_valid_fixtures() {
    let fixtures_dir = Path::new("tests/fixtures/valid");
    let mut seen = 0;

    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map(|e| e == "mova").unwrap_or(false) {
            seen += 1;
            let program = compile_file(&path).unwrap_or_else(|errs| {
                panic!("expected {} to compile, got errors: {:?}", path.display(), errs)
            });
            Executor::new().execute(&program).unwrap_or_else(|e| {
                panic!("expected {} to execute, got: {e}", path.display())
            });
        }
    }
    assert!(seen >= 3, "fixture directory looks empty");
}

/// Every fixture under `tests/fixtures/invalid` must fail the pipeline.
#[test]
fn test_invalid_fixtures() {
    let fixtures_dir = Path::new("tests/fixtures/invalid");
    let mut seen = 0;

    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().map(|e| e == "mova").unwrap_or(false) {
            seen += 1;
            assert!(
                compile_file(&path).is_err(),
                "expected {} to fail compilation, but it succeeded",
                path.display()
            );
        }
    }
    assert!(seen >= 3, "fixture directory looks empty");
}

/// The reference program from the language docs: one declaration (zero instructions),
/// two executable statements (one instruction each).
#[test]
fn test_reference_program_end_to_end() {
    let program = compile_source("DECL POS P1 = {X 100, Y 200, Z 300}\nPTP P1\nWAIT 2.5\n").unwrap();

    assert_eq!(program.instructions.len(), 2);
    assert_eq!(program.instructions[0].command, "PTP");
    assert_eq!(program.instructions[0].get("target"), Some(&Value::Str("P1".into())));
    assert_eq!(program.instructions[1].command, "WAIT");
    assert_eq!(program.instructions[1].get("duration"), Some(&Value::Real(2.5)));

    let summary = Executor::new().execute(&program).unwrap();
    assert_eq!(summary.motions, 1);
    assert_eq!(summary.elapsed_s, 2.5);
}

/// Syntax errors stop the pipeline before generation; every error carries a 1-based
/// position.
#[test]
fn test_syntax_errors_block_generation() {
    let errs = compile_source("POS P1 = {X 1, 5 2}\nPTP P1\n").unwrap_err();
    assert_eq!(errs.len(), 1);
    assert!(errs[0].contains("line 1"), "error was: {}", errs[0]);
}

/// The executor honours preloaded digital inputs.
#[test]
fn test_digital_io_round_trip() {
    let source = "DECL INT CODE := 0\nIN 5 CODE\nOUT 6 7\n";
    let program = compile_source(source).unwrap();

    let summary = Executor::new()
        .with_input(5, Value::Int(9))
        .execute(&program)
        .unwrap();
    assert_eq!(summary.outputs.get(&6), Some(&Value::Int(7)));
}

/// Branches lowered to jump/label records execute correctly on both sides.
#[test]
fn test_lowered_branches_execute() {
    for (speed, expected) in [(10, 1.0), (99, 2.0)] {
        let source =
            format!("DECL INT SPEED := {speed}\nIF SPEED > 50 THEN\nWAIT 2\nELSE\nWAIT 1\nENDIF\n");
        let program = compile_source(&source).unwrap();
        let summary = Executor::new().execute(&program).unwrap();
        assert_eq!(summary.elapsed_s, expected, "speed {speed}");
    }
}

/// Axis leniency is visible end to end: the declaration survives with its valid
/// components, and the error list pinpoints the bad one.
#[test]
fn test_axis_leniency_end_to_end() {
    let tokens = lexer::tokenize("AXIS HOME = {A1 0, 9 1, A6 45}\nPTP HOME\n");
    let result = parser::parse(&tokens);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.program.statements.len(), 2);

    // The partial tree is not executable, but it is inspectable.
    assert!(result.has_errors());
}
