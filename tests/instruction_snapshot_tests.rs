//! Golden snapshot tests for the emitted instruction stream.
//!
//! The `Display` form of instructions is what `mova --emit` prints and what downstream
//! tooling scrapes, so changes to it must be reviewed and intentional.
//!
//! Run with: `cargo test --test instruction_snapshot_tests`
//! Review changes: `cargo insta review`

use mova::program::{generate, InstructionProgram};
use mova_syntax::{lexer, parser};

fn compile(source: &str) -> InstructionProgram {
    let result = parser::parse(&lexer::tokenize(source));
    assert!(!result.has_errors(), "parse errors: {:?}", result.errors);
    generate(&result.program).expect("generation failed")
}

#[test]
fn test_motion_instruction_rendering() {
    let program = compile("DECL POS P1 = {X 100, Y 200, Z 300}\nPTP P1\n");
    insta::assert_snapshot!(
        program.instructions[0].to_string(),
        @"PTP target='P1' X=100 Y=200 Z=300 @ 2:1"
    );
}

#[test]
fn test_wait_instruction_rendering() {
    let program = compile("WAIT 2.5\n");
    insta::assert_snapshot!(program.instructions[0].to_string(), @"WAIT duration=2.5 @ 1:1");
}

#[test]
fn test_set_instruction_rendering() {
    let program = compile("DECL INT N\nN := 7\n");
    insta::assert_snapshot!(program.instructions[0].to_string(), @"SET name='N' value=7 @ 2:1");
}

#[test]
fn test_io_instruction_rendering() {
    let program = compile("OUT 3 TRUE\n");
    insta::assert_snapshot!(program.instructions[0].to_string(), @"OUT channel=3 value=TRUE @ 1:1");
}

#[test]
fn test_branch_lowering_rendering() {
    let program = compile("DECL BOOL GO := TRUE\nIF GO THEN\nHALT\nENDIF\n");
    insta::assert_snapshot!(
        program.instructions[0].to_string(),
        @"JMPF cond=TRUE label=0 @ 2:1"
    );
    insta::assert_snapshot!(program.instructions[2].to_string(), @"LABEL id=0 @ 2:1");
}
