//! Property-based tests for the Mova frontend and generator.
//!
//! These use proptest to verify invariants across many randomly generated inputs,
//! catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use mova_core::lang::{keywords, motion, types};
use mova_syntax::ast::{BinaryOp, Expr, Statement};
use mova_syntax::{lexer, parser};

// =============================================================================
// Strategies
// =============================================================================

/// Upper-case identifiers that are not reserved words.
fn ident_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,6}".prop_filter("not reserved", |s| {
        keywords::from_str(s).is_none() && motion::from_str(s).is_none() && types::from_str(s).is_none()
    })
}

/// Small non-negative integer literals (kept below any overflow edge).
fn int_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000
}

// =============================================================================
// Totality and idempotence
// =============================================================================

proptest! {
    /// The pipeline front half never panics, whatever bytes come in.
    #[test]
    fn lex_and_parse_are_total(source in "[ -~\\n]{0,200}") {
        let tokens = lexer::tokenize(&source);
        let _ = parser::parse(&tokens);
    }

    /// Parsing the same token stream twice yields structurally equal results.
    #[test]
    fn parse_is_idempotent(name in ident_strategy(), a in int_strategy(), b in int_strategy()) {
        let source = format!("DECL INT {name} := {a}\n{name} := {name} + {b}\nWAIT {name}\n");
        let tokens = lexer::tokenize(&source);
        let first = parser::parse(&tokens);
        let second = parser::parse(&tokens);
        prop_assert_eq!(first.program, second.program);
        prop_assert_eq!(first.errors, second.errors);
    }
}

// =============================================================================
// Grammar shape
// =============================================================================

proptest! {
    /// `a + b * c` always hangs the multiplication off the right side of the addition.
    #[test]
    fn multiplication_binds_tighter(a in int_strategy(), b in int_strategy(), c in int_strategy()) {
        let source = format!("V := {a} + {b} * {c}\n");
        let result = parser::parse(&lexer::tokenize(&source));
        prop_assert!(!result.has_errors());

        let Statement::Assignment(assign) = &result.program.statements[0] else {
            return Err(TestCaseError::fail("expected assignment"));
        };
        let Expr::Binary(_, BinaryOp::Add, right) = &assign.value.node else {
            return Err(TestCaseError::fail("expected + at the root"));
        };
        prop_assert!(matches!(right.node, Expr::Binary(_, BinaryOp::Mul, _)));
    }

    /// Subtraction chains always fold to the left.
    #[test]
    fn subtraction_is_left_associative(a in int_strategy(), b in int_strategy(), c in int_strategy()) {
        let source = format!("V := {a} - {b} - {c}\n");
        let result = parser::parse(&lexer::tokenize(&source));
        prop_assert!(!result.has_errors());

        let Statement::Assignment(assign) = &result.program.statements[0] else {
            return Err(TestCaseError::fail("expected assignment"));
        };
        let Expr::Binary(left, BinaryOp::Sub, _) = &assign.value.node else {
            return Err(TestCaseError::fail("expected - at the root"));
        };
        prop_assert!(matches!(left.node, Expr::Binary(_, BinaryOp::Sub, _)));
    }
}

// =============================================================================
// Generator invariants
// =============================================================================

proptest! {
    /// Declarations never emit instructions; each motion/wait emits exactly one.
    #[test]
    fn declarations_are_silent(
        name in ident_strategy(),
        x in int_strategy(),
        y in int_strategy(),
        d in 0i64..3600,
    ) {
        let source = format!("DECL POS {name} = {{X {x}, Y {y}}}\nPTP {name}\nWAIT {d}\n");
        let result = parser::parse(&lexer::tokenize(&source));
        prop_assert!(!result.has_errors(), "errors: {:?}", result.errors);

        let program = mova::generate(&result.program)
            .map_err(|e| TestCaseError::fail(format!("generation failed: {e}")))?;
        prop_assert_eq!(program.instructions.len(), 2);
        prop_assert_eq!(program.declarations.len(), 1);
        prop_assert_eq!(program.instructions[0].command.as_str(), "PTP");
    }

    /// Constant folding agrees with Rust arithmetic for `+` on INTs.
    #[test]
    fn addition_folds_correctly(a in int_strategy(), b in int_strategy()) {
        use mova_core::value::Value;

        let source = format!("DECL INT V := {a} + {b}\nOUT 1 V\n");
        let result = parser::parse(&lexer::tokenize(&source));
        let program = mova::generate(&result.program)
            .map_err(|e| TestCaseError::fail(format!("generation failed: {e}")))?;
        prop_assert_eq!(program.instructions[0].get("value"), Some(&Value::Int(a + b)));
    }
}
