//! The runtime/compile-time value model shared by the instruction generator and the
//! executor.
//!
//! [`Value`] is a tagged union over the four literal categories of the language. The
//! same type serves as literal payload in the AST and as argument value in generated
//! instructions, so both sides of the pipeline agree on semantics.
//!
//! ## Notes
//! - There is **no implicit numeric coercion**: arithmetic promotion is the explicit,
//!   documented policy of [`apply_binary`] (`INT op INT` stays integral with truncating
//!   division; any `REAL` operand promotes the operation to `REAL`).
//! - Formatting uses the language's own spellings: booleans print as `TRUE`/`FALSE`,
//!   reals always carry a decimal point, strings are quoted with single quotes.
//!
//! ## Examples
//! ```rust
//! use mova_core::value::{apply_binary, BinOp, Value};
//!
//! let v = apply_binary(BinOp::Add, &Value::Int(1), &Value::Real(0.5)).unwrap();
//! assert_eq!(v, Value::Real(1.5));
//! assert_eq!(Value::Real(100.0).to_string(), "100.0");
//! ```

use std::fmt;

use crate::lang::types::TypeId;

/// A Mova value: integer, floating-point, boolean, or string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
}

/// Binary operators subject to the value policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// Unary operators subject to the value policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// Error produced when an operation is not defined for its operand types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Operand types do not fit the operator (e.g. `TRUE + 1`).
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    /// Unary operand type does not fit the operator (e.g. `-'A'`).
    UnaryMismatch { op: &'static str, operand: &'static str },
    /// Integer or real division by zero.
    DivisionByZero,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::TypeMismatch { op, lhs, rhs } => {
                write!(f, "operator '{op}' is not defined for {lhs} and {rhs}")
            }
            ValueError::UnaryMismatch { op, operand } => {
                write!(f, "operator '{op}' is not defined for {operand}")
            }
            ValueError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for ValueError {}

impl Value {
    /// Name of the value's type as shown in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "INT",
            Value::Real(_) => "REAL",
            Value::Bool(_) => "BOOL",
            Value::Str(_) => "CHAR",
        }
    }

    /// Numeric view with explicit `INT` → `REAL` promotion.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Check whether this value can be bound to a variable of the given declared type,
    /// returning the (possibly promoted) stored value.
    ///
    /// ## Notes
    /// - The only permitted conversion is `INT` → `REAL`; everything else must match
    ///   exactly. This keeps declarations honest without a type checker.
    pub fn coerce_to(&self, ty: TypeId) -> Option<Value> {
        match (ty, self) {
            (TypeId::Int, Value::Int(_)) => Some(self.clone()),
            (TypeId::Real, Value::Real(_)) => Some(self.clone()),
            (TypeId::Real, Value::Int(i)) => Some(Value::Real(*i as f64)),
            (TypeId::Bool, Value::Bool(_)) => Some(self.clone()),
            (TypeId::Char, Value::Str(_)) => Some(self.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Real(r) => {
                if r.fract() == 0.0 && r.is_finite() {
                    write!(f, "{r:.1}")
                } else {
                    write!(f, "{r}")
                }
            }
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::Str(s) => write!(f, "'{s}'"),
        }
    }
}

/// Apply a binary operator under the explicit promotion policy.
///
/// ## Returns
/// - The computed [`Value`], or a [`ValueError`] if the operand types do not fit.
///
/// ## Notes
/// - `INT op INT` stays `INT`; `/` truncates toward zero and a zero divisor is an error.
/// - Any `REAL` operand promotes arithmetic and comparisons to `REAL`.
/// - `==`/`<>` are defined for same-category operands (numeric, `BOOL`, `CHAR`).
/// - `AND`/`OR` require `BOOL` operands; there is no truthiness.
pub fn apply_binary(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, ValueError> {
    use Value::*;

    let mismatch = || ValueError::TypeMismatch {
        op: op_str(op),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    };

    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => match (lhs, rhs) {
            (Int(a), Int(b)) => {
                if op == BinOp::Div {
                    if *b == 0 {
                        return Err(ValueError::DivisionByZero);
                    }
                    Ok(Int(a.wrapping_div(*b)))
                } else {
                    Ok(Int(match op {
                        BinOp::Add => a.wrapping_add(*b),
                        BinOp::Sub => a.wrapping_sub(*b),
                        _ => a.wrapping_mul(*b),
                    }))
                }
            }
            _ => {
                let (a, b) = match (lhs.as_real(), rhs.as_real()) {
                    (Some(a), Some(b)) => (a, b),
                    _ => return Err(mismatch()),
                };
                if op == BinOp::Div && b == 0.0 {
                    return Err(ValueError::DivisionByZero);
                }
                Ok(Real(match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    _ => a / b,
                }))
            }
        },

        BinOp::Eq | BinOp::NotEq => {
            let eq = match (lhs, rhs) {
                (Bool(a), Bool(b)) => a == b,
                (Str(a), Str(b)) => a == b,
                _ => match (lhs.as_real(), rhs.as_real()) {
                    (Some(a), Some(b)) => a == b,
                    _ => return Err(mismatch()),
                },
            };
            Ok(Bool(if op == BinOp::Eq { eq } else { !eq }))
        }

        BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => {
            let (a, b) = match (lhs.as_real(), rhs.as_real()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(mismatch()),
            };
            Ok(Bool(match op {
                BinOp::Lt => a < b,
                BinOp::LtEq => a <= b,
                BinOp::Gt => a > b,
                _ => a >= b,
            }))
        }

        BinOp::And | BinOp::Or => match (lhs, rhs) {
            (Bool(a), Bool(b)) => Ok(Bool(if op == BinOp::And { *a && *b } else { *a || *b })),
            _ => Err(mismatch()),
        },
    }
}

/// Apply a unary operator under the value policy.
pub fn apply_unary(op: UnOp, operand: &Value) -> Result<Value, ValueError> {
    match (op, operand) {
        (UnOp::Neg, Value::Int(i)) => Ok(Value::Int(i.wrapping_neg())),
        (UnOp::Neg, Value::Real(r)) => Ok(Value::Real(-r)),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(ValueError::UnaryMismatch {
            op: match op {
                UnOp::Neg => "-",
                UnOp::Not => "NOT",
            },
            operand: operand.type_name(),
        }),
    }
}

fn op_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Eq => "==",
        BinOp::NotEq => "<>",
        BinOp::Lt => "<",
        BinOp::LtEq => "<=",
        BinOp::Gt => ">",
        BinOp::GtEq => ">=",
        BinOp::And => "AND",
        BinOp::Or => "OR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic_stays_int() {
        assert_eq!(apply_binary(BinOp::Add, &Value::Int(2), &Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(apply_binary(BinOp::Div, &Value::Int(7), &Value::Int(2)), Ok(Value::Int(3)));
    }

    #[test]
    fn test_real_operand_promotes() {
        assert_eq!(
            apply_binary(BinOp::Mul, &Value::Int(2), &Value::Real(1.5)),
            Ok(Value::Real(3.0))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply_binary(BinOp::Div, &Value::Int(1), &Value::Int(0)),
            Err(ValueError::DivisionByZero)
        );
        assert_eq!(
            apply_binary(BinOp::Div, &Value::Real(1.0), &Value::Int(0)),
            Err(ValueError::DivisionByZero)
        );
    }

    #[test]
    fn test_logic_requires_bool() {
        assert!(apply_binary(BinOp::And, &Value::Bool(true), &Value::Int(1)).is_err());
        assert_eq!(
            apply_binary(BinOp::Or, &Value::Bool(false), &Value::Bool(true)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_mixed_comparison() {
        assert_eq!(
            apply_binary(BinOp::LtEq, &Value::Int(2), &Value::Real(2.0)),
            Ok(Value::Bool(true))
        );
        assert!(apply_binary(BinOp::Lt, &Value::Str("A".into()), &Value::Int(1)).is_err());
    }

    #[test]
    fn test_coerce_int_to_real_only() {
        use crate::lang::types::TypeId;
        assert_eq!(Value::Int(1).coerce_to(TypeId::Real), Some(Value::Real(1.0)));
        assert_eq!(Value::Real(1.0).coerce_to(TypeId::Int), None);
        assert_eq!(Value::Bool(true).coerce_to(TypeId::Bool), Some(Value::Bool(true)));
    }

    #[test]
    fn test_display_spellings() {
        assert_eq!(Value::Bool(true).to_string(), "TRUE");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Real(3.0).to_string(), "3.0");
        assert_eq!(Value::Str("HOME".into()).to_string(), "'HOME'");
    }
}
