use std::cmp::Ordering;
use std::fmt;

use crate::error::RuntimeError;
use crate::ir::ast::{BinaryOperator, Literal, UnaryOperator};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// Undefined variables and call expressions evaluate to this.
    None,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::None => "none",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::None => false,
        }
    }

    pub fn unary(op: UnaryOperator, operand: Value) -> Result<Value, RuntimeError> {
        match (op, operand) {
            (UnaryOperator::Not, value) => Ok(Value::Bool(!value.is_truthy())),
            (UnaryOperator::Negate, Value::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| overflow(op)),
            (UnaryOperator::Negate, Value::Float(n)) => Ok(Value::Float(-n)),
            (UnaryOperator::Negate, value) => Err(RuntimeError::UnsupportedOperand {
                op: op.to_string(),
                operand: value.type_name(),
            }),
        }
    }

    pub fn binary(op: BinaryOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
        use BinaryOperator::*;

        match op {
            Equal => Ok(Value::Bool(left.loosely_equals(&right))),
            NotEqual => Ok(Value::Bool(!left.loosely_equals(&right))),
            Less | Greater | LessEqual | GreaterEqual => {
                let ordering = match left.compare(&right) {
                    Some(ordering) => ordering,
                    // NaN is unordered against everything
                    None if left.is_number() && right.is_number() => {
                        return Ok(Value::Bool(false));
                    }
                    None => return Err(unsupported(op, &left, &right)),
                };
                Ok(Value::Bool(match op {
                    Less => ordering == Ordering::Less,
                    Greater => ordering == Ordering::Greater,
                    LessEqual => ordering != Ordering::Greater,
                    _ => ordering != Ordering::Less,
                }))
            }
            Divide => {
                let (l, r) = match (&left, &right) {
                    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                        (left.as_float(), right.as_float())
                    }
                    _ => return Err(unsupported(op, &left, &right)),
                };
                if r == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::Float(l / r))
            }
            Add | Subtract | Multiply => match (left, right) {
                (Value::Str(l), Value::Str(r)) if op == Add => Ok(Value::Str(l + &r)),
                (Value::Int(l), Value::Int(r)) => {
                    let result = match op {
                        Add => l.checked_add(r),
                        Subtract => l.checked_sub(r),
                        _ => l.checked_mul(r),
                    };
                    result.map(Value::Int).ok_or_else(|| overflow(op))
                }
                (l @ (Value::Int(_) | Value::Float(_)), r @ (Value::Int(_) | Value::Float(_))) => {
                    let (l, r) = (l.as_float(), r.as_float());
                    Ok(Value::Float(match op {
                        Add => l + r,
                        Subtract => l - r,
                        _ => l * r,
                    }))
                }
                (l, r) => Err(unsupported(op, &l, &r)),
            },
        }
    }

    /// Numbers compare across int and float; other mismatched types are
    /// simply unequal.
    fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float() == other.as_float()
            }
            _ => self == other,
        }
    }

    fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float().partial_cmp(&other.as_float())
            }
            (Value::Str(l), Value::Str(r)) => Some(l.cmp(r)),
            (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
            _ => None,
        }
    }

    fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    fn as_float(&self) -> f64 {
        match self {
            Self::Int(n) => *n as f64,
            Self::Float(n) => *n,
            _ => f64::NAN,
        }
    }
}

fn unsupported(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnsupportedOperands {
        op: op.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn overflow(op: impl fmt::Display) -> RuntimeError {
    RuntimeError::IntegerOverflow { op: op.to_string() }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(n) => Value::Float(*n),
            Literal::String(s) => Value::Str(s.clone()),
            Literal::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing ".0" on whole floats
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Str(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        for value in [
            Value::Int(0),
            Value::Float(0.0),
            Value::Str(String::new()),
            Value::Bool(false),
            Value::None,
        ] {
            assert!(!value.is_truthy(), "{value:?} should be falsy");
        }
        assert!(Value::Str("0".into()).is_truthy());
        assert!(Value::Float(-0.5).is_truthy());
    }

    #[test]
    fn int_arithmetic_stays_integral_until_float_appears() {
        assert_eq!(
            Value::binary(BinaryOperator::Multiply, Value::Int(6), Value::Int(7)),
            Ok(Value::Int(42))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Add, Value::Int(1), Value::Float(0.5)),
            Ok(Value::Float(1.5))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Divide, Value::Int(4), Value::Int(2)),
            Ok(Value::Float(2.0))
        );
    }

    #[test]
    fn overflow_and_zero_division_are_errors() {
        assert_eq!(
            Value::binary(BinaryOperator::Add, Value::Int(i64::MAX), Value::Int(1)),
            Err(RuntimeError::IntegerOverflow { op: "+".into() })
        );
        assert_eq!(
            Value::binary(BinaryOperator::Divide, Value::Float(1.0), Value::Int(0)),
            Err(RuntimeError::DivisionByZero)
        );
    }

    #[test]
    fn mismatched_equality_is_false_but_ordering_fails() {
        assert_eq!(
            Value::binary(BinaryOperator::Equal, Value::Int(1), Value::Str("1".into())),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Equal, Value::Int(2), Value::Float(2.0)),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Less, Value::Int(1), Value::None),
            Err(RuntimeError::UnsupportedOperands {
                op: "<".into(),
                left: "int",
                right: "none",
            })
        );
    }

    #[test]
    fn nan_orders_false_both_ways() {
        for op in [
            BinaryOperator::Less,
            BinaryOperator::Greater,
            BinaryOperator::LessEqual,
            BinaryOperator::GreaterEqual,
        ] {
            assert_eq!(
                Value::binary(op, Value::Float(f64::NAN), Value::Int(1)),
                Ok(Value::Bool(false)),
                "{op}"
            );
        }
        assert_eq!(
            Value::binary(BinaryOperator::NotEqual, Value::Float(f64::NAN), Value::Float(f64::NAN)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn negating_text_is_rejected() {
        assert_eq!(
            Value::unary(UnaryOperator::Negate, Value::Str("a".into())),
            Err(RuntimeError::UnsupportedOperand {
                op: "-".into(),
                operand: "string",
            })
        );
        assert_eq!(
            Value::unary(UnaryOperator::Not, Value::None),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn display_matches_print_format() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::None.to_string(), "None");
    }
}
