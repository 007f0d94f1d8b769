use crate::interpreter::error::RuntimeErrorKind;
use crate::parser::expression::{InfixOperator, PrefixOperator};
use crate::Integer;

pub fn apply_prefix(operator: PrefixOperator, rhs: Integer) -> Result<Integer, RuntimeErrorKind> {
    match operator {
        PrefixOperator::Plus => Ok(rhs),
        PrefixOperator::Minus => rhs.checked_neg().ok_or(RuntimeErrorKind::Overflow),
    }
}

/// Division and remainder truncate toward zero.
pub fn apply_infix(
    operator: InfixOperator,
    lhs: Integer,
    rhs: Integer,
) -> Result<Integer, RuntimeErrorKind> {
    match operator {
        InfixOperator::Add => lhs.checked_add(rhs).ok_or(RuntimeErrorKind::Overflow),
        InfixOperator::Subtract => lhs.checked_sub(rhs).ok_or(RuntimeErrorKind::Overflow),
        InfixOperator::Multiply => lhs.checked_mul(rhs).ok_or(RuntimeErrorKind::Overflow),
        InfixOperator::Divide => {
            if rhs == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            lhs.checked_div(rhs).ok_or(RuntimeErrorKind::Overflow)
        }
        InfixOperator::Modulo => {
            if rhs == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            // `Integer::MIN % -1` is mathematically zero.
            Ok(lhs.checked_rem(rhs).unwrap_or(0))
        }
    }
}
