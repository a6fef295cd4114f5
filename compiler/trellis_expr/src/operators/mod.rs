//! Binary and unary operators.
//!
//! Direct enum dispatch over the fixed set of value kinds. Integer arithmetic
//! is checked; any float operand promotes the operation to float.

use std::cmp::Ordering;

use trellis_value::Value;

use crate::ast::{BinaryOp, UnaryOp};
use crate::errors::{
    binary_type_mismatch, collection_too_large, division_by_zero, integer_overflow,
    invalid_operand, type_mismatch, ExprError,
};
use crate::{MAX_COLLECTION_LEN, MAX_STRING_LEN};

pub type EvalResult = Result<Value, ExprError>;

/// Evaluate a binary operation on already-evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => return Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::In => return contains(right, left).map(Value::Bool),
        BinaryOp::NotIn => return contains(right, left).map(|found| Value::Bool(!found)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            return compare(left, right, op);
        }
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op),
                _ => Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
            }
        }
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            check_string_len(a.len() as u128 + b.len() as u128)?;
            Ok(Value::Str(format!("{a}{b}")))
        }
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) if op == BinaryOp::Mul => {
            let times = repeat_count(*n);
            check_string_len(s.len() as u128 * times as u128)?;
            Ok(Value::Str(s.repeat(times)))
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            check_collection_len(a.len() as u128 + b.len() as u128)?;
            Ok(Value::List(a.iter().chain(b).cloned().collect()))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items))
            if op == BinaryOp::Mul =>
        {
            let times = repeat_count(*n);
            check_collection_len(items.len() as u128 * times as u128)?;
            Ok(Value::List(
                std::iter::repeat(items.iter())
                    .take(times)
                    .flatten()
                    .cloned()
                    .collect(),
            ))
        }
        _ => Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Pos, Value::Int(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOp::Neg | UnaryOp::Pos, value) => {
            Err(invalid_operand(op.as_symbol(), value.type_name()))
        }
    }
}

/// Structural equality; ints and floats compare numerically.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
            left.as_float() == right.as_float()
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| b.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => left == right,
    }
}

/// Order two values.
///
/// Returns `Ok(None)` for unordered floats (NaN). `op` only labels the error.
pub fn compare_values(left: &Value, right: &Value, op: BinaryOp) -> Result<Option<Ordering>, ExprError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Ok(left.as_float().zip(right.as_float()).and_then(|(a, b)| a.partial_cmp(&b)))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                if !values_equal(x, y) {
                    return compare_values(x, y, op);
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        }
        _ => Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
    }
}

fn compare(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let Some(ordering) = compare_values(left, right, op)? else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    };
    Ok(Value::Bool(result))
}

/// Membership test: substring, list element, or map key.
pub fn contains(container: &Value, item: &Value) -> Result<bool, ExprError> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(needle.as_str())),
            other => Err(type_mismatch("str", other.type_name())),
        },
        Value::List(items) => Ok(items.iter().any(|x| values_equal(x, item))),
        Value::Map(map) => Ok(item.as_str().is_some_and(|key| map.contains_key(key))),
        other => Err(invalid_operand("in", other.type_name())),
    }
}

// Type-specific evaluation

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => a.checked_add(b).map(Value::Int).ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a
            .checked_sub(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a
            .checked_mul(b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            match (Value::Int(a).as_float(), Value::Int(b).as_float()) {
                (Some(x), Some(y)) => Ok(Value::Float(x / y)),
                _ => Err(division_by_zero()),
            }
        }
        BinaryOp::FloorDiv => floor_div(a, b).map(Value::Int),
        BinaryOp::Mod => floor_mod(a, b).map(Value::Int),
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exp) => a
                .checked_pow(exp)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("exponentiation")),
            // Negative exponents leave the integers.
            Err(_) if b < 0 => match (Value::Int(a).as_float(), Value::Int(b).as_float()) {
                (Some(x), Some(y)) => eval_float_binary(x, y, op),
                _ => Err(integer_overflow("exponentiation")),
            },
            Err(_) => Err(integer_overflow("exponentiation")),
        },
        _ => Err(binary_type_mismatch(op, "int", "int")),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod if b == 0.0 => {
            return Err(division_by_zero());
        }
        BinaryOp::Div => a / b,
        BinaryOp::FloorDiv => (a / b).floor(),
        BinaryOp::Mod => {
            let r = a % b;
            if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r + b
            } else {
                r
            }
        }
        BinaryOp::Pow => a.powf(b),
        _ => return Err(binary_type_mismatch(op, "float", "float")),
    };
    Ok(Value::Float(result))
}

/// Division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Result<i64, ExprError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let q = a.checked_div(b).ok_or_else(|| integer_overflow("floor division"))?;
    let r = a.checked_rem(b).ok_or_else(|| integer_overflow("floor division"))?;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Result<i64, ExprError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    // i64::MIN % -1 overflows in hardware, but the remainder is 0.
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && (r < 0) != (b < 0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn repeat_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

pub(crate) fn check_collection_len(size: u128) -> Result<(), ExprError> {
    if size > MAX_COLLECTION_LEN as u128 {
        return Err(collection_too_large(size, MAX_COLLECTION_LEN));
    }
    Ok(())
}

pub(crate) fn check_string_len(size: u128) -> Result<(), ExprError> {
    if size > MAX_STRING_LEN as u128 {
        return Err(collection_too_large(size, MAX_STRING_LEN));
    }
    Ok(())
}
