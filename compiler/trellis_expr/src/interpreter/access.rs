//! Indexing, slicing and member access.

use trellis_value::Value;

use crate::errors::{index_out_of_bounds, key_not_found, type_mismatch, ExprError};
use crate::operators::EvalResult;

/// `receiver[index]`.
pub(super) fn index_value(receiver: &Value, index: &Value) -> EvalResult {
    match (receiver, index) {
        (Value::List(items), Value::Int(i)) => resolve_index(*i, items.len())
            .and_then(|pos| items.get(pos))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(*i, items.len())),
        (Value::Str(s), Value::Int(i)) => {
            let len = s.chars().count();
            resolve_index(*i, len)
                .and_then(|pos| s.chars().nth(pos))
                .map(|c| Value::Str(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(*i, len))
        }
        (Value::Map(map), Value::Str(key)) => {
            map.get(key).cloned().ok_or_else(|| key_not_found(key))
        }
        (Value::List(_) | Value::Str(_), other) => Err(type_mismatch("int", other.type_name())),
        (Value::Map(_), other) => Err(type_mismatch("str", other.type_name())),
        (other, _) => Err(not_subscriptable(other)),
    }
}

/// `receiver[start:end]` with out-of-range bounds clamped.
pub(super) fn slice_value(receiver: &Value, start: Option<&Value>, end: Option<&Value>) -> EvalResult {
    let start = slice_bound(start)?;
    let end = slice_bound(end)?;
    match receiver {
        Value::List(items) => {
            let (from, to) = clamp_range(start, end, items.len());
            Ok(Value::List(items[from..to].to_vec()))
        }
        Value::Str(s) => {
            let (from, to) = clamp_range(start, end, s.chars().count());
            Ok(Value::Str(s.chars().skip(from).take(to - from).collect()))
        }
        other => Err(not_subscriptable(other)),
    }
}

/// `receiver.name` outside a call: a map key read.
pub(super) fn attr_value(receiver: &Value, name: &str) -> EvalResult {
    match receiver {
        Value::Map(map) => map.get(name).cloned().ok_or_else(|| key_not_found(name)),
        other => Err(type_mismatch("map", other.type_name())),
    }
}

/// Map a possibly negative index onto `0..len`.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let pos = if index < 0 { index.checked_add(len)? } else { index };
    if (0..len).contains(&pos) {
        usize::try_from(pos).ok()
    } else {
        None
    }
}

/// A slice bound: an int, or absent/null for the default.
fn slice_bound(bound: Option<&Value>) -> Result<Option<i64>, ExprError> {
    match bound {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Int(n)) => Ok(Some(*n)),
        Some(other) => Err(type_mismatch("int", other.type_name())),
    }
}

fn clamp_range(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
    let from = start.map_or(0, |b| clamp_bound(b, len));
    let to = end.map_or(len, |b| clamp_bound(b, len));
    (from, to.max(from))
}

fn clamp_bound(bound: i64, len: usize) -> usize {
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let pos = if bound < 0 {
        bound.saturating_add(signed_len).max(0)
    } else {
        bound.min(signed_len)
    };
    usize::try_from(pos).unwrap_or(0)
}

fn not_subscriptable(value: &Value) -> ExprError {
    type_mismatch("list, str or map", value.type_name())
}
