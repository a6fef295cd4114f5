//! Argument validation shared by builtin functions and methods.

use std::cmp::Ordering;

use trellis_value::{Map, Value};

use crate::ast::BinaryOp;
use crate::errors::{arity_mismatch, invalid_argument, ExprError};
use crate::operators::compare_values;

/// Validate an exact argument count.
#[inline]
pub(super) fn require_args(name: &str, expected: usize, args: &[Value]) -> Result<(), ExprError> {
    require_args_between(name, expected, expected, args)
}

/// Validate an argument count within `min..=max`.
pub(super) fn require_args_between(
    name: &str,
    min: usize,
    max: usize,
    args: &[Value],
) -> Result<(), ExprError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(arity_mismatch(name, expected, args.len()))
}

/// Validate a minimum argument count.
pub(super) fn require_at_least(name: &str, min: usize, args: &[Value]) -> Result<(), ExprError> {
    if args.len() >= min {
        Ok(())
    } else {
        Err(arity_mismatch(name, format!("at least {min}"), args.len()))
    }
}

/// Extract a string argument at the given index.
pub(super) fn require_str<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, ExprError> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        other => Err(wrong_arg_type(name, index, "str", other)),
    }
}

/// Extract an integer argument at the given index.
pub(super) fn require_int(name: &str, args: &[Value], index: usize) -> Result<i64, ExprError> {
    match args.get(index) {
        Some(Value::Int(n)) => Ok(*n),
        other => Err(wrong_arg_type(name, index, "int", other)),
    }
}

/// Extract a map argument at the given index.
pub(super) fn require_map<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Map, ExprError> {
    match args.get(index) {
        Some(Value::Map(map)) => Ok(map),
        other => Err(wrong_arg_type(name, index, "map", other)),
    }
}

/// Collect the elements of an iterable argument.
pub(super) fn require_iterable(
    name: &str,
    args: &[Value],
    index: usize,
) -> Result<Vec<Value>, ExprError> {
    match args.get(index).and_then(Value::elements) {
        Some(elements) => Ok(elements.collect()),
        None => Err(wrong_arg_type(name, index, "an iterable", args.get(index))),
    }
}

fn wrong_arg_type(name: &str, index: usize, expected: &str, got: Option<&Value>) -> ExprError {
    let got = got.map_or("nothing", Value::type_name);
    invalid_argument(
        name,
        format!("argument {} must be {expected}, not {got}", index + 1),
    )
}

/// Sort values by the expression language's ordering.
///
/// Fails on the first pair of incomparable values. Unordered floats sort as equal.
pub(super) fn sort_values(values: &mut [Value]) -> Result<(), ExprError> {
    let mut failure = None;
    values.sort_by(|a, b| match compare_values(a, b, BinaryOp::Lt) {
        Ok(ordering) => ordering.unwrap_or(Ordering::Equal),
        Err(e) => {
            failure.get_or_insert(e);
            Ordering::Equal
        }
    });
    failure.map_or(Ok(()), Err)
}

/// Pick the extreme element, keeping the first on ties.
pub(super) fn extreme(
    name: &str,
    values: Vec<Value>,
    wanted: Ordering,
) -> Result<Value, ExprError> {
    let mut iter = values.into_iter();
    let Some(mut best) = iter.next() else {
        return Err(invalid_argument(name, "arg is an empty sequence"));
    };
    for candidate in iter {
        if compare_values(&candidate, &best, BinaryOp::Lt)? == Some(wanted) {
            best = candidate;
        }
    }
    Ok(best)
}
