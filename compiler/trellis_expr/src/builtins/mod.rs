//! Builtin functions and methods.
//!
//! The builtin table is the only set of callables an expression can reach.
//! Dispatch is a plain `match` on the name: the set is fixed and exposes no
//! host capability (no I/O, environment, or process access).

mod convert;
mod helpers;
mod methods;

use std::cmp::Ordering;

use trellis_value::Value;

use crate::ast::BinaryOp;
use crate::errors::{integer_overflow, invalid_argument, undefined_function};
use crate::operators::{check_collection_len, evaluate_binary, EvalResult};
use helpers::{
    extreme, require_args, require_args_between, require_at_least, require_int,
    require_iterable, require_map, require_str, sort_values,
};

pub use methods::call_method;

/// Names of every builtin function, sorted.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "abs", "bool", "default", "enumerate", "float", "int", "items", "join", "keys", "len", "list",
    "lower", "max", "min", "range", "repr", "reversed", "sorted", "str", "sum", "upper", "values",
    "zip",
];

/// Whether `name` is a builtin function.
pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.binary_search(&name).is_ok()
}

/// Call the builtin function `name` with evaluated arguments.
pub fn call_function(name: &str, args: &[Value]) -> EvalResult {
    match name {
        "range" => range(args),
        "len" => len(args),
        "str" => unary(name, args, |x| Ok(Value::Str(x.to_string()))),
        "int" => unary(name, args, convert::to_int),
        "float" => unary(name, args, convert::to_float),
        "bool" => unary(name, args, |x| Ok(Value::Bool(x.is_truthy()))),
        "repr" => unary(name, args, |x| Ok(Value::Str(x.repr()))),
        "abs" => unary(name, args, abs),
        "min" => min_max(name, args, Ordering::Less),
        "max" => min_max(name, args, Ordering::Greater),
        "sum" => sum(args),
        "sorted" => {
            require_args(name, 1, args)?;
            let mut items = require_iterable(name, args, 0)?;
            sort_values(&mut items)?;
            Ok(Value::List(items))
        }
        "reversed" => {
            require_args(name, 1, args)?;
            let mut items = require_iterable(name, args, 0)?;
            items.reverse();
            Ok(Value::List(items))
        }
        "list" => {
            require_args(name, 1, args)?;
            Ok(Value::List(require_iterable(name, args, 0)?))
        }
        "keys" | "values" | "items" => {
            require_args(name, 1, args)?;
            let map = require_map(name, args, 0)?;
            methods::map_view(name, map)
        }
        "enumerate" => enumerate(args),
        "zip" => zip(args),
        "join" => {
            require_args(name, 2, args)?;
            let sep = require_str(name, args, 0)?;
            let items = require_iterable(name, args, 1)?;
            methods::join_values(name, sep, &items)
        }
        "lower" => {
            require_args(name, 1, args)?;
            Ok(Value::Str(require_str(name, args, 0)?.to_lowercase()))
        }
        "upper" => {
            require_args(name, 1, args)?;
            Ok(Value::Str(require_str(name, args, 0)?.to_uppercase()))
        }
        "default" => {
            require_args(name, 2, args)?;
            match args {
                [Value::Null, fallback] => Ok(fallback.clone()),
                [value, _] => Ok(value.clone()),
                _ => Ok(Value::Null),
            }
        }
        _ => Err(undefined_function(name)),
    }
}

fn unary(name: &str, args: &[Value], f: impl FnOnce(&Value) -> EvalResult) -> EvalResult {
    require_args(name, 1, args)?;
    match args {
        [x] => f(x),
        _ => Ok(Value::Null),
    }
}

/// `range(stop)`, `range(start, stop)`, `range(start, stop, step)`.
fn range(args: &[Value]) -> EvalResult {
    require_args_between("range", 1, 3, args)?;
    let (start, stop, step) = match args.len() {
        1 => (0, require_int("range", args, 0)?, 1),
        2 => (require_int("range", args, 0)?, require_int("range", args, 1)?, 1),
        _ => (
            require_int("range", args, 0)?,
            require_int("range", args, 1)?,
            require_int("range", args, 2)?,
        ),
    };
    if step == 0 {
        return Err(invalid_argument("range", "step must not be zero"));
    }

    // Count in i128 so extreme bounds cannot overflow.
    let span = if step > 0 {
        i128::from(stop) - i128::from(start)
    } else {
        i128::from(start) - i128::from(stop)
    };
    let stride = i128::from(step).abs();
    let count = if span <= 0 { 0 } else { (span + stride - 1) / stride };
    check_collection_len(count.unsigned_abs())?;

    let count = usize::try_from(count).unwrap_or(0);
    let mut items = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        items.push(Value::Int(current));
        current = current.saturating_add(step);
    }
    Ok(Value::List(items))
}

fn len(args: &[Value]) -> EvalResult {
    require_args("len", 1, args)?;
    let n = match args {
        [Value::Str(s)] => s.chars().count(),
        [Value::List(items)] => items.len(),
        [Value::Map(map)] => map.len(),
        [other] => {
            return Err(invalid_argument(
                "len",
                format!("object of type {} has no length", other.type_name()),
            ));
        }
        _ => 0,
    };
    Ok(Value::from(n))
}

fn abs(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs")),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(invalid_argument(
            "abs",
            format!("bad operand type {}", other.type_name()),
        )),
    }
}

/// `min`/`max` over the arguments, or over a single iterable argument.
fn min_max(name: &str, args: &[Value], wanted: Ordering) -> EvalResult {
    require_at_least(name, 1, args)?;
    let values = if args.len() == 1 {
        require_iterable(name, args, 0)?
    } else {
        args.to_vec()
    };
    extreme(name, values, wanted)
}

/// `sum(iterable[, start])`.
fn sum(args: &[Value]) -> EvalResult {
    require_args_between("sum", 1, 2, args)?;
    let items = require_iterable("sum", args, 0)?;
    let mut total = args.get(1).cloned().unwrap_or(Value::Int(0));
    if matches!(total, Value::Str(_)) {
        return Err(invalid_argument("sum", "can't sum strings, use join()"));
    }
    for item in &items {
        total = evaluate_binary(&total, item, BinaryOp::Add)?;
    }
    Ok(total)
}

/// `enumerate(iterable[, start])` as a list of `[index, item]` pairs.
fn enumerate(args: &[Value]) -> EvalResult {
    require_args_between("enumerate", 1, 2, args)?;
    let items = require_iterable("enumerate", args, 0)?;
    let start = if args.len() == 2 {
        require_int("enumerate", args, 1)?
    } else {
        0
    };
    let mut index = start;
    let mut pairs = Vec::with_capacity(items.len());
    for item in items {
        pairs.push(Value::List(vec![Value::Int(index), item]));
        index = index.saturating_add(1);
    }
    Ok(Value::List(pairs))
}

/// `zip(a, b, ...)`, stopping at the shortest input.
fn zip(args: &[Value]) -> EvalResult {
    require_at_least("zip", 1, args)?;
    let columns = (0..args.len())
        .map(|i| require_iterable("zip", args, i))
        .collect::<Result<Vec<_>, _>>()?;
    let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
    let result = (0..rows)
        .map(|row| {
            Value::List(
                columns
                    .iter()
                    .filter_map(|column| column.get(row).cloned())
                    .collect(),
            )
        })
        .collect();
    Ok(Value::List(result))
}
