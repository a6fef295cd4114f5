//! Builtin methods on `str`, `list` and `map` receivers.

use trellis_value::{Map, Value};

use super::helpers::{require_args, require_args_between, require_iterable, require_str};
use crate::errors::{invalid_argument, no_such_method, ExprError};
use crate::operators::{check_string_len, values_equal, EvalResult};

/// Call `receiver.method(args)`.
pub fn call_method(receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
    match receiver {
        Value::Str(s) => str_method(s, method, args),
        Value::List(items) => list_method(items, method, args),
        Value::Map(map) => map_method(map, method, args),
        other => Err(no_such_method(method, other.type_name())),
    }
}

fn str_method(s: &str, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "upper" => {
            require_args(method, 0, args)?;
            Ok(Value::Str(s.to_uppercase()))
        }
        "lower" => {
            require_args(method, 0, args)?;
            Ok(Value::Str(s.to_lowercase()))
        }
        "strip" | "lstrip" | "rstrip" => strip(s, method, args),
        "startswith" => {
            require_args(method, 1, args)?;
            Ok(Value::Bool(s.starts_with(require_str(method, args, 0)?)))
        }
        "endswith" => {
            require_args(method, 1, args)?;
            Ok(Value::Bool(s.ends_with(require_str(method, args, 0)?)))
        }
        "replace" => {
            require_args(method, 2, args)?;
            let from = require_str(method, args, 0)?;
            let to = require_str(method, args, 1)?;
            if from.is_empty() {
                return Err(invalid_argument(method, "empty pattern"));
            }
            let hits = s.matches(from).count();
            let grown = to.len().saturating_sub(from.len()) as u128 * hits as u128;
            check_string_len(s.len() as u128 + grown)?;
            Ok(Value::Str(s.replace(from, to)))
        }
        "split" => {
            require_args_between(method, 0, 1, args)?;
            let parts: Vec<Value> = if args.is_empty() {
                s.split_whitespace().map(Value::from).collect()
            } else {
                let sep = require_str(method, args, 0)?;
                if sep.is_empty() {
                    return Err(invalid_argument(method, "empty separator"));
                }
                s.split(sep).map(Value::from).collect()
            };
            Ok(Value::List(parts))
        }
        "join" => {
            require_args(method, 1, args)?;
            let items = require_iterable(method, args, 0)?;
            join_values(method, s, &items)
        }
        _ => Err(no_such_method(method, "str")),
    }
}

/// `strip([chars])` and its one-sided forms. Without `chars`, strips whitespace.
fn strip(s: &str, method: &str, args: &[Value]) -> EvalResult {
    require_args_between(method, 0, 1, args)?;
    let chars: Option<Vec<char>> = match args.first() {
        Some(_) => Some(require_str(method, args, 0)?.chars().collect()),
        None => None,
    };
    let is_stripped = |c: char| match &chars {
        Some(set) => set.contains(&c),
        None => c.is_whitespace(),
    };
    let stripped = match method {
        "lstrip" => s.trim_start_matches(is_stripped),
        "rstrip" => s.trim_end_matches(is_stripped),
        _ => s.trim_matches(is_stripped),
    };
    Ok(Value::from(stripped))
}

fn list_method(items: &[Value], method: &str, args: &[Value]) -> EvalResult {
    match method {
        "index" => {
            require_args(method, 1, args)?;
            let needle = &args[0];
            items
                .iter()
                .position(|x| values_equal(x, needle))
                .map(Value::from)
                .ok_or_else(|| {
                    invalid_argument(method, format!("{} is not in list", needle.repr()))
                })
        }
        "count" => {
            require_args(method, 1, args)?;
            let needle = &args[0];
            Ok(Value::from(
                items.iter().filter(|x| values_equal(x, needle)).count(),
            ))
        }
        _ => Err(no_such_method(method, "list")),
    }
}

fn map_method(map: &Map, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "keys" | "values" | "items" => {
            require_args(method, 0, args)?;
            map_view(method, map)
        }
        "get" => {
            require_args_between(method, 1, 2, args)?;
            let key = require_str(method, args, 0)?;
            Ok(map
                .get(key)
                .or_else(|| args.get(1))
                .cloned()
                .unwrap_or_default())
        }
        _ => Err(no_such_method(method, "map")),
    }
}

/// Keys, values, or `[key, value]` pairs of a map, in insertion order.
pub(super) fn map_view(view: &str, map: &Map) -> EvalResult {
    let items = match view {
        "keys" => map.keys().map(|k| Value::Str(k.clone())).collect(),
        "values" => map.values().cloned().collect(),
        _ => map
            .iter()
            .map(|(k, v)| Value::List(vec![Value::Str(k.clone()), v.clone()]))
            .collect(),
    };
    Ok(Value::List(items))
}

/// Join the canonical text of scalar items with `sep`.
pub(super) fn join_values(name: &str, sep: &str, items: &[Value]) -> EvalResult {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if !item.is_scalar() {
            return Err(join_item_error(name, i, item));
        }
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&item.to_string());
        check_string_len(out.len() as u128)?;
    }
    Ok(Value::Str(out))
}

fn join_item_error(name: &str, index: usize, item: &Value) -> ExprError {
    invalid_argument(
        name,
        format!(
            "sequence item {index}: expected a scalar, found {}",
            item.type_name()
        ),
    )
}
