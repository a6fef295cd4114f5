//! Canonical text and expression-literal forms of values.

use std::fmt::{self, Write as _};

use crate::Value;

/// Canonical text of a value.
///
/// Scalars render bare (`null`, `True`, `42`, `2.0`, `text`). Booleans use
/// the same spelling as their literals. Containers
/// render in expression-literal form so nested strings stay quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&float_text(*x)),
            Value::Str(s) => f.write_str(s),
            Value::List(_) | Value::Map(_) => f.write_str(&self.repr()),
        }
    }
}

impl Value {
    /// Expression-literal source for this value.
    ///
    /// Parsing the result with the trellis expression grammar yields a value
    /// equal to `self`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        write_repr(&mut out, self);
        out
    }
}

fn write_repr(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        // The literal 9223372036854775808 does not fit in an int.
        Value::Int(i64::MIN) => out.push_str("(-9223372036854775807 - 1)"),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(x) if x.is_finite() => out.push_str(&float_text(*x)),
        Value::Float(x) => {
            let _ = write!(out, "float('{}')", float_text(*x));
        }
        Value::Str(s) => write_quoted(out, s),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(out, item);
            }
            out.push(']');
        }
        Value::Map(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_repr(out, item);
            }
            out.push('}');
        }
    }
}

/// Single-quoted string literal with the escapes the lexer understands.
fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Shortest round-trip float text that never reads back as an int.
///
/// `Debug` for `f64` already keeps a `.0` on integral values and switches to
/// exponent form at extreme magnitudes; only the non-finite spellings differ.
fn float_text(x: f64) -> String {
    if x.is_nan() {
        "nan".to_owned()
    } else if x.is_infinite() {
        if x > 0.0 { "inf" } else { "-inf" }.to_owned()
    } else {
        format!("{x:?}")
    }
}
