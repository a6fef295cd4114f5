//! Type conversion builtins: `int(x)`, `float(x)`, `bool(x)`, `str(x)`.

use trellis_value::Value;

use crate::errors::{invalid_argument, ExprError};

pub(super) fn to_int(value: &Value) -> Result<Value, ExprError> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => float_to_int(*f).map(Value::Int),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_argument("int", format!("cannot parse {} as int", value.repr()))),
        other => Err(invalid_argument(
            "int",
            format!("cannot convert {} to int", other.type_name()),
        )),
    }
}

pub(super) fn to_float(value: &Value) -> Result<Value, ExprError> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(n) => Ok(Value::Float(int_to_float(*n))),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| {
                invalid_argument("float", format!("cannot parse {} as float", value.repr()))
            }),
        other => Err(invalid_argument(
            "float",
            format!("cannot convert {} to float", other.type_name()),
        )),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "float() rounds large integers to the nearest representable value"
)]
fn int_to_float(n: i64) -> f64 {
    n as f64
}

/// Truncate toward zero, rejecting NaN, infinities and out-of-range values.
fn float_to_int(f: f64) -> Result<i64, ExprError> {
    if f.is_nan() {
        return Err(invalid_argument("int", "cannot convert NaN to int"));
    }
    if f.is_infinite() {
        return Err(invalid_argument("int", "cannot convert infinity to int"));
    }
    let truncated = f.trunc();
    // -2^63 and 2^63 are exact in f64; the valid range is [-2^63, 2^63).
    let bound = 2.0_f64.powi(63);
    if truncated >= bound || truncated < -bound {
        return Err(invalid_argument("int", format!("float {f} out of range for int")));
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is integral and inside i64 range, checked above"
    )]
    Ok(truncated as i64)
}
