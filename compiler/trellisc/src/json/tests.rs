#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_value::Value;

use super::*;

#[test]
fn test_scalars() {
    assert_eq!(from_json(json!(null)), Value::Null);
    assert_eq!(from_json(json!(true)), Value::Bool(true));
    assert_eq!(from_json(json!(3)), Value::Int(3));
    assert_eq!(from_json(json!(-7)), Value::Int(-7));
    assert_eq!(from_json(json!(2.5)), Value::Float(2.5));
    assert_eq!(from_json(json!("x")), Value::string("x"));
}

#[test]
fn test_ints_stay_ints_and_floats_stay_floats() {
    assert_eq!(to_json(&Value::Int(2)).to_string(), "2");
    assert_eq!(to_json(&Value::Float(2.0)).to_string(), "2.0");
    assert_eq!(from_json(json!(2.0)), Value::Float(2.0));
}

#[test]
fn test_large_unsigned_becomes_float() {
    let big: serde_json::Value = serde_json::from_str("18446744073709551615").unwrap();
    assert_eq!(from_json(big), Value::Float(1.844_674_407_370_955_2e19));
}

#[test]
fn test_non_finite_float_is_null() {
    assert_eq!(to_json(&Value::Float(f64::NAN)), json!(null));
    assert_eq!(to_json(&Value::Float(f64::INFINITY)), json!(null));
}

#[test]
fn test_object_order_survives() {
    let text = r#"{"zeta": 1, "alpha": [true, {"m": null, "b": "s"}], "mid": 0.5}"#;
    let value = from_json(serde_json::from_str(text).unwrap());
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

    let back = serde_json::to_string(&to_json(&value)).unwrap();
    assert_eq!(
        back,
        r#"{"zeta":1,"alpha":[true,{"m":null,"b":"s"}],"mid":0.5}"#
    );
}

#[test]
fn test_object_from_json() {
    let map = object_from_json(json!({"a": 1})).unwrap();
    assert_eq!(map.get("a"), Some(&Value::Int(1)));
    assert_eq!(object_from_json(json!([1])).unwrap_err(), "list");
}
