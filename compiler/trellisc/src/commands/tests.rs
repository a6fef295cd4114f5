#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use trellis_eval::TemplateErrorKind;
use trellis_value::Value;

use super::*;

#[test]
fn test_set_value_parses_literals() {
    assert_eq!(set_value("n", "3").unwrap(), Value::Int(3));
    assert_eq!(set_value("s", "'prod'").unwrap(), Value::string("prod"));
    assert_eq!(
        set_value("xs", "[1, 2.5, None]").unwrap(),
        Value::list([Value::Int(1), Value::Float(2.5), Value::Null])
    );
}

#[test]
fn test_set_value_has_empty_scope() {
    let err = set_value("x", "other").unwrap_err();
    assert!(matches!(err, CliError::Set { ref name, .. } if name == "x"));
    assert_eq!(err.to_string(), "--set x: name 'other' is not defined");
}

#[test]
fn test_sets_layer_in_order() {
    let mut options = EvalOptions::new(Input::Stdin);
    options.sets = vec![
        ("a".to_owned(), "1".to_owned()),
        ("b".to_owned(), "2".to_owned()),
        ("a".to_owned(), "3".to_owned()),
    ];
    let globals = load_globals(&options).unwrap();
    assert_eq!(globals.get("a"), Some(&Value::Int(3)));
    assert_eq!(globals.get("b"), Some(&Value::Int(2)));
}

#[test]
fn test_missing_globals_file() {
    let mut options = EvalOptions::new(Input::Stdin);
    options.globals = Some(PathBuf::from("/nonexistent/trellis/globals.json"));
    let err = load_globals(&options).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }), "{err}");
}

#[test]
fn test_render() {
    let value = Value::map([("b", Value::Int(1)), ("a", Value::list([Value::Bool(true)]))]);
    assert_eq!(render(&value, true).unwrap(), r#"{"b":1,"a":[true]}"#);
    assert_eq!(
        render(&value, false).unwrap(),
        "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}"
    );
}

#[test]
fn test_template_error_display() {
    let err = CliError::from(trellis_eval::TemplateError::new(
        "$.x",
        TemplateErrorKind::NotIterable { got: "int" },
    ));
    assert_eq!(
        err.to_string(),
        "at $.x: the iterable of a for block must be iterable, got int"
    );
}
