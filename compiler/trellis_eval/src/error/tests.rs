use std::error::Error as _;

use super::*;
use pretty_assertions::assert_eq;
use trellis_expr::errors::undefined_variable;

#[test]
fn test_display_prefixes_path() {
    let err = TemplateError::new("$.a", not_iterable(&Value::Int(5)));
    assert_eq!(
        err.to_string(),
        "at $.a: the iterable of a for block must be iterable, got int"
    );
    assert_eq!(err.path(), "$.a");
    assert_eq!(
        err.message(),
        "the iterable of a for block must be iterable, got int"
    );
}

#[test]
fn test_block_messages() {
    assert_eq!(
        malformed_block(BlockKind::For, "missing ' in ' separator").to_string(),
        "malformed for block: missing ' in ' separator"
    );
    assert_eq!(
        non_mapping_body(BlockKind::With, &Value::list([])).to_string(),
        "the value of a with block must be a mapping, got list"
    );
}

#[test]
fn test_expression_error_is_the_source() {
    let err = TemplateError::new("$", expression_failed(" x + 1 ", undefined_variable("x")));
    assert_eq!(
        err.to_string(),
        "at $: failed to evaluate the expression `x + 1`: name 'x' is not defined"
    );
    let source = err.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("name 'x' is not defined"));
}

#[test]
fn test_structural_errors_have_no_source() {
    let err = TemplateError::new("$.k", non_string_key(&Value::Int(1)));
    assert!(err.source().is_none());
    assert_eq!(err.into_kind(), TemplateErrorKind::NonStringKey { got: "int" });
}
