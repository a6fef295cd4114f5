//! End-to-end template evaluation through the public API.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use trellis_eval::{BlockKind, Engine, Map, TemplateErrorKind, Value};
use trellis_expr::ExprErrorKind;

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::map(entries)
}

fn evaluate(template: &Value) -> Value {
    Engine::default().evaluate(template).unwrap()
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_map()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn if_true_and_false() {
    let template = map(vec![
        ("if(True)", map(vec![("a", Value::Int(42))])),
        ("if(False)", map(vec![("b", Value::Int(24))])),
    ]);
    assert_eq!(evaluate(&template), map(vec![("a", Value::Int(42))]));
}

#[test]
fn for_expands_in_order() {
    let template = map(vec![(
        "for(i in range(3))",
        map(vec![("key${{i}}", Value::string("value${{i}}"))]),
    )]);
    let result = evaluate(&template);
    assert_eq!(
        result,
        map(vec![
            ("key0", Value::string("value0")),
            ("key1", Value::string("value1")),
            ("key2", Value::string("value2")),
        ])
    );
    assert_eq!(keys(&result), vec!["key0", "key1", "key2"]);
}

#[test]
fn whole_string_interpolation_preserves_type() {
    let template = map(vec![("key", Value::string("${{ 1 + 1 }}"))]);
    assert_eq!(evaluate(&template), map(vec![("key", Value::Int(2))]));
}

#[test]
fn inline_interpolation_stringifies() {
    let engine = Engine::new(Map::from_iter([("nothing".to_owned(), Value::Null)]));
    let template = map(vec![
        ("a", Value::string("a${{1+1}}b")),
        ("b", Value::string("[${{ nothing }}]")),
    ]);
    assert_eq!(
        engine.evaluate(&template).unwrap(),
        map(vec![("a", Value::string("a2b")), ("b", Value::string("[]"))])
    );
}

#[test]
fn whole_string_expression_may_contain_closing_braces() {
    let template = map(vec![
        ("nested", Value::string("${{ {'a': {'b': 1}} }}")),
        ("quoted", Value::string("${{ '}}' }}")),
    ]);
    assert_eq!(
        evaluate(&template),
        map(vec![
            ("nested", map(vec![("a", map(vec![("b", Value::Int(1))]))])),
            ("quoted", Value::string("}}")),
        ])
    );
}

#[test]
fn inline_booleans_use_literal_spelling() {
    let template = map(vec![
        ("k", Value::string("flag=${{ 1 == 1 }}")),
        ("off", Value::string("${{ not True }}!")),
    ]);
    assert_eq!(
        evaluate(&template),
        map(vec![
            ("k", Value::string("flag=True")),
            ("off", Value::string("False!")),
        ])
    );
}

#[test]
fn keys_are_interpolated() {
    let engine = Engine::new(Map::from_iter([("env".to_owned(), Value::string("prod"))]));
    let template = map(vec![("db_${{ env }}", Value::Bool(true))]);
    assert_eq!(
        engine.evaluate(&template).unwrap(),
        map(vec![("db_prod", Value::Bool(true))])
    );
}

#[test]
fn bound_variable_shadows_and_does_not_leak() {
    let engine = Engine::new(Map::from_iter([("x".to_owned(), Value::string("outer"))]));
    let template = map(vec![
        ("before", Value::string("${{ x }}")),
        (
            "for(x in ['inner'])",
            map(vec![("in_for", Value::string("${{ x }}"))]),
        ),
        (
            "with(x='bound')",
            map(vec![
                ("in_with", Value::string("${{ x }}")),
                ("nested", map(vec![("deep", Value::string("${{ x }}"))])),
            ]),
        ),
        ("after", Value::string("${{ x }}")),
    ]);
    assert_eq!(
        engine.evaluate(&template).unwrap(),
        map(vec![
            ("before", Value::string("outer")),
            ("in_for", Value::string("inner")),
            ("in_with", Value::string("bound")),
            ("nested", map(vec![("deep", Value::string("bound"))])),
            ("after", Value::string("outer")),
        ])
    );
}

#[test]
fn nested_loops_see_both_variables() {
    let template = map(vec![(
        "for(i in range(2))",
        map(vec![(
            "for(j in range(2))",
            map(vec![("k${{ i }}${{ j }}", Value::string("${{ i * 2 + j }}"))]),
        )]),
    )]);
    assert_eq!(
        evaluate(&template),
        map(vec![
            ("k00", Value::Int(0)),
            ("k01", Value::Int(1)),
            ("k10", Value::Int(2)),
            ("k11", Value::Int(3)),
        ])
    );
}

#[test]
fn later_writes_win_and_keep_first_position() {
    let template = map(vec![
        ("a", Value::Int(1)),
        ("b", Value::Int(2)),
        ("for(v in [10, 20])", map(vec![("a", Value::string("${{ v }}"))])),
    ]);
    let result = evaluate(&template);
    assert_eq!(result, map(vec![("a", Value::Int(20)), ("b", Value::Int(2))]));
    assert_eq!(keys(&result), vec!["a", "b"]);
}

#[test]
fn sequences_keep_length_and_order() {
    let template = map(vec![(
        "items",
        Value::list([
            Value::string("${{ 1 }}"),
            map(vec![("if(False)", map(vec![("x", Value::Int(1))]))]),
            Value::Null,
        ]),
    )]);
    assert_eq!(
        evaluate(&template),
        map(vec![(
            "items",
            Value::list([Value::Int(1), map(vec![]), Value::Null])
        )])
    );
}

#[test]
fn for_iterates_maps_and_strings() {
    let engine = Engine::new(Map::from_iter([(
        "ports".to_owned(),
        map(vec![("http", Value::Int(80)), ("https", Value::Int(443))]),
    )]));
    let template = map(vec![
        (
            "for(name in ports)",
            map(vec![("${{ name }}", Value::string("${{ ports[name] }}"))]),
        ),
        ("for(c in 'ab')", map(vec![("${{ c }}", Value::Bool(true))])),
    ]);
    assert_eq!(
        engine.evaluate(&template).unwrap(),
        map(vec![
            ("http", Value::Int(80)),
            ("https", Value::Int(443)),
            ("a", Value::Bool(true)),
            ("b", Value::Bool(true)),
        ])
    );
}

#[test]
fn error_trace_spans_all_levels() {
    let template = map(vec![(
        "outer",
        map(vec![(
            "for(i in range(1))",
            map(vec![("a", Value::string("${{ undefined_name }}"))]),
        )]),
    )]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(err.path(), "$.outer.'for(i in range(1))'.0.a");
    match err.kind() {
        TemplateErrorKind::Expression { source, error } => {
            assert_eq!(source, "undefined_name");
            assert_eq!(
                error.kind,
                ExprErrorKind::UndefinedVariable {
                    name: "undefined_name".into()
                }
            );
        }
        other => panic!("expected expression error, got {other:?}"),
    }
}

#[test]
fn error_inside_sequence_uses_index() {
    let template = map(vec![(
        "list",
        Value::list([Value::Int(0), Value::string("${{ 1 / 0 }}")]),
    )]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(err.path(), "$.list.1");
    assert_eq!(
        err.to_string(),
        "at $.list.1: failed to evaluate the expression `1 / 0`: division by zero"
    );
}

#[test]
fn non_iterable_for_target_is_rejected() {
    let template = map(vec![("for(i in 5)", map(vec![("a", Value::Int(1))]))]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(err.path(), "$.'for(i in 5)'");
    assert_eq!(err.kind(), &TemplateErrorKind::NotIterable { got: "int" });
}

#[test]
fn malformed_blocks_are_rejected() {
    let cases = [
        (
            map(vec![("for(i of xs)", map(vec![]))]),
            BlockKind::For,
        ),
        (map(vec![("with(x)", map(vec![]))]), BlockKind::With),
        (
            map(vec![("for( i in xs)", map(vec![]))]),
            BlockKind::For,
        ),
        (
            map(vec![("for(x in a if y in b else c)", map(vec![]))]),
            BlockKind::For,
        ),
        (
            map(vec![("for(1 in xs)", map(vec![]))]),
            BlockKind::For,
        ),
    ];
    for (template, block) in cases {
        let err = Engine::default().evaluate(&template).unwrap_err();
        assert!(
            matches!(err.kind(), TemplateErrorKind::MalformedBlock { block: b, .. } if *b == block),
            "{err}"
        );
    }
}

#[test]
fn body_shape_is_checked_before_the_header() {
    let template = map(vec![("for(i of xs)", Value::Int(1))]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(
        err.kind(),
        &TemplateErrorKind::NonMappingBody {
            block: BlockKind::For,
            got: "int"
        }
    );

    let template = map(vec![("if(missing)", Value::list([]))]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(
        err.kind(),
        &TemplateErrorKind::NonMappingBody {
            block: BlockKind::If,
            got: "list"
        }
    );
}

#[test]
fn non_string_key_is_rejected() {
    let template = map(vec![("${{ 1 }}", Value::Null)]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(err.path(), "$.'${{ 1 }}'");
    assert_eq!(err.kind(), &TemplateErrorKind::NonStringKey { got: "int" });
}

#[test]
fn inline_structure_is_rejected() {
    let template = map(vec![("k", Value::string("x${{ [1, 2] }}"))]);
    let err = Engine::default().evaluate(&template).unwrap_err();
    assert_eq!(err.path(), "$.k");
    assert_eq!(
        err.kind(),
        &TemplateErrorKind::NonScalarInterpolation { got: "list" }
    );
}

#[test]
fn engine_is_reusable_across_threads() {
    let engine = Engine::new(Map::from_iter([("n".to_owned(), Value::Int(3))]));
    let template = map(vec![("v", Value::string("${{ n * 2 }}"))]);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.evaluate(&template).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), map(vec![("v", Value::Int(6))]));
        }
    });
}

#[test]
fn deep_nesting_does_not_overflow() {
    // Building, comparing and dropping a 2000-deep tree recurses natively,
    // so the test body needs more than the default test-thread stack.
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut template = Value::string("${{ 1 }}");
            for _ in 0..2_000 {
                template = map(vec![("k", template)]);
            }
            let result = evaluate(&template);
            let mut node = &result;
            for _ in 0..2_000 {
                node = node.as_map().and_then(|m| m.get("k")).unwrap();
            }
            assert_eq!(node, &Value::Int(1));
        })
        .unwrap()
        .join()
        .unwrap();
}

/// Templates with no control keys and no markers.
fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        "[a-z ]{0,8}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-z_]{1,6}", inner), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn plain_templates_are_identity(template in plain_value()) {
        let result = Engine::default().evaluate(&template).unwrap();
        prop_assert_eq!(result, template);
    }
}
