#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::ExprErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

fn lex_message(source: &str) -> String {
    match tokenize(source).unwrap_err().kind {
        ExprErrorKind::Lex { message } => message,
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn test_keywords_and_aliases() {
    assert_eq!(
        tokens("and or not in if else True true False false None null"),
        vec![
            Token::And,
            Token::Or,
            Token::Not,
            Token::In,
            Token::If,
            Token::Else,
            Token::True,
            Token::True,
            Token::False,
            Token::False,
            Token::None,
            Token::None,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(tokens("index"), vec![Token::Ident("index".into())]);
    assert_eq!(tokens("Nonesuch"), vec![Token::Ident("Nonesuch".into())]);
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(
        tokens("** * // / == != <= < >= >"),
        vec![
            Token::StarStar,
            Token::Star,
            Token::SlashSlash,
            Token::Slash,
            Token::EqEq,
            Token::NotEq,
            Token::LtEq,
            Token::Lt,
            Token::GtEq,
            Token::Gt,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("42 2.5 1e3 1.5E-2"),
        vec![
            Token::Int(42),
            Token::Float(2.5),
            Token::Float(1000.0),
            Token::Float(0.015),
        ]
    );
}

#[test]
fn test_strings_with_escapes() {
    assert_eq!(
        tokens(r#"'it\'s' "a\"b" 'tab\there'"#),
        vec![
            Token::Str("it's".into()),
            Token::Str("a\"b".into()),
            Token::Str("tab\there".into()),
        ]
    );
}

#[test]
fn test_spans() {
    let spanned = tokenize("ab + 1").unwrap();
    let spans: Vec<_> = spanned.iter().map(|t| t.span.clone()).collect();
    assert_eq!(spans, vec![0..2, 3..4, 5..6]);
}

#[test]
fn test_unicode_identifier() {
    assert_eq!(tokens("größe"), vec![Token::Ident("größe".into())]);
}

#[test]
fn test_errors() {
    assert_eq!(lex_message("a = 1"), "unexpected character `=`");
    assert_eq!(
        lex_message("99999999999999999999"),
        "integer literal `99999999999999999999` is too large"
    );
    assert_eq!(lex_message(r"'\q'"), r"invalid escape `\q` in string");
}

proptest! {
    #[test]
    fn prop_int_literals_round_trip(n in 0i64..=i64::MAX) {
        prop_assert_eq!(tokens(&n.to_string()), vec![Token::Int(n)]);
    }

    #[test]
    fn prop_identifiers_lex_as_one_token(name in "[a-z_][a-z0-9_]{0,12}") {
        let toks = tokens(&name);
        prop_assert_eq!(toks.len(), 1);
    }
}
