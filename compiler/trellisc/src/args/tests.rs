#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use trellis_eval::EvalMode;

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_no_args_is_help() {
    assert_eq!(parse_args(&[]).unwrap(), Command::Help);
    assert_eq!(parse_args(&args(&["--help"])).unwrap(), Command::Help);
    assert_eq!(parse_args(&args(&["version"])).unwrap(), Command::Version);
}

#[test]
fn test_eval_defaults() {
    let command = parse_args(&args(&["eval", "config.json"])).unwrap();
    assert_eq!(
        command,
        Command::Eval(EvalOptions::new(Input::File(PathBuf::from("config.json"))))
    );
}

#[test]
fn test_eval_all_options() {
    let command = parse_args(&args(&[
        "eval",
        "-",
        "--globals=vars.json",
        "--set",
        "env='prod'",
        "--set=replicas=3",
        "--shallow",
        "--compact",
    ]))
    .unwrap();
    assert_eq!(
        command,
        Command::Eval(EvalOptions {
            template: Input::Stdin,
            globals: Some(PathBuf::from("vars.json")),
            sets: vec![
                ("env".to_owned(), "'prod'".to_owned()),
                ("replicas".to_owned(), "3".to_owned()),
            ],
            mode: EvalMode::Shallow,
            compact: true,
        })
    );
}

#[test]
fn test_set_literal_may_contain_equals() {
    let Command::Check(options) =
        parse_args(&args(&["check", "t.json", "--set", "flag=1 == 1"])).unwrap()
    else {
        panic!("expected check");
    };
    assert_eq!(options.sets, vec![("flag".to_owned(), "1 == 1".to_owned())]);
}

#[test]
fn test_usage_errors() {
    let cases: &[&[&str]] = &[
        &["frobnicate"],
        &["eval"],
        &["eval", "a.json", "b.json"],
        &["eval", "a.json", "--verbose"],
        &["eval", "a.json", "--set"],
        &["eval", "a.json", "--set", "novalue"],
        &["eval", "a.json", "--set", "1x=2"],
        &["check", "--globals"],
    ];
    for case in cases {
        assert!(parse_args(&args(case)).is_err(), "{case:?} should be rejected");
    }
}

#[test]
fn test_usage_error_message() {
    let err = parse_args(&args(&["eval", "a.json", "--wat"])).unwrap_err();
    assert_eq!(err.to_string(), "unknown option '--wat'");
}
