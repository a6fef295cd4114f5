use super::*;

#[test]
fn full_is_default() {
    assert_eq!(EvalMode::default(), EvalMode::Full);
}

#[test]
fn full_recurses_and_expands_loops() {
    assert!(EvalMode::Full.recurses());
    assert!(EvalMode::Full.expands_loops());
}

#[test]
fn shallow_stops_at_current_level() {
    assert!(!EvalMode::Shallow.recurses());
    assert!(!EvalMode::Shallow.expands_loops());
}
