//! Tests for epsilon elimination.

use rangemata_core::Interval;

use super::{BuildGraph, eliminate};
use crate::Limits;

fn sym(c: char) -> Interval {
    Interval::single(c as u32)
}

#[test]
fn sequence_collapses_epsilon_links() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let b = g.interval_fragment(sym('b'));
    let f = g.sequence(&[a, b]);

    let result = eliminate(&g, f);

    assert!(result.is_deterministic());
    insta::assert_snapshot!(result.dump(), @r"
    S0 (initial)
      a → S1
    S1
      b → S2
    S2 (accept)
    ");
}

#[test]
fn star_accepts_empty_string() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let f = g.zero_or_more(a);

    let result = eliminate(&g, f);

    assert!(result.run(""));
    assert!(result.run("aaa"));
    insta::assert_snapshot!(result.dump(), @r"
    S0 (initial, accept)
      a → S1
    S1 (accept)
      a → S1
    ");
}

#[test]
fn bounded_repeat() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let f = g.repeat(a, 2, Some(3), &Limits::default()).unwrap();

    let result = eliminate(&g, f);

    insta::assert_snapshot!(result.dump(), @r"
    S0 (initial)
      a → S1
    S1
      a → S2
    S2 (accept)
      a → S3
    S3 (accept)
    ");
}

#[test]
fn overlapping_branches_stay_nondeterministic() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let abc = g.interval_fragment(Interval::new('a' as u32, 'c' as u32));
    let f = g.alternation(&[a, abc]);

    let result = eliminate(&g, f);

    assert!(!result.is_deterministic());
    assert!(result.run("a"));
    assert!(result.run("c"));
    insta::assert_snapshot!(result.dump(), @r"
    S0 (initial)
      a → S1
      a-c → S2
    S1 (accept)
    S2 (accept)
    ");
}

#[test]
fn empty_fragment_yields_empty_language() {
    let mut g = BuildGraph::new();
    let f = g.empty_fragment();

    let result = eliminate(&g, f);

    insta::assert_snapshot!(result.dump(), @"S0 (initial)");
}

#[test]
fn epsilon_cycles_terminate() {
    let mut g = BuildGraph::new();
    let eps = g.epsilon_fragment();
    let inner = g.zero_or_more(eps);
    let f = g.zero_or_more(inner);

    let result = eliminate(&g, f);

    insta::assert_snapshot!(result.dump(), @"S0 (initial, accept)");
}
