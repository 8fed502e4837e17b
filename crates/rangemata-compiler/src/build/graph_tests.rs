//! Tests for fragment combinators.

use rangemata_core::{Automaton, Interval};

use super::{BuildGraph, Extent, Fragment};
use crate::{Error, Limits};

fn sym(c: char) -> Interval {
    Interval::single(c as u32)
}

#[test]
fn sequence_links_exits_to_entries() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let b = g.interval_fragment(sym('b'));

    let f = g.sequence(&[a, b]);

    assert_eq!(f, Fragment::new(0, 3));
    insta::assert_snapshot!(g.dump(), @r"
    N0: a → N1
    N1: ε → N2
    N2: b → N3
    N3: ∅
    ");
}

#[test]
fn zero_or_more_loops_through_branch() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));

    let f = g.zero_or_more(a);

    assert_eq!(f, Fragment::new(2, 3));
    insta::assert_snapshot!(g.dump(), @r"
    N0: a → N1
    N1: ε → N2
    N2: ε → N0, N3
    N3: ∅
    ");
}

#[test]
fn empty_alternation_accepts_nothing() {
    let mut g = BuildGraph::new();

    let f = g.alternation(&[]);

    assert_ne!(f.entry, f.exit);
    assert!(g.node(f.entry).successors.is_empty());
    assert!(g.node(f.entry).is_epsilon());
}

#[test]
fn repeat_unrolls_mandatory_then_optional_copies() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));

    let f = g.repeat(a, 2, Some(3), &Limits::default()).unwrap();

    assert_eq!(f, Fragment::new(0, 7));
    insta::assert_snapshot!(g.dump(), @r"
    N0: a → N1
    N1: ε → N3
    N2: ε → N6
    N3: a → N2
    N4: ε → N7
    N5: a → N4
    N6: ε → N5, N7
    N7: ∅
    ");
}

#[test]
fn repeat_rejects_unrepresentable_copy_counts() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));

    let err = g.repeat(a, u32::MAX, None, &Limits::default()).unwrap_err();

    assert_eq!(
        err,
        Error::StateLimitExceeded {
            limit: u32::MAX as usize
        }
    );
    assert_eq!(g.len(), 2);
}

#[test]
fn repeat_checks_projected_states_before_copying() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let limits = Limits::new().max_states(10);

    let err = g.repeat(a, 1_000_000, Some(1_000_000), &limits).unwrap_err();

    assert_eq!(err, Error::StateLimitExceeded { limit: 10 });
    assert_eq!(g.len(), 2);
}

#[test]
fn extent_counts_nodes_and_consuming_targets() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    assert_eq!(g.extent(a), Extent { nodes: 2, targets: 1 });

    let b = g.interval_fragment(sym('b'));
    let f = g.alternation(&[a, b]);
    assert_eq!(g.extent(f), Extent { nodes: 6, targets: 2 });
}

#[test]
fn repeat_zero_times_is_epsilon() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));

    let f = g.repeat(a, 0, Some(0), &Limits::default()).unwrap();

    assert_eq!(f.entry, f.exit);
}

#[test]
fn duplicate_is_independent_of_later_wiring() {
    let mut g = BuildGraph::new();
    let a = g.interval_fragment(sym('a'));
    let copy = g.duplicate(a);
    let len = g.len();

    let sink = g.add_node();
    g.connect(a.exit, sink);

    assert_eq!(len, 4);
    assert!(g.node(copy.exit).successors.is_empty());
    assert_eq!(g.node(copy.entry).edges[0].target, copy.exit);
}

#[test]
fn embed_routes_accepting_states_to_exit() {
    let mut g = BuildGraph::new();

    let f = g.embed(&Automaton::string("ab"));

    assert_eq!(f, Fragment::new(0, 3));
    insta::assert_snapshot!(g.dump(), @r"
    N0: a → N1
    N1: b → N2
    N2: ε → N3
    N3: ∅
    ");
}
