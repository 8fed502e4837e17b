use rangemata_core::{Automaton, Node};

use super::{intersection, intersection_with, minus, star, union};
use crate::{Error, Limits, determinize, from_node};

#[test]
fn overlapping_ranges() {
    let am = from_node(&Node::range('a', 'm')).unwrap();
    let gz = from_node(&Node::range('g', 'z')).unwrap();

    let both = intersection(&am, &gz).unwrap();

    for c in 'a'..='z' {
        assert_eq!(both.run(&c.to_string()), ('g'..='m').contains(&c), "{c}");
    }
    assert!(!both.run("gg"));
    insta::assert_snapshot!(both.dump(), @r"
    S0 (initial)
      g-m → S1
    S1 (accept)
    ");
}

#[test]
fn disjoint_languages_intersect_to_empty() {
    let a = Automaton::char_range('a', 'c');
    let b = Automaton::char_range('x', 'z');

    assert_eq!(intersection(&a, &b).unwrap(), Automaton::empty());
}

#[test]
fn singleton_operand_short_circuits() {
    let word = Automaton::string("cat");
    let any = Automaton::any_string();

    let hit = intersection(&any, &word).unwrap();
    let miss = intersection(&word, &Automaton::char_range('a', 'z')).unwrap();

    assert_eq!(hit.singleton(), Some("cat"));
    assert_eq!(miss, Automaton::empty());
}

#[test]
fn agrees_with_both_operands() {
    let ab = determinize(&star(&union(&Automaton::char('a'), &Automaton::char('b'))));
    let even = determinize(&star(&union(
        &Automaton::string("aa"),
        &union(&Automaton::string("ab"), &union(&Automaton::string("ba"), &Automaton::string("bb"))),
    )));

    let both = intersection(&ab, &even).unwrap();

    for s in crate::test_utils::strings(&['a', 'b', 'c'], 4) {
        assert_eq!(both.run(&s), ab.run(&s) && even.run(&s), "{s:?}");
    }
}

#[test]
fn requires_deterministic_operands() {
    let nfa = union(&Automaton::char('a'), &Automaton::char_range('a', 'b'));

    assert_eq!(
        intersection(&nfa, &Automaton::any_string()),
        Err(Error::NotDeterministic)
    );
    assert_eq!(
        intersection(&Automaton::any_string(), &nfa),
        Err(Error::NotDeterministic)
    );
}

#[test]
fn minus_removes_right_operand() {
    let letters = Automaton::char_range('a', 'z');
    let q = Automaton::char('q');

    let diff = minus(&letters, &q).unwrap();

    assert!(diff.run("p"));
    assert!(diff.run("r"));
    assert!(!diff.run("q"));
    assert!(!diff.run("pp"));
}

#[test]
fn product_respects_state_limit() {
    let a = Automaton::char_range('a', 'm');
    let b = Automaton::char_range('g', 'z');

    let err = intersection_with(&a, &b, &Limits::new().max_states(1)).unwrap_err();

    assert_eq!(err, Error::StateLimitExceeded { limit: 1 });
}
