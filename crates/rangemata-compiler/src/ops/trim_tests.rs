use rangemata_core::{Automaton, Interval};

use super::{reduce, trim};

fn iv(min: char, max: char) -> Interval {
    Interval::new(min as u32, max as u32)
}

#[test]
fn drops_unreachable_and_dead_states() {
    let mut a = Automaton::new();
    let accept = a.add_state(true);
    let dead = a.add_state(false);
    let orphan = a.add_state(true);
    a.add_transition(0, iv('a', 'a'), dead);
    a.add_transition(0, iv('b', 'b'), accept);
    a.add_transition(orphan, iv('c', 'c'), accept);

    let t = trim(&a);

    insta::assert_snapshot!(t.dump(), @r"
    S0 (initial)
      b → S1
    S1 (accept)
    ");
}

#[test]
fn dead_initial_state_gives_empty_language() {
    let mut a = Automaton::new();
    let s1 = a.add_state(false);
    a.add_transition(0, iv('a', 'z'), s1);

    assert_eq!(trim(&a), Automaton::empty());
}

#[test]
fn keeps_singleton() {
    let t = trim(&Automaton::string("ok"));

    assert_eq!(t.singleton(), Some("ok"));
}

#[test]
fn reduce_merges_same_target_intervals() {
    let mut a = Automaton::new();
    let s1 = a.add_state(true);
    a.add_transition(0, iv('a', 'c'), s1);
    a.add_transition(0, iv('d', 'f'), s1);
    a.add_transition(0, iv('e', 'k'), s1);
    a.add_transition(0, iv('m', 'm'), s1);

    let r = reduce(&a);

    assert!(!a.is_deterministic());
    assert!(r.is_deterministic());
    insta::assert_snapshot!(r.dump(), @r"
    S0 (initial)
      a-k → S1
      m → S1
    S1 (accept)
    ");
}
