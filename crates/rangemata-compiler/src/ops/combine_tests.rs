use rangemata_core::Automaton;

use super::{concatenate, optional, plus, repeat, repeat_with, star, union};
use crate::{Error, Limits};

#[test]
fn union_of_chars() {
    let u = union(&Automaton::char('a'), &Automaton::char('b'));

    insta::assert_snapshot!(u.dump(), @r"
    S0 (initial)
      a → S1
      b → S2
    S1 (accept)
    S2 (accept)
    ");
}

#[test]
fn union_of_equal_singletons_stays_singleton() {
    let u = union(&Automaton::string("hi"), &Automaton::string("hi"));

    assert_eq!(u.singleton(), Some("hi"));
    assert_eq!(u.len(), 3);
}

#[test]
fn concatenation_of_singletons() {
    let c = concatenate(&Automaton::string("ab"), &Automaton::string("cd"));

    assert_eq!(c.singleton(), Some("abcd"));
    assert!(c.run("abcd"));
}

#[test]
fn concatenation_with_star() {
    let c = concatenate(&Automaton::char_range('a', 'z'), &star(&Automaton::char_range('0', '9')));

    assert!(c.run("a"));
    assert!(c.run("a123"));
    assert!(!c.run("1a"));
    assert!(!c.is_singleton());
}

#[test]
fn star_plus_optional() {
    let a = Automaton::char('a');

    let s = star(&a);
    let p = plus(&a);
    let o = optional(&a);

    assert!(s.run("") && s.run("aaa"));
    assert!(!p.run("") && p.run("a") && p.run("aaaa"));
    assert!(o.run("") && o.run("a") && !o.run("aa"));
}

#[test]
fn star_of_empty_language_accepts_empty_string() {
    let s = star(&Automaton::empty());

    assert!(s.run(""));
    insta::assert_snapshot!(s.dump(), @"S0 (initial, accept)");
}

#[test]
fn bounded_repeat() {
    let x = Automaton::char_range('x', 'y');

    let r = repeat(&x, 2, Some(4)).unwrap();

    for accepted in ["xx", "xyx", "yyyy"] {
        assert!(r.run(accepted), "{accepted}");
    }
    for rejected in ["x", "xxxxx"] {
        assert!(!r.run(rejected), "{rejected}");
    }
}

#[test]
fn unbounded_repeat() {
    let r = repeat(&Automaton::char_range('a', 'b'), 2, None).unwrap();

    assert!(!r.run("a"));
    assert!(r.run("ab"));
    assert!(r.run("abbab"));
}

#[test]
fn exact_repeat_of_singleton() {
    let r = repeat(&Automaton::string("ab"), 3, Some(3)).unwrap();

    assert_eq!(r.singleton(), Some("ababab"));
}

#[test]
fn inverted_bounds_fail() {
    let err = repeat(&Automaton::char('a'), 4, Some(2)).unwrap_err();

    assert_eq!(err, Error::InvalidRepetitionBounds { min: 4, max: 2 });
    assert_eq!(err.to_string(), "invalid repetition bounds {4,2}");
}

#[test]
fn oversized_repetition_fails() {
    let id_space = Error::StateLimitExceeded {
        limit: u32::MAX as usize,
    };

    assert_eq!(repeat(&Automaton::char('a'), u32::MAX, None), Err(id_space.clone()));
    assert_eq!(
        repeat(&Automaton::string("ab"), u32::MAX, Some(u32::MAX)),
        Err(id_space)
    );
}

#[test]
fn repetition_respects_state_limit() {
    let limits = Limits::new().max_states(50);

    assert_eq!(
        repeat_with(&Automaton::char('a'), 1000, Some(2000), &limits),
        Err(Error::StateLimitExceeded { limit: 50 })
    );

    let r = repeat_with(&Automaton::char('a'), 2, Some(4), &limits).unwrap();
    assert!(r.run("aaaa"));
    assert!(!r.run("aaaaa"));
}

#[test]
fn inputs_are_untouched() {
    let a = Automaton::string("ab");
    let before = a.clone();

    let _ = star(&a);
    let _ = union(&a, &Automaton::char('z'));

    assert_eq!(a, before);
}
