use rangemata_compiler::Compiler;
use rangemata_core::{Automaton, Interval, Node};

use super::{Matcher, RuntimeError};

fn dfa(node: &Node) -> Automaton {
    Compiler::new().minimize(true).compile(node).unwrap()
}

fn matches(a: &Automaton, text: &str) -> Vec<(usize, usize)> {
    Matcher::new(a).unwrap().find_matches(text).collect()
}

#[test]
fn rejects_nondeterministic_input() {
    let mut a = Automaton::new();
    let x = a.add_state(true);
    let y = a.add_state(false);
    a.add_transition(0, Interval::single('a' as u32), x);
    a.add_transition(0, Interval::single('a' as u32), y);

    assert_eq!(Matcher::new(&a).unwrap_err(), RuntimeError::NotDeterministic);
}

#[test]
fn accepts_whole_string() {
    let a = dfa(&Node::concatenation(
        Node::range('a', 'z'),
        Node::star(Node::range('0', '9')),
    ));
    let m = Matcher::new(&a).unwrap();

    assert!(m.accepts("a"));
    assert!(m.accepts("a123"));
    assert!(!m.accepts("1a"));
    assert!(!m.accepts(""));
    assert!(!m.accepts("a1b"));
}

#[test]
fn empty_language_accepts_nothing() {
    let a = Automaton::empty();
    let m = Matcher::new(&a).unwrap();

    assert!(!m.accepts(""));
    assert!(!m.accepts("a"));
    assert_eq!(m.find_matches("abc").count(), 0);
}

#[test]
fn longest_match_at_offset() {
    let a = dfa(&Node::plus(Node::char('a')));
    let m = Matcher::new(&a).unwrap();

    assert_eq!(m.longest_match_at("xaaab", 1), Some(4));
    assert_eq!(m.longest_match_at("xaaab", 2), Some(4));
    assert_eq!(m.longest_match_at("xaaab", 0), None);
    assert_eq!(m.longest_match_at("xaaab", 5), None);
    assert_eq!(m.longest_match_at("xaaab", 10), None);
}

#[test]
fn longest_match_off_char_boundary() {
    let a = Automaton::any_string();
    let m = Matcher::new(&a).unwrap();

    assert_eq!(m.longest_match_at("éa", 1), None);
    assert_eq!(m.longest_match_at("éa", 2), Some(3));
}

#[test]
fn finds_all_matches() {
    let a = dfa(&Node::plus(Node::range('0', '9')));

    assert_eq!(matches(&a, "ab12c345"), vec![(2, 4), (5, 8)]);
    assert_eq!(matches(&a, "no digits"), vec![]);
}

#[test]
fn prefers_longest_at_leftmost_start() {
    let a = dfa(&Node::alternation(Node::char('a'), Node::string("ab")));

    assert_eq!(matches(&a, "abab"), vec![(0, 2), (2, 4)]);
    assert_eq!(matches(&a, "aab"), vec![(0, 1), (1, 3)]);
}

#[test]
fn empty_matches() {
    let a = dfa(&Node::star(Node::char('a')));

    assert_eq!(matches(&a, "baab"), vec![(0, 0), (1, 3), (4, 4)]);
    assert_eq!(matches(&a, ""), vec![(0, 0)]);
}

#[test]
fn offsets_are_bytes() {
    let a = dfa(&Node::plus(Node::char('é')));

    assert_eq!(matches(&a, "aéé"), vec![(1, 5)]);
}

#[test]
fn singleton_shortcut() {
    let a = Automaton::string("ab");
    let m = Matcher::new(&a).unwrap();

    assert!(m.accepts("ab"));
    assert!(!m.accepts("abab"));
    assert_eq!(m.longest_match_at("xab", 1), Some(3));
    assert_eq!(matches(&a, "xababa"), vec![(1, 3), (3, 5)]);
}

#[test]
fn scans_are_rerunnable() {
    let a = dfa(&Node::plus(Node::char('a')));
    let m = Matcher::new(&a).unwrap();

    let first: Vec<_> = m.find_matches("a a a").collect();
    let second: Vec<_> = m.find_matches("a a a").collect();

    assert_eq!(first, vec![(0, 1), (2, 3), (4, 5)]);
    assert_eq!(first, second);
}

#[test]
fn shared_across_threads() {
    let a = dfa(&Node::concatenation(
        Node::range('a', 'z'),
        Node::star(Node::range('0', '9')),
    ));
    let m = Matcher::new(&a).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let text = format!("x{i}{i}");
                    (m.accepts(&text), m.find_matches(&text).count())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), (true, 1));
        }
    });
}
