//! Test utilities: a regex oracle and exhaustive string enumeration.

use rangemata_core::{Automaton, Node};
use regex_automata::meta::Regex;

/// Regex syntax for the regular subset of the node grammar.
///
/// `None` for nodes regex syntax cannot express (`Empty`, intersection,
/// complement) and for inverted ranges.
pub fn pattern(node: &Node) -> Option<String> {
    let p = match node {
        Node::Char { value } => regex_syntax::escape(&value.to_string()),
        Node::Range { start, end } => {
            if start > end {
                return None;
            }
            format!(
                "[{}-{}]",
                regex_syntax::escape(&start.to_string()),
                regex_syntax::escape(&end.to_string())
            )
        }
        Node::Alternation { left, right } => format!("(?:{}|{})", pattern(left)?, pattern(right)?),
        Node::Concatenation { left, right } => format!("(?:{}{})", pattern(left)?, pattern(right)?),
        Node::Star { node } => format!("(?:{})*", pattern(node)?),
        Node::Plus { node } => format!("(?:{})+", pattern(node)?),
        Node::Repeat { node, min, max } => match max {
            Some(max) => format!("(?:{}){{{min},{max}}}", pattern(node)?),
            None => format!("(?:{}){{{min},}}", pattern(node)?),
        },
        Node::AnyChar => "(?s:.)".to_owned(),
        Node::EmptyString => "(?:)".to_owned(),
        Node::Empty | Node::Intersection { .. } | Node::Complement { .. } => return None,
    };
    Some(p)
}

/// Anchored regex for `node`, or `None` if it has no regex form.
pub fn oracle(node: &Node) -> Option<Regex> {
    let p = pattern(node)?;
    Some(Regex::new(&format!(r"\A(?:{p})\z")).expect("oracle pattern must compile"))
}

/// Direct membership semantics: regex oracle for regular subtrees, boolean
/// combination for intersection and complement.
pub fn denotes(node: &Node, s: &str) -> bool {
    match node {
        Node::Intersection { left, right } => denotes(left, s) && denotes(right, s),
        Node::Complement { node } => !denotes(node, s),
        Node::Empty => false,
        other => oracle(other)
            .expect("subtree has a regex form")
            .is_match(s),
    }
}

/// Every string over `alphabet` of length at most `max_len`, shortest first.
pub fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|s| {
                alphabet.iter().map(move |c| {
                    let mut next = s.clone();
                    next.push(*c);
                    next
                })
            })
            .collect();
        all.extend(layer.iter().cloned());
    }
    all
}

/// Assert that `automaton` accepts exactly what `node` denotes on every
/// string over `{a, b, c}` up to length 4.
pub fn assert_matches_denotation(node: &Node, automaton: &Automaton) {
    for s in strings(&['a', 'b', 'c'], 4) {
        assert_eq!(
            automaton.run(&s),
            denotes(node, &s),
            "{node} on {s:?}"
        );
    }
}
