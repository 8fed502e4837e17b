//! Language analysis.

use std::collections::VecDeque;

use indexmap::IndexSet;
use rangemata_core::{Automaton, Interval, StateId, Symbol, Transition, boundaries, segments};

use super::trim;
use crate::{determinize, minimize};

/// True if no string is accepted.
pub fn is_empty(a: &Automaton) -> bool {
    !a.live()[a.initial() as usize]
}

/// True if the empty string is the only accepted string.
pub fn is_empty_string(a: &Automaton) -> bool {
    if let Some(s) = a.singleton() {
        return s.is_empty();
    }
    let t = trim(a);
    t.len() == 1 && t.state(t.initial()).is_accept() && t.transition_count() == 0
}

/// True if every string is accepted.
pub fn is_total(a: &Automaton) -> bool {
    let m = minimize(a);
    let initial = m.state(m.initial());
    m.len() == 1
        && initial.is_accept()
        && initial.transitions() == [Transition::new(Interval::full(), m.initial())]
}

/// True if the language has finitely many strings.
pub fn is_finite(a: &Automaton) -> bool {
    // After trimming every state lies on an accepting path, so any cycle
    // pumps infinitely many strings.
    let t = trim(a);

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut mark = vec![Mark::New; t.len()];
    let mut stack: Vec<(StateId, usize)> = vec![(t.initial(), 0)];
    mark[t.initial() as usize] = Mark::Active;
    while let Some((id, index)) = stack.pop() {
        let transitions = t.state(id).transitions();
        let Some(edge) = transitions.get(index) else {
            mark[id as usize] = Mark::Done;
            continue;
        };
        stack.push((id, index + 1));
        match mark[edge.target as usize] {
            Mark::Active => return false,
            Mark::New => {
                mark[edge.target as usize] = Mark::Active;
                stack.push((edge.target, 0));
            }
            Mark::Done => {}
        }
    }
    true
}

/// True if every string accepted by `a` is accepted by `b`.
pub fn subset_of(a: &Automaton, b: &Automaton) -> bool {
    let a = determinize(a);
    let b = determinize(b);

    // `None` on the right stands for b's implicit reject sink.
    let mut pairs: IndexSet<(StateId, Option<StateId>)> = IndexSet::new();
    pairs.insert((a.initial(), Some(b.initial())));
    let mut next = 0;

    while let Some(&(p, q)) = pairs.get_index(next) {
        next += 1;
        let accepted_by_b = q.is_some_and(|q| b.state(q).is_accept());
        if a.state(p).is_accept() && !accepted_by_b {
            return false;
        }

        let tp = a.state(p).transitions();
        let tq = q.map(|q| b.state(q).transitions()).unwrap_or_default();
        let points = boundaries(tp.iter().chain(tq).map(|t| &t.interval));
        for segment in segments(&points) {
            let Some(p2) = a.step(p, segment.min) else {
                continue;
            };
            let q2 = q.and_then(|q| b.step(q, segment.min));
            pairs.insert((p2, q2));
        }
    }
    true
}

/// True if `a` and `b` accept the same strings.
pub fn same_language(a: &Automaton, b: &Automaton) -> bool {
    subset_of(a, b) && subset_of(b, a)
}

/// A shortest accepted string, preferring smaller symbols.
///
/// Surrogate code points are skipped since no `String` can hold them.
pub fn shortest_example(a: &Automaton) -> Option<String> {
    if let Some(s) = a.singleton() {
        return Some(s.to_owned());
    }

    let mut parent: Vec<Option<(StateId, char)>> = vec![None; a.len()];
    let mut seen = vec![false; a.len()];
    let mut queue = VecDeque::from([a.initial()]);
    seen[a.initial() as usize] = true;

    while let Some(id) = queue.pop_front() {
        if a.state(id).is_accept() {
            let mut chars = Vec::new();
            let mut current = id;
            while let Some((prev, c)) = parent[current as usize] {
                chars.push(c);
                current = prev;
            }
            return Some(chars.into_iter().rev().collect());
        }
        for t in a.state(id).transitions() {
            let Some(c) = first_char(&t.interval) else {
                continue;
            };
            if !seen[t.target as usize] {
                seen[t.target as usize] = true;
                parent[t.target as usize] = Some((id, c));
                queue.push_back(t.target);
            }
        }
    }
    None
}

/// Smallest scalar value in `interval`.
fn first_char(interval: &Interval) -> Option<char> {
    const SURROGATE_END: Symbol = 0xDFFF;
    char::from_u32(interval.min).or_else(|| {
        (interval.max > SURROGATE_END)
            .then(|| char::from_u32(SURROGATE_END + 1))
            .flatten()
    })
}
