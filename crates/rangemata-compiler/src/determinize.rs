//! Subset construction.
//!
//! Each DFA state stands for a set of NFA states. Sets are interned in an
//! `IndexSet` whose insertion index doubles as the DFA state ID, and are
//! expanded in FIFO order.

use indexmap::IndexSet;
use rangemata_core::{Automaton, Interval, StateId, Transition, boundaries, segments};

use crate::{Limits, Result};

/// Deterministic automaton with the same language as `a`.
///
/// Deterministic inputs are returned as-is (cloned).
pub fn determinize(a: &Automaton) -> Automaton {
    determinize_with(a, &Limits::default()).expect("unlimited determinization cannot fail")
}

/// Like [`determinize`], failing once `limits` is exceeded.
pub fn determinize_with(a: &Automaton, limits: &Limits) -> Result<Automaton> {
    if a.is_deterministic() {
        return Ok(a.clone());
    }

    let mut sets: IndexSet<Vec<StateId>> = IndexSet::new();
    sets.insert(vec![a.initial()]);
    let mut dfa = Automaton::new();
    let mut outgoing: Vec<(Interval, StateId)> = Vec::new();
    let mut next = 0;

    while let Some(set) = sets.get_index(next).cloned() {
        let id = next as StateId;
        next += 1;

        if set.iter().any(|&s| a.state(s).is_accept()) {
            dfa.set_accept(id, true);
        }

        outgoing.clear();
        for (interval, targets) in sweep(a, &set) {
            let (index, inserted) = sets.insert_full(targets);
            if inserted {
                limits.check_states(sets.len())?;
                dfa.add_state(false);
            }
            push_merged(&mut outgoing, interval, index as StateId);
        }
        for &(interval, target) in &outgoing {
            dfa.add_transition(id, interval, target);
        }
    }

    if let Some(s) = a.singleton() {
        dfa.set_singleton(Some(s.to_owned()));
    }

    log::debug!(
        "subset construction: {} NFA states -> {} DFA states",
        a.len(),
        dfa.len()
    );

    Ok(dfa)
}

/// Split the transitions leaving `set` into disjoint segments, each paired
/// with the sorted set of states it leads to. Uncovered segments are skipped.
fn sweep(a: &Automaton, set: &[StateId]) -> Vec<(Interval, Vec<StateId>)> {
    let mut transitions: Vec<Transition> = set
        .iter()
        .flat_map(|&s| a.state(s).transitions().iter().copied())
        .collect();
    transitions.sort_unstable();

    let points = boundaries(transitions.iter().map(|t| &t.interval));
    let mut result = Vec::new();
    let mut active: Vec<Transition> = Vec::new();
    let mut pending = transitions.iter().peekable();

    for segment in segments(&points) {
        active.retain(|t| t.interval.max >= segment.min);
        while let Some(t) = pending.next_if(|t| t.interval.min <= segment.min) {
            active.push(*t);
        }
        if active.is_empty() {
            continue;
        }

        let mut targets: Vec<StateId> = active.iter().map(|t| t.target).collect();
        targets.sort_unstable();
        targets.dedup();
        result.push((segment, targets));
    }
    result
}

/// Append `(interval, target)`, extending the previous entry when it ends
/// right before `interval` and leads to the same target.
pub(crate) fn push_merged(out: &mut Vec<(Interval, StateId)>, interval: Interval, target: StateId) {
    if let Some((last, last_target)) = out.last_mut() {
        if *last_target == target && last.is_adjacent_to(&interval) {
            last.max = interval.max;
            return;
        }
    }
    out.push((interval, target));
}
