//! Removal of useless states and redundant transitions.

use rangemata_core::{Automaton, Interval, StateId};

/// Drop states that are unreachable or cannot reach an accepting state.
///
/// Survivors are renumbered in breadth-first order. An automaton without
/// any live path becomes [`Automaton::empty`].
pub fn trim(a: &Automaton) -> Automaton {
    let live = a.live();
    if !live[a.initial() as usize] {
        return Automaton::empty();
    }

    let order: Vec<StateId> = a
        .reachable()
        .into_iter()
        .filter(|&s| live[s as usize])
        .collect();
    let mut result = a.retain(&order);
    if let Some(s) = a.singleton() {
        result.set_singleton(Some(s.to_owned()));
    }
    result
}

/// Merge overlapping or adjacent intervals that share a target.
pub fn reduce(a: &Automaton) -> Automaton {
    let mut result = Automaton::with_capacity(a.len());
    for (id, state) in a.states() {
        if id > 0 {
            result.add_state(false);
        }
        result.set_accept(id, state.is_accept());
    }
    result.set_initial(a.initial());

    let mut merged: Vec<(StateId, Interval)> = Vec::new();
    for (id, state) in a.states() {
        let mut by_target: Vec<(StateId, Interval)> = state
            .transitions()
            .iter()
            .map(|t| (t.target, t.interval))
            .collect();
        by_target.sort_unstable();

        merged.clear();
        for (target, interval) in by_target {
            if let Some((last_target, last)) = merged.last_mut() {
                if *last_target == target
                    && (last.overlaps(&interval) || last.is_adjacent_to(&interval))
                {
                    last.max = last.max.max(interval.max);
                    continue;
                }
            }
            merged.push((target, interval));
        }
        for &(target, interval) in &merged {
            result.add_transition(id, interval, target);
        }
    }

    if a.is_minimal() {
        result.mark_minimal();
    }
    if let Some(s) = a.singleton() {
        result.set_singleton(Some(s.to_owned()));
    }
    result
}
