//! Completion and complement of deterministic automata.

use rangemata_core::{Automaton, Interval, MAX_SYMBOL, StateId, Symbol};

use super::trim;
use crate::{Error, Result};

/// Make every state total by routing missing symbols to a reject sink.
///
/// The sink is only added when some state is incomplete.
pub fn totalize(a: &Automaton) -> Result<Automaton> {
    if !a.is_deterministic() {
        return Err(Error::NotDeterministic);
    }

    let mut result = a.clone();
    let mut sink: Option<StateId> = None;
    for (id, state) in a.states() {
        let gaps = gaps(state.transitions().iter().map(|t| t.interval));
        if gaps.is_empty() {
            continue;
        }
        let target = *sink.get_or_insert_with(|| {
            let s = result.add_state(false);
            result.add_transition(s, Interval::full(), s);
            s
        });
        for gap in gaps {
            result.add_transition(id, gap, target);
        }
    }
    Ok(result)
}

/// Automaton accepting exactly the strings `a` rejects.
pub fn complement(a: &Automaton) -> Result<Automaton> {
    let mut total = totalize(a)?;
    for id in 0..total.len() as StateId {
        let accept = total.state(id).is_accept();
        total.set_accept(id, !accept);
    }
    let result = trim(&total);

    log::debug!(
        "complement: {} states -> {} states",
        a.len(),
        result.len()
    );
    Ok(result)
}

/// Sub-ranges of the alphabet covered by none of the sorted `intervals`.
fn gaps(intervals: impl Iterator<Item = Interval>) -> Vec<Interval> {
    let mut gaps = Vec::new();
    let mut next: u64 = 0;
    for interval in intervals {
        if interval.min as u64 > next {
            gaps.push(Interval::new(next as Symbol, interval.min - 1));
        }
        next = next.max(interval.max as u64 + 1);
    }
    if next <= MAX_SYMBOL as u64 {
        gaps.push(Interval::new(next as Symbol, MAX_SYMBOL));
    }
    gaps
}
