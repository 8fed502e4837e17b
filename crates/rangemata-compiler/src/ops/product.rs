//! Product construction: intersection and difference.

use indexmap::IndexSet;
use rangemata_core::{Automaton, Interval, StateId};

use super::{complement, trim};
use crate::determinize::push_merged;
use crate::{Error, Limits, Result};

/// Automaton accepting the strings both `a` and `b` accept.
pub fn intersection(a: &Automaton, b: &Automaton) -> Result<Automaton> {
    intersection_with(a, b, &Limits::default())
}

/// Like [`intersection`], failing once the product exceeds `limits`.
pub fn intersection_with(a: &Automaton, b: &Automaton, limits: &Limits) -> Result<Automaton> {
    if !a.is_deterministic() || !b.is_deterministic() {
        return Err(Error::NotDeterministic);
    }
    if let Some(s) = a.singleton() {
        return Ok(if b.run(s) { a.clone() } else { Automaton::empty() });
    }
    if let Some(s) = b.singleton() {
        return Ok(if a.run(s) { b.clone() } else { Automaton::empty() });
    }

    let mut pairs: IndexSet<(StateId, StateId)> = IndexSet::new();
    pairs.insert((a.initial(), b.initial()));
    let mut product = Automaton::new();
    let mut outgoing: Vec<(Interval, StateId)> = Vec::new();
    let mut next = 0;

    while let Some(&(p, q)) = pairs.get_index(next) {
        let id = next as StateId;
        next += 1;

        let (sp, sq) = (a.state(p), b.state(q));
        if sp.is_accept() && sq.is_accept() {
            product.set_accept(id, true);
        }

        // Both lists are sorted and disjoint: walk them in step.
        outgoing.clear();
        let (tp, tq) = (sp.transitions(), sq.transitions());
        let (mut i, mut j) = (0, 0);
        while i < tp.len() && j < tq.len() {
            if let Some(common) = tp[i].interval.intersect(&tq[j].interval) {
                let (index, inserted) = pairs.insert_full((tp[i].target, tq[j].target));
                if inserted {
                    limits.check_states(pairs.len())?;
                    product.add_state(false);
                }
                push_merged(&mut outgoing, common, index as StateId);
            }
            if tp[i].interval.max < tq[j].interval.max {
                i += 1;
            } else {
                j += 1;
            }
        }
        for &(interval, target) in &outgoing {
            product.add_transition(id, interval, target);
        }
    }

    let result = trim(&product);
    log::debug!(
        "intersection: {} x {} states -> {} pairs -> {} states",
        a.len(),
        b.len(),
        product.len(),
        result.len()
    );
    Ok(result)
}

/// Automaton accepting the strings `a` accepts and `b` rejects.
pub fn minus(a: &Automaton, b: &Automaton) -> Result<Automaton> {
    minus_with(a, b, &Limits::default())
}

/// Like [`minus`], failing once the product exceeds `limits`.
pub fn minus_with(a: &Automaton, b: &Automaton, limits: &Limits) -> Result<Automaton> {
    if !a.is_deterministic() {
        return Err(Error::NotDeterministic);
    }
    intersection_with(a, &complement(b)?, limits)
}
