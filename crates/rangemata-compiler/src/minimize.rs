//! Hopcroft minimization.
//!
//! The input is determinized and trimmed, then its states are refined by
//! partition refinement over symbol classes: the maximal ranges on which no
//! state changes behavior. An explicit sink absorbs missing transitions so
//! that every state is total during refinement; the sink's block is dropped
//! again when the quotient automaton is rebuilt.
//!
//! The quotient is numbered breadth-first from the initial block, following
//! transitions in interval order, so equal languages yield equal automata.

use std::collections::VecDeque;

use rangemata_core::{Automaton, Interval, StateId, boundaries, segments};

use crate::determinize::{determinize_with, push_merged};
use crate::ops::trim;
use crate::partition::Partition;
use crate::{Limits, Result};

/// The minimal deterministic automaton for the language of `a`.
pub fn minimize(a: &Automaton) -> Automaton {
    minimize_with(a, &Limits::default()).expect("unlimited minimization cannot fail")
}

/// Like [`minimize`], failing if determinization exceeds `limits`.
pub fn minimize_with(a: &Automaton, limits: &Limits) -> Result<Automaton> {
    if a.is_minimal() {
        return Ok(a.clone());
    }

    let dfa = trim(&determinize_with(a, limits)?);
    if dfa.accepting_states().next().is_none() {
        return Ok(Automaton::empty());
    }

    let partition = refine(&dfa);
    let mut result = quotient(&dfa, &partition);
    result.mark_minimal();
    if let Some(s) = a.singleton() {
        result.set_singleton(Some(s.to_owned()));
    }

    log::debug!(
        "minimization: {} states -> {} states",
        dfa.len(),
        result.len()
    );

    Ok(result)
}

/// Maximal sub-ranges covered by at least one transition, on which every
/// state of `dfa` behaves uniformly.
fn symbol_classes(dfa: &Automaton) -> Vec<Interval> {
    let points = boundaries(
        dfa.states()
            .flat_map(|(_, s)| s.transitions())
            .map(|t| &t.interval),
    );
    segments(&points)
        .filter(|segment| {
            dfa.states()
                .any(|(id, _)| dfa.step(id, segment.min).is_some())
        })
        .collect()
}

/// Coarsest partition of the states of a trimmed DFA (plus a sink with ID
/// `dfa.len()`) that is stable under every symbol class.
fn refine(dfa: &Automaton) -> Partition {
    let n = dfa.len();
    let sink = n as StateId;
    let classes = symbol_classes(dfa);
    let k = classes.len();

    // reverse[t] lists (class, source) pairs sorted by class.
    let mut reverse: Vec<Vec<(u32, StateId)>> = vec![Vec::new(); n + 1];
    for (c, class) in classes.iter().enumerate() {
        for s in 0..=sink {
            let target = if s == sink {
                sink
            } else {
                dfa.step(s, class.min).unwrap_or(sink)
            };
            reverse[target as usize].push((c as u32, s));
        }
    }

    let mut partition = Partition::new(n + 1);
    for s in dfa.accepting_states() {
        partition.mark(s);
    }
    partition.split();

    let mut pending = vec![false; partition.block_count() * k];
    let mut worklist: VecDeque<(u32, u32)> = VecDeque::new();
    if partition.block_count() == 2 {
        let smaller = if partition.size(0) <= partition.size(1) { 0 } else { 1 };
        for c in 0..k as u32 {
            pending[smaller as usize * k + c as usize] = true;
            worklist.push_back((smaller, c));
        }
    }

    let mut splitter: Vec<StateId> = Vec::new();
    while let Some((block, class)) = worklist.pop_front() {
        pending[block as usize * k + class as usize] = false;

        splitter.clear();
        splitter.extend_from_slice(partition.members(block));
        for &target in &splitter {
            let edges = &reverse[target as usize];
            let start = edges.partition_point(|&(c, _)| c < class);
            for &(_, source) in edges[start..].iter().take_while(|&&(c, _)| c == class) {
                partition.mark(source);
            }
        }

        for (old, new) in partition.split() {
            pending.resize(partition.block_count() * k, false);
            for c in 0..k {
                let chosen = if pending[old as usize * k + c] {
                    new
                } else if partition.size(new) <= partition.size(old) {
                    new
                } else {
                    old
                };
                let slot = chosen as usize * k + c;
                if !pending[slot] {
                    pending[slot] = true;
                    worklist.push_back((chosen, c as u32));
                }
            }
        }
    }

    partition
}

/// Rebuild the automaton over blocks, breadth-first from the initial block.
fn quotient(dfa: &Automaton, partition: &Partition) -> Automaton {
    const UNMAPPED: StateId = StateId::MAX;

    let mut id_of = vec![UNMAPPED; partition.block_count()];
    let mut result = Automaton::new();
    let initial_block = partition.block_of(dfa.initial());
    id_of[initial_block as usize] = result.initial();

    let mut queue = VecDeque::from([initial_block]);
    let mut outgoing: Vec<(Interval, StateId)> = Vec::new();
    while let Some(block) = queue.pop_front() {
        let id = id_of[block as usize];
        // Trimmed states are never equivalent to the sink, so any member
        // represents the block.
        let representative = dfa.state(partition.members(block)[0]);
        if representative.is_accept() {
            result.set_accept(id, true);
        }

        outgoing.clear();
        for t in representative.transitions() {
            let target_block = partition.block_of(t.target);
            let target = match id_of[target_block as usize] {
                UNMAPPED => {
                    let new = result.add_state(false);
                    id_of[target_block as usize] = new;
                    queue.push_back(target_block);
                    new
                }
                existing => existing,
            };
            push_merged(&mut outgoing, t.interval, target);
        }
        for &(interval, target) in &outgoing {
            result.add_transition(id, interval, target);
        }
    }
    result
}
