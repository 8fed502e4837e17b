//! Epsilon elimination pass.
//!
//! Flattens a fragment of the build graph into an epsilon-free automaton.
//! Only the fragment entry and the targets of interval edges become states;
//! every other node is pure control flow and is looked through.
//!
//! For each such node the epsilon closure is computed; the state accepts if
//! the closure contains the fragment exit, and its transitions are the union
//! of the interval edges leaving the closure.

use std::collections::VecDeque;

use rangemata_core::{Automaton, StateId};

use super::graph::{BuildGraph, Edge, Fragment, NodeId};

/// Build an automaton accepting exactly the strings spelled from
/// `fragment.entry` to `fragment.exit`.
///
/// States are numbered in breadth-first discovery order, following edges
/// sorted by interval, so equal graphs always produce equal automata.
pub fn eliminate(graph: &BuildGraph, fragment: Fragment) -> Automaton {
    const UNMAPPED: StateId = StateId::MAX;

    let mut state_of = vec![UNMAPPED; graph.len()];
    let mut automaton = Automaton::new();
    state_of[fragment.entry as usize] = automaton.initial();

    let mut queue = VecDeque::from([fragment.entry]);
    let mut closure = Closure::new(graph.len());
    let mut edges: Vec<Edge> = Vec::new();

    while let Some(node) = queue.pop_front() {
        let state = state_of[node as usize];
        closure.compute(graph, node);

        edges.clear();
        let mut accept = false;
        for &member in &closure.members {
            accept |= member == fragment.exit;
            edges.extend_from_slice(&graph.node(member).edges);
        }
        edges.sort_unstable();
        edges.dedup();

        if accept {
            automaton.set_accept(state, true);
        }
        for edge in &edges {
            let target = match state_of[edge.target as usize] {
                UNMAPPED => {
                    let id = automaton.add_state(false);
                    state_of[edge.target as usize] = id;
                    queue.push_back(edge.target);
                    id
                }
                id => id,
            };
            automaton.add_transition(state, edge.interval, target);
        }
    }

    log::debug!(
        "epsilon elimination: {} graph nodes -> {} states, {} transitions{}",
        graph.len(),
        automaton.len(),
        automaton.transition_count(),
        if automaton.is_deterministic() {
            " (deterministic)"
        } else {
            ""
        }
    );

    automaton
}

/// Reusable epsilon-closure buffer.
///
/// Visited marks are generation stamps, so successive closures need no
/// clearing pass over the whole graph.
struct Closure {
    stamp: Vec<u32>,
    generation: u32,
    members: Vec<NodeId>,
    stack: Vec<NodeId>,
}

impl Closure {
    fn new(len: usize) -> Self {
        Self {
            stamp: vec![0; len],
            generation: 0,
            members: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn compute(&mut self, graph: &BuildGraph, start: NodeId) {
        self.generation += 1;
        let generation = self.generation;
        self.members.clear();

        self.stamp[start as usize] = generation;
        self.stack.push(start);
        while let Some(id) = self.stack.pop() {
            self.members.push(id);
            for &succ in &graph.node(id).successors {
                if self.stamp[succ as usize] != generation {
                    self.stamp[succ as usize] = generation;
                    self.stack.push(succ);
                }
            }
        }
    }
}
