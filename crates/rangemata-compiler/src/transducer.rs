//! Finite-state transducers.
//!
//! A transducer is an automaton whose transitions also emit output. Its
//! image under an input automaton is the automaton of everything it emits
//! while reading the strings that input accepts.

use std::fmt::{self, Write};

use indexmap::IndexSet;
use rangemata_core::{Automaton, Interval, MAX_SYMBOL, StateId, Symbol};

use crate::build::{BuildGraph, Fragment, NodeId, eliminate};
use crate::ops::trim;

/// What a transition emits for the symbol it consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Output {
    /// The consumed symbol itself.
    Identity,
    /// Nothing.
    Epsilon,
    /// Any one symbol of the interval.
    Interval(Interval),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Identity => f.write_str("*"),
            Output::Epsilon => f.write_str("ε"),
            Output::Interval(interval) => write!(f, "{interval}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransducerTransition {
    pub interval: Interval,
    pub output: Output,
    pub target: StateId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct TransducerState {
    accept: bool,
    transitions: Vec<TransducerTransition>,
}

/// An automaton with output on every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transducer {
    states: Vec<TransducerState>,
    initial: StateId,
}

impl Default for Transducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transducer {
    /// A single non-accepting initial state.
    pub fn new() -> Self {
        Self {
            states: vec![TransducerState::default()],
            initial: 0,
        }
    }

    /// Same states and transitions as `a`, every output set to epsilon.
    pub fn from_automaton(a: &Automaton) -> Self {
        let states = a
            .states()
            .map(|(_, s)| TransducerState {
                accept: s.is_accept(),
                transitions: s
                    .transitions()
                    .iter()
                    .map(|t| TransducerTransition {
                        interval: t.interval,
                        output: Output::Epsilon,
                        target: t.target,
                    })
                    .collect(),
            })
            .collect();
        Self {
            states,
            initial: a.initial(),
        }
    }

    pub fn add_state(&mut self, accept: bool) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(TransducerState {
            accept,
            transitions: Vec::new(),
        });
        id
    }

    pub fn set_accept(&mut self, state: StateId, accept: bool) {
        self.states[state as usize].accept = accept;
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the initial state exists.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_accept(&self, state: StateId) -> bool {
        self.states[state as usize].accept
    }

    /// Outgoing transitions sorted by interval.
    pub fn transitions(&self, state: StateId) -> &[TransducerTransition] {
        &self.states[state as usize].transitions
    }

    pub fn add_transition(&mut self, from: StateId, interval: Interval, output: Output, to: StateId) {
        let transition = TransducerTransition {
            interval,
            output,
            target: to,
        };
        let list = &mut self.states[from as usize].transitions;
        if let Err(pos) = list.binary_search(&transition) {
            list.insert(pos, transition);
        }
    }

    /// Transition on every symbol except `excluded`.
    pub fn add_exclude_transition(
        &mut self,
        from: StateId,
        excluded: char,
        output: Output,
        to: StateId,
    ) {
        let c = excluded as Symbol;
        if c > 0 {
            self.add_transition(from, Interval::new(0, c - 1), output, to);
        }
        if c < MAX_SYMBOL {
            self.add_transition(from, Interval::new(c + 1, MAX_SYMBOL), output, to);
        }
    }

    /// Transition on every symbol.
    pub fn add_accept_all_transition(&mut self, from: StateId, output: Output, to: StateId) {
        self.add_transition(from, Interval::full(), output, to);
    }

    /// Automaton of the outputs produced while reading strings of `input`.
    ///
    /// Runs the product of the transducer with `input`; epsilon outputs
    /// become epsilon edges and are eliminated afterwards.
    pub fn image(&self, input: &Automaton) -> Automaton {
        let mut g = BuildGraph::new();
        let exit = g.add_node();

        let mut pairs: IndexSet<(StateId, StateId)> = IndexSet::new();
        let mut nodes: Vec<NodeId> = Vec::new();
        pairs.insert((self.initial, input.initial()));
        nodes.push(g.add_node());
        let mut next = 0;

        while let Some(&(p, q)) = pairs.get_index(next) {
            let node = nodes[next];
            next += 1;

            if self.is_accept(p) && input.state(q).is_accept() {
                g.connect(node, exit);
            }
            for tp in self.transitions(p) {
                for tq in input.state(q).transitions() {
                    let Some(common) = tp.interval.intersect(&tq.interval) else {
                        continue;
                    };
                    let (index, inserted) = pairs.insert_full((tp.target, tq.target));
                    if inserted {
                        nodes.push(g.add_node());
                    }
                    let target = nodes[index];
                    match tp.output {
                        Output::Identity => g.add_edge(node, common, target),
                        Output::Epsilon => g.connect(node, target),
                        Output::Interval(out) => g.add_edge(node, out, target),
                    }
                }
            }
        }

        let result = trim(&eliminate(&g, Fragment::new(nodes[0], exit)));
        log::debug!(
            "transducer image: {} pairs -> {} states",
            pairs.len(),
            result.len()
        );
        result
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            let id = id as StateId;
            write!(w, "S{id}")?;
            match (id == self.initial, state.accept) {
                (true, true) => write!(w, " (initial, accept)")?,
                (true, false) => write!(w, " (initial)")?,
                (false, true) => write!(w, " (accept)")?,
                (false, false) => {}
            }
            writeln!(w)?;
            for t in &state.transitions {
                writeln!(w, "  {} / {} → S{}", t.interval, t.output, t.target)?;
            }
        }
        Ok(())
    }
}
