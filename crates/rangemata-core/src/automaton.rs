//! State arena for range-labeled finite automata.
//!
//! States live in a `Vec` and are referenced by `StateId`. Transitions hold
//! non-owning target indices, so cycles need no reference counting. Unreachable
//! states are never collected implicitly; passes that can leave garbage behind
//! sweep it with [`Automaton::reachable`] and [`Automaton::retain`].

use std::collections::VecDeque;

use crate::interval::{Interval, MAX_SYMBOL, Symbol};

/// Index into `Automaton::states`.
pub type StateId = u32;

/// An interval-labeled edge to another state of the same automaton.
///
/// Field order matters: transitions sort by interval first, then target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub interval: Interval,
    pub target: StateId,
}

impl Transition {
    pub fn new(interval: Interval, target: StateId) -> Self {
        Self { interval, target }
    }
}

/// A state with its accepting flag and sorted outgoing transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    accept: bool,
    transitions: Vec<Transition>,
}

impl State {
    pub fn is_accept(&self) -> bool {
        self.accept
    }

    /// Outgoing transitions sorted by `(interval, target)`.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Target of the transition covering `symbol`.
    ///
    /// Binary search; only meaningful when the transitions don't overlap.
    #[inline]
    pub fn step(&self, symbol: Symbol) -> Option<StateId> {
        let idx = self
            .transitions
            .partition_point(|t| t.interval.max < symbol);
        self.transitions
            .get(idx)
            .filter(|t| t.interval.min <= symbol)
            .map(|t| t.target)
    }
}

/// A finite automaton over Unicode scalar values.
///
/// Always owns at least one state, the initial one. Status flags:
/// - `deterministic` is maintained on every [`add_transition`](Self::add_transition)
/// - `minimal` is only set by [`mark_minimal`](Self::mark_minimal)
/// - `singleton` records a language of exactly one known string
///
/// Any mutation clears `minimal` and `singleton`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    initial: StateId,
    deterministic: bool,
    minimal: bool,
    singleton: Option<String>,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// A single non-accepting initial state. Accepts nothing.
    pub fn new() -> Self {
        Self {
            states: vec![State::default()],
            initial: 0,
            deterministic: true,
            minimal: false,
            singleton: None,
        }
    }

    /// Reserve room for `capacity` states (the initial state included).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut states = Vec::with_capacity(capacity.max(1));
        states.push(State::default());
        Self {
            states,
            ..Self::new()
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Basic acceptors
    // ─────────────────────────────────────────────────────────────────────

    /// The empty language.
    pub fn empty() -> Self {
        let mut a = Self::new();
        a.minimal = true;
        a
    }

    /// The language containing only the empty string.
    pub fn empty_string() -> Self {
        let mut a = Self::new();
        a.states[0].accept = true;
        a.minimal = true;
        a.singleton = Some(String::new());
        a
    }

    /// The language containing exactly `s`.
    pub fn string(s: &str) -> Self {
        let mut a = Self::with_capacity(s.chars().count() + 1);
        let mut current = a.initial;
        for c in s.chars() {
            let next = a.add_state(false);
            a.add_transition(current, Interval::single(c as Symbol), next);
            current = next;
        }
        a.set_accept(current, true);
        a.minimal = true;
        a.singleton = Some(s.to_owned());
        a
    }

    /// All single-symbol strings within `interval`.
    pub fn interval(interval: Interval) -> Self {
        let mut a = Self::with_capacity(2);
        let end = a.add_state(true);
        a.add_transition(a.initial, interval, end);
        a.minimal = true;
        if interval.is_single() {
            a.singleton = char::from_u32(interval.min).map(String::from);
        }
        a
    }

    pub fn char(c: char) -> Self {
        Self::interval(Interval::single(c as Symbol))
    }

    /// Single characters in `[start, end]`; empty when `start > end`.
    pub fn char_range(start: char, end: char) -> Self {
        match Interval::from_chars(start, end) {
            Some(interval) => Self::interval(interval),
            None => Self::empty(),
        }
    }

    /// Any single character.
    pub fn any_char() -> Self {
        Self::interval(Interval::full())
    }

    /// Every string, the empty one included.
    pub fn any_string() -> Self {
        let mut a = Self::new();
        a.states[0].accept = true;
        a.add_transition(0, Interval::full(), 0);
        a.minimal = true;
        a
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Add a state, returning its ID.
    pub fn add_state(&mut self, accept: bool) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State {
            accept,
            transitions: Vec::new(),
        });
        self.invalidate();
        id
    }

    pub fn set_accept(&mut self, state: StateId, accept: bool) {
        self.states[state as usize].accept = accept;
        self.invalidate();
    }

    pub fn set_initial(&mut self, state: StateId) {
        assert!((state as usize) < self.states.len(), "no state S{state}");
        self.initial = state;
        self.invalidate();
    }

    /// Insert a transition, keeping the state's list sorted and duplicate-free.
    ///
    /// Clears the deterministic flag if the new interval overlaps a neighbor.
    pub fn add_transition(&mut self, from: StateId, interval: Interval, to: StateId) {
        debug_assert!((to as usize) < self.states.len(), "dangling target S{to}");
        let transition = Transition::new(interval, to);
        let list = &mut self.states[from as usize].transitions;
        let Err(pos) = list.binary_search(&transition) else {
            return;
        };
        if self.deterministic {
            let overlaps_prev = pos > 0 && list[pos - 1].interval.overlaps(&interval);
            let overlaps_next = list
                .get(pos)
                .is_some_and(|t| t.interval.overlaps(&interval));
            if overlaps_prev || overlaps_next {
                self.deterministic = false;
            }
        }
        list.insert(pos, transition);
        self.invalidate();
    }

    /// Record that this automaton is minimal.
    ///
    /// Only minimization and the basic acceptors are entitled to call this.
    pub fn mark_minimal(&mut self) {
        debug_assert!(self.deterministic, "minimal automata are deterministic");
        self.minimal = true;
    }

    /// Record that the language is exactly `{s}`, or forget it.
    pub fn set_singleton(&mut self, s: Option<String>) {
        self.singleton = s;
    }

    fn invalidate(&mut self) {
        self.minimal = false;
        self.singleton = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    /// Iterate over all states with their IDs.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StateId, s))
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the initial state exists. Present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states()
            .filter(|(_, s)| s.accept)
            .map(|(id, _)| id)
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn is_minimal(&self) -> bool {
        self.minimal
    }

    /// The single accepted string, when known.
    pub fn singleton(&self) -> Option<&str> {
        self.singleton.as_deref()
    }

    pub fn is_singleton(&self) -> bool {
        self.singleton.is_some()
    }

    /// Deterministic successor of `state` on `symbol`.
    #[inline]
    pub fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.states[state as usize].step(symbol)
    }

    /// Membership test that works on any automaton.
    ///
    /// Deterministic automata walk a single path; others simulate the set
    /// of active states.
    pub fn run(&self, text: &str) -> bool {
        if let Some(s) = &self.singleton {
            return s == text;
        }
        if self.deterministic {
            let mut state = self.initial;
            for c in text.chars() {
                match self.step(state, c as Symbol) {
                    Some(next) => state = next,
                    None => return false,
                }
            }
            return self.state(state).accept;
        }

        let mut active = vec![self.initial];
        let mut seen = vec![false; self.states.len()];
        let mut next = Vec::new();
        for c in text.chars() {
            let symbol = c as Symbol;
            next.clear();
            for &id in &active {
                for t in &self.states[id as usize].transitions {
                    if t.interval.contains(symbol) && !seen[t.target as usize] {
                        seen[t.target as usize] = true;
                        next.push(t.target);
                    }
                }
            }
            for &id in &next {
                seen[id as usize] = false;
            }
            if next.is_empty() {
                return false;
            }
            std::mem::swap(&mut active, &mut next);
        }
        active.iter().any(|&id| self.state(id).accept)
    }

    /// True if every state has a transition for every symbol.
    pub fn is_complete(&self) -> bool {
        self.states.iter().all(|s| covers_alphabet(&s.transitions))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sweeps
    // ─────────────────────────────────────────────────────────────────────

    /// States reachable from the initial state, in breadth-first order.
    ///
    /// Successors are visited in transition order, so the result is stable.
    pub fn reachable(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.states.len()];
        let mut order = Vec::with_capacity(self.states.len());
        let mut queue = VecDeque::new();
        seen[self.initial as usize] = true;
        queue.push_back(self.initial);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for t in &self.states[id as usize].transitions {
                if !seen[t.target as usize] {
                    seen[t.target as usize] = true;
                    queue.push_back(t.target);
                }
            }
        }
        order
    }

    /// For each state, whether an accepting state is reachable from it.
    pub fn live(&self) -> Vec<bool> {
        let mut predecessors: Vec<Vec<StateId>> = vec![Vec::new(); self.states.len()];
        for (id, state) in self.states() {
            for t in &state.transitions {
                predecessors[t.target as usize].push(id);
            }
        }
        let mut live = vec![false; self.states.len()];
        let mut stack: Vec<StateId> = self.accepting_states().collect();
        for &id in &stack {
            live[id as usize] = true;
        }
        while let Some(id) = stack.pop() {
            for &pred in &predecessors[id as usize] {
                if !live[pred as usize] {
                    live[pred as usize] = true;
                    stack.push(pred);
                }
            }
        }
        live
    }

    /// Keep only the states listed in `order`, renumbered by their position.
    ///
    /// Transitions into dropped states are removed. The initial state must be
    /// kept. Determinism is recomputed since dropping transitions can remove
    /// overlaps; the other flags are cleared.
    pub fn retain(&self, order: &[StateId]) -> Automaton {
        const DROPPED: StateId = StateId::MAX;
        let mut remap = vec![DROPPED; self.states.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old as usize] = new as StateId;
        }
        assert_ne!(
            remap[self.initial as usize], DROPPED,
            "initial state must be retained"
        );

        let states: Vec<State> = order
            .iter()
            .map(|&old| {
                let state = &self.states[old as usize];
                let mut transitions: Vec<Transition> = state
                    .transitions
                    .iter()
                    .filter(|t| remap[t.target as usize] != DROPPED)
                    .map(|t| Transition::new(t.interval, remap[t.target as usize]))
                    .collect();
                transitions.sort_unstable();
                State {
                    accept: state.accept,
                    transitions,
                }
            })
            .collect();

        let deterministic = states.iter().all(|s| is_disjoint(&s.transitions));
        Automaton {
            states,
            initial: remap[self.initial as usize],
            deterministic,
            minimal: false,
            singleton: None,
        }
    }
}

/// True if no two intervals of a sorted transition list overlap.
fn is_disjoint(transitions: &[Transition]) -> bool {
    transitions
        .windows(2)
        .all(|w| w[0].interval.max < w[1].interval.min)
}

fn covers_alphabet(transitions: &[Transition]) -> bool {
    let mut next: u64 = 0;
    for t in transitions {
        if (t.interval.min as u64) > next {
            return false;
        }
        next = next.max(t.interval.max as u64 + 1);
    }
    next > MAX_SYMBOL as u64
}
