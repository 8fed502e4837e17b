//! Core types and fragment combinators for build graphs.
//!
//! The graph uses index-based node references (`NodeId`) with nodes stored
//! in a `Vec`. A node carries interval edges and epsilon successors.

use rangemata_core::{Automaton, Interval};

use crate::limits::check_id_space;
use crate::{Limits, Result};

/// Index into `BuildGraph::nodes`.
pub type NodeId = u32;

/// A graph fragment with single entry and exit points.
///
/// Every syntax node compiles to a fragment. Combinators connect fragments
/// by manipulating entry/exit edges. A fragment accepts the strings spelled
/// by paths from `entry` to `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: NodeId,
    pub exit: NodeId,
}

impl Fragment {
    pub fn new(entry: NodeId, exit: NodeId) -> Self {
        Self { entry, exit }
    }

    /// Single-node fragment where entry equals exit.
    pub fn single(node: NodeId) -> Self {
        Self {
            entry: node,
            exit: node,
        }
    }
}

/// Size of a fragment, used to project the cost of copying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Nodes reachable from the entry, plus the exit.
    pub nodes: usize,
    /// Distinct targets of consuming edges among those nodes.
    pub targets: usize,
}

/// A symbol-consuming edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    pub interval: Interval,
    pub target: NodeId,
}

/// A node in the build graph.
#[derive(Debug, Clone, Default)]
pub struct BuildNode {
    pub edges: Vec<Edge>,
    /// Epsilon successors.
    pub successors: Vec<NodeId>,
}

impl BuildNode {
    /// True if the node consumes nothing.
    pub fn is_epsilon(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Build-time graph for automaton construction.
#[derive(Debug, Default)]
pub struct BuildGraph {
    nodes: Vec<BuildNode>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty node, returning its ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(BuildNode::default());
        id
    }

    /// Get node by ID.
    pub fn node(&self, id: NodeId) -> &BuildNode {
        &self.nodes[id as usize]
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BuildNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    /// Add an epsilon edge.
    pub fn connect(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from as usize].successors.push(to);
    }

    /// Add a symbol-consuming edge.
    pub fn add_edge(&mut self, from: NodeId, interval: Interval, to: NodeId) {
        self.nodes[from as usize].edges.push(Edge {
            interval,
            target: to,
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Leaf Fragments
    // ─────────────────────────────────────────────────────────────────────

    /// Two nodes joined by one interval edge.
    pub fn interval_fragment(&mut self, interval: Interval) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        self.add_edge(entry, interval, exit);
        Fragment::new(entry, exit)
    }

    /// Accepts only the empty string.
    pub fn epsilon_fragment(&mut self) -> Fragment {
        Fragment::single(self.add_node())
    }

    /// Accepts nothing: the exit is unreachable from the entry.
    pub fn empty_fragment(&mut self) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        Fragment::new(entry, exit)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fragment Combinators
    // ─────────────────────────────────────────────────────────────────────

    /// Connect fragments in sequence: f1 → f2 → ... → fn
    ///
    /// Returns fragment spanning from first entry to last exit.
    pub fn sequence(&mut self, fragments: &[Fragment]) -> Fragment {
        match fragments.len() {
            0 => self.epsilon_fragment(),
            1 => fragments[0],
            _ => {
                for window in fragments.windows(2) {
                    self.connect(window[0].exit, window[1].entry);
                }
                Fragment::new(fragments[0].entry, fragments[fragments.len() - 1].exit)
            }
        }
    }

    /// Connect fragments in parallel (alternation): entry → [f1|f2|...|fn] → exit
    ///
    /// Creates shared epsilon entry and exit nodes. No branches accept nothing.
    pub fn alternation(&mut self, fragments: &[Fragment]) -> Fragment {
        if fragments.is_empty() {
            return self.empty_fragment();
        }
        if fragments.len() == 1 {
            return fragments[0];
        }

        let entry = self.add_node();
        let exit = self.add_node();

        for f in fragments {
            self.connect(entry, f.entry);
            self.connect(f.exit, exit);
        }

        Fragment::new(entry, exit)
    }

    /// Zero or more: inner*
    ///
    /// ```text
    ///          ┌──────────────┐
    ///          ↓              │
    /// entry ─→ branch ─→ inner ─┘
    ///            │
    ///            └─→ exit
    /// ```
    pub fn zero_or_more(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();

        self.connect(branch, inner.entry);
        self.connect(branch, exit);
        self.connect(inner.exit, branch);

        Fragment::new(branch, exit)
    }

    /// One or more: inner+
    ///
    /// ```text
    ///          ┌──────────────┐
    ///          ↓              │
    /// entry ─→ inner ─→ branch ─┘
    ///                     │
    ///                     └─→ exit
    /// ```
    pub fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();

        self.connect(inner.exit, branch);
        self.connect(branch, inner.entry);
        self.connect(branch, exit);

        Fragment::new(inner.entry, exit)
    }

    /// Optional: inner?
    ///
    /// ```text
    /// entry ─→ branch ─→ inner ─→ exit
    ///            │                  ↑
    ///            └──────────────────┘
    /// ```
    pub fn optional(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_node();
        let exit = self.add_node();

        self.connect(branch, inner.entry);
        self.connect(branch, exit);
        self.connect(inner.exit, exit);

        Fragment::new(branch, exit)
    }

    /// Bounded repetition: inner{min,max}, `max: None` unbounded.
    ///
    /// Unrolls `min` mandatory copies followed by `max - min` nested optional
    /// copies, `(inner(inner(inner)?)?)?`, or a trailing star when unbounded.
    /// `inner` itself is used as the first copy. Callers validate
    /// `min <= max` beforehand.
    ///
    /// The size of the unrolled graph is projected from the size of `inner`
    /// and checked against `limits` before anything is copied.
    pub fn repeat(
        &mut self,
        inner: Fragment,
        min: u32,
        max: Option<u32>,
        limits: &Limits,
    ) -> Result<Fragment> {
        debug_assert!(max.is_none_or(|max| min <= max), "unchecked repetition bounds");

        if max == Some(0) {
            return Ok(self.epsilon_fragment());
        }

        let optional_count = match max {
            Some(max) => max - min,
            None => 1,
        };
        let total = check_id_space(min.checked_add(optional_count).map(|total| total as usize))?;
        let extent = self.extent(inner);
        // Each copy adds its own nodes plus at most two for the optional wiring.
        check_id_space(
            total
                .checked_mul(extent.nodes + 2)
                .and_then(|nodes| nodes.checked_add(self.nodes.len())),
        )?;
        // Only the initial state and targets of consuming edges become states.
        limits.check_projected(
            total
                .checked_mul(extent.targets)
                .and_then(|states| states.checked_add(1)),
        )?;

        // All copies are taken before any wiring touches `inner`.
        let mut copies = Vec::with_capacity(total);
        copies.push(inner);
        while copies.len() < total {
            copies.push(self.duplicate(inner));
        }

        let (mandatory, rest) = copies.split_at(min as usize);
        let mut parts = mandatory.to_vec();
        if max.is_none() {
            parts.push(self.zero_or_more(rest[0]));
        } else if let Some((&last, others)) = rest.split_last() {
            let mut tail = self.optional(last);
            for &copy in others.iter().rev() {
                let seq = self.sequence(&[copy, tail]);
                tail = self.optional(seq);
            }
            parts.push(tail);
        }

        Ok(self.sequence(&parts))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Copying
    // ─────────────────────────────────────────────────────────────────────

    /// Nodes reachable from `fragment.entry`, plus the exit, in copy order.
    fn collect(&self, fragment: Fragment) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![fragment.entry, fragment.exit];

        while let Some(id) = stack.pop() {
            if seen[id as usize] {
                continue;
            }
            seen[id as usize] = true;
            order.push(id);
            let node = &self.nodes[id as usize];
            stack.extend(node.edges.iter().map(|e| e.target));
            stack.extend(node.successors.iter().copied());
        }
        order
    }

    /// Node count and distinct consuming-edge targets of a fragment.
    pub fn extent(&self, fragment: Fragment) -> Extent {
        let nodes = self.collect(fragment);
        let mut targets: Vec<NodeId> = nodes
            .iter()
            .flat_map(|&id| self.nodes[id as usize].edges.iter().map(|e| e.target))
            .collect();
        targets.sort_unstable();
        targets.dedup();
        Extent {
            nodes: nodes.len(),
            targets: targets.len(),
        }
    }

    /// Copy every node reachable from `fragment.entry` (and the exit).
    pub fn duplicate(&mut self, fragment: Fragment) -> Fragment {
        const UNMAPPED: NodeId = NodeId::MAX;
        let order = self.collect(fragment);
        let mut remap = vec![UNMAPPED; self.nodes.len()];
        for (i, &old) in order.iter().enumerate() {
            remap[old as usize] = (self.nodes.len() + i) as NodeId;
        }

        for &old in &order {
            let node = &self.nodes[old as usize];
            let copy = BuildNode {
                edges: node
                    .edges
                    .iter()
                    .map(|e| Edge {
                        interval: e.interval,
                        target: remap[e.target as usize],
                    })
                    .collect(),
                successors: node
                    .successors
                    .iter()
                    .map(|&s| remap[s as usize])
                    .collect(),
            };
            self.nodes.push(copy);
        }

        Fragment::new(
            remap[fragment.entry as usize],
            remap[fragment.exit as usize],
        )
    }

    /// Copy an automaton into the graph.
    ///
    /// Accepting states get an epsilon edge to a fresh exit node.
    pub fn embed(&mut self, automaton: &Automaton) -> Fragment {
        let base = self.nodes.len() as NodeId;
        for (_, state) in automaton.states() {
            let id = self.add_node();
            for t in state.transitions() {
                self.add_edge(id, t.interval, base + t.target);
            }
        }

        let exit = self.add_node();
        for id in automaton.accepting_states() {
            self.connect(base + id, exit);
        }

        Fragment::new(base + automaton.initial(), exit)
    }
}
