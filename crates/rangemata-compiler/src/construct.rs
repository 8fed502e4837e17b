//! Syntax tree lowering.
//!
//! Every node kind maps to a fragment of one shared build graph; the root
//! fragment is then flattened by epsilon elimination. Intersection and
//! complement have no fragment form: their operands are compiled to minimal
//! automata on their own, combined, and embedded back as a fragment.

use rangemata_core::{Automaton, Interval, Node, Symbol};

use crate::build::{BuildGraph, Fragment, eliminate};
use crate::ops::{complement, intersection_with};
use crate::{Error, Limits, Result, minimize_with};

/// Builds automata from syntax trees.
///
/// ```ignore
/// let dfa = Compiler::new().minimize(true).max_states(10_000).compile(&node)?;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Compiler {
    limits: Limits,
    minimize: bool,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Shorthand for `limits(Limits::new().max_states(limit))`.
    pub fn max_states(mut self, limit: usize) -> Self {
        self.limits = self.limits.max_states(limit);
        self
    }

    /// Shorthand for `limits(Limits::new().max_depth(limit))`.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.limits = self.limits.max_depth(limit);
        self
    }

    /// Minimize every compiled automaton (default: off).
    pub fn minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    /// Compile `node` into an automaton accepting exactly its language.
    ///
    /// Nesting depth and repetition bounds are checked for the whole tree up
    /// front, so an invalid tree fails before any graph is built. Lowering
    /// recurses once per level; the depth check keeps that within the stack.
    pub fn compile(&self, node: &Node) -> Result<Automaton> {
        self.limits.check_depth(node.depth())?;
        validate(node)?;

        let mut graph = BuildGraph::new();
        let fragment = self.lower(&mut graph, node)?;
        let mut automaton = eliminate(&graph, fragment);
        self.limits.check_states(automaton.len())?;

        if let Some(s) = node.singleton() {
            automaton.set_singleton(Some(s));
        }
        if self.minimize {
            automaton = minimize_with(&automaton, &self.limits)?;
        }

        log::debug!(
            "compiled {node}: {} states, {} transitions",
            automaton.len(),
            automaton.transition_count()
        );
        Ok(automaton)
    }

    fn lower(&self, g: &mut BuildGraph, node: &Node) -> Result<Fragment> {
        let fragment = match node {
            Node::Char { value } => g.interval_fragment(Interval::single(*value as Symbol)),
            Node::Range { start, end } => match Interval::from_chars(*start, *end) {
                Some(interval) => g.interval_fragment(interval),
                None => g.empty_fragment(),
            },
            Node::Alternation { left, right } => {
                let left = self.lower(g, left)?;
                let right = self.lower(g, right)?;
                g.alternation(&[left, right])
            }
            Node::Concatenation { left, right } => {
                let left = self.lower(g, left)?;
                let right = self.lower(g, right)?;
                g.sequence(&[left, right])
            }
            Node::Star { node } => {
                let inner = self.lower(g, node)?;
                g.zero_or_more(inner)
            }
            Node::Plus { node } => {
                let inner = self.lower(g, node)?;
                g.one_or_more(inner)
            }
            Node::Repeat { node, min, max } => {
                let inner = self.lower(g, node)?;
                g.repeat(inner, *min, *max, &self.limits)?
            }
            Node::Intersection { left, right } => {
                let left = self.operand(left)?;
                let right = self.operand(right)?;
                g.embed(&intersection_with(&left, &right, &self.limits)?)
            }
            Node::Complement { node } => {
                let operand = self.operand(node)?;
                g.embed(&complement(&operand)?)
            }
            Node::AnyChar => g.interval_fragment(Interval::full()),
            Node::Empty => g.empty_fragment(),
            Node::EmptyString => g.epsilon_fragment(),
        };
        Ok(fragment)
    }

    /// Minimal automaton for an operand of intersection or complement.
    fn operand(&self, node: &Node) -> Result<Automaton> {
        self.minimize(true).compile(node)
    }
}

/// Compile `node` with default settings.
pub fn from_node(node: &Node) -> Result<Automaton> {
    Compiler::new().compile(node)
}

fn validate(node: &Node) -> Result<()> {
    match node {
        Node::Repeat {
            min,
            max: Some(max),
            ..
        } if min > max => Err(Error::InvalidRepetitionBounds {
            min: *min,
            max: *max,
        }),
        Node::Alternation { left, right }
        | Node::Concatenation { left, right }
        | Node::Intersection { left, right } => {
            validate(left)?;
            validate(right)
        }
        Node::Star { node }
        | Node::Plus { node }
        | Node::Repeat { node, .. }
        | Node::Complement { node } => validate(node),
        Node::Char { .. } | Node::Range { .. } | Node::AnyChar | Node::Empty | Node::EmptyString => {
            Ok(())
        }
    }
}
