//! Build-time graph with epsilon edges.
//!
//! Syntax trees and composed automata are first wired together as fragments
//! of a mutable graph, then flattened into an epsilon-free automaton.
//!
//! # Architecture
//!
//! ```text
//! Node / Automaton → BuildGraph (fragments) → eliminate → Automaton
//! ```
//!
//! Nodes that no fragment entry reaches are scaffolding: elimination never
//! materializes them.

mod dump;
mod epsilon_elim;
mod graph;

#[cfg(test)]
mod epsilon_elim_tests;
#[cfg(test)]
mod graph_tests;

pub use epsilon_elim::eliminate;
pub use graph::{BuildGraph, BuildNode, Edge, Extent, Fragment, NodeId};
