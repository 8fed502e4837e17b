#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for rangemata.
//!
//! - **Intervals**: closed symbol ranges that label transitions
//! - **Automata**: an index-based state arena with status flags
//! - **Syntax trees**: the `Node` input handed over by a regex parser

mod automaton;
mod dump;
mod interval;
mod node;


pub use automaton::{Automaton, State, StateId, Transition};
pub use interval::{Interval, MAX_SYMBOL, MIN_SYMBOL, Symbol, boundaries, segments, write_symbol};
pub use node::Node;
