//! rangemata: finite automata over Unicode code point ranges.
//!
//! Transitions are labelled with closed symbol intervals, so character
//! classes of any size cost one edge. Automata are built from a syntax tree
//! handed over by a regex parser, combined with set operations, made
//! deterministic and minimal, matched against text, and stored as bytes.
//!
//! # Example
//!
//! ```
//! use rangemata::{Node, accepts, find_matches, from_node, minimize};
//!
//! let word = Node::concatenation(Node::range('a', 'z'), Node::star(Node::range('0', '9')));
//! let dfa = minimize(&from_node(&word)?);
//!
//! assert!(accepts(&dfa, "a123"));
//! assert!(!accepts(&dfa, "1a"));
//! assert_eq!(find_matches(&dfa, "x1 y2")?.collect::<Vec<_>>(), [(0, 2), (3, 5)]);
//! # Ok::<(), rangemata::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod api;

#[cfg(test)]
mod api_tests;

pub use api::{
    accepts, complement, concat, decode, determinize, encode, find_matches, from_node, intersect,
    minimize, minus, plus, repeat, star, union,
};

pub use rangemata_bytecode::ModuleError;
pub use rangemata_compiler::{
    Compiler, DEFAULT_MAX_DEPTH, Limits, Output, Transducer, TransducerTransition, ops,
};
pub use rangemata_core::{Automaton, Interval, MAX_SYMBOL, Node, State, StateId, Symbol, Transition};
pub use rangemata_vm::{Matcher, Matches, NoopTracer, PrintTracer, RuntimeError, Tracer};

/// Errors from any stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] rangemata_compiler::Error),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type for rangemata operations.
pub type Result<T> = std::result::Result<T, Error>;
