//! rangemata compiler: from syntax trees to canonical automata.
//!
//! This crate provides the automaton construction pipeline:
//! - `build` - build graph with epsilon edges, fragment combinators, epsilon elimination
//! - `construct` - syntax tree lowering (`Compiler`)
//! - `determinize` - subset construction
//! - `minimize` - Hopcroft partition refinement
//! - `ops` - set algebra, trimming and language analysis
//! - `transducer` - finite-state transducers and their output images
//!
//! ```text
//! Node → BuildGraph → [epsilon elimination] → NFA → [subset construction] → DFA → [refinement] → minimal DFA
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
mod construct;
mod determinize;
mod limits;
mod minimize;
pub mod ops;
mod partition;
mod transducer;

#[cfg(test)]
pub mod test_utils;

pub use construct::{Compiler, from_node};
pub use determinize::{determinize, determinize_with};
pub use limits::{DEFAULT_MAX_DEPTH, Limits};
pub use minimize::{minimize, minimize_with};
pub use transducer::{Output, Transducer, TransducerTransition};

/// Errors raised by construction and operations.
///
/// All of them are detected before any graph is built, so a failed call has
/// no observable effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Repetition with `min > max`.
    #[error("invalid repetition bounds {{{min},{max}}}")]
    InvalidRepetitionBounds { min: u32, max: u32 },

    /// The operation needs a deterministic input automaton.
    #[error("operation requires a deterministic automaton")]
    NotDeterministic,

    /// A configured state ceiling was hit during construction.
    #[error("state limit exceeded ({limit} states)")]
    StateLimitExceeded { limit: usize },

    /// The syntax tree is nested deeper than the configured ceiling.
    #[error("syntax tree nesting exceeds {limit} levels")]
    RecursionLimitExceeded { limit: usize },
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
