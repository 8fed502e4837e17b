//! Matching engine.
//!
//! A `Matcher` borrows a deterministic automaton and never mutates it, so
//! one automaton can serve any number of matchers across threads.

mod error;
mod matcher;
mod trace;

#[cfg(test)]
mod matcher_tests;

pub use error::RuntimeError;
pub use matcher::{Matcher, Matches};
pub use trace::{NoopTracer, PrintTracer, Tracer};
