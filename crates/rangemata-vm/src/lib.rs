//! Matcher for deterministic rangemata automata.
//!
//! Runs a compiled automaton over `&str` input: whole-string acceptance,
//! longest match at an offset, and a lazy scan for all matches.

pub mod engine;

pub use engine::{Matcher, Matches, NoopTracer, PrintTracer, RuntimeError, Tracer};
