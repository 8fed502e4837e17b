//! Errors that can occur when setting up a matcher.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Matching walks a single path and needs at most one successor per symbol.
    #[error("matcher requires a deterministic automaton")]
    NotDeterministic,
}
