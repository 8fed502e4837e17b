//! Resource limits for automaton construction.

use crate::{Error, Result};

/// Default ceiling on syntax tree nesting.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// States and build nodes are indexed by `u32`; nothing may outgrow that.
const ID_SPACE: usize = u32::MAX as usize;

/// Ceilings applied while building automata.
///
/// Subset and product construction can blow up exponentially, and unrolled
/// repetition grows with its bounds; an embedding application bounds the
/// cost by capping the number of created states. Construction recurses once
/// per syntax tree level, so nesting is capped too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum states per constructed automaton (default: unlimited).
    pub(crate) max_states: Option<usize>,
    /// Maximum syntax tree depth (default: [`DEFAULT_MAX_DEPTH`]).
    pub(crate) max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_states: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Create new limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state ceiling.
    pub fn max_states(mut self, limit: usize) -> Self {
        self.max_states = Some(limit);
        self
    }

    /// Set the nesting ceiling.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn get_max_states(&self) -> Option<usize> {
        self.max_states
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fail once `count` states exist and the ceiling is below that.
    pub(crate) fn check_states(&self, count: usize) -> Result<()> {
        match self.max_states {
            Some(limit) if count > limit => {
                log::warn!("state limit of {limit} exceeded, aborting construction");
                Err(Error::StateLimitExceeded { limit })
            }
            _ => Ok(()),
        }
    }

    /// Fail before building something projected to need `count` states.
    ///
    /// `None` stands for a count that overflowed while being projected.
    pub(crate) fn check_projected(&self, count: Option<usize>) -> Result<()> {
        let count = check_id_space(count)?;
        self.check_states(count)
    }

    /// Fail if a tree of `depth` levels is nested too deeply.
    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            let limit = self.max_depth;
            log::warn!("syntax tree depth {depth} exceeds {limit}, aborting construction");
            return Err(Error::RecursionLimitExceeded { limit });
        }
        Ok(())
    }
}

/// Fail if `count` ids cannot be allocated at all, whatever the limits.
pub(crate) fn check_id_space(count: Option<usize>) -> Result<usize> {
    match count {
        Some(count) if count <= ID_SPACE => Ok(count),
        _ => {
            log::warn!("projected size exceeds the u32 id space, aborting construction");
            Err(Error::StateLimitExceeded { limit: ID_SPACE })
        }
    }
}
