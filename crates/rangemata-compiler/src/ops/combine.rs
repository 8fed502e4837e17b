//! Regular combinators over whole automata.
//!
//! Operands are embedded into a fresh build graph, wired with the same
//! fragment combinators the construction uses, and flattened again.

use rangemata_core::Automaton;

use crate::build::{BuildGraph, Fragment, eliminate};
use crate::{Error, Limits, Result};

/// Automaton accepting the strings either operand accepts.
pub fn union(a: &Automaton, b: &Automaton) -> Automaton {
    if let (Some(x), Some(y)) = (a.singleton(), b.singleton()) {
        if x == y {
            return a.clone();
        }
    }
    combine(&[a, b], |g, f| g.alternation(f))
}

/// Automaton accepting `xy` for every `x` accepted by `a` and `y` by `b`.
pub fn concatenate(a: &Automaton, b: &Automaton) -> Automaton {
    if let (Some(x), Some(y)) = (a.singleton(), b.singleton()) {
        return Automaton::string(&format!("{x}{y}"));
    }
    combine(&[a, b], |g, f| g.sequence(f))
}

/// Kleene star.
pub fn star(a: &Automaton) -> Automaton {
    combine(&[a], |g, f| g.zero_or_more(f[0]))
}

/// One or more repetitions.
pub fn plus(a: &Automaton) -> Automaton {
    combine(&[a], |g, f| g.one_or_more(f[0]))
}

/// The language of `a` plus the empty string.
pub fn optional(a: &Automaton) -> Automaton {
    combine(&[a], |g, f| g.optional(f[0]))
}

/// Between `min` and `max` repetitions of `a`; `max: None` is unbounded.
pub fn repeat(a: &Automaton, min: u32, max: Option<u32>) -> Result<Automaton> {
    repeat_with(a, min, max, &Limits::default())
}

/// Like [`repeat`], failing if the unrolled copies would exceed `limits`.
pub fn repeat_with(
    a: &Automaton,
    min: u32,
    max: Option<u32>,
    limits: &Limits,
) -> Result<Automaton> {
    if let Some(max) = max {
        if min > max {
            return Err(Error::InvalidRepetitionBounds { min, max });
        }
    }
    if let (Some(s), Some(max)) = (a.singleton(), max) {
        if min == max {
            let len = s.chars().count();
            limits.check_projected(len.checked_mul(min as usize).and_then(|n| n.checked_add(1)))?;
            return Ok(Automaton::string(&s.repeat(min as usize)));
        }
    }

    let mut g = BuildGraph::new();
    let inner = g.embed(a);
    let fragment = g.repeat(inner, min, max, limits)?;
    let result = eliminate(&g, fragment);
    limits.check_states(result.len())?;
    Ok(result)
}

fn combine(
    operands: &[&Automaton],
    wire: impl FnOnce(&mut BuildGraph, &[Fragment]) -> Fragment,
) -> Automaton {
    let mut g = BuildGraph::new();
    let fragments: Vec<Fragment> = operands.iter().map(|a| g.embed(a)).collect();
    let fragment = wire(&mut g, &fragments);
    eliminate(&g, fragment)
}
