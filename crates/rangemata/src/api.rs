//! Pure-function surface over the pipeline crates.
//!
//! Nothing here mutates its inputs. Operations that need deterministic
//! operands determinize them first, so every function accepts any automaton
//! and every result is a valid input to any other function.

use rangemata_bytecode as bytecode;
use rangemata_compiler::ops;
use rangemata_core::{Automaton, Node};
use rangemata_vm::{Matcher, Matches};

use crate::Result;

pub use rangemata_compiler::{determinize, minimize};

/// Compile a syntax tree into an automaton accepting exactly its language.
pub fn from_node(node: &Node) -> Result<Automaton> {
    Ok(rangemata_compiler::from_node(node)?)
}

pub fn union(a: &Automaton, b: &Automaton) -> Automaton {
    ops::union(a, b)
}

/// Strings accepted by both `a` and `b`.
pub fn intersect(a: &Automaton, b: &Automaton) -> Automaton {
    ops::intersection(&determinize(a), &determinize(b))
        .expect("determinized operands are always accepted")
}

/// Strings not accepted by `a`.
pub fn complement(a: &Automaton) -> Automaton {
    ops::complement(&determinize(a)).expect("determinized operand is always accepted")
}

/// Strings accepted by `a` but not by `b`.
pub fn minus(a: &Automaton, b: &Automaton) -> Automaton {
    ops::minus(&determinize(a), &determinize(b))
        .expect("determinized operands are always accepted")
}

pub fn concat(a: &Automaton, b: &Automaton) -> Automaton {
    ops::concatenate(a, b)
}

pub fn star(a: &Automaton) -> Automaton {
    ops::star(a)
}

pub fn plus(a: &Automaton) -> Automaton {
    ops::plus(a)
}

/// Between `min` and `max` copies of `a`; `max: None` is unbounded.
pub fn repeat(a: &Automaton, min: u32, max: Option<u32>) -> Result<Automaton> {
    Ok(ops::repeat(a, min, max)?)
}

/// True if `a` accepts the whole of `text`.
///
/// Deterministic automata run through the matcher; others are simulated
/// state-set by state-set.
pub fn accepts(a: &Automaton, text: &str) -> bool {
    match Matcher::new(a) {
        Ok(matcher) => matcher.accepts(text),
        Err(_) => {
            log::trace!("simulating nondeterministic automaton ({} states)", a.len());
            a.run(text)
        }
    }
}

/// Leftmost-longest, non-overlapping matches of `a` in `text`.
///
/// Fails with [`RuntimeError::NotDeterministic`](crate::RuntimeError) for
/// nondeterministic automata; [`determinize`] them first.
pub fn find_matches<'a, 't>(a: &'a Automaton, text: &'t str) -> Result<Matches<'a, 't>> {
    Ok(Matcher::new(a)?.find_matches(text))
}

pub fn encode(a: &Automaton) -> Vec<u8> {
    bytecode::encode(a)
}

pub fn decode(bytes: &[u8]) -> Result<Automaton> {
    let a = bytecode::decode(bytes)?;
    log::debug!(
        "decoded automaton: {} states, {} transitions",
        a.len(),
        a.transition_count()
    );
    Ok(a)
}
