//! Operations over finished automata.
//!
//! Every operation reads its inputs and returns a fresh automaton; inputs are
//! never mutated. Regular combinators (union, concatenation, repetition)
//! accept any automaton. Product and complement need deterministic inputs
//! and fail with [`Error::NotDeterministic`](crate::Error::NotDeterministic)
//! otherwise.

mod analysis;
mod combine;
mod complement;
mod product;
mod trim;

#[cfg(test)]
mod combine_tests;
#[cfg(test)]
mod product_tests;
#[cfg(test)]
mod trim_tests;

pub use analysis::{
    is_empty, is_empty_string, is_finite, is_total, same_language, shortest_example, subset_of,
};
pub use combine::{concatenate, optional, plus, repeat, repeat_with, star, union};
pub use complement::{complement, totalize};
pub use product::{intersection, intersection_with, minus, minus_with};
pub use trim::{reduce, trim};
