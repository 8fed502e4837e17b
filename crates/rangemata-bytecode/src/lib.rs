//! Binary format for rangemata automata.
//!
//! A module is a 64-byte header followed by the accept bitset, per-state
//! transition offsets, the transition table and an optional singleton
//! string. All integers are little-endian; sections are 4-byte aligned.

mod header;
mod module;


pub use header::{FLAG_DETERMINISTIC, FLAG_MINIMAL, FLAG_SINGLETON, Header};
pub use module::{ModuleError, decode, encode};

/// Magic bytes identifying an encoded automaton.
pub const MAGIC: [u8; 4] = *b"RGMA";

/// Current format version.
pub const VERSION: u32 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 64;

/// Alignment of every body section.
pub const SECTION_ALIGN: usize = 4;

/// Bytes per transition record: min, max and target, each a `u32`.
pub const TRANSITION_SIZE: usize = 12;
