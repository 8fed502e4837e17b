//! Textual listing of automata for snapshot tests and debugging.
//!
//! ```text
//! S0 (initial)
//!   a-z → S1
//! S1 (accept)
//!   0-9 → S1
//! ```

use std::fmt::Write;

use crate::automaton::Automaton;

impl Automaton {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for (id, state) in self.states() {
            write!(w, "S{id}")?;
            match (id == self.initial(), state.is_accept()) {
                (true, true) => write!(w, " (initial, accept)")?,
                (true, false) => write!(w, " (initial)")?,
                (false, true) => write!(w, " (accept)")?,
                (false, false) => {}
            }
            writeln!(w)?;
            for t in state.transitions() {
                writeln!(w, "  {} → S{}", t.interval, t.target)?;
            }
        }
        Ok(())
    }
}
