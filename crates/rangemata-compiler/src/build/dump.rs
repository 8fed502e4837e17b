//! Dump helpers for build graph inspection and debugging.
//!
//! ```text
//! N0: a → N1
//! N1: ε → N2, N0
//! N2: ∅
//! ```

use std::fmt::Write;

use super::graph::BuildGraph;

impl BuildGraph {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for (id, node) in self.iter() {
            write!(w, "N{id}: ")?;

            let mut parts = Vec::new();
            if !node.edges.is_empty() {
                let edges: Vec<String> = node
                    .edges
                    .iter()
                    .map(|e| format!("{} → N{}", e.interval, e.target))
                    .collect();
                parts.push(edges.join(", "));
            }
            if !node.successors.is_empty() {
                let targets: Vec<String> =
                    node.successors.iter().map(|s| format!("N{s}")).collect();
                parts.push(format!("ε → {}", targets.join(", ")));
            }

            if parts.is_empty() {
                writeln!(w, "∅")?;
            } else {
                writeln!(w, "{}", parts.join(" | "))?;
            }
        }
        Ok(())
    }
}
