//! Tracing infrastructure for debugging matcher execution.
//!
//! The matcher is generic over its tracer. With `NoopTracer` every hook is an
//! empty `#[inline(always)]` function and the calls compile away, so the
//! untraced hot loop carries no tracing state.

use std::fmt::Write;

use rangemata_core::StateId;

/// Hooks called by the matcher while it runs.
///
/// Offsets are byte offsets into the input text.
/// - `trace_attempt` - before walking from a start offset
/// - `trace_step` - after looking up the successor for one character
/// - `trace_accept` - whenever the walk reaches an accepting state
/// - `trace_singleton` - when a single-string automaton matches without a walk
/// - `trace_match` - when the scan reports a match
pub trait Tracer {
    fn trace_attempt(&mut self, start: usize);

    /// `to` is `None` when no transition covers `c` and the walk stops.
    fn trace_step(&mut self, offset: usize, c: char, from: StateId, to: Option<StateId>);

    fn trace_accept(&mut self, state: StateId, end: usize);

    /// No states are visited, so none is reported.
    fn trace_singleton(&mut self, end: usize);

    fn trace_match(&mut self, start: usize, end: usize);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_attempt(&mut self, _start: usize) {}

    #[inline(always)]
    fn trace_step(&mut self, _offset: usize, _c: char, _from: StateId, _to: Option<StateId>) {}

    #[inline(always)]
    fn trace_accept(&mut self, _state: StateId, _end: usize) {}

    #[inline(always)]
    fn trace_singleton(&mut self, _end: usize) {}

    #[inline(always)]
    fn trace_match(&mut self, _start: usize, _end: usize) {}
}

/// Tracer that collects one line per event.
#[derive(Clone, Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All collected lines, newline-separated.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl Tracer for PrintTracer {
    fn trace_attempt(&mut self, start: usize) {
        self.lines.push(format!("attempt @{start}"));
    }

    fn trace_step(&mut self, offset: usize, c: char, from: StateId, to: Option<StateId>) {
        let mut line = format!("  {offset:>3} {c:?} S{from} → ");
        match to {
            Some(to) => write!(line, "S{to}").expect("String write never fails"),
            None => line.push('✗'),
        }
        self.lines.push(line);
    }

    fn trace_accept(&mut self, state: StateId, end: usize) {
        self.lines.push(format!("  accept S{state} @{end}"));
    }

    fn trace_singleton(&mut self, end: usize) {
        self.lines.push(format!("  singleton @{end}"));
    }

    fn trace_match(&mut self, start: usize, end: usize) {
        self.lines.push(format!("match {start}..{end}"));
    }
}
