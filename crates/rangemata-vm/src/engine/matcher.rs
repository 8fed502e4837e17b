//! Acceptance and match search over a deterministic automaton.
//!
//! Each character costs one binary search in the current state's sorted,
//! disjoint transition list; a missing transition means the implicit reject
//! sink, so the walk stops there.
//!
//! Automata that are known to denote a single string skip the walk and
//! compare text directly. Tracers then see the attempt and a singleton
//! event, never steps or states.

use rangemata_core::{Automaton, Symbol};

use super::error::RuntimeError;
use super::trace::{NoopTracer, Tracer};

/// Runs one deterministic automaton over text.
///
/// Cheap to copy; queries never mutate the automaton.
#[derive(Clone, Copy, Debug)]
pub struct Matcher<'a> {
    automaton: &'a Automaton,
}

impl<'a> Matcher<'a> {
    pub fn new(automaton: &'a Automaton) -> Result<Self, RuntimeError> {
        if !automaton.is_deterministic() {
            return Err(RuntimeError::NotDeterministic);
        }
        Ok(Self { automaton })
    }

    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    /// True if the whole of `text` is in the language.
    pub fn accepts(&self, text: &str) -> bool {
        self.accepts_traced(text, &mut NoopTracer)
    }

    pub fn accepts_traced<T: Tracer>(&self, text: &str, tracer: &mut T) -> bool {
        tracer.trace_attempt(0);
        let a = self.automaton;

        if let Some(s) = a.singleton() {
            let accepted = s == text;
            if accepted {
                tracer.trace_singleton(text.len());
            }
            return accepted;
        }

        let mut state = a.initial();
        for (offset, c) in text.char_indices() {
            let next = a.step(state, c as Symbol);
            tracer.trace_step(offset, c, state, next);
            match next {
                Some(next) => state = next,
                None => return false,
            }
        }

        let accepted = a.state(state).is_accept();
        if accepted {
            tracer.trace_accept(state, text.len());
        }
        accepted
    }

    /// End of the longest match starting at byte offset `start`.
    ///
    /// Returns `None` when nothing matches there, including when `start` is
    /// past the end of `text` or not on a character boundary.
    pub fn longest_match_at(&self, text: &str, start: usize) -> Option<usize> {
        self.longest_match_traced(text, start, &mut NoopTracer)
    }

    pub fn longest_match_traced<T: Tracer>(
        &self,
        text: &str,
        start: usize,
        tracer: &mut T,
    ) -> Option<usize> {
        let rest = text.get(start..)?;
        tracer.trace_attempt(start);
        let a = self.automaton;

        if let Some(s) = a.singleton() {
            if !rest.starts_with(s) {
                return None;
            }
            let end = start + s.len();
            tracer.trace_singleton(end);
            return Some(end);
        }

        let mut state = a.initial();
        let mut best = None;
        if a.state(state).is_accept() {
            tracer.trace_accept(state, start);
            best = Some(start);
        }
        for (i, c) in rest.char_indices() {
            let offset = start + i;
            let next = a.step(state, c as Symbol);
            tracer.trace_step(offset, c, state, next);
            let Some(next) = next else {
                break;
            };
            state = next;
            if a.state(state).is_accept() {
                let end = offset + c.len_utf8();
                tracer.trace_accept(state, end);
                best = Some(end);
            }
        }
        best
    }

    /// Leftmost-longest, non-overlapping matches as byte ranges.
    ///
    /// Each call scans from scratch. After a match the scan resumes at its
    /// end; an empty match right where the previous one ended is skipped,
    /// and after an empty match the scan moves on by one character.
    pub fn find_matches<'t>(&self, text: &'t str) -> Matches<'a, 't> {
        self.find_matches_traced(text, NoopTracer)
    }

    pub fn find_matches_traced<'t, T: Tracer>(&self, text: &'t str, tracer: T) -> Matches<'a, 't, T> {
        Matches {
            matcher: *self,
            text,
            pos: 0,
            last_end: None,
            tracer,
        }
    }
}

/// Lazy iterator over `(start, end)` byte ranges, see [`Matcher::find_matches`].
#[derive(Debug)]
pub struct Matches<'a, 't, T: Tracer = NoopTracer> {
    matcher: Matcher<'a>,
    text: &'t str,
    /// Next start offset; past `text.len()` once exhausted.
    pos: usize,
    last_end: Option<usize>,
    tracer: T,
}

impl<T: Tracer> Matches<'_, '_, T> {
    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Offset of the character after `pos`, or past the end.
    fn next_boundary(&self, pos: usize) -> usize {
        self.text[pos..]
            .chars()
            .next()
            .map_or(self.text.len() + 1, |c| pos + c.len_utf8())
    }
}

impl<T: Tracer> Iterator for Matches<'_, '_, T> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let start = self.pos;
            let Some(end) = self
                .matcher
                .longest_match_traced(self.text, start, &mut self.tracer)
            else {
                self.pos = self.next_boundary(start);
                continue;
            };

            if end == start {
                self.pos = self.next_boundary(start);
                if self.last_end == Some(start) {
                    continue;
                }
            } else {
                self.pos = end;
            }

            self.last_end = Some(end);
            self.tracer.trace_match(start, end);
            return Some((start, end));
        }
        None
    }
}
