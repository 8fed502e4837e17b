//! Alphabet symbols and closed symbol intervals.
//!
//! Transitions are labeled by intervals rather than single symbols so that
//! large alphabets (all of Unicode) stay tractable.

use std::fmt;

/// A Unicode scalar value as a plain integer.
///
/// Surrogates are representable but never produced by `&str` input.
pub type Symbol = u32;

/// Smallest symbol of the alphabet.
pub const MIN_SYMBOL: Symbol = 0;

/// Largest symbol of the alphabet (`char::MAX`).
pub const MAX_SYMBOL: Symbol = char::MAX as Symbol;

/// Closed interval `[min, max]` over the alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub min: Symbol,
    pub max: Symbol,
}

impl Interval {
    /// Create an interval. Panics in debug builds if `min > max`.
    pub fn new(min: Symbol, max: Symbol) -> Self {
        debug_assert!(min <= max, "inverted interval {min:#x}..{max:#x}");
        Self { min, max }
    }

    /// Interval covering exactly one symbol.
    pub fn single(symbol: Symbol) -> Self {
        Self {
            min: symbol,
            max: symbol,
        }
    }

    /// Interval between two characters, `None` when `start > end`.
    pub fn from_chars(start: char, end: char) -> Option<Self> {
        (start <= end).then(|| Self::new(start as Symbol, end as Symbol))
    }

    /// The whole alphabet.
    pub fn full() -> Self {
        Self {
            min: MIN_SYMBOL,
            max: MAX_SYMBOL,
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.min <= symbol && symbol <= self.max
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Common part of two intervals.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Interval { min, max })
    }

    /// True when `other` starts right after `self` ends.
    pub fn is_adjacent_to(&self, other: &Interval) -> bool {
        self.max < MAX_SYMBOL && self.max + 1 == other.min
    }

    /// Number of symbols covered.
    pub fn len(&self) -> u32 {
        self.max - self.min + 1
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write_symbol(f, self.min)
        } else {
            write_symbol(f, self.min)?;
            f.write_str("-")?;
            write_symbol(f, self.max)
        }
    }
}

/// Render a symbol: printable ASCII as itself, anything else as `U+XXXX`.
pub fn write_symbol(w: &mut impl fmt::Write, symbol: Symbol) -> fmt::Result {
    match char::from_u32(symbol) {
        Some(c) if c.is_ascii_graphic() => w.write_char(c),
        _ => write!(w, "U+{symbol:04X}"),
    }
}

/// Split the alphabet into maximal sub-ranges on which every interval
/// in `intervals` is either fully present or fully absent.
///
/// Returns the sorted, deduplicated boundary points: each sub-range starts
/// at a point and ends right before the next one. A trailing point of
/// `MAX_SYMBOL + 1` closes the last sub-range.
pub fn boundaries<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> Vec<u64> {
    let mut points: Vec<u64> = Vec::new();
    for interval in intervals {
        points.push(interval.min as u64);
        points.push(interval.max as u64 + 1);
    }
    points.sort_unstable();
    points.dedup();
    points
}

/// Sub-ranges between consecutive boundary points.
pub fn segments(points: &[u64]) -> impl Iterator<Item = Interval> + '_ {
    points
        .windows(2)
        .map(|w| Interval::new(w[0] as Symbol, (w[1] - 1) as Symbol))
}
