//! Encoding and decoding of whole automata.
//!
//! Section order: Header → AcceptBits → Offsets → Transitions → Singleton

use rangemata_core::{Automaton, Interval, MAX_SYMBOL, StateId};

use super::header::{FLAG_DETERMINISTIC, FLAG_MINIMAL, FLAG_SINGLETON, Header};
use super::{HEADER_SIZE, SECTION_ALIGN, TRANSITION_SIZE, VERSION};

/// Module load error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid magic: expected RGMA")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum 64)")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, body hashes to {found:#010x}")]
    ChecksumMismatch { expected: u32, found: u32 },
    #[error("corrupt module: {0}")]
    Corrupt(&'static str),
}

type Result<T> = std::result::Result<T, ModuleError>;

fn align_up(n: usize) -> usize {
    n.div_ceil(SECTION_ALIGN) * SECTION_ALIGN
}

fn pad(out: &mut Vec<u8>) {
    out.resize(align_up(out.len()), 0);
}

/// Body size implied by the header counts; `None` on overflow.
fn body_size(header: &Header) -> Option<usize> {
    let states = header.state_count as usize;
    let accept_bits = align_up(states.div_ceil(8));
    let offsets = states.checked_add(1)?.checked_mul(4)?;
    let transitions = (header.transition_count as usize).checked_mul(TRANSITION_SIZE)?;
    let singleton = align_up(header.singleton_len as usize);
    accept_bits
        .checked_add(offsets)?
        .checked_add(transitions)?
        .checked_add(singleton)
}

/// Serialize an automaton.
pub fn encode(a: &Automaton) -> Vec<u8> {
    let mut body = Vec::new();

    let mut accept_bits = vec![0u8; a.len().div_ceil(8)];
    for id in a.accepting_states() {
        accept_bits[id as usize / 8] |= 1 << (id % 8);
    }
    body.extend_from_slice(&accept_bits);
    pad(&mut body);

    let mut offset: u32 = 0;
    body.extend_from_slice(&offset.to_le_bytes());
    for (_, state) in a.states() {
        offset += state.transitions().len() as u32;
        body.extend_from_slice(&offset.to_le_bytes());
    }

    for (_, state) in a.states() {
        for t in state.transitions() {
            body.extend_from_slice(&t.interval.min.to_le_bytes());
            body.extend_from_slice(&t.interval.max.to_le_bytes());
            body.extend_from_slice(&t.target.to_le_bytes());
        }
    }

    let singleton = a.singleton().unwrap_or_default();
    body.extend_from_slice(singleton.as_bytes());
    pad(&mut body);

    let mut flags = 0;
    if a.is_deterministic() {
        flags |= FLAG_DETERMINISTIC;
    }
    if a.is_minimal() {
        flags |= FLAG_MINIMAL;
    }
    if a.is_singleton() {
        flags |= FLAG_SINGLETON;
    }

    let header = Header {
        checksum: crc32fast::hash(&body),
        total_size: (HEADER_SIZE + body.len()) as u32,
        state_count: a.len() as u32,
        transition_count: a.transition_count() as u32,
        initial: a.initial(),
        flags,
        singleton_len: singleton.len() as u32,
        ..Header::default()
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + body.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&body);
    out
}

/// Deserialize an automaton produced by [`encode`].
///
/// Every structural property is validated; malformed input yields an error,
/// never a panic.
pub fn decode(bytes: &[u8]) -> Result<Automaton> {
    let Some(head) = bytes.first_chunk::<HEADER_SIZE>() else {
        return Err(ModuleError::FileTooSmall(bytes.len()));
    };
    let header = Header::from_bytes(head);

    if !header.validate_magic() {
        return Err(ModuleError::InvalidMagic);
    }
    if !header.validate_version() {
        return Err(ModuleError::UnsupportedVersion(header.version));
    }
    if header.total_size as usize != bytes.len() {
        return Err(ModuleError::SizeMismatch {
            header: header.total_size,
            actual: bytes.len(),
        });
    }

    let body = &bytes[HEADER_SIZE..];
    let found = crc32fast::hash(body);
    if found != header.checksum {
        return Err(ModuleError::ChecksumMismatch {
            expected: header.checksum,
            found,
        });
    }

    if !header.validate_flags() {
        return Err(ModuleError::Corrupt("unknown flag bits"));
    }
    if body_size(&header) != Some(body.len()) {
        return Err(ModuleError::Corrupt("section sizes disagree with total size"));
    }
    if header.state_count == 0 {
        return Err(ModuleError::Corrupt("no states"));
    }
    if header.initial >= header.state_count {
        return Err(ModuleError::Corrupt("initial state out of range"));
    }
    if !header.has_singleton() && header.singleton_len != 0 {
        return Err(ModuleError::Corrupt("singleton bytes without singleton flag"));
    }

    let mut reader = Reader::new(body);
    let states = header.state_count as usize;
    let accept_bits = reader.take(align_up(states.div_ceil(8)))?;
    let offsets = reader.take((states + 1) * 4)?;
    let transitions = reader.take(header.transition_count as usize * TRANSITION_SIZE)?;
    let singleton = reader.take(align_up(header.singleton_len as usize))?;

    let mut a = Automaton::with_capacity(states);
    for id in 0..states {
        let accept = accept_bits[id / 8] & (1 << (id % 8)) != 0;
        if id == 0 {
            a.set_accept(0, accept);
        } else {
            a.add_state(accept);
        }
    }
    a.set_initial(header.initial);

    let offsets = Reader::new(offsets);
    let mut records = Reader::new(transitions);
    let mut previous = offsets.u32_at(0)?;
    if previous != 0 {
        return Err(ModuleError::Corrupt("first offset is not zero"));
    }
    for id in 0..states {
        let end = offsets.u32_at(id + 1)?;
        if end < previous || end > header.transition_count {
            return Err(ModuleError::Corrupt("transition offsets not monotone"));
        }
        let mut last: Option<(u32, u32, u32)> = None;
        for _ in previous..end {
            let record = (records.u32()?, records.u32()?, records.u32()?);
            let (min, max, target) = record;
            if min > max || max > MAX_SYMBOL {
                return Err(ModuleError::Corrupt("invalid transition interval"));
            }
            if target >= header.state_count {
                return Err(ModuleError::Corrupt("transition target out of range"));
            }
            if last.is_some_and(|last| last >= record) {
                return Err(ModuleError::Corrupt("transitions not sorted"));
            }
            last = Some(record);
            a.add_transition(id as StateId, Interval::new(min, max), target);
        }
        previous = end;
    }
    if previous != header.transition_count {
        return Err(ModuleError::Corrupt("transition count disagrees with offsets"));
    }

    if header.is_deterministic() != a.is_deterministic() {
        return Err(ModuleError::Corrupt("deterministic flag disagrees with transitions"));
    }
    if header.is_minimal() {
        if !a.is_deterministic() {
            return Err(ModuleError::Corrupt("minimal flag on nondeterministic automaton"));
        }
        if !is_trimmed(&a) {
            return Err(ModuleError::Corrupt("minimal flag on automaton with useless states"));
        }
        a.mark_minimal();
    }
    if header.has_singleton() {
        let text = std::str::from_utf8(&singleton[..header.singleton_len as usize])
            .map_err(|_| ModuleError::Corrupt("singleton is not UTF-8"))?;
        if !denotes_only(&a, text) {
            return Err(ModuleError::Corrupt("singleton disagrees with transitions"));
        }
        a.set_singleton(Some(text.to_owned()));
    }

    Ok(a)
}

/// Every state is reachable and live, or the automaton is the bare empty one.
fn is_trimmed(a: &Automaton) -> bool {
    if a.len() == 1 && a.accepting_states().next().is_none() {
        return a.transition_count() == 0;
    }
    a.reachable().len() == a.len() && a.live().iter().all(|&live| live)
}

/// True if the language of `a` is exactly `{text}`.
///
/// Walks the live states reachable by each prefix of `text`. Any other live
/// continuation, or an accepting state before the end, means some other
/// string is accepted too.
fn denotes_only(a: &Automaton, text: &str) -> bool {
    let live = a.live();
    let mut current: Vec<StateId> = vec![a.initial()];
    current.retain(|&s| live[s as usize]);
    let mut next = Vec::new();

    for c in text.chars() {
        let symbol = c as u32;
        next.clear();
        for &id in &current {
            let state = a.state(id);
            if state.is_accept() {
                return false;
            }
            for t in state.transitions() {
                if !live[t.target as usize] {
                    continue;
                }
                if t.interval != Interval::single(symbol) {
                    return false;
                }
                next.push(t.target);
            }
        }
        next.sort_unstable();
        next.dedup();
        std::mem::swap(&mut current, &mut next);
    }

    let mut accepted = false;
    for &id in &current {
        let state = a.state(id);
        if state.transitions().iter().any(|t| live[t.target as usize]) {
            return false;
        }
        accepted |= state.is_accept();
    }
    accepted
}

/// Bounds-checked little-endian cursor.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ModuleError::Corrupt("section out of bounds"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn u32_at(&self, index: usize) -> Result<u32> {
        let start = index * 4;
        self.bytes
            .get(start..start + 4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .ok_or(ModuleError::Corrupt("offset out of bounds"))
    }
}
