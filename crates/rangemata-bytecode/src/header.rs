//! Module header (64 bytes).
//!
//! Layout:
//! - 0-15: identity and size (magic, version, checksum, total_size)
//! - 16-35: automaton shape (state_count, transition_count, initial, flags, singleton_len)
//! - 36-63: reserved

use super::{HEADER_SIZE, MAGIC, VERSION};

/// The automaton was deterministic when encoded.
pub const FLAG_DETERMINISTIC: u32 = 1 << 0;
/// The automaton was minimal when encoded.
pub const FLAG_MINIMAL: u32 = 1 << 1;
/// A singleton string follows the transition table.
pub const FLAG_SINGLETON: u32 = 1 << 2;

const KNOWN_FLAGS: u32 = FLAG_DETERMINISTIC | FLAG_MINIMAL | FLAG_SINGLETON;

/// Module header - first 64 bytes of an encoded automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"RGMA"
    pub magic: [u8; 4],
    /// Format version (currently 1)
    pub version: u32,
    /// CRC32 checksum of everything after the header
    pub checksum: u32,
    /// Total size in bytes, header included
    pub total_size: u32,

    pub state_count: u32,
    pub transition_count: u32,
    pub initial: u32,
    pub flags: u32,
    /// Byte length of the singleton string.
    pub singleton_len: u32,

    pub _reserved: [u8; 28],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            state_count: 0,
            transition_count: 0,
            initial: 0,
            flags: 0,
            singleton_len: 0,
            _reserved: [0; 28],
        }
    }
}

impl Header {
    /// Decode a header.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let word = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        let mut reserved = [0u8; 28];
        reserved.copy_from_slice(&bytes[36..64]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: word(4),
            checksum: word(8),
            total_size: word(12),
            state_count: word(16),
            transition_count: word(20),
            initial: word(24),
            flags: word(28),
            singleton_len: word(32),
            _reserved: reserved,
        }
    }

    /// Encode the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.state_count.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.transition_count.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.initial.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.flags.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.singleton_len.to_le_bytes());
        bytes[36..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn validate_flags(&self) -> bool {
        self.flags & !KNOWN_FLAGS == 0
    }

    pub fn is_deterministic(&self) -> bool {
        self.flags & FLAG_DETERMINISTIC != 0
    }

    pub fn is_minimal(&self) -> bool {
        self.flags & FLAG_MINIMAL != 0
    }

    pub fn has_singleton(&self) -> bool {
        self.flags & FLAG_SINGLETON != 0
    }
}
