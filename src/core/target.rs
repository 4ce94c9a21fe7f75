//! Proof-of-work target and digest comparison

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

/// 256-bit upper bound a block digest must not exceed
///
/// Stored as four 64-bit words in little-endian order: `words[0]` is the
/// least significant word, `words[3]` the most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashTarget {
    words: [u64; 4],
}

impl HashTarget {
    /// Create a target from its four little-endian words
    pub const fn new(words: [u64; 4]) -> Self {
        Self { words }
    }

    /// Decode a target from 32 little-endian bytes
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::target(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let words = [
            cursor.read_u64::<LittleEndian>()?,
            cursor.read_u64::<LittleEndian>()?,
            cursor.read_u64::<LittleEndian>()?,
            cursor.read_u64::<LittleEndian>()?,
        ];

        Ok(Self::new(words))
    }

    /// Encode the target as 32 little-endian bytes
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, word) in self.words.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Check whether a 32-byte digest meets this target
    ///
    /// Both sides are interpreted as 256-bit little-endian unsigned
    /// integers; the digest qualifies when it is less than *or equal to*
    /// the target. Comparison starts at the most significant word.
    pub fn meets(&self, digest: &[u8; 32]) -> bool {
        for i in (0..4).rev() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&digest[i * 8..(i + 1) * 8]);
            let digest_word = u64::from_le_bytes(word);

            if digest_word < self.words[i] {
                return true;
            } else if digest_word > self.words[i] {
                return false;
            }
        }
        true
    }

    /// Maximum target: every digest qualifies
    pub const fn max_target() -> Self {
        Self::new([u64::MAX; 4])
    }

    /// Zero target: only an all-zero digest qualifies
    pub const fn zero() -> Self {
        Self::new([0; 4])
    }

    /// Target requiring `bits` leading zero bits in the digest
    pub fn from_leading_zeros(bits: u32) -> Self {
        if bits == 0 {
            return Self::max_target();
        }
        if bits >= 256 {
            return Self::zero();
        }

        let mut words = [u64::MAX; 4];
        let full_words = (bits / 64) as usize;
        let rem = bits % 64;

        for word in words.iter_mut().rev().take(full_words) {
            *word = 0;
        }
        if rem > 0 {
            words[3 - full_words] = u64::MAX >> rem;
        }
        Self::new(words)
    }

    /// Number of leading zero bits a qualifying digest needs, for log lines
    pub fn difficulty_bits(&self) -> u32 {
        for i in (0..4).rev() {
            if self.words[i] != 0 {
                return ((3 - i) as u32) * 64 + self.words[i].leading_zeros();
            }
        }
        256
    }

    /// Hexadecimal rendering, most significant word first
    pub fn to_hex_be(&self) -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            self.words[3], self.words[2], self.words[1], self.words[0]
        )
    }
}

impl FromStr for HashTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 64 {
            return Err(Error::target(format!(
                "expected 64 hex chars, got {}",
                s.len()
            )));
        }

        let mut words = [0u64; 4];
        for i in 0..4 {
            let chunk = &s[i * 16..(i + 1) * 16];
            words[3 - i] = u64::from_str_radix(chunk, 16)
                .map_err(|e| Error::target(format!("invalid hex in target: {e}")))?;
        }
        Ok(Self::new(words))
    }
}

impl fmt::Display for HashTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_be())
    }
}

impl Serialize for HashTarget {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex_be())
    }
}

impl<'de> Deserialize<'de> for HashTarget {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}
