//! Nonce type for the proof-of-work search

use serde::{Deserialize, Serialize};
use std::fmt;

/// 64-bit nonce varied by the miner to search for a qualifying digest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Nonce(pub u64);

impl Nonce {
    /// Create a new Nonce
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Increment the nonce by 1 in place, wrapping at 2^64
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Offset the nonce by `delta`, wrapping at 2^64
    pub fn offset(self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }

    /// Create a nonce from little-endian bytes
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Convert the nonce to little-endian bytes
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
