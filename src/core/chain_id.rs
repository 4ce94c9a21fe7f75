//! Chain identifier for the multi-chain graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one chain of the chainweb braid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ChainId(pub u32);

impl ChainId {
    /// Create a new ChainId
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Create a chain id from little-endian bytes
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Convert the chain id to little-endian bytes
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChainId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_roundtrip() {
        let chain = ChainId::new(9);
        assert_eq!(ChainId::from_le_bytes(chain.to_le_bytes()), chain);
    }

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId::new(3).to_string(), "3");
    }
}
