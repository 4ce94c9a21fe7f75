//! Serialized block header buffer mutated during mining

use crate::core::constants::{
    CHAIN_OFFSET, HEADER_SIZE, HEIGHT_OFFSET, NONCE_OFFSET, NONCE_SIZE, TARGET_OFFSET, TARGET_SIZE,
    TIME_OFFSET, TIME_SIZE,
};
use crate::core::{BlockHeight, ChainId, HashTarget, Nonce};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A serialized block header, exactly [`HEADER_SIZE`] bytes
///
/// The search kernel owns one of these per worker and rewrites only the
/// nonce and creation-time fields between hashes; the remaining bytes are
/// opaque and pass through unchanged.
#[derive(Clone, PartialEq, Eq)]
pub struct Work {
    bytes: [u8; HEADER_SIZE],
}

impl Work {
    /// Create a Work from a fixed-size byte array
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    /// Create a Work from a byte slice, rejecting wrong lengths
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != HEADER_SIZE {
            return Err(Error::work(format!(
                "expected {HEADER_SIZE} bytes, got {}",
                slice.len()
            )));
        }

        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// View the full buffer
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    /// Mutable view of the full buffer
    pub fn as_bytes_mut(&mut self) -> &mut [u8; HEADER_SIZE] {
        &mut self.bytes
    }

    /// Read the nonce field
    pub fn nonce(&self) -> Nonce {
        let mut bytes = [0u8; NONCE_SIZE];
        bytes.copy_from_slice(&self.bytes[NONCE_OFFSET..NONCE_OFFSET + NONCE_SIZE]);
        Nonce::from_le_bytes(bytes)
    }

    /// Write the nonce field
    pub fn set_nonce(&mut self, nonce: Nonce) {
        self.bytes[NONCE_OFFSET..NONCE_OFFSET + NONCE_SIZE].copy_from_slice(&nonce.to_le_bytes());
    }

    /// Read the creation time in microseconds since epoch
    pub fn creation_time(&self) -> u64 {
        let mut bytes = [0u8; TIME_SIZE];
        bytes.copy_from_slice(&self.bytes[TIME_OFFSET..TIME_OFFSET + TIME_SIZE]);
        u64::from_le_bytes(bytes)
    }

    /// Write the creation time in microseconds since epoch
    pub fn set_creation_time(&mut self, micros: u64) {
        self.bytes[TIME_OFFSET..TIME_OFFSET + TIME_SIZE].copy_from_slice(&micros.to_le_bytes());
    }

    /// Extract the embedded target
    pub fn target(&self) -> Result<HashTarget> {
        HashTarget::from_le_bytes(&self.bytes[TARGET_OFFSET..TARGET_OFFSET + TARGET_SIZE])
    }

    /// Read the chain id field
    pub fn chain_id(&self) -> ChainId {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.bytes[CHAIN_OFFSET..CHAIN_OFFSET + 4]);
        ChainId::from_le_bytes(bytes)
    }

    /// Read the block height field
    pub fn height(&self) -> BlockHeight {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 8]);
        BlockHeight::from_le_bytes(bytes)
    }

    /// Hex rendering of the whole buffer
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse a Work from hex
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes =
            hex::decode(hex).map_err(|e| Error::work(format!("invalid hex encoding: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Work")
            .field("chain", &self.chain_id())
            .field("height", &self.height())
            .field("nonce", &self.nonce())
            .finish()
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Work(chain={}, height={}, nonce={})",
            self.chain_id(),
            self.height(),
            self.nonce()
        )
    }
}

impl Serialize for Work {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Work {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
