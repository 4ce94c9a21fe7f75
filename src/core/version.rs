//! Chainweb version enumeration and codecs
//!
//! Versions are value-level symbols with a stable 32-bit little-endian wire
//! tag and an exact, case-sensitive textual form. Unknown wire tags and
//! unknown text must fail decoding.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network version a header belongs to
///
/// The version decides, among other things, which proof-of-work digest
/// algorithm applies (see [`crate::crypto::PowAlgorithm::for_version`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainwebVersion {
    /// In-memory testing network
    Test,
    /// Simulated mining network
    Simulation,
    /// Public test network, generation 0
    Testnet00,
}

impl ChainwebVersion {
    /// All known versions
    pub const fn all() -> &'static [ChainwebVersion] {
        &[
            ChainwebVersion::Test,
            ChainwebVersion::Simulation,
            ChainwebVersion::Testnet00,
        ]
    }

    /// Stable wire tag of this version
    pub const fn wire_tag(self) -> u32 {
        match self {
            ChainwebVersion::Test => 0x0000_0000,
            ChainwebVersion::Simulation => 0x0000_0001,
            ChainwebVersion::Testnet00 => 0x0000_0002,
        }
    }

    /// Decode a version from its wire tag
    pub fn from_wire_tag(tag: u32) -> Result<Self> {
        match tag {
            0x0000_0000 => Ok(ChainwebVersion::Test),
            0x0000_0001 => Ok(ChainwebVersion::Simulation),
            0x0000_0002 => Ok(ChainwebVersion::Testnet00),
            other => Err(Error::version(format!("unknown wire tag {other:#010x}"))),
        }
    }

    /// Encode the wire tag as 4 little-endian bytes
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.wire_tag().to_le_bytes()
    }

    /// Decode a version from 4 little-endian bytes
    pub fn from_le_bytes(bytes: [u8; 4]) -> Result<Self> {
        Self::from_wire_tag(u32::from_le_bytes(bytes))
    }

    /// Textual form of the version
    pub const fn name(self) -> &'static str {
        match self {
            ChainwebVersion::Test => "test",
            ChainwebVersion::Simulation => "simulation",
            ChainwebVersion::Testnet00 => "testnet00",
        }
    }
}

impl FromStr for ChainwebVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "test" => Ok(ChainwebVersion::Test),
            "simulation" => Ok(ChainwebVersion::Simulation),
            "testnet00" => Ok(ChainwebVersion::Testnet00),
            other => Err(Error::version(format!("unknown version {other:?}"))),
        }
    }
}

impl fmt::Display for ChainwebVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for ChainwebVersion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ChainwebVersion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
