//! Proof-of-work hashing
//!
//! The kernel is written against the [`PowHasher`] capability rather than a
//! concrete algorithm: anything that can digest arbitrary input into 32
//! bytes can drive the search. [`PowAlgorithm`] is the closed table mapping
//! chainweb versions to algorithms; keeping it as an exhaustive match means
//! a new version cannot be added without choosing its digest.

use crate::core::constants::HASH_SIZE;
use crate::core::ChainwebVersion;
use sha2::{Digest, Sha512_256};

/// Streaming 32-byte digest capability used by the search kernel
///
/// Implementations are reused across billions of iterations; `reset` must
/// return the hasher to its initial state without reallocating.
pub trait PowHasher: Send {
    /// Reset the hasher to its initial state
    fn reset(&mut self);

    /// Feed input bytes
    fn update(&mut self, data: &[u8]);

    /// Finalize into `out` and reset for the next iteration
    fn finalize_into(&mut self, out: &mut [u8; HASH_SIZE]);

    /// Hash `data` in one call, leaving the hasher reset
    fn hash_into(&mut self, data: &[u8], out: &mut [u8; HASH_SIZE]) {
        self.update(data);
        self.finalize_into(out);
    }
}

/// Truncated SHA-512/256 hasher
///
/// A SHA-512 computation with the standardized 256-bit initial values and
/// output truncation, as specified in FIPS 180-4.
pub struct Sha512t256Hasher {
    inner: Sha512_256,
}

impl Sha512t256Hasher {
    /// Create a fresh hasher
    pub fn new() -> Self {
        Self {
            inner: Sha512_256::new(),
        }
    }
}

impl Default for Sha512t256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PowHasher for Sha512t256Hasher {
    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize_into(&mut self, out: &mut [u8; HASH_SIZE]) {
        let digest = self.inner.finalize_reset();
        out.copy_from_slice(&digest);
    }
}

/// Proof-of-work digest algorithms known to this worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowAlgorithm {
    /// Truncated SHA-512/256 (the algorithm of every current version)
    Sha512Trunc256,
}

impl PowAlgorithm {
    /// Algorithm used by the given chainweb version
    pub fn for_version(version: ChainwebVersion) -> Self {
        match version {
            ChainwebVersion::Test | ChainwebVersion::Simulation | ChainwebVersion::Testnet00 => {
                PowAlgorithm::Sha512Trunc256
            }
        }
    }

    /// Algorithm name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            PowAlgorithm::Sha512Trunc256 => "sha512t-256",
        }
    }

    /// Create a fresh hasher for this algorithm
    pub fn hasher(&self) -> Box<dyn PowHasher> {
        match self {
            PowAlgorithm::Sha512Trunc256 => Box::new(Sha512t256Hasher::new()),
        }
    }

    /// Hash `data` in one shot, for verification outside the hot loop
    pub fn digest(&self, data: &[u8]) -> [u8; HASH_SIZE] {
        let mut out = [0u8; HASH_SIZE];
        self.hasher().hash_into(data, &mut out);
        out
    }
}

impl std::fmt::Display for PowAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
