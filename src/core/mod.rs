//! Core types for the mining worker
//!
//! Fundamental types shared by the kernel, pool, and supervisor: work
//! buffers, headers, targets, nonces, and the chainweb version enumeration.

mod chain_id;
mod header;
mod height;
mod nonce;
mod target;
mod version;
mod work;

pub use chain_id::ChainId;
pub use header::{BlockHeader, BlockHeaderBuilder};
pub use height::BlockHeight;
pub use nonce::Nonce;
pub use target::HashTarget;
pub use version::ChainwebVersion;
pub use work::Work;

/// Byte layout of a serialized block header
///
/// The kernel touches only the nonce and creation-time fields; everything
/// else is opaque to the search and is carried through unchanged.
pub mod constants {
    /// Serialized header length in bytes
    pub const HEADER_SIZE: usize = 160;

    /// Offset of the nonce (u64, little-endian)
    pub const NONCE_OFFSET: usize = 0;

    /// Size of the nonce in bytes
    pub const NONCE_SIZE: usize = 8;

    /// Offset of the creation time (u64 microseconds, little-endian)
    pub const TIME_OFFSET: usize = 8;

    /// Size of the creation time in bytes
    pub const TIME_SIZE: usize = 8;

    /// Offset of the parent hash
    pub const PARENT_OFFSET: usize = 16;

    /// Offset of the target (four u64 words, little-endian)
    pub const TARGET_OFFSET: usize = 48;

    /// Size of the target in bytes
    pub const TARGET_SIZE: usize = 32;

    /// Offset of the payload hash
    pub const PAYLOAD_OFFSET: usize = 80;

    /// Offset of the chain id (u32, little-endian)
    pub const CHAIN_OFFSET: usize = 112;

    /// Offset of the chain weight
    pub const WEIGHT_OFFSET: usize = 116;

    /// Offset of the block height (u64, little-endian)
    pub const HEIGHT_OFFSET: usize = 148;

    /// Offset of the chainweb version wire tag (u32, little-endian)
    pub const VERSION_OFFSET: usize = 156;

    /// Size of a proof-of-work digest in bytes
    pub const HASH_SIZE: usize = 32;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_layout_is_contiguous() {
        assert_eq!(NONCE_OFFSET, 0);
        assert_eq!(TIME_OFFSET, NONCE_OFFSET + NONCE_SIZE);
        assert_eq!(PARENT_OFFSET, TIME_OFFSET + TIME_SIZE);
        assert_eq!(TARGET_OFFSET, PARENT_OFFSET + 32);
        assert_eq!(PAYLOAD_OFFSET, TARGET_OFFSET + TARGET_SIZE);
        assert_eq!(CHAIN_OFFSET, PAYLOAD_OFFSET + 32);
        assert_eq!(WEIGHT_OFFSET, CHAIN_OFFSET + 4);
        assert_eq!(HEIGHT_OFFSET, WEIGHT_OFFSET + 32);
        assert_eq!(VERSION_OFFSET, HEIGHT_OFFSET + 8);
        assert_eq!(HEADER_SIZE, VERSION_OFFSET + 4);
    }
}

#[cfg(test)]
mod tests_property;
