//! Block header record and its binary codec

use crate::core::constants::{
    CHAIN_OFFSET, HEADER_SIZE, HEIGHT_OFFSET, NONCE_OFFSET, PARENT_OFFSET, PAYLOAD_OFFSET,
    TARGET_OFFSET, TIME_OFFSET, VERSION_OFFSET, WEIGHT_OFFSET,
};
use crate::core::{BlockHeight, ChainId, ChainwebVersion, HashTarget, Nonce, Work};
use crate::error::Result;
use std::fmt;

/// A decoded block header
///
/// The mining core treats most fields as opaque payload; it only ever
/// rewrites the nonce and creation time, and reads the target, chain id,
/// and height. Parent hash, payload hash, and chain weight are carried as
/// raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct BlockHeader {
    nonce: Nonce,
    creation_time: u64,
    parent: [u8; 32],
    target: HashTarget,
    payload_hash: [u8; 32],
    chain_id: ChainId,
    weight: [u8; 32],
    height: BlockHeight,
    version: ChainwebVersion,
}

impl BlockHeader {
    /// Nonce of this header
    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    /// Creation time in microseconds since epoch
    pub fn creation_time(&self) -> u64 {
        self.creation_time
    }

    /// Parent block hash
    pub fn parent(&self) -> &[u8; 32] {
        &self.parent
    }

    /// Proof-of-work target this header must meet
    pub fn target(&self) -> HashTarget {
        self.target
    }

    /// Payload hash
    pub fn payload_hash(&self) -> &[u8; 32] {
        &self.payload_hash
    }

    /// Chain this header extends
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Accumulated chain weight
    pub fn weight(&self) -> &[u8; 32] {
        &self.weight
    }

    /// Height of this header in its chain
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    /// Network version of this header
    pub fn version(&self) -> ChainwebVersion {
        self.version
    }

    /// Serialize into a mining work buffer
    pub fn encode(&self) -> Work {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[NONCE_OFFSET..NONCE_OFFSET + 8].copy_from_slice(&self.nonce.to_le_bytes());
        bytes[TIME_OFFSET..TIME_OFFSET + 8].copy_from_slice(&self.creation_time.to_le_bytes());
        bytes[PARENT_OFFSET..PARENT_OFFSET + 32].copy_from_slice(&self.parent);
        bytes[TARGET_OFFSET..TARGET_OFFSET + 32].copy_from_slice(&self.target.to_le_bytes());
        bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 32].copy_from_slice(&self.payload_hash);
        bytes[CHAIN_OFFSET..CHAIN_OFFSET + 4].copy_from_slice(&self.chain_id.to_le_bytes());
        bytes[WEIGHT_OFFSET..WEIGHT_OFFSET + 32].copy_from_slice(&self.weight);
        bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 8].copy_from_slice(&self.height.to_le_bytes());
        bytes[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&self.version.to_le_bytes());
        Work::from_bytes(bytes)
    }

    /// Deserialize from a mining work buffer
    ///
    /// Accepts any buffer produced by mutating the nonce and creation-time
    /// fields of a previously-encoded header. Fails on unknown version tags
    /// and malformed targets.
    pub fn decode(work: &Work) -> Result<Self> {
        let bytes = work.as_bytes();

        let mut parent = [0u8; 32];
        parent.copy_from_slice(&bytes[PARENT_OFFSET..PARENT_OFFSET + 32]);
        let mut payload_hash = [0u8; 32];
        payload_hash.copy_from_slice(&bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + 32]);
        let mut weight = [0u8; 32];
        weight.copy_from_slice(&bytes[WEIGHT_OFFSET..WEIGHT_OFFSET + 32]);
        let mut version_bytes = [0u8; 4];
        version_bytes.copy_from_slice(&bytes[VERSION_OFFSET..VERSION_OFFSET + 4]);

        Ok(Self {
            nonce: work.nonce(),
            creation_time: work.creation_time(),
            parent,
            target: work.target()?,
            payload_hash,
            chain_id: work.chain_id(),
            weight,
            height: work.height(),
            version: ChainwebVersion::from_le_bytes(version_bytes)?,
        })
    }

    /// Deserialize from a raw byte slice, validating the length first
    pub fn decode_slice(bytes: &[u8]) -> Result<Self> {
        let work = Work::from_slice(bytes)?;
        Self::decode(&work)
    }
}

impl fmt::Debug for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockHeader")
            .field("chain", &self.chain_id)
            .field("height", &self.height)
            .field("nonce", &self.nonce)
            .field("creation_time", &self.creation_time)
            .field("target", &self.target.to_hex_be())
            .field("version", &self.version)
            .finish()
    }
}

/// Builder for [`BlockHeader`] values
///
/// Starts from an all-zero header on the `Test` network with the maximum
/// target; set the fields a use case cares about.
#[derive(Debug, Clone)]
pub struct BlockHeaderBuilder {
    header: BlockHeader,
}

impl BlockHeaderBuilder {
    /// Create a builder with default field values
    pub fn new() -> Self {
        Self {
            header: BlockHeader {
                nonce: Nonce::default(),
                creation_time: 0,
                parent: [0u8; 32],
                target: HashTarget::max_target(),
                payload_hash: [0u8; 32],
                chain_id: ChainId::default(),
                weight: [0u8; 32],
                height: BlockHeight::default(),
                version: ChainwebVersion::Test,
            },
        }
    }

    /// Set the nonce
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.header.nonce = nonce;
        self
    }

    /// Set the creation time in microseconds since epoch
    pub fn creation_time(mut self, micros: u64) -> Self {
        self.header.creation_time = micros;
        self
    }

    /// Set the parent hash
    pub fn parent(mut self, parent: [u8; 32]) -> Self {
        self.header.parent = parent;
        self
    }

    /// Set the target
    pub fn target(mut self, target: HashTarget) -> Self {
        self.header.target = target;
        self
    }

    /// Set the payload hash
    pub fn payload_hash(mut self, payload_hash: [u8; 32]) -> Self {
        self.header.payload_hash = payload_hash;
        self
    }

    /// Set the chain id
    pub fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.header.chain_id = chain_id;
        self
    }

    /// Set the chain weight
    pub fn weight(mut self, weight: [u8; 32]) -> Self {
        self.header.weight = weight;
        self
    }

    /// Set the block height
    pub fn height(mut self, height: BlockHeight) -> Self {
        self.header.height = height;
        self
    }

    /// Set the network version
    pub fn version(mut self, version: ChainwebVersion) -> Self {
        self.header.version = version;
        self
    }

    /// Finish building
    pub fn build(self) -> BlockHeader {
        self.header
    }
}

impl Default for BlockHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
