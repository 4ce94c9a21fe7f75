//! # Chainweb Miner
//!
//! In-node proof-of-work mining worker for Kadena's Chainweb. The enclosing
//! node submits serialized candidate headers; the worker searches for a
//! nonce whose truncated SHA-512/256 digest meets the header's target
//! across the configured CPU cores, and the node polls solved headers back
//! by `(chain id, block height)`.
//!
//! ## Architecture
//!
//! - [`miner::kernel`]: the hot search loop, mutating the nonce and
//!   creation-time fields of a serialized header in place.
//! - [`miner::pool`]: one kernel per core over disjoint nonce regions;
//!   the first success terminates the others.
//! - [`miner::Miner`]: the supervisor owning the single-slot work mailbox,
//!   the preemption race, and the results map.
//!
//! A newer submission always preempts the in-flight run, so the worker
//! never wastes cores on stale work.
//!
//! ```no_run
//! use chainweb_miner::{BlockHeader, ChainwebVersion, Miner, MinerConfig};
//!
//! # async fn example(candidate: BlockHeader) -> chainweb_miner::Result<()> {
//! let miner = Miner::spawn(MinerConfig::new(4, ChainwebVersion::Testnet00)?)?;
//!
//! let key = (candidate.chain_id(), candidate.height());
//! miner.submit(candidate.encode().as_bytes())?;
//!
//! while miner.poll(key.0, key.1).is_none() {
//!     // the node does something else and polls again later
//! }
//! miner.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod miner;
pub mod utils;

pub use crate::config::MinerConfig;
pub use crate::core::{
    BlockHeader, BlockHeaderBuilder, BlockHeight, ChainId, ChainwebVersion, HashTarget, Nonce, Work,
};
pub use crate::crypto::{PowAlgorithm, PowHasher};
pub use crate::error::{Error, Result};
pub use crate::miner::{Miner, MiningStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
