//! The mining subsystem
//!
//! Three layers, innermost first: [`kernel`] hashes one buffer in a hot
//! loop, [`pool`] fans a run out across CPU cores and collects the first
//! success, and the supervisor ([`Miner`]) owns the job mailbox, the
//! preemption race, and the results map.

pub mod kernel;
pub mod mailbox;
pub mod pool;
mod supervisor;

pub use mailbox::Mailbox;
pub use supervisor::{Miner, MiningStats, ResultKey};
