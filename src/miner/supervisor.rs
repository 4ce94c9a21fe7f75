//! Mining supervisor: job intake, preemption, and result publication
//!
//! One long-running task owns the single mining slot. It drains the work
//! mailbox, races each run against newer submissions and shutdown, and
//! publishes solved headers into the results map for the node to poll.

use crate::config::MinerConfig;
use crate::core::{BlockHeader, BlockHeight, ChainId};
use crate::crypto::PowAlgorithm;
use crate::error::{Error, Result};
use crate::miner::{pool, Mailbox};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Results map key: one solved header per chain and height
pub type ResultKey = (ChainId, BlockHeight);

/// Snapshot of supervisor counters
#[derive(Debug, Clone, Default)]
pub struct MiningStats {
    /// Hashes attempted across all runs, in batch granularity
    pub total_hashes: u64,
    /// Solved headers published
    pub solutions_found: u64,
    /// Runs cancelled by a newer submission
    pub preemptions: u64,
}

/// State shared between the API surface and the mining loop
struct Shared {
    work: Mailbox<BlockHeader>,
    results: RwLock<HashMap<ResultKey, BlockHeader>>,
    hashes: Arc<AtomicU64>,
    solutions: AtomicU64,
    preemptions: AtomicU64,
}

/// The mining worker
///
/// Spawning a `Miner` starts its supervisor task; `submit` and `poll` are
/// the only operations the enclosing node needs. At most one mining run is
/// active at any time, and a newer submission always preempts the current
/// run before the next one starts.
pub struct Miner {
    shared: Arc<Shared>,
    shutdown: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Miner {
    /// Validate `config` and start the supervisor task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: MinerConfig) -> Result<Self> {
        config.validate()?;

        let shared = Arc::new(Shared {
            work: Mailbox::new(),
            results: RwLock::new(HashMap::new()),
            hashes: Arc::new(AtomicU64::new(0)),
            solutions: AtomicU64::new(0),
            preemptions: AtomicU64::new(0),
        });
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(mining_loop(
            Arc::clone(&shared),
            config.clone(),
            shutdown.clone(),
        ));

        info!(
            cores = config.cores,
            version = %config.version,
            "mining worker started"
        );

        Ok(Self {
            shared,
            shutdown,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Submit serialized candidate work
    ///
    /// Validates the buffer synchronously (length, target, version tag) and
    /// replaces any pending submission. Never blocks; the mailbox is left
    /// untouched when validation fails. An in-flight run for older work is
    /// preempted by the supervisor.
    pub fn submit(&self, bytes: &[u8]) -> Result<()> {
        let header = BlockHeader::decode_slice(bytes)?;
        self.submit_header(header);
        Ok(())
    }

    /// Submit an already-decoded candidate header
    pub fn submit_header(&self, header: BlockHeader) {
        debug!(
            chain = %header.chain_id(),
            height = %header.height(),
            "work submitted"
        );
        self.shared.work.put(header);
    }

    /// Look up a solved header, if one has been published for this key
    ///
    /// Never blocks. Entries are never evicted.
    pub fn poll(&self, chain: ChainId, height: BlockHeight) -> Option<BlockHeader> {
        self.shared.results.read().get(&(chain, height)).cloned()
    }

    /// Snapshot of the supervisor counters
    pub fn stats(&self) -> MiningStats {
        MiningStats {
            total_hashes: self.shared.hashes.load(Ordering::Relaxed),
            solutions_found: self.shared.solutions.load(Ordering::Relaxed),
            preemptions: self.shared.preemptions.load(Ordering::Relaxed),
        }
    }

    /// Stop the supervisor, cancelling any in-flight run
    ///
    /// Resolves once every worker thread has terminated. Idempotent.
    pub async fn shutdown(&self) -> Result<()> {
        self.shutdown.cancel();
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            handle
                .await
                .map_err(|e| Error::worker(format!("supervisor task failed: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for Miner {
    fn drop(&mut self) {
        // Stop the loop even if the caller forgot to shut down; workers
        // notice within one kernel batch.
        self.shutdown.cancel();
    }
}

/// The supervisor's long-running task
async fn mining_loop(shared: Arc<Shared>, config: MinerConfig, shutdown: CancellationToken) {
    let algorithm = PowAlgorithm::for_version(config.version);

    loop {
        let header = tokio::select! {
            _ = shutdown.cancelled() => break,
            header = shared.work.take() => header,
        };

        let key = (header.chain_id(), header.height());
        let target = header.target();
        let work = header.encode();

        info!(
            chain = %key.0,
            height = %key.1,
            difficulty = target.difficulty_bits(),
            algorithm = %algorithm,
            "mining run started"
        );

        let run_cancel = shutdown.child_token();
        let mut run = tokio::spawn(pool::run(
            work,
            target,
            algorithm,
            config.cores,
            run_cancel.clone(),
            Arc::clone(&shared.hashes),
        ));

        tokio::select! {
            outcome = &mut run => {
                publish(&shared, key, outcome);
            }
            _ = shared.work.wait_update() => {
                debug!(chain = %key.0, height = %key.1, "mining run preempted");
                shared.preemptions.fetch_add(1, Ordering::Relaxed);
                run_cancel.cancel();
                let _ = run.await;
            }
            _ = shutdown.cancelled() => {
                run_cancel.cancel();
                let _ = run.await;
                break;
            }
        }
    }

    debug!("mining loop terminated");
}

/// Record the outcome of a completed (non-preempted) run
fn publish(
    shared: &Shared,
    key: ResultKey,
    outcome: std::result::Result<Result<crate::core::Work>, tokio::task::JoinError>,
) {
    match outcome {
        Ok(Ok(solved)) => match BlockHeader::decode(&solved) {
            Ok(header) => {
                info!(
                    chain = %key.0,
                    height = %key.1,
                    nonce = %header.nonce(),
                    "solved header published"
                );
                shared.solutions.fetch_add(1, Ordering::Relaxed);
                shared.results.write().insert(key, header);
            }
            Err(e) => {
                // Only possible if a worker corrupted bytes outside the
                // nonce/time fields; never publish such a buffer.
                error!(chain = %key.0, height = %key.1, error = %e,
                    "mined buffer failed to decode; result discarded");
            }
        },
        Ok(Err(e)) if e.is_cancellation() => {
            debug!(chain = %key.0, height = %key.1, "mining run cancelled");
        }
        Ok(Err(e)) => {
            warn!(chain = %key.0, height = %key.1, error = %e,
                "mining run failed; awaiting new work");
        }
        Err(e) => {
            error!(chain = %key.0, height = %key.1, error = %e,
                "mining run task failed; awaiting new work");
        }
    }
}
