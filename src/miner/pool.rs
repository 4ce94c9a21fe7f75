//! Parallel worker pool for one mining run
//!
//! Spawns one search kernel per configured core over clones of the same
//! work template and returns the first qualifying buffer. The pool never
//! returns while any of its workers is still running: success, preemption,
//! and shutdown all funnel through cancel-then-join.

use crate::core::{HashTarget, Nonce, Work};
use crate::crypto::PowAlgorithm;
use crate::error::{Error, Result};
use crate::miner::kernel;
use crate::utils::time::now_micros;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Distance between the starting nonces of adjacent workers
///
/// The 64-bit nonce space is divided evenly across the run's workers, so
/// starting regions stay disjoint for every worker count the configuration
/// type admits. A region is at least `2^64 / 65536` nonces wide; the
/// periodic creation-time refresh changes the hashed bytes long before a
/// worker could run into its neighbour's region.
fn worker_nonce_stride(workers: u16) -> u64 {
    u64::MAX / u64::from(workers.max(1))
}

/// Run one parallel search over `work` and return the solved buffer
///
/// Workers observe `cancel` within one kernel batch; the first success
/// cancels its peers. Every spawned task is joined before this function
/// returns, so callers may rely on the run being fully dead afterwards.
/// Returns [`Error::Cancelled`] when the run was preempted before any
/// worker succeeded.
pub async fn run(
    work: Work,
    target: HashTarget,
    algorithm: PowAlgorithm,
    workers: u16,
    cancel: CancellationToken,
    hash_counter: Arc<AtomicU64>,
) -> Result<Work> {
    debug_assert!(workers >= 1);
    let base_nonce = work.nonce();

    if workers <= 1 {
        return run_single(work, target, algorithm, cancel, hash_counter).await;
    }

    let stride = worker_nonce_stride(workers);
    let (solution_tx, mut solution_rx) = mpsc::unbounded_channel();
    let mut handles = Vec::with_capacity(workers as usize);

    for worker in 0..workers {
        let mut work = work.clone();
        let start = base_nonce.offset(u64::from(worker) * stride);
        let cancel = cancel.clone();
        let solution_tx = solution_tx.clone();
        let hash_counter = Arc::clone(&hash_counter);
        let mut hasher = algorithm.hasher();

        handles.push(task::spawn_blocking(move || {
            trace!(worker, start = %start, "search worker started");
            if let Some(nonce) = kernel::search(
                &mut work,
                &target,
                start,
                hasher.as_mut(),
                &cancel,
                &hash_counter,
                now_micros,
            ) {
                debug!(worker, %nonce, "search worker found a solution");
                let _ = solution_tx.send(work);
            }
        }));
    }

    // Only worker clones hold senders now; the channel closes when the
    // last worker exits.
    drop(solution_tx);

    // `None` means every worker returned without a solution, which only
    // happens when the run was cancelled.
    let solved = solution_rx.recv().await;

    cancel.cancel();
    join_all(handles).await?;

    solved.ok_or_else(|| Error::cancelled("mining run"))
}

/// Single-worker path: one blocking task, no solution channel
async fn run_single(
    mut work: Work,
    target: HashTarget,
    algorithm: PowAlgorithm,
    cancel: CancellationToken,
    hash_counter: Arc<AtomicU64>,
) -> Result<Work> {
    let start = work.nonce();
    let mut hasher = algorithm.hasher();

    let handle = task::spawn_blocking(move || {
        kernel::search(
            &mut work,
            &target,
            start,
            hasher.as_mut(),
            &cancel,
            &hash_counter,
            now_micros,
        )
        .map(|_| work)
    });

    match handle.await {
        Ok(Some(solved)) => Ok(solved),
        Ok(None) => Err(Error::cancelled("mining run")),
        Err(e) => Err(Error::worker(format!("search worker failed: {e}"))),
    }
}

async fn join_all(handles: Vec<task::JoinHandle<()>>) -> Result<()> {
    for handle in handles {
        handle
            .await
            .map_err(|e| Error::worker(format!("search worker failed: {e}")))?;
    }
    Ok(())
}
