//! Inner proof-of-work search loop
//!
//! One kernel invocation owns one work buffer and hashes it for as long as
//! the run lasts, rewriting the nonce before every hash and the creation
//! time once per batch. Everything in the loop body is allocation-free.

use crate::core::{HashTarget, Nonce, Work};
use crate::crypto::PowHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

/// Hashes between creation-time refreshes and cancellation checks
pub const BATCH_SIZE: u64 = 100_000;

/// Search `work` for a nonce whose digest meets `target`
///
/// Iterates from `start`, wrapping at 2^64. Returns the winning nonce with
/// `work` left holding the qualifying buffer, or `None` once `cancel` is
/// observed. Cancellation and the creation-time refresh both happen on
/// batch boundaries, so preemption latency is bounded by one batch.
///
/// `hash_counter` accumulates attempted hashes in batch granularity;
/// `now_micros` supplies the wall clock for the creation-time field.
pub fn search(
    work: &mut Work,
    target: &HashTarget,
    start: Nonce,
    hasher: &mut dyn PowHasher,
    cancel: &CancellationToken,
    hash_counter: &AtomicU64,
    now_micros: fn() -> u64,
) -> Option<Nonce> {
    let mut nonce = start;
    let mut pow = [0u8; 32];
    let mut i: u64 = 0;

    loop {
        if i == BATCH_SIZE {
            work.set_creation_time(now_micros());
            hash_counter.fetch_add(BATCH_SIZE, Ordering::Relaxed);
            if cancel.is_cancelled() {
                return None;
            }
            i = 0;
        }

        work.set_nonce(nonce);
        hasher.hash_into(work.as_bytes(), &mut pow);

        if target.meets(&pow) {
            hash_counter.fetch_add(i + 1, Ordering::Relaxed);
            return Some(nonce);
        }

        nonce.increment();
        i += 1;
    }
}
