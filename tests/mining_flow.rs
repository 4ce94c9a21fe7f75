//! End-to-end mining flows: submit, search, preempt, poll

use chainweb_miner::{
    BlockHeader, BlockHeaderBuilder, BlockHeight, ChainId, ChainwebVersion, HashTarget, Miner,
    MinerConfig,
};
use sha2::{Digest, Sha512_256};
use std::time::Duration;
use tokio::time::timeout;

fn header(chain: u32, height: u64, target: HashTarget, payload: u8) -> BlockHeader {
    BlockHeaderBuilder::new()
        .chain_id(ChainId::new(chain))
        .height(BlockHeight::new(height))
        .target(target)
        .payload_hash([payload; 32])
        .parent([0xEE; 32])
        .build()
}

async fn poll_until<F>(miner: &Miner, chain: u32, height: u64, accept: F) -> BlockHeader
where
    F: Fn(&BlockHeader) -> bool,
{
    timeout(Duration::from_secs(120), async {
        loop {
            if let Some(found) = miner.poll(ChainId::new(chain), BlockHeight::new(height)) {
                if accept(&found) {
                    return found;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("expected a published result")
}

/// Independent check that a solved header's digest meets its target.
fn reference_verify(header: &BlockHeader) -> bool {
    let digest: [u8; 32] = Sha512_256::digest(header.encode().as_bytes()).into();
    header.target().meets(&digest)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn trivial_target_is_solved_and_polled() {
    let miner = Miner::spawn(MinerConfig::new(1, ChainwebVersion::Test).unwrap()).unwrap();

    let candidate = header(0, 1, HashTarget::max_target(), 0x11);
    miner.submit(candidate.encode().as_bytes()).unwrap();

    let solved = poll_until(&miner, 0, 1, |_| true).await;
    assert_eq!(solved.chain_id(), ChainId::new(0));
    assert_eq!(solved.height(), BlockHeight::new(1));
    assert_eq!(solved.payload_hash(), candidate.payload_hash());
    assert!(reference_verify(&solved));

    miner.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn newer_submission_preempts_impossible_run() {
    let miner = Miner::spawn(MinerConfig::new(2, ChainwebVersion::Test).unwrap()).unwrap();

    // A run that can never finish on its own.
    let stuck = header(0, 5, HashTarget::zero(), 0xAA);
    miner.submit(stuck.encode().as_bytes()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Preempt it with easy work for a different key.
    let easy = header(1, 5, HashTarget::max_target(), 0xBB);
    miner.submit(easy.encode().as_bytes()).unwrap();

    let solved = poll_until(&miner, 1, 5, |_| true).await;
    assert!(reference_verify(&solved));

    // The preempted job never produced a result.
    assert!(miner.poll(ChainId::new(0), BlockHeight::new(5)).is_none());
    assert!(miner.stats().preemptions >= 1);

    miner.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rapid_resubmission_settles_on_latest_payload() {
    let miner = Miner::spawn(MinerConfig::new(1, ChainwebVersion::Test).unwrap()).unwrap();

    // Ten submissions for the same key in a tight loop; only the payload
    // bytes differ. Earlier results may appear transiently, but the map
    // must settle on the most recent submission.
    for payload in 0u8..10 {
        let candidate = header(3, 42, HashTarget::max_target(), payload);
        miner.submit(candidate.encode().as_bytes()).unwrap();
    }

    let solved = poll_until(&miner, 3, 42, |h| h.payload_hash() == &[9u8; 32]).await;
    assert!(reference_verify(&solved));

    miner.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 6)]
async fn parallel_run_produces_verifiable_solution() {
    let miner = Miner::spawn(MinerConfig::new(4, ChainwebVersion::Test).unwrap()).unwrap();

    // Hard enough that the pool actually iterates, easy enough to stay
    // fast in debug builds.
    let candidate = header(2, 1_000, HashTarget::from_leading_zeros(16), 0xCC);
    miner.submit(candidate.encode().as_bytes()).unwrap();

    let solved = poll_until(&miner, 2, 1_000, |_| true).await;
    assert_eq!(solved.target(), candidate.target());
    assert!(reference_verify(&solved));
    assert!(miner.stats().total_hashes > 0);

    miner.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn submission_survives_while_a_run_is_in_flight() {
    let miner = Miner::spawn(MinerConfig::new(1, ChainwebVersion::Test).unwrap()).unwrap();

    // Start an impossible run, then submit easy work immediately, without
    // giving the supervisor time to reach its preemption wait.
    let stuck = header(0, 9, HashTarget::zero(), 0x01);
    let easy = header(4, 9, HashTarget::max_target(), 0x02);
    miner.submit(stuck.encode().as_bytes()).unwrap();
    miner.submit(easy.encode().as_bytes()).unwrap();

    let solved = poll_until(&miner, 4, 9, |_| true).await;
    assert!(reference_verify(&solved));

    miner.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_submissions_are_rejected_synchronously() {
    let miner = Miner::spawn(MinerConfig::new(1, ChainwebVersion::Test).unwrap()).unwrap();

    // Wrong length.
    assert!(miner.submit(&[0u8; 42]).is_err());

    // Unknown version tag in an otherwise valid buffer.
    let mut work = header(0, 0, HashTarget::max_target(), 0).encode();
    let len = work.as_bytes().len();
    work.as_bytes_mut()[len - 4] = 0xFF;
    assert!(miner.submit(work.as_bytes()).is_err());

    miner.shutdown().await.unwrap();
}
