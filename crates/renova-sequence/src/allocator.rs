// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Debounced sequence allocation with last-request-wins semantics.
//!
//! Every submitted candidate gets a monotonically increasing request
//! token. The token is re-checked after the debounce sleep and again
//! after the probe await, so a response for a superseded candidate can
//! never overwrite the state of a later one. Tearing down the owning
//! form cancels any in-flight check via the [`CancellationToken`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use renova_core::{ParentId, UniquenessProbe};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::claim::SequenceClaim;
use crate::normalize::sequence_is_available;

/// Default quiet period before a candidate is checked remotely.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Next free ordinal for a parent: max of the existing set plus one,
/// or 1 for the first child record.
pub fn suggest_next(existing: &BTreeSet<u32>) -> u32 {
    existing.iter().next_back().map_or(1, |max| max + 1)
}

/// Allocates a unique per-parent sequence for a new renewal record.
///
/// The allocator minimizes, not eliminates, the chance of a rejected
/// submission; the authoritative uniqueness guarantee stays server-side.
pub struct SequenceAllocator {
    probe: Arc<dyn UniquenessProbe>,
    parent: ParentId,
    /// The record's pre-edit sequence in edit mode. A record is always
    /// unique with respect to itself.
    original: Option<u32>,
    debounce: Duration,
    claim: Arc<Mutex<SequenceClaim>>,
    /// Monotonically increasing request token; only the latest wins.
    latest: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl SequenceAllocator {
    /// Allocator for creating a new record under `parent`.
    pub fn new(probe: Arc<dyn UniquenessProbe>, parent: ParentId, debounce: Duration) -> Self {
        Self {
            probe,
            parent,
            original: None,
            debounce,
            claim: Arc::new(Mutex::new(SequenceClaim::Unchecked)),
            latest: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
        }
    }

    /// Allocator for editing an existing record whose current sequence is
    /// `original`.
    pub fn for_edit(
        probe: Arc<dyn UniquenessProbe>,
        parent: ParentId,
        original: u32,
        debounce: Duration,
    ) -> Self {
        let mut allocator = Self::new(probe, parent, debounce);
        allocator.original = Some(original);
        allocator
    }

    /// Snapshot of the current claim state.
    pub async fn claim(&self) -> SequenceClaim {
        self.claim.lock().await.clone()
    }

    /// Clear the claim and invalidate any in-flight check.
    pub async fn reset(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        *self.claim.lock().await = SequenceClaim::Unchecked;
    }

    /// Cancel any in-flight check. Called when the owning form goes away.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Submit a candidate for validation.
    ///
    /// The claim moves to `Checking` immediately. After the debounce quiet
    /// period the latest candidate is checked remotely; superseded
    /// candidates are dropped without a probe call, and a stale response
    /// arriving after a newer submission is discarded. A candidate equal
    /// to the record's original sequence validates synchronously with no
    /// remote call.
    ///
    /// The returned handle completes when the background check settles;
    /// callers may ignore it.
    pub async fn submit_candidate(&self, candidate: u32) -> JoinHandle<()> {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        // Edit-mode exception: the record's own sequence is always valid.
        if self.original == Some(candidate) {
            *self.claim.lock().await = SequenceClaim::Valid { candidate };
            return tokio::spawn(async {});
        }

        *self.claim.lock().await = SequenceClaim::Checking { candidate };

        let probe = Arc::clone(&self.probe);
        let parent = self.parent.clone();
        let claim = Arc::clone(&self.claim);
        let latest = Arc::clone(&self.latest);
        let cancel = self.cancel.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }

            if latest.load(Ordering::SeqCst) != token {
                debug!(candidate, "candidate superseded during debounce, skipping check");
                return;
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = probe.check_sequence(&parent, candidate) => result,
            };

            // Last request wins: a response for an outdated candidate must
            // never be applied after a newer check was dispatched.
            if latest.load(Ordering::SeqCst) != token {
                warn!(candidate, "discarding stale uniqueness response");
                return;
            }

            let next = match result {
                Ok(signal) if sequence_is_available(signal) => {
                    SequenceClaim::Valid { candidate }
                }
                Ok(_) => SequenceClaim::Conflict { candidate },
                Err(err) => {
                    warn!(candidate, error = %err, "uniqueness check failed, claim is retryable");
                    SequenceClaim::Invalid {
                        candidate,
                        message: err.to_string(),
                        retryable: true,
                    }
                }
            };

            *claim.lock().await = next;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_core::UniquenessSignal;
    use renova_test_utils::MockProbe;

    fn parent() -> ParentId {
        ParentId("amc-1".into())
    }

    const FAST: Duration = Duration::from_millis(10);

    #[test]
    fn suggest_next_on_empty_set_is_one() {
        assert_eq!(suggest_next(&BTreeSet::new()), 1);
    }

    #[test]
    fn suggest_next_is_max_plus_one() {
        let existing = BTreeSet::from([1, 2, 5]);
        assert_eq!(suggest_next(&existing), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn free_candidate_becomes_valid() {
        let probe = Arc::new(MockProbe::new());
        let allocator = SequenceAllocator::new(probe.clone(), parent(), FAST);

        let handle = allocator.submit_candidate(4).await;
        assert_eq!(allocator.claim().await, SequenceClaim::Checking { candidate: 4 });

        handle.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Valid { candidate: 4 });
        assert!(allocator.claim().await.permits_submission());
        assert_eq!(probe.calls(), vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn taken_candidate_becomes_conflict() {
        let probe = Arc::new(MockProbe::new().with_signal(3, UniquenessSignal::Exists(true)));
        let allocator = SequenceAllocator::new(probe, parent(), FAST);

        allocator.submit_candidate(3).await.await.unwrap();
        let claim = allocator.claim().await;
        assert_eq!(claim, SequenceClaim::Conflict { candidate: 3 });
        assert!(!claim.permits_submission());
    }

    #[tokio::test(start_paused = true)]
    async fn probe_error_is_retryable_invalid_never_valid() {
        let probe = Arc::new(MockProbe::new().with_error(8));
        let allocator = SequenceAllocator::new(probe, parent(), FAST);

        allocator.submit_candidate(8).await.await.unwrap();
        match allocator.claim().await {
            SequenceClaim::Invalid { candidate, retryable, .. } => {
                assert_eq!(candidate, 8);
                assert!(retryable);
            }
            other => panic!("expected retryable invalid, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_check_only_the_latest_candidate() {
        let probe = Arc::new(MockProbe::new());
        let allocator = SequenceAllocator::new(probe.clone(), parent(), FAST);

        let first = allocator.submit_candidate(5).await;
        let second = allocator.submit_candidate(7).await;
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(allocator.claim().await, SequenceClaim::Valid { candidate: 7 });
        // The superseded candidate never reached the probe.
        assert_eq!(probe.calls(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_for_old_candidate_is_discarded() {
        let probe = Arc::new(MockProbe::new().with_delay(5, Duration::from_millis(150)));
        let allocator = SequenceAllocator::new(probe.clone(), parent(), FAST);

        let first = allocator.submit_candidate(5).await;
        // Let 5 get past the debounce and into the slow probe call.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = allocator.submit_candidate(7).await;
        second.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Valid { candidate: 7 });

        // 5's response arrives later and must not overwrite 7's claim.
        first.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Valid { candidate: 7 });
        assert_eq!(probe.calls(), vec![5, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_mode_original_sequence_validates_without_remote_call() {
        let probe = Arc::new(MockProbe::new());
        let allocator = SequenceAllocator::for_edit(probe.clone(), parent(), 4, FAST);

        allocator.submit_candidate(4).await.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Valid { candidate: 4 });
        assert!(probe.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn edit_mode_other_candidate_still_goes_remote() {
        let probe = Arc::new(MockProbe::new().with_signal(9, UniquenessSignal::Unique(false)));
        let allocator = SequenceAllocator::for_edit(probe.clone(), parent(), 4, FAST);

        allocator.submit_candidate(9).await.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Conflict { candidate: 9 });
        assert_eq!(probe.calls(), vec![9]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_in_flight_check() {
        let probe = Arc::new(MockProbe::new());
        let allocator = SequenceAllocator::new(probe.clone(), parent(), FAST);

        let handle = allocator.submit_candidate(6).await;
        allocator.cancel();
        handle.await.unwrap();

        // The check never completed; the claim is still the checking state
        // and no probe call escaped the cancelled form.
        assert_eq!(allocator.claim().await, SequenceClaim::Checking { candidate: 6 });
        assert!(probe.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_unchecked_and_drops_stale_results() {
        let probe = Arc::new(MockProbe::new().with_delay(5, Duration::from_millis(100)));
        let allocator = SequenceAllocator::new(probe, parent(), FAST);

        let handle = allocator.submit_candidate(5).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        allocator.reset().await;

        handle.await.unwrap();
        assert_eq!(allocator.claim().await, SequenceClaim::Unchecked);
    }
}
