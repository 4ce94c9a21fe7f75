//! Single-slot mailbox carrying the most recent pending job
//!
//! The node may submit faster than the supervisor can mine; only the newest
//! submission matters, so the mailbox holds at most one value and a write
//! into a full slot replaces the contents. The replace is a single
//! operation under the slot lock, so a submission can never be dropped
//! between an emptiness check and a write.

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Single-slot cell with blocking take and non-blocking replace
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
    notify: Notify,
}

impl<T> Mailbox<T> {
    /// Create an empty mailbox
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Place a value, unconditionally replacing any existing one
    ///
    /// Never blocks. Wakes every task suspended in [`take`](Self::take) or
    /// [`wait_update`](Self::wait_update).
    pub fn put(&self, value: T) {
        *self.slot.lock() = Some(value);
        self.notify.notify_waiters();
    }

    /// Take the pending value, waiting until one is present
    ///
    /// The slot is empty afterwards.
    pub async fn take(&self) -> T {
        loop {
            if let Some(value) = self.slot.lock().take() {
                return value;
            }

            // Register interest before the re-check so a put landing in
            // between still wakes us.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(value) = self.slot.lock().take() {
                return value;
            }
            notified.await;
        }
    }

    /// Take the pending value if one is present
    pub fn try_take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    /// Wait until a submission is pending, without consuming it
    ///
    /// The caller is expected to have drained the slot with
    /// [`take`](Self::take) before waiting, so completion always means a
    /// submission newer than the one being worked on. A submission that
    /// lands between that take and this call completes the wait
    /// immediately rather than sitting in the slot until the current run
    /// ends.
    pub async fn wait_update(&self) {
        loop {
            if self.slot.lock().is_some() {
                return;
            }

            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.slot.lock().is_some() {
                return;
            }
            notified.await;
        }
    }

    /// True if no submission is pending
    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
