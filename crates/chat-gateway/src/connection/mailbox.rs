//! Per-participant mailbox
//!
//! Bounded FIFO of pending deliveries drained by long-poll requests.
//! Pushing never blocks: a full mailbox evicts its oldest entry.

use chat_core::ParticipantId;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{self, Instant};

use super::RegistryError;
use crate::broadcast::Delivery;

struct MailboxInner {
    queue: VecDeque<Delivery>,
    closed: bool,
}

/// Pending events for one connected participant
pub struct Mailbox {
    /// Participant this mailbox belongs to
    owner: ParticipantId,

    /// Maximum queued deliveries
    capacity: usize,

    inner: Mutex<MailboxInner>,

    /// Wakes pending polls on push or close
    notify: Notify,

    /// Deliveries evicted because the mailbox was full
    overflowed: AtomicU64,
}

impl Mailbox {
    /// Create a new mailbox
    pub(crate) fn new(owner: ParticipantId, capacity: usize) -> Arc<Self> {
        let capacity = capacity.max(1);
        Arc::new(Self {
            owner,
            capacity,
            inner: Mutex::new(MailboxInner {
                queue: VecDeque::with_capacity(capacity.min(64)),
                closed: false,
            }),
            notify: Notify::new(),
            overflowed: AtomicU64::new(0),
        })
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of undelivered events
    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().queue.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Total deliveries evicted since the mailbox was created
    pub fn overflow_count(&self) -> u64 {
        self.overflowed.load(Ordering::Relaxed)
    }

    /// Queue a delivery
    ///
    /// Returns false if the mailbox is already closed, in which case the
    /// delivery is discarded.
    pub(crate) fn push(&self, delivery: Delivery) -> bool {
        {
            let mut inner = self.inner.lock();
            if inner.closed {
                return false;
            }

            if inner.queue.len() >= self.capacity {
                if let Some(evicted) = inner.queue.pop_front() {
                    let total = self.overflowed.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::warn!(
                        participant_id = %self.owner,
                        evicted_seq = evicted.seq,
                        overflowed = total,
                        "Mailbox overflow, oldest event evicted"
                    );
                }
            }
            inner.queue.push_back(delivery);
        }

        self.notify.notify_waiters();
        true
    }

    /// Close the mailbox and wake any pending poll
    pub(crate) fn close(&self) {
        {
            let mut inner = self.inner.lock();
            inner.closed = true;
            inner.queue.clear();
        }
        self.notify.notify_waiters();
    }

    /// Wait up to `timeout` for events, then take everything queued
    ///
    /// Returns an empty list when the timeout elapses with nothing queued,
    /// and `Disconnected` once the owner has been unregistered.
    pub async fn poll(&self, timeout: Duration) -> Result<Vec<Delivery>, RegistryError> {
        let deadline = Instant::now() + timeout;

        loop {
            // Register interest before looking at the queue so a push that
            // lands in between still wakes us.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(batch) = self.drain()? {
                return Ok(batch);
            }

            if time::timeout_at(deadline, notified).await.is_err() {
                return Ok(self.drain()?.unwrap_or_default());
            }
        }
    }

    fn drain(&self) -> Result<Option<Vec<Delivery>>, RegistryError> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(RegistryError::Disconnected);
        }
        if inner.queue.is_empty() {
            Ok(None)
        } else {
            Ok(Some(inner.queue.drain(..).collect()))
        }
    }
}

impl std::fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox")
            .field("owner", &self.owner)
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("overflowed", &self.overflow_count())
            .finish()
    }
}
