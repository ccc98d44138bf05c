//! Mailbox entries

use chat_core::ChatEvent;
use serde::Serialize;
use std::sync::Arc;

/// One event as queued in a participant's mailbox
///
/// `seq` is assigned when the broadcast is admitted, so it increases
/// strictly along every mailbox and gaps reveal evicted events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub seq: u64,
    #[serde(flatten)]
    pub event: Arc<ChatEvent>,
}

impl Delivery {
    pub fn new(seq: u64, event: Arc<ChatEvent>) -> Self {
        Self { seq, event }
    }
}
