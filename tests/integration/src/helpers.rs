//! Test helpers for integration tests
//!
//! Wraps a [`ChatService`] with the bookkeeping a transport would do:
//! holding each client's participant and mailbox, and turning polled
//! deliveries into something easy to assert on.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use chat_common::{try_init_tracing_with_config, ChatConfig, TracingConfig};
use chat_core::Participant;
use chat_gateway::{Delivery, Mailbox};
use chat_service::ChatService;

/// Enable log output for a test run; later calls are no-ops
pub fn init_test_tracing() {
    let _ = try_init_tracing_with_config(&TracingConfig::development());
}

/// A connected client
pub struct TestClient {
    pub participant: Arc<Participant>,
    pub mailbox: Arc<Mailbox>,
}

impl TestClient {
    /// Take everything queued, waiting at most `timeout`
    pub async fn poll(&self, timeout: Duration) -> Result<Vec<Delivery>> {
        self.mailbox
            .poll(timeout)
            .await
            .map_err(|e| anyhow!("poll failed for {}: {e}", self.participant.nickname()))
    }

    /// Messages currently queued, in delivery order
    pub async fn messages(&self) -> Result<Vec<String>> {
        Ok(self
            .poll(Duration::from_millis(10))
            .await?
            .iter()
            .map(|d| d.event.message().to_string())
            .collect())
    }
}

/// Chat service plus a clock the tests control
pub struct TestChat {
    pub service: Arc<ChatService>,
    start: Instant,
}

impl TestChat {
    pub fn new(config: &ChatConfig) -> Self {
        init_test_tracing();
        Self {
            service: Arc::new(ChatService::new(config)),
            start: Instant::now(),
        }
    }

    /// Connect a participant
    pub fn join(&self, participant: Participant) -> Result<TestClient> {
        let participant = Arc::new(participant);
        let mailbox = self.service.connect(Arc::clone(&participant))?;
        Ok(TestClient {
            participant,
            mailbox,
        })
    }

    /// Point in time `secs` after the harness was created
    pub fn at(&self, secs: u64) -> Instant {
        self.start + Duration::from_secs(secs)
    }
}
