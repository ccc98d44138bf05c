//! Test fixtures and data generators
//!
//! Provides reusable participants and configuration for integration tests.

use chat_common::ChatConfig;
use chat_core::Participant;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A regular participant with a unique nickname
pub fn user(prefix: &str) -> Participant {
    Participant::new(format!("{prefix}{}", unique_suffix()))
}

/// An admin participant with a unique nickname
pub fn admin(prefix: &str) -> Participant {
    user(prefix).admin(true)
}

/// Configuration used by most integration tests
///
/// Short poll timeout so empty polls return quickly, and one shadow-ban
/// pattern for exercising dropped messages.
pub fn test_config() -> ChatConfig {
    let mut config = ChatConfig::default();
    config.chat.poll_timeout_ms = 50;
    config.mailbox.capacity = 64;
    config.filter.shadow_ban_patterns = vec!["cheapgold".to_string()];
    config
}
