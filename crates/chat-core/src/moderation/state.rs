//! Per-participant moderation history

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling history the filter needs to judge the next message
///
/// Only messages that were accepted or dropped are recorded; rejected
/// messages never touch this state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationState {
    last_message_at: Option<Instant>,
    history: VecDeque<String>,
    recent: VecDeque<Instant>,
}

impl ModerationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the last accepted or dropped message
    pub fn last_message_at(&self) -> Option<Instant> {
        self.last_message_at
    }

    /// The immediately preceding recorded message
    pub fn last_message(&self) -> Option<&str> {
        self.history.back().map(String::as_str)
    }

    /// Recent message bodies, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Number of recorded messages still inside `window` as of `now`
    pub fn messages_within(&self, window: Duration, now: Instant) -> usize {
        self.recent
            .iter()
            .filter(|at| now.saturating_duration_since(**at) < window)
            .count()
    }

    /// Record a message that passed the filter
    ///
    /// Keeps at most `history_size` bodies and forgets rate samples older
    /// than `window`.
    pub(crate) fn record(
        &mut self,
        text: &str,
        now: Instant,
        history_size: usize,
        window: Duration,
    ) {
        self.last_message_at = Some(now);

        self.history.push_back(text.to_string());
        while self.history.len() > history_size {
            self.history.pop_front();
        }

        self.recent.push_back(now);
        while self
            .recent
            .front()
            .is_some_and(|at| now.saturating_duration_since(*at) >= window)
        {
            self.recent.pop_front();
        }
    }
}
