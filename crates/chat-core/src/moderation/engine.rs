//! Moderation state table
//!
//! Owns one [`ModerationState`] per participant. Entries are created on a
//! participant's first message and removed by [`ModerationEngine::forget`]
//! when they disconnect.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use super::config::FilterConfig;
use super::filter::ChatFilter;
use super::state::ModerationState;
use super::verdict::Verdict;
use crate::entities::Participant;
use crate::value_objects::ParticipantId;

/// Concurrent front-end over [`ChatFilter`]
///
/// Classification for one participant runs under that participant's own
/// mutex; the table itself is only touched to look up or create the slot.
pub struct ModerationEngine {
    filter: ChatFilter,
    states: DashMap<ParticipantId, Arc<Mutex<ModerationState>>>,
}

impl ModerationEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            filter: ChatFilter::new(config),
            states: DashMap::new(),
        }
    }

    pub fn filter_config(&self) -> &FilterConfig {
        self.filter.config()
    }

    /// Classify a message from `participant` and keep the resulting state
    pub fn check(&self, participant: &Participant, text: &str, now: Instant) -> Verdict {
        // Clone the slot out so the shard lock is released before we block
        // on the participant's own mutex.
        let slot = self
            .states
            .entry(participant.id())
            .or_default()
            .value()
            .clone();

        let mut state = slot.lock();
        let (verdict, next) = self.filter.classify(&state, text, now);
        if !verdict.is_rejected() {
            *state = next;
        }

        tracing::trace!(
            participant_id = %participant.id(),
            verdict = ?verdict,
            "Message classified"
        );

        verdict
    }

    /// Drop a participant's history
    pub fn forget(&self, participant_id: ParticipantId) -> bool {
        self.states.remove(&participant_id).is_some()
    }

    /// Snapshot of a participant's state, if any
    pub fn state_of(&self, participant_id: ParticipantId) -> Option<ModerationState> {
        let slot = self.states.get(&participant_id)?.value().clone();
        let state = slot.lock().clone();
        Some(state)
    }

    /// Number of participants with tracked history
    pub fn tracked_count(&self) -> usize {
        self.states.len()
    }
}

impl std::fmt::Debug for ModerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationEngine")
            .field("config", self.filter.config())
            .field("tracked", &self.states.len())
            .finish()
    }
}
