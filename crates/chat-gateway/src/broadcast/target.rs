//! Broadcast recipient selection

use chat_core::{Participant, ParticipantId};
use std::collections::HashSet;

/// Which connected participants a broadcast reaches
///
/// Evaluated against the live registry when the broadcast is admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastTarget {
    /// Everyone connected
    All,
    /// Participants whose admin flag is currently set
    Admins,
    /// An explicit list; ids that are not connected are skipped
    Participants(HashSet<ParticipantId>),
}

impl BroadcastTarget {
    /// Build an explicit recipient list
    pub fn participants(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        Self::Participants(ids.into_iter().collect())
    }

    /// Check whether `participant` is a recipient
    pub fn includes(&self, participant: &Participant) -> bool {
        match self {
            Self::All => true,
            Self::Admins => participant.is_admin(),
            Self::Participants(ids) => ids.contains(&participant.id()),
        }
    }
}
