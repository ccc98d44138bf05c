//! Participant ID - stable identity of a connected chat participant
//!
//! Backed by a random v4 UUID assigned when the session layer first binds a
//! connection to a participant. Serialized as its hyphenated string form.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable participant identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Generate a fresh random participant ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, ParticipantIdParseError> {
        Uuid::parse_str(s)
            .map(ParticipantId)
            .map_err(|_| ParticipantIdParseError::InvalidFormat)
    }
}

/// Error when parsing a ParticipantId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantIdParseError {
    #[error("invalid participant id format")]
    InvalidFormat,
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = ParticipantIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParticipantId::parse(s)
    }
}
