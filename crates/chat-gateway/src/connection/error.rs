//! Registry errors

use chat_core::ParticipantId;
use thiserror::Error;

/// Failures surfaced to callers of register and poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Participant already connected: {0}")]
    AlreadyConnected(ParticipantId),

    #[error("Participant is not connected")]
    Disconnected,
}

impl RegistryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyConnected(_) => "ALREADY_CONNECTED",
            Self::Disconnected => "DISCONNECTED",
        }
    }
}
