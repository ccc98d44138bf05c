//! Errors reported back to the sender of a chat submission

use thiserror::Error;

use crate::moderation::RejectReason;

/// Sender-facing chat failure
///
/// None of these are broadcast; they go back to the submitting client only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Submission carried no message text at all
    #[error("No message specified.")]
    NoMessage,

    /// Sender lacks the admin flag the request needs
    #[error("You must be an administrator to do that.")]
    NotAdmin,

    /// Moderation refused the message
    #[error("{0}")]
    Rejected(RejectReason),
}

impl ChatError {
    /// Get an error code string for client responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoMessage => "NO_MESSAGE",
            Self::NotAdmin => "NOT_ADMIN",
            Self::Rejected(reason) => reason.code(),
        }
    }

    /// Check if this came from the moderation filter
    pub fn is_moderation(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Check if this is a permission failure
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAdmin)
    }
}

impl From<RejectReason> for ChatError {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected(reason)
    }
}
