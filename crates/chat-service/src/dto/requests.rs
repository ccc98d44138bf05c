//! Request DTOs
//!
//! Shapes a transport deserializes client input into before calling a
//! service.

use serde::Deserialize;

/// A chat message submitted by a participant
///
/// `message` is `None` when the client sent no message field at all, which
/// is reported differently from an empty or whitespace-only message only
/// in that it never reaches moderation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatSubmission {
    #[serde(default)]
    pub message: Option<String>,

    /// Admin-only announcement
    #[serde(default)]
    pub wall: bool,

    /// "/me" style action
    #[serde(default)]
    pub emote: bool,
}

impl ChatSubmission {
    /// Plain chat message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Submission with no message field
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_wall(mut self) -> Self {
        self.wall = true;
        self
    }

    #[must_use]
    pub fn as_emote(mut self) -> Self {
        self.emote = true;
        self
    }
}
