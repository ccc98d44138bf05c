//! Chat event payload
//!
//! Built once per accepted or dropped submission and shared by every
//! mailbox it is delivered to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Participant, Sigil};

/// Kind of chat event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatEventKind {
    /// Regular chat visible to everyone
    Chat,
    /// Chat that the filter silently dropped; admins only
    FilteredChat,
}

impl ChatEventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::FilteredChat => "FILTERED_CHAT",
        }
    }
}

impl fmt::Display for ChatEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Immutable chat event delivered through participant mailboxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEvent {
    #[serde(rename = "event")]
    kind: ChatEventKind,
    from: String,
    id_code: String,
    sigil: Sigil,
    message: String,
    #[serde(skip_serializing_if = "is_false")]
    from_admin: bool,
    #[serde(skip_serializing_if = "is_false")]
    wall: bool,
    #[serde(skip_serializing_if = "is_false")]
    emote: bool,
    timestamp: DateTime<Utc>,
}

impl ChatEvent {
    /// Build an event from the sender's current state
    ///
    /// The admin flag and sigil are captured at build time so that a later
    /// role change does not rewrite already-queued events.
    pub fn new(
        kind: ChatEventKind,
        sender: &Participant,
        message: impl Into<String>,
        wall: bool,
        emote: bool,
    ) -> Self {
        Self {
            kind,
            from: sender.nickname().to_string(),
            id_code: sender.code().to_string(),
            sigil: sender.sigil(),
            message: message.into(),
            from_admin: sender.is_admin(),
            wall,
            emote,
            timestamp: Utc::now(),
        }
    }

    /// Regular chat event
    pub fn chat(sender: &Participant, message: impl Into<String>, wall: bool, emote: bool) -> Self {
        Self::new(ChatEventKind::Chat, sender, message, wall, emote)
    }

    /// Filtered chat event for admin observers
    pub fn filtered(
        sender: &Participant,
        message: impl Into<String>,
        wall: bool,
        emote: bool,
    ) -> Self {
        Self::new(ChatEventKind::FilteredChat, sender, message, wall, emote)
    }

    pub fn kind(&self) -> ChatEventKind {
        self.kind
    }

    pub fn is_filtered(&self) -> bool {
        self.kind == ChatEventKind::FilteredChat
    }

    /// Sender nickname
    pub fn sender_name(&self) -> &str {
        &self.from
    }

    pub fn id_code(&self) -> &str {
        &self.id_code
    }

    pub fn sigil(&self) -> Sigil {
        self.sigil
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn from_admin(&self) -> bool {
        self.from_admin
    }

    pub fn wall(&self) -> bool {
        self.wall
    }

    pub fn emote(&self) -> bool {
        self.emote
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
