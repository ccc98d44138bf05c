//! Moderation verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Deliver to everyone
    Accepted,
    /// Pretend success to the sender; deliver to admins only
    Dropped(DropReason),
    /// Refuse and tell the sender why
    Rejected(RejectReason),
}

impl Verdict {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Reasons a message is refused outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    NoMessage,
    Capslock,
    NotEnoughSpaces,
    Repeat,
    RepeatWords,
    TooFast,
    TooLong,
    TooManySpecials,
}

impl RejectReason {
    /// Stable error code for clients
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoMessage => "NO_MESSAGE",
            Self::Capslock => "CAPSLOCK",
            Self::NotEnoughSpaces => "NOT_ENOUGH_SPACES",
            Self::Repeat => "REPEAT",
            Self::RepeatWords => "REPEAT_WORDS",
            Self::TooFast => "TOO_FAST",
            Self::TooLong => "TOO_LONG",
            Self::TooManySpecials => "TOO_MANY_SPECIALS",
        }
    }

    /// Text shown to the sender
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoMessage => "No message specified.",
            Self::Capslock => "Your message has too many capital letters.",
            Self::NotEnoughSpaces => "Your message does not have enough spaces.",
            Self::Repeat => "You can't send the same message twice in a row.",
            Self::RepeatWords => "You used the same words too many times.",
            Self::TooFast => "You are chatting too fast. Wait a moment and try again.",
            Self::TooLong => "Your message is too long.",
            Self::TooManySpecials => "Your message contains too many special characters.",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a message was silently dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropReason {
    /// Sustained message rate above the flood threshold
    Flood,
    /// Message matched a shadow-ban pattern
    ShadowBanned,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::ShadowBanned => "shadow_banned",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
