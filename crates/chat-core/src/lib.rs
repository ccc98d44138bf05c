//! # chat-core
//!
//! Domain layer containing participants, chat events, error types, and the
//! moderation engine that classifies every global chat message.
//! This crate has no dependencies on transport or delivery infrastructure.

pub mod entities;
pub mod error;
pub mod events;
pub mod moderation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Participant, Sigil};
pub use error::ChatError;
pub use events::{ChatEvent, ChatEventKind};
pub use moderation::{
    ChatFilter, DropReason, FilterConfig, FilterConfigError, ModerationEngine, ModerationState,
    RejectReason, Verdict,
};
pub use value_objects::{ParticipantId, ParticipantIdParseError};
