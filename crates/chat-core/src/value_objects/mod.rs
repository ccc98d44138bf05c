//! Value objects - immutable types that represent domain concepts

mod participant_id;

pub use participant_id::{ParticipantId, ParticipantIdParseError};
