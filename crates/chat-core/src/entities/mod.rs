//! Domain entities - core business objects

mod participant;

pub use participant::{Participant, Sigil};
