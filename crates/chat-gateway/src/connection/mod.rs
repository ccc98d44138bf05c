//! Connection management
//!
//! Tracks connected participants and owns their mailboxes.

mod error;
mod mailbox;
mod registry;

pub use error::RegistryError;
pub use mailbox::Mailbox;
pub use registry::PresenceRegistry;
