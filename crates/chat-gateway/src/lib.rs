//! # chat-gateway
//!
//! Delivery side of chat: the presence registry of connected participants,
//! their bounded mailboxes, and the broadcaster that fans events out to them.
//! A long-poll transport drains mailboxes through [`PresenceRegistry::poll`]
//! or the [`Mailbox`] handle returned at registration.

pub mod broadcast;
pub mod connection;

pub use broadcast::{BroadcastTarget, Delivery};
pub use connection::{Mailbox, PresenceRegistry, RegistryError};
