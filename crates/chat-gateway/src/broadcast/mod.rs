//! Event broadcasting
//!
//! Fans chat events out to participant mailboxes.

mod delivery;
mod dispatcher;
mod target;

pub use delivery::Delivery;
pub use target::BroadcastTarget;
