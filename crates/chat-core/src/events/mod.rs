//! Chat events - immutable records delivered to participant mailboxes

mod chat_event;

pub use chat_event::{ChatEvent, ChatEventKind};
