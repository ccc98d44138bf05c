//! Moderation engine
//!
//! Classifies every global chat message from the sender's rolling history.
//! [`ChatFilter`] is the pure classifier; [`ModerationEngine`] owns the
//! per-participant state table and applies updates under each participant's
//! own lock.

mod config;
mod engine;
mod filter;
mod state;
mod verdict;

pub use config::{FilterConfig, FilterConfigError};
pub use engine::ModerationEngine;
pub use filter::ChatFilter;
pub use state::ModerationState;
pub use verdict::{DropReason, RejectReason, Verdict};
