//! # chat-service
//!
//! Application layer: validates chat submissions, runs them through
//! moderation, and hands the resulting events to the presence registry.

pub mod dto;
pub mod services;

pub use dto::{ChatSubmission, SubmitOutcome};
pub use services::{ChatService, ServiceError, ServiceResult};
