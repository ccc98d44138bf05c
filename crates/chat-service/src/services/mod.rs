//! Business logic services

pub mod chat;
pub mod error;

pub use chat::ChatService;
pub use error::{ServiceError, ServiceResult};
