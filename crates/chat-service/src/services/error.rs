//! Service layer error types

use chat_core::ChatError;
use chat_gateway::RegistryError;
use thiserror::Error;

/// Service layer error type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Submission refused; report to the sender only
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// Connection-level failure
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ServiceError {
    /// Get the error code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Chat(e) => e.code(),
            Self::Registry(e) => e.code(),
        }
    }

    /// Check if the participant's connection is gone
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::Disconnected))
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
