//! Domain errors

mod chat_error;

pub use chat_error::ChatError;
