//! Data transfer objects for transport requests and responses

pub mod requests;
pub mod responses;

pub use requests::ChatSubmission;
pub use responses::SubmitOutcome;
