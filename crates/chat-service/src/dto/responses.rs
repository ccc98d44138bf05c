//! Response DTOs

/// Result of a successful submission
///
/// An accepted message and a silently dropped one both produce this.
/// `recipients` is for server-side logging; transports answer the sender
/// with a bare success so the two cases look the same from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Mailboxes the event was queued in
    pub recipients: usize,
}

impl SubmitOutcome {
    pub fn new(recipients: usize) -> Self {
        Self { recipients }
    }
}
