//! Presence registry
//!
//! Tracks every connected participant together with the mailbox they are
//! polled through. Membership changes take the write side of the member map;
//! broadcasts (see `broadcast::dispatcher`) take the read side under the
//! dispatch lock, so each one sees a single consistent snapshot.

use chat_common::MailboxConfig;
use chat_core::{Participant, ParticipantId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{Mailbox, RegistryError};
use crate::broadcast::Delivery;

/// A connected participant and their mailbox
pub(crate) struct Member {
    pub(crate) participant: Arc<Participant>,
    pub(crate) mailbox: Arc<Mailbox>,
}

/// Registry of connected participants
pub struct PresenceRegistry {
    /// Mailbox capacity for new registrations
    mailbox_capacity: usize,

    /// Connected participants by ID
    members: RwLock<HashMap<ParticipantId, Member>>,

    /// Last admitted broadcast sequence number; held for the whole fan-out
    dispatch: Mutex<u64>,
}

impl PresenceRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new(config: &MailboxConfig) -> Self {
        Self::with_mailbox_capacity(config.capacity)
    }

    #[must_use]
    pub fn with_mailbox_capacity(capacity: usize) -> Self {
        Self {
            mailbox_capacity: capacity,
            members: RwLock::new(HashMap::new()),
            dispatch: Mutex::new(0),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared(config: &MailboxConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Register a newly connected participant
    pub fn register(&self, participant: Arc<Participant>) -> Result<Arc<Mailbox>, RegistryError> {
        let id = participant.id();
        let mut members = self.members.write();

        if members.contains_key(&id) {
            return Err(RegistryError::AlreadyConnected(id));
        }

        let mailbox = Mailbox::new(id, self.mailbox_capacity);
        members.insert(
            id,
            Member {
                participant,
                mailbox: Arc::clone(&mailbox),
            },
        );
        drop(members);

        tracing::debug!(participant_id = %id, "Participant registered");

        Ok(mailbox)
    }

    /// Remove a participant and close their mailbox
    ///
    /// Returns false if the participant was not connected.
    pub fn unregister(&self, participant_id: ParticipantId) -> bool {
        let removed = self.members.write().remove(&participant_id);

        match removed {
            Some(member) => {
                member.mailbox.close();
                tracing::debug!(participant_id = %participant_id, "Participant unregistered");
                true
            }
            None => false,
        }
    }

    /// Wait for events addressed to a participant
    ///
    /// Unknown participants get `Disconnected` straight away.
    pub async fn poll(
        &self,
        participant_id: ParticipantId,
        timeout: Duration,
    ) -> Result<Vec<Delivery>, RegistryError> {
        let mailbox = self
            .mailbox(participant_id)
            .ok_or(RegistryError::Disconnected)?;
        mailbox.poll(timeout).await
    }

    /// Get a participant's mailbox
    pub fn mailbox(&self, participant_id: ParticipantId) -> Option<Arc<Mailbox>> {
        self.members
            .read()
            .get(&participant_id)
            .map(|m| Arc::clone(&m.mailbox))
    }

    /// Get a connected participant
    pub fn participant(&self, participant_id: ParticipantId) -> Option<Arc<Participant>> {
        self.members
            .read()
            .get(&participant_id)
            .map(|m| Arc::clone(&m.participant))
    }

    /// Snapshot of connected participants whose admin flag is set
    pub fn list_admins(&self) -> Vec<Arc<Participant>> {
        self.members
            .read()
            .values()
            .filter(|m| m.participant.is_admin())
            .map(|m| Arc::clone(&m.participant))
            .collect()
    }

    /// Snapshot of all connected participants
    pub fn participants(&self) -> Vec<Arc<Participant>> {
        self.members
            .read()
            .values()
            .map(|m| Arc::clone(&m.participant))
            .collect()
    }

    /// Admit one broadcast
    ///
    /// Takes the next sequence number and runs `fan_out` over the member map
    /// while both locks are held, dispatch first and then members. Nothing
    /// else takes them in the other order.
    pub(crate) fn admit<R>(
        &self,
        fan_out: impl FnOnce(u64, &HashMap<ParticipantId, Member>) -> R,
    ) -> R {
        let mut sequence = self.dispatch.lock();
        *sequence += 1;
        let members = self.members.read();
        fan_out(*sequence, &members)
    }

    /// Sequence number of the most recently admitted broadcast
    pub fn last_sequence(&self) -> u64 {
        *self.dispatch.lock()
    }

    /// Check if a participant is connected
    pub fn is_connected(&self, participant_id: ParticipantId) -> bool {
        self.members.read().contains_key(&participant_id)
    }

    /// Get the number of connected participants
    pub fn connected_count(&self) -> usize {
        self.members.read().len()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("connected", &self.connected_count())
            .field("mailbox_capacity", &self.mailbox_capacity)
            .finish()
    }
}
