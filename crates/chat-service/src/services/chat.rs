//! Chat service
//!
//! Turns a participant's submission into either a sender-facing error or a
//! broadcast. Permission checks run before moderation so that refused
//! requests never touch a participant's moderation history.

use chat_common::ChatConfig;
use chat_core::{ChatError, ChatEvent, ModerationEngine, Participant, ParticipantId, Verdict};
use chat_gateway::{BroadcastTarget, Delivery, Mailbox, PresenceRegistry, RegistryError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::dto::{ChatSubmission, SubmitOutcome};

use super::error::ServiceResult;

/// Chat service
pub struct ChatService {
    registry: Arc<PresenceRegistry>,
    moderation: ModerationEngine,
    global_chat_enabled: AtomicBool,
    poll_timeout: Duration,
}

impl ChatService {
    /// Create a new ChatService with its own registry
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_registry(PresenceRegistry::new_shared(&config.mailbox), config)
    }

    /// Create a new ChatService over an existing registry
    pub fn with_registry(registry: Arc<PresenceRegistry>, config: &ChatConfig) -> Self {
        Self {
            registry,
            moderation: ModerationEngine::new(config.filter.clone()),
            global_chat_enabled: AtomicBool::new(config.chat.global_chat_enabled),
            poll_timeout: config.chat.poll_timeout(),
        }
    }

    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    pub fn moderation(&self) -> &ModerationEngine {
        &self.moderation
    }

    pub fn is_global_chat_enabled(&self) -> bool {
        self.global_chat_enabled.load(Ordering::Acquire)
    }

    /// Open or close global chat to non-admins
    pub fn set_global_chat_enabled(&self, enabled: bool) {
        let was = self.global_chat_enabled.swap(enabled, Ordering::AcqRel);
        if was != enabled {
            info!(enabled = enabled, "Global chat toggled");
        }
    }

    /// Register a participant and hand back their mailbox
    #[instrument(skip(self, participant), fields(participant_id = %participant.id()))]
    pub fn connect(&self, participant: Arc<Participant>) -> ServiceResult<Arc<Mailbox>> {
        let mailbox = self.registry.register(participant)?;
        Ok(mailbox)
    }

    /// Remove a participant and discard their moderation history
    ///
    /// Returns false if they were not connected.
    #[instrument(skip(self))]
    pub fn disconnect(&self, participant_id: ParticipantId) -> bool {
        // Unregister first: a submit that slips in after this point sees the
        // participant gone and cleans up after itself.
        let removed = self.registry.unregister(participant_id);
        self.moderation.forget(participant_id);
        removed
    }

    /// Handle a chat submission
    ///
    /// A dropped message returns the same `Ok` shape as an accepted one;
    /// only admins ever see that it was filtered. Participants that are not
    /// connected get `Disconnected` and leave no moderation state behind.
    #[instrument(
        skip(self, participant, submission, now),
        fields(participant_id = %participant.id())
    )]
    pub fn submit(
        &self,
        participant: &Participant,
        submission: ChatSubmission,
        now: Instant,
    ) -> ServiceResult<SubmitOutcome> {
        let Some(message) = submission.message else {
            return Err(ChatError::NoMessage.into());
        };

        let is_admin = participant.is_admin();
        if submission.wall && !is_admin {
            debug!("Wall refused for non-admin");
            return Err(ChatError::NotAdmin.into());
        }
        if !is_admin && !self.is_global_chat_enabled() {
            debug!("Global chat disabled");
            return Err(ChatError::NotAdmin.into());
        }

        let id = participant.id();
        if !self.registry.is_connected(id) {
            return Err(RegistryError::Disconnected.into());
        }

        let text = message.trim();
        let verdict = self.moderation.check(participant, text, now);
        if !self.registry.is_connected(id) {
            // Disconnected while being checked; the entry may have been
            // recreated after `disconnect` forgot it.
            self.moderation.forget(id);
            return Err(RegistryError::Disconnected.into());
        }

        match verdict {
            Verdict::Rejected(reason) => {
                debug!(reason = reason.code(), "Message rejected");
                Err(ChatError::Rejected(reason).into())
            }
            Verdict::Dropped(reason) => {
                let event =
                    ChatEvent::filtered(participant, text, submission.wall, submission.emote);
                let recipients = self
                    .registry
                    .broadcast_to_subset(&BroadcastTarget::Admins, event);
                warn!(
                    reason = reason.as_str(),
                    recipients = recipients,
                    "Message filtered"
                );
                Ok(SubmitOutcome::new(recipients))
            }
            Verdict::Accepted => {
                let event = ChatEvent::chat(participant, text, submission.wall, submission.emote);
                let recipients = self.registry.broadcast_to_all(event);
                info!(
                    wall = submission.wall,
                    recipients = recipients,
                    "Chat delivered"
                );
                Ok(SubmitOutcome::new(recipients))
            }
        }
    }

    /// Long-poll with the configured timeout
    pub async fn poll(&self, participant_id: ParticipantId) -> ServiceResult<Vec<Delivery>> {
        self.poll_for(participant_id, self.poll_timeout).await
    }

    /// Long-poll with an explicit timeout
    pub async fn poll_for(
        &self,
        participant_id: ParticipantId,
        timeout: Duration,
    ) -> ServiceResult<Vec<Delivery>> {
        let batch = self.registry.poll(participant_id, timeout).await?;
        Ok(batch)
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("registry", &self.registry)
            .field("moderation", &self.moderation)
            .field("global_chat_enabled", &self.is_global_chat_enabled())
            .finish_non_exhaustive()
    }
}
