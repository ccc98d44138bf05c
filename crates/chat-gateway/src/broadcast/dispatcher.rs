//! Event dispatcher
//!
//! Admits broadcasts one at a time into the registry and pushes them into
//! recipient mailboxes. Because admission holds the dispatch lock for the
//! whole fan-out, every mailbox receives broadcasts in admission order and
//! never sees half of one.

use chat_core::{ChatEvent, Participant};
use std::sync::Arc;

use super::{BroadcastTarget, Delivery};
use crate::connection::PresenceRegistry;

impl PresenceRegistry {
    /// Deliver an event to every connected participant
    ///
    /// Returns the number of mailboxes that received it.
    pub fn broadcast_to_all(&self, event: ChatEvent) -> usize {
        self.dispatch(event, |_| true)
    }

    /// Deliver an event to the participants selected by `target`
    pub fn broadcast_to_subset(&self, target: &BroadcastTarget, event: ChatEvent) -> usize {
        self.dispatch(event, |participant| target.includes(participant))
    }

    /// Deliver an event to participants matching an arbitrary predicate
    pub fn broadcast_where<F>(&self, predicate: F, event: ChatEvent) -> usize
    where
        F: Fn(&Participant) -> bool,
    {
        self.dispatch(event, predicate)
    }

    fn dispatch<F>(&self, event: ChatEvent, include: F) -> usize
    where
        F: Fn(&Participant) -> bool,
    {
        let event = Arc::new(event);

        let (seq, sent) = self.admit(|seq, members| {
            let sent = members
                .values()
                .filter(|member| include(&member.participant))
                .filter(|member| member.mailbox.push(Delivery::new(seq, Arc::clone(&event))))
                .count();
            (seq, sent)
        });

        tracing::trace!(
            seq = seq,
            kind = %event.kind(),
            sent = sent,
            "Event dispatched"
        );

        sent
    }
}
