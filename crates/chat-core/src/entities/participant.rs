//! Participant entity - an authenticated user able to send and receive chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::value_objects::ParticipantId;

/// Visual marker shown next to a participant's nickname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sigil {
    /// Participant is an administrator
    #[serde(rename = "@")]
    Admin,
    /// Participant has a verified id code
    #[serde(rename = "+")]
    IdCode,
    /// Everyone else
    #[serde(rename = "")]
    NormalUser,
}

impl Sigil {
    /// Get the rendered form of the sigil
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "@",
            Self::IdCode => "+",
            Self::NormalUser => "",
        }
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connected chat participant
///
/// Identity fields are immutable once created. The admin flag is owned by an
/// external permission layer and may flip at any time, so it is stored
/// atomically and read fresh on every call. Share as `Arc<Participant>`.
#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    nickname: String,
    id_code: String,
    admin: AtomicBool,
    connected_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new non-admin participant with a fresh ID
    pub fn new(nickname: impl Into<String>) -> Self {
        Self::with_id(ParticipantId::generate(), nickname)
    }

    /// Create a participant with a known ID
    pub fn with_id(id: ParticipantId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            id_code: String::new(),
            admin: AtomicBool::new(false),
            connected_at: Utc::now(),
        }
    }

    /// Attach an id code (tripcode) to the participant
    #[must_use]
    pub fn id_code(mut self, id_code: impl Into<String>) -> Self {
        self.id_code = id_code.into();
        self
    }

    /// Set the initial admin flag
    #[must_use]
    pub fn admin(self, admin: bool) -> Self {
        self.admin.store(admin, Ordering::Relaxed);
        self
    }

    #[inline]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[inline]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The id code shown to other participants; empty when none was given
    #[inline]
    pub fn code(&self) -> &str {
        &self.id_code
    }

    /// Check the current admin flag
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.admin.load(Ordering::Acquire)
    }

    /// Update the admin flag (called by the permission layer)
    pub fn set_admin(&self, admin: bool) {
        self.admin.store(admin, Ordering::Release);
    }

    /// Sigil derived from the current admin flag and id code
    pub fn sigil(&self) -> Sigil {
        if self.is_admin() {
            Sigil::Admin
        } else if !self.id_code.is_empty() {
            Sigil::IdCode
        } else {
            Sigil::NormalUser
        }
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sigil(), self.nickname)
    }
}
