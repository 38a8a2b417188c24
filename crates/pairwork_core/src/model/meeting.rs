//! Pairwork meeting record.
//!
//! # Responsibility
//! - Define the symmetric two-party session record.
//! - Enforce the organizer/participant distinctness invariant.
//!
//! # Invariants
//! - `organizer_id != participant_id`. Order encodes only who organized
//!   the session, not visibility.
//! - `scheduled_at` is an absolute UTC instant; the core never applies
//!   timezone rules, it only compares instants to "now".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::profile::UserId;

/// Stable identifier for a meeting row.
pub type MeetingId = Uuid;

/// Validation failures for meeting writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingValidationError {
    /// Organizer and participant are the same user.
    SelfPairing(UserId),
}

impl Display for MeetingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfPairing(user_id) => {
                write!(f, "meeting organizer and participant are both {user_id}")
            }
        }
    }
}

impl Error for MeetingValidationError {}

/// A scheduled pairwork session between exactly two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Stable row id.
    pub id: MeetingId,
    /// The party who scheduled the session. Only the organizer may
    /// reschedule or delete it.
    pub organizer_id: UserId,
    /// The other party.
    pub participant_id: UserId,
    /// Absolute instant of the session, persisted as RFC 3339 UTC text.
    pub scheduled_at: DateTime<Utc>,
    /// Optional free-form status tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Optional free-text summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Meeting {
    /// Creates a meeting with a generated stable id.
    pub fn new(organizer_id: UserId, participant_id: UserId, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organizer_id,
            participant_id,
            scheduled_at,
            status: None,
            summary: None,
        }
    }

    /// Checks business invariants before persistence.
    pub fn validate(&self) -> Result<(), MeetingValidationError> {
        if self.organizer_id == self.participant_id {
            return Err(MeetingValidationError::SelfPairing(self.organizer_id));
        }
        Ok(())
    }

    /// Returns whether the given user is one of the two parties.
    pub fn involves(&self, user_id: UserId) -> bool {
        self.organizer_id == user_id || self.participant_id == user_id
    }

    /// Returns the other party relative to `user_id`.
    ///
    /// Returns `None` when `user_id` is not a party of this meeting.
    pub fn counterpart_of(&self, user_id: UserId) -> Option<UserId> {
        if self.organizer_id == user_id {
            Some(self.participant_id)
        } else if self.participant_id == user_id {
            Some(self.organizer_id)
        } else {
            None
        }
    }
}
