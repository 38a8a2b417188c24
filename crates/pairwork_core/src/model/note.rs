//! Private relationship note record.
//!
//! # Invariants
//! - A note belongs to `user_id` and is about `contact_id`; it is never
//!   visible to the contact.
//! - `content` is non-empty after trimming. Enforced on create and update.
//! - `image_url` and `meeting_id` are optional cross-references; neither
//!   is validated for reachability or existence here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::meeting::MeetingId;
use crate::model::profile::UserId;

/// Stable identifier for a note row.
pub type NoteId = Uuid;

/// Validation failures for note writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Content is empty or whitespace-only.
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content is empty after trimming"),
        }
    }
}

impl Error for NoteValidationError {}

/// One entry in a user's private note thread about another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable row id.
    pub id: NoteId,
    /// Owning user. The only user allowed to read, edit or delete this note.
    pub user_id: UserId,
    /// The user this note is about.
    pub contact_id: UserId,
    /// Free-text body, already trimmed by the service layer.
    pub content: String,
    /// Opaque object-store URI, stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional reference to the meeting this note originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<MeetingId>,
    /// Creation instant, persisted as RFC 3339 UTC text.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a generated stable id and the current instant.
    pub fn new(user_id: UserId, contact_id: UserId, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            contact_id,
            content: content.into(),
            image_url: None,
            meeting_id: None,
            created_at: Utc::now(),
        }
    }

    /// Checks business invariants before persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}
