//! Meeting use-case service.
//!
//! # Responsibility
//! - Parse instant text at the input boundary.
//! - Enforce organizer-only rescheduling and deletion.
//! - Delegate persistence to the meeting repository.
//!
//! # Invariants
//! - Either party may schedule a session; only the organizer mutates it.
//! - Writes are never retried: a create is not idempotent and a retry
//!   could duplicate a session.

use crate::model::meeting::{Meeting, MeetingId};
use crate::model::profile::UserId;
use crate::repo::meeting_repo::MeetingRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for meeting use-cases.
#[derive(Debug)]
pub enum MeetingServiceError {
    /// Scheduled-at input is not a parseable absolute instant.
    InvalidInstant(String),
    /// Actor is not the organizer of the targeted meeting.
    NotOrganizer { meeting: MeetingId, actor: UserId },
    /// Target meeting does not exist.
    MeetingNotFound(MeetingId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for MeetingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstant(value) => {
                write!(f, "`{value}` is not a parseable absolute instant")
            }
            Self::NotOrganizer { meeting, actor } => {
                write!(f, "user {actor} is not the organizer of meeting {meeting}")
            }
            Self::MeetingNotFound(id) => write!(f, "meeting not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent meeting state: {details}"),
        }
    }
}

impl Error for MeetingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MeetingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "meeting",
                id,
            } => Self::MeetingNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Meeting service facade over repository implementations.
pub struct MeetingService<R: MeetingRepository> {
    repo: R,
}

impl<R: MeetingRepository> MeetingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Schedules a session between the acting user and a counterpart.
    ///
    /// `scheduled_at` is RFC 3339 instant text as received from the
    /// caller; anything unparseable fails before touching storage.
    pub fn schedule(
        &self,
        organizer: UserId,
        participant: UserId,
        scheduled_at: &str,
    ) -> Result<Meeting, MeetingServiceError> {
        let instant = parse_instant(scheduled_at)?;
        let meeting = Meeting::new(organizer, participant, instant);
        let id = self.repo.create_meeting(&meeting)?;
        self.repo
            .get_meeting(id)?
            .ok_or(MeetingServiceError::InconsistentState(
                "created meeting not found in read-back",
            ))
    }

    /// Moves an existing session to a new instant. Organizer-only.
    pub fn reschedule(
        &self,
        actor: UserId,
        id: MeetingId,
        scheduled_at: &str,
    ) -> Result<Meeting, MeetingServiceError> {
        let instant = parse_instant(scheduled_at)?;
        self.authorize_organizer(actor, id)?;
        self.repo.reschedule_meeting(id, instant)?;
        self.repo
            .get_meeting(id)?
            .ok_or(MeetingServiceError::InconsistentState(
                "rescheduled meeting not found in read-back",
            ))
    }

    /// Permanently deletes a session. Organizer-only, irrecoverable.
    pub fn cancel(&self, actor: UserId, id: MeetingId) -> Result<(), MeetingServiceError> {
        self.authorize_organizer(actor, id)?;
        self.repo.delete_meeting(id)?;
        Ok(())
    }

    /// Gets one meeting by id.
    pub fn get(&self, id: MeetingId) -> RepoResult<Option<Meeting>> {
        self.repo.get_meeting(id)
    }

    /// Lists the full session history between two users, descending.
    pub fn sessions_with(&self, current: UserId, other: UserId) -> RepoResult<Vec<Meeting>> {
        self.repo.list_for_pair(current, other)
    }

    /// Lists a subject's sessions with third parties, hiding the ones the
    /// viewer is part of.
    pub fn other_sessions(&self, subject: UserId, viewer: UserId) -> RepoResult<Vec<Meeting>> {
        self.repo.list_involving_but_excluding_pair(subject, viewer)
    }

    fn authorize_organizer(
        &self,
        actor: UserId,
        id: MeetingId,
    ) -> Result<Meeting, MeetingServiceError> {
        let meeting = self
            .repo
            .get_meeting(id)?
            .ok_or(MeetingServiceError::MeetingNotFound(id))?;
        if meeting.organizer_id != actor {
            return Err(MeetingServiceError::NotOrganizer { meeting: id, actor });
        }
        Ok(meeting)
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, MeetingServiceError> {
    value
        .parse::<DateTime<Utc>>()
        .map_err(|_| MeetingServiceError::InvalidInstant(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_instant;

    #[test]
    fn parse_instant_accepts_rfc3339_and_rejects_dates_without_time() {
        assert!(parse_instant("2024-03-01T12:00:00.000Z").is_ok());
        assert!(parse_instant("2024-03-01T12:00:00+02:00").is_ok());
        assert!(parse_instant("2024-03-01").is_err());
        assert!(parse_instant("next tuesday").is_err());
    }
}
