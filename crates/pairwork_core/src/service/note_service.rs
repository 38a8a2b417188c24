//! Note-thread use-case service.
//!
//! # Responsibility
//! - Trim note content at the input boundary.
//! - Enforce owner-only editing and deletion.
//! - Delegate persistence to the note repository.
//!
//! # Invariants
//! - A foreign note behaves exactly like a missing note: ownership checks
//!   must not reveal whether someone else's note exists.
//! - An empty image reference is normalized to "no image".
//! - Failed writes leave no partial state for the caller to clean up.

use crate::model::meeting::MeetingId;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::model::profile::UserId;
use crate::repo::note_repo::NoteRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Content is empty after trimming.
    EmptyContent,
    /// Target note does not exist, or is not owned by the actor.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content is empty after trimming"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NoteValidation(NoteValidationError::EmptyContent) => Self::EmptyContent,
            RepoError::NotFound { entity: "note", id } => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a note to the owner's thread about a contact.
    pub fn add_note(
        &self,
        owner: UserId,
        contact: UserId,
        content: &str,
        image_url: Option<String>,
        meeting_id: Option<MeetingId>,
    ) -> Result<Note, NoteServiceError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(NoteServiceError::EmptyContent);
        }

        let mut note = Note::new(owner, contact, trimmed);
        note.image_url = normalize_image_url(image_url);
        note.meeting_id = meeting_id;

        let id = self.repo.create_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces content and image reference of an owned note.
    pub fn edit_note(
        &self,
        owner: UserId,
        id: NoteId,
        content: &str,
        image_url: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(NoteServiceError::EmptyContent);
        }

        self.authorize_owner(owner, id)?;
        self.repo
            .update_note(id, trimmed, normalize_image_url(image_url).as_deref())?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Permanently deletes an owned note. Callers confirm intent first.
    pub fn remove_note(&self, owner: UserId, id: NoteId) -> Result<(), NoteServiceError> {
        self.authorize_owner(owner, id)?;
        self.repo.delete_note(id)?;
        Ok(())
    }

    /// Lists the owner's thread about a contact, newest first.
    pub fn thread(&self, owner: UserId, contact: UserId) -> RepoResult<Vec<Note>> {
        self.repo.list_for_relationship(owner, contact)
    }

    fn authorize_owner(&self, owner: UserId, id: NoteId) -> Result<Note, NoteServiceError> {
        let note = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        if note.user_id != owner {
            // Same error as a missing note so existence is not disclosed.
            return Err(NoteServiceError::NoteNotFound(id));
        }
        Ok(note)
    }
}

fn normalize_image_url(image_url: Option<String>) -> Option<String> {
    image_url.filter(|value| !value.trim().is_empty())
}
