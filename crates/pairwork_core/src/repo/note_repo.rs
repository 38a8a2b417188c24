//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own create/update/delete/query of per-relationship note rows.
//!
//! # Invariants
//! - Write paths call `Note::validate()` before SQL mutations.
//! - Thread queries are scoped to one (owner, contact) direction; the
//!   reverse direction is a different thread.
//! - `image_url` is stored and returned verbatim, never validated for
//!   reachability.
//! - Deletion is permanent; there is no tombstone state.

use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::model::profile::UserId;
use crate::repo::meeting_repo::instant_to_db;
use crate::repo::{
    ensure_schema_version, ensure_table_shape, parse_row_instant, parse_row_uuid, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    contact_id,
    content,
    image_url,
    meeting_id,
    created_at
FROM notes";

const NOTE_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "contact_id",
    "content",
    "image_url",
    "meeting_id",
    "created_at",
];

/// Repository interface for note-thread operations.
pub trait NoteRepository {
    /// Persists one note and returns its stable id.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces content and image reference of an existing note.
    fn update_note(
        &self,
        id: NoteId,
        content: &str,
        image_url: Option<&str>,
    ) -> RepoResult<()>;
    /// Permanently deletes one note. Irrecoverable; callers confirm intent
    /// before invoking.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists the notes `owner` keeps about `contact`, newest first.
    fn list_for_relationship(&self, owner: UserId, contact: UserId) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_shape(conn, "notes", NOTE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (
                id,
                user_id,
                contact_id,
                content,
                image_url,
                meeting_id,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                note.id.to_string(),
                note.user_id.to_string(),
                note.contact_id.to_string(),
                note.content.as_str(),
                note.image_url.as_deref(),
                note.meeting_id.map(|id| id.to_string()),
                instant_to_db(note.created_at),
            ],
        )?;

        Ok(note.id)
    }

    fn update_note(
        &self,
        id: NoteId,
        content: &str,
        image_url: Option<&str>,
    ) -> RepoResult<()> {
        if content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent.into());
        }

        let changed = self.conn.execute(
            "UPDATE notes SET content = ?2, image_url = ?3 WHERE id = ?1;",
            params![id.to_string(), content, image_url],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }

        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }

        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_for_relationship(&self, owner: UserId, contact: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE user_id = ?1
               AND contact_id = ?2
             ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![owner.to_string(), contact.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;
    let contact_text: String = row.get("contact_id")?;
    let created_text: String = row.get("created_at")?;

    let meeting_id = match row.get::<_, Option<String>>("meeting_id")? {
        Some(value) => Some(parse_row_uuid(&value, "notes.meeting_id")?),
        None => None,
    };

    Ok(Note {
        id: parse_row_uuid(&id_text, "notes.id")?,
        user_id: parse_row_uuid(&user_text, "notes.user_id")?,
        contact_id: parse_row_uuid(&contact_text, "notes.contact_id")?,
        content: row.get("content")?,
        image_url: row.get("image_url")?,
        meeting_id,
        created_at: parse_row_instant(&created_text, "notes.created_at")?,
    })
}
