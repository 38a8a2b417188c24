//! Meeting repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own create/update/delete/query of session rows between two users.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Meeting::validate()` before SQL mutations.
//! - Deletion is permanent; there is no tombstone state.
//! - Pair listings are sorted `scheduled_at DESC, id ASC` so equal
//!   instants still page deterministically.

use crate::model::meeting::{Meeting, MeetingId};
use crate::model::profile::UserId;
use crate::repo::{
    ensure_schema_version, ensure_table_shape, parse_row_instant, parse_row_uuid, RepoError,
    RepoResult,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};

const MEETING_SELECT_SQL: &str = "SELECT
    id,
    organizer_id,
    participant_id,
    scheduled_at,
    status,
    summary
FROM meetings";

const MEETING_COLUMNS: &[&str] = &[
    "id",
    "organizer_id",
    "participant_id",
    "scheduled_at",
    "status",
    "summary",
];

/// Repository interface for meeting CRUD and pair queries.
pub trait MeetingRepository {
    /// Persists one meeting and returns its stable id.
    fn create_meeting(&self, meeting: &Meeting) -> RepoResult<MeetingId>;
    /// Moves an existing meeting to a new instant.
    ///
    /// Authorization (organizer-only) is the caller's responsibility.
    fn reschedule_meeting(&self, id: MeetingId, scheduled_at: DateTime<Utc>) -> RepoResult<()>;
    /// Permanently deletes one meeting. Never cascades to notes.
    fn delete_meeting(&self, id: MeetingId) -> RepoResult<()>;
    /// Gets one meeting by id.
    fn get_meeting(&self, id: MeetingId) -> RepoResult<Option<Meeting>>;
    /// Lists meetings whose two parties are exactly {a, b}, most recent
    /// or furthest-future first.
    fn list_for_pair(&self, a: UserId, b: UserId) -> RepoResult<Vec<Meeting>>;
    /// Lists meetings where `subject` is a party and the counterpart is
    /// not `excluded`, sorted descending by instant.
    fn list_involving_but_excluding_pair(
        &self,
        subject: UserId,
        excluded: UserId,
    ) -> RepoResult<Vec<Meeting>>;
}

/// SQLite-backed meeting repository.
pub struct SqliteMeetingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMeetingRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_shape(conn, "meetings", MEETING_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl MeetingRepository for SqliteMeetingRepository<'_> {
    fn create_meeting(&self, meeting: &Meeting) -> RepoResult<MeetingId> {
        meeting.validate()?;

        self.conn.execute(
            "INSERT INTO meetings (
                id,
                organizer_id,
                participant_id,
                scheduled_at,
                status,
                summary
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                meeting.id.to_string(),
                meeting.organizer_id.to_string(),
                meeting.participant_id.to_string(),
                instant_to_db(meeting.scheduled_at),
                meeting.status.as_deref(),
                meeting.summary.as_deref(),
            ],
        )?;

        Ok(meeting.id)
    }

    fn reschedule_meeting(&self, id: MeetingId, scheduled_at: DateTime<Utc>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE meetings SET scheduled_at = ?2 WHERE id = ?1;",
            params![id.to_string(), instant_to_db(scheduled_at)],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "meeting",
                id,
            });
        }

        Ok(())
    }

    fn delete_meeting(&self, id: MeetingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM meetings WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "meeting",
                id,
            });
        }

        Ok(())
    }

    fn get_meeting(&self, id: MeetingId) -> RepoResult<Option<Meeting>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEETING_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_meeting_row(row)?));
        }

        Ok(None)
    }

    fn list_for_pair(&self, a: UserId, b: UserId) -> RepoResult<Vec<Meeting>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEETING_SELECT_SQL}
             WHERE (organizer_id = ?1 AND participant_id = ?2)
                OR (organizer_id = ?2 AND participant_id = ?1)
             ORDER BY scheduled_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![a.to_string(), b.to_string()])?;
        let mut meetings = Vec::new();
        while let Some(row) = rows.next()? {
            meetings.push(parse_meeting_row(row)?);
        }

        Ok(meetings)
    }

    fn list_involving_but_excluding_pair(
        &self,
        subject: UserId,
        excluded: UserId,
    ) -> RepoResult<Vec<Meeting>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEETING_SELECT_SQL}
             WHERE (organizer_id = ?1 AND participant_id <> ?2)
                OR (participant_id = ?1 AND organizer_id <> ?2)
             ORDER BY scheduled_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![subject.to_string(), excluded.to_string()])?;
        let mut meetings = Vec::new();
        while let Some(row) = rows.next()? {
            meetings.push(parse_meeting_row(row)?);
        }

        Ok(meetings)
    }
}

/// Serializes an instant into the fixed-width RFC 3339 UTC form used by the
/// schema, so lexicographic ORDER BY matches chronological order.
pub(crate) fn instant_to_db(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_meeting_row(row: &Row<'_>) -> RepoResult<Meeting> {
    let id_text: String = row.get("id")?;
    let organizer_text: String = row.get("organizer_id")?;
    let participant_text: String = row.get("participant_id")?;
    let scheduled_text: String = row.get("scheduled_at")?;

    let meeting = Meeting {
        id: parse_row_uuid(&id_text, "meetings.id")?,
        organizer_id: parse_row_uuid(&organizer_text, "meetings.organizer_id")?,
        participant_id: parse_row_uuid(&participant_text, "meetings.participant_id")?,
        scheduled_at: parse_row_instant(&scheduled_text, "meetings.scheduled_at")?,
        status: row.get("status")?,
        summary: row.get("summary")?,
    };
    meeting.validate()?;
    Ok(meeting)
}
