//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for profiles,
//!   meetings and notes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths enforce model validation before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository constructors refuse connections that have not been
//!   migrated to the latest schema version.

use crate::db::{migrations::latest_version, DbError, DbResult};
use crate::model::meeting::MeetingValidationError;
use crate::model::note::NoteValidationError;
use crate::model::profile::UserId;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod meeting_repo;
pub mod note_repo;
pub mod profile_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    MeetingValidation(MeetingValidationError),
    NoteValidation(NoteValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: Uuid,
    },
    /// A profile write would reuse a slug already held by another profile.
    SlugCollision {
        slug: String,
        holder: UserId,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeetingValidation(err) => write!(f, "{err}"),
            Self::NoteValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::SlugCollision { slug, holder } => {
                write!(f, "slug `{slug}` is already held by profile {holder}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MeetingValidation(err) => Some(err),
            Self::NoteValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MeetingValidationError> for RepoError {
    fn from(value: MeetingValidationError) -> Self {
        Self::MeetingValidation(value)
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::NoteValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not opened through `db::open_db`, which
/// guarantees migrations ran to completion.
pub(crate) fn ensure_schema_version(conn: &Connection) -> RepoResult<()> {
    let expected = latest_version();
    let actual = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::from)?;
    if actual != expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }
    Ok(())
}

pub(crate) fn ensure_table_shape(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}

pub(crate) fn parse_row_uuid(value: &str, location: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {location}")))
}

pub(crate) fn parse_row_instant(value: &str, location: &str) -> RepoResult<DateTime<Utc>> {
    value.parse::<DateTime<Utc>>().map_err(|_| {
        RepoError::InvalidData(format!("invalid instant value `{value}` in {location}"))
    })
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
