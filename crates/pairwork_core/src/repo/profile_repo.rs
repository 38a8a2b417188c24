//! Profile repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read profiles and persist profile edits (display name, avatar,
//!   scheduling link).
//! - Own the slug projection: recomputed from `full_name` on every write
//!   and checked against collisions before persisting.
//!
//! # Invariants
//! - `slug` is unique across profiles; a write that would reuse another
//!   profile's slug fails with `RepoError::SlugCollision`.
//! - Profiles are never deleted by this core.

use crate::identity::slugify;
use crate::model::profile::{UserId, UserProfile};
use crate::repo::{
    ensure_schema_version, ensure_table_shape, parse_row_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    avatar_url,
    meeting_link,
    slug
FROM user_profiles";

const PROFILE_COLUMNS: &[&str] = &["id", "full_name", "avatar_url", "meeting_link", "slug"];

/// Repository interface for profile reads and edits.
pub trait ProfileRepository {
    /// Inserts or fully replaces one profile, reassigning its slug.
    fn upsert_profile(&self, profile: &UserProfile) -> RepoResult<UserProfile>;
    /// Gets one profile by identity-provider id.
    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    /// Gets one profile by its persisted unique slug.
    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<UserProfile>>;
    /// Lists every profile except `exclude`, ordered by display name.
    fn list_peers(&self, exclude: UserId) -> RepoResult<Vec<UserProfile>>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_shape(conn, "user_profiles", PROFILE_COLUMNS)?;
        Ok(Self { conn })
    }

    fn slug_holder(&self, slug: &str) -> RepoResult<Option<UserId>> {
        let holder: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM user_profiles WHERE slug = ?1;",
                [slug],
                |row| row.get(0),
            )
            .optional()?;

        match holder {
            Some(value) => Ok(Some(parse_row_uuid(&value, "user_profiles.id")?)),
            None => Ok(None),
        }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn upsert_profile(&self, profile: &UserProfile) -> RepoResult<UserProfile> {
        // Slug is a projection of full_name; derive it fresh on every
        // write so renames keep the lookup path current.
        let derived = slugify(&profile.full_name);
        let slug = if derived.is_empty() {
            None
        } else {
            Some(derived)
        };

        if let Some(candidate) = slug.as_deref() {
            if let Some(holder) = self.slug_holder(candidate)? {
                if holder != profile.id {
                    return Err(RepoError::SlugCollision {
                        slug: candidate.to_string(),
                        holder,
                    });
                }
            }
        }

        self.conn.execute(
            "INSERT INTO user_profiles (id, full_name, avatar_url, meeting_link, slug)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                full_name = excluded.full_name,
                avatar_url = excluded.avatar_url,
                meeting_link = excluded.meeting_link,
                slug = excluded.slug;",
            params![
                profile.id.to_string(),
                profile.full_name.as_str(),
                profile.avatar_url.as_deref(),
                profile.meeting_link.as_deref(),
                slug.as_deref(),
            ],
        )?;

        let mut stored = profile.clone();
        stored.slug = slug;
        Ok(stored)
    }

    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<UserProfile>> {
        if slug.is_empty() {
            return Ok(None);
        }

        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE slug = ?1;"))?;

        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn list_peers(&self, exclude: UserId) -> RepoResult<Vec<UserProfile>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROFILE_SELECT_SQL}
             WHERE id <> ?1
             ORDER BY full_name COLLATE NOCASE ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([exclude.to_string()])?;
        let mut profiles = Vec::new();
        while let Some(row) = rows.next()? {
            profiles.push(parse_profile_row(row)?);
        }

        Ok(profiles)
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let id_text: String = row.get("id")?;

    Ok(UserProfile {
        id: parse_row_uuid(&id_text, "user_profiles.id")?,
        full_name: row.get("full_name")?,
        avatar_url: row.get("avatar_url")?,
        meeting_link: row.get("meeting_link")?,
        slug: row.get("slug")?,
    })
}
