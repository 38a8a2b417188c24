//! User profile record.
//!
//! Profiles are created by the external identity provider on registration;
//! this core only reads them and updates the editable fields
//! (`meeting_link`, `avatar_url`, `slug`). It never deletes a profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user, issued by the external identity provider.
pub type UserId = Uuid;

/// A cohort member as seen by the pairwork core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider UUID. Never reused.
    pub id: UserId,
    /// Display name, source of the URL slug.
    pub full_name: String,
    /// Opaque public URI served by the external object store.
    pub avatar_url: Option<String>,
    /// External scheduling link (e.g. a calendar booking page).
    pub meeting_link: Option<String>,
    /// Persisted, uniqueness-enforced slug projection of `full_name`.
    ///
    /// `None` only for rows written before the slug column existed; such
    /// rows are resolved by deriving the slug from `full_name` on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl UserProfile {
    /// Creates a profile with a caller-provided identity-provider id.
    pub fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            avatar_url: None,
            meeting_link: None,
            slug: None,
        }
    }
}
