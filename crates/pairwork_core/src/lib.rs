//! Core domain logic for pairwork session tracking.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use identity::{resolve, slugify};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::meeting::{Meeting, MeetingId, MeetingValidationError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::profile::{UserId, UserProfile};
pub use repo::meeting_repo::{MeetingRepository, SqliteMeetingRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::{RepoError, RepoResult};
pub use service::meeting_service::{MeetingService, MeetingServiceError};
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::relationship_service::{PeerSummary, RelationshipOverview, RelationshipService};
pub use stats::{relationship_stats, PairStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
