//! Relationship page queries: profile resolution, meeting history,
//! derived stats and the private note thread in one call.
//!
//! # Responsibility
//! - Compose profile, meeting and note repositories into the read models
//!   the relationship and dashboard views need.
//!
//! # Invariants
//! - Slug resolution prefers the persisted unique slug column and falls
//!   back to derived-slug scanning only for rows that predate it.
//! - A failing peer-profile lookup degrades the dashboard to an empty
//!   list instead of a hard error; every other failure propagates.

use crate::identity;
use crate::model::meeting::Meeting;
use crate::model::note::Note;
use crate::model::profile::{UserId, UserProfile};
use crate::repo::meeting_repo::MeetingRepository;
use crate::repo::note_repo::NoteRepository;
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::RepoResult;
use crate::stats::{relationship_stats, PairStats};
use chrono::{DateTime, Utc};
use log::warn;

/// Everything the relationship page shows for one (viewer, target) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipOverview {
    /// The resolved target profile.
    pub profile: UserProfile,
    /// Full session history between viewer and target, descending.
    pub meetings: Vec<Meeting>,
    /// Derived summary of `meetings`.
    pub stats: PairStats,
    /// The viewer's private note thread about the target, newest first.
    pub notes: Vec<Note>,
}

/// One dashboard row: a peer and the viewer's pair stats with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub profile: UserProfile,
    pub stats: PairStats,
}

/// Composed query service over the three repositories.
pub struct RelationshipService<P, M, N>
where
    P: ProfileRepository,
    M: MeetingRepository,
    N: NoteRepository,
{
    profiles: P,
    meetings: M,
    notes: N,
}

impl<P, M, N> RelationshipService<P, M, N>
where
    P: ProfileRepository,
    M: MeetingRepository,
    N: NoteRepository,
{
    /// Creates a service over the provided repository implementations.
    pub fn new(profiles: P, meetings: M, notes: N) -> Self {
        Self {
            profiles,
            meetings,
            notes,
        }
    }

    /// Resolves a slug to a profile visible to `viewer`.
    ///
    /// Tries the persisted unique slug first. Rows without a persisted
    /// slug are matched by deriving the slug from their display name; on
    /// a derived-slug collision the first peer in listing order wins.
    pub fn resolve_target(&self, viewer: UserId, slug: &str) -> RepoResult<Option<UserProfile>> {
        if let Some(profile) = self.profiles.find_by_slug(slug)? {
            return Ok(Some(profile));
        }

        let peers = self.profiles.list_peers(viewer)?;
        Ok(identity::resolve(slug, &peers).cloned())
    }

    /// Builds the relationship page read model for `viewer` and the user
    /// behind `slug`. Returns `Ok(None)` when the slug resolves to no one.
    pub fn overview(
        &self,
        viewer: UserId,
        slug: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<RelationshipOverview>> {
        let Some(profile) = self.resolve_target(viewer, slug)? else {
            return Ok(None);
        };

        let meetings = self.meetings.list_for_pair(viewer, profile.id)?;
        let stats = relationship_stats(&meetings, now);
        let notes = self.notes.list_for_relationship(viewer, profile.id)?;

        Ok(Some(RelationshipOverview {
            profile,
            meetings,
            stats,
            notes,
        }))
    }

    /// Builds the dashboard rows: every peer with the viewer's pair stats.
    ///
    /// A failing profile listing yields an empty dashboard so the page
    /// stays usable with zero peers; per-peer meeting queries propagate
    /// their errors unmodified.
    pub fn dashboard(&self, viewer: UserId, now: DateTime<Utc>) -> RepoResult<Vec<PeerSummary>> {
        let peers = match self.profiles.list_peers(viewer) {
            Ok(peers) => peers,
            Err(err) => {
                warn!("event=dashboard_peers module=service status=degraded error={err}");
                return Ok(Vec::new());
            }
        };

        let mut rows = Vec::with_capacity(peers.len());
        for peer in peers {
            let meetings = self.meetings.list_for_pair(viewer, peer.id)?;
            let stats = relationship_stats(&meetings, now);
            rows.push(PeerSummary {
                profile: peer,
                stats,
            });
        }

        Ok(rows)
    }

    /// Lists a subject's sessions with third parties, excluding the ones
    /// the viewer is part of. Party identities stay disclosed.
    pub fn other_sessions_view(&self, viewer: UserId, subject: UserId) -> RepoResult<Vec<Meeting>> {
        self.meetings.list_involving_but_excluding_pair(subject, viewer)
    }
}
