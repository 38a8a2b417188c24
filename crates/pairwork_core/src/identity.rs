//! Display-name slug derivation and candidate resolution.
//!
//! # Responsibility
//! - Normalize a display name into a URL-safe slug.
//! - Resolve a slug against a set of candidate profiles.
//!
//! # Invariants
//! - `slugify` is deterministic: lowercase, whitespace runs collapsed to
//!   one hyphen, everything outside `[a-z0-9-]` stripped.
//! - `resolve` picks the first matching candidate in input order. Two
//!   names that normalize to the same slug are indistinguishable here;
//!   the persisted unique slug column owned by the profile repository is
//!   the collision-free lookup path, this scan is the fallback for rows
//!   that predate it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::profile::UserProfile;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static NON_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("valid slug charset regex"));

/// Derives the URL slug for a display name.
///
/// Returns an empty string for names with no slug-safe characters; callers
/// treat an empty slug as unresolvable rather than an error.
pub fn slugify(full_name: &str) -> String {
    let lowered = full_name.trim().to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(&lowered, "-");
    NON_SLUG_RE.replace_all(&hyphenated, "").into_owned()
}

/// Finds the first candidate whose derived slug equals `slug`.
///
/// An empty `slug` never matches. When several candidates collide the
/// first one in `candidates` order wins; the caller decides whether that
/// ambiguity is acceptable.
pub fn resolve<'a>(slug: &str, candidates: &'a [UserProfile]) -> Option<&'a UserProfile> {
    if slug.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|profile| slugify(&profile.full_name) == slug)
}
