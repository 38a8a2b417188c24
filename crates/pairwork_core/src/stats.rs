//! Relationship statistics reduction.
//!
//! # Responsibility
//! - Reduce a pair's meeting history into summary fields: past-session
//!   count, most recent past session, soonest upcoming session.
//!
//! # Invariants
//! - Past/future partition on the reference instant is disjoint and
//!   exhaustive; a meeting at exactly `now` counts as past.
//! - Selection is an explicit min/max reduction over the input. It must
//!   not assume the caller sorted the meetings in any direction.
//! - Ties on the same instant resolve to the first element in input order.
//! - Empty input yields a zero count and absent sessions, never an error.

use chrono::{DateTime, Utc};

use crate::model::meeting::Meeting;

/// Summary of one pair's meeting history relative to a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairStats {
    /// Number of past sessions (scheduled at or before the reference).
    pub pairwork_count: usize,
    /// The past session with the latest scheduled instant.
    pub last_session: Option<Meeting>,
    /// The future session with the earliest scheduled instant.
    pub next_session: Option<Meeting>,
}

/// Reduces a meeting sequence into [`PairStats`] relative to `now`.
pub fn relationship_stats(meetings: &[Meeting], now: DateTime<Utc>) -> PairStats {
    let mut pairwork_count = 0;
    let mut last_session: Option<&Meeting> = None;
    let mut next_session: Option<&Meeting> = None;

    for meeting in meetings {
        if meeting.scheduled_at <= now {
            pairwork_count += 1;
            // Strict comparison keeps the first of equal instants.
            let is_later = last_session
                .map(|best| meeting.scheduled_at > best.scheduled_at)
                .unwrap_or(true);
            if is_later {
                last_session = Some(meeting);
            }
        } else {
            let is_sooner = next_session
                .map(|best| meeting.scheduled_at < best.scheduled_at)
                .unwrap_or(true);
            if is_sooner {
                next_session = Some(meeting);
            }
        }
    }

    PairStats {
        pairwork_count,
        last_session: last_session.cloned(),
        next_session: next_session.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{relationship_stats, PairStats};
    use crate::model::meeting::Meeting;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn instant(value: &str) -> DateTime<Utc> {
        value
            .parse::<DateTime<Utc>>()
            .expect("test instant should parse")
    }

    fn meeting_at(value: &str) -> Meeting {
        Meeting::new(Uuid::new_v4(), Uuid::new_v4(), instant(value))
    }

    #[test]
    fn empty_history_yields_default_stats() {
        let stats = relationship_stats(&[], Utc::now());
        assert_eq!(stats, PairStats::default());
    }

    #[test]
    fn partition_counts_past_and_picks_boundary_sessions() {
        let meetings = vec![
            meeting_at("2023-01-01T12:00:00Z"),
            meeting_at("2023-06-01T12:00:00Z"),
            meeting_at("2024-01-01T12:00:00Z"),
        ];
        let stats = relationship_stats(&meetings, instant("2023-07-01T00:00:00Z"));

        assert_eq!(stats.pairwork_count, 2);
        assert_eq!(
            stats.last_session.unwrap().scheduled_at,
            instant("2023-06-01T12:00:00Z")
        );
        assert_eq!(
            stats.next_session.unwrap().scheduled_at,
            instant("2024-01-01T12:00:00Z")
        );
    }

    #[test]
    fn meeting_at_exactly_now_counts_as_past() {
        let now = instant("2024-03-01T09:00:00Z");
        let meetings = vec![meeting_at("2024-03-01T09:00:00Z")];
        let stats = relationship_stats(&meetings, now);

        assert_eq!(stats.pairwork_count, 1);
        assert!(stats.last_session.is_some());
        assert!(stats.next_session.is_none());
    }

    #[test]
    fn selection_is_independent_of_input_ordering() {
        let now = instant("2024-01-01T00:00:00Z");
        let past_old = meeting_at("2023-01-01T12:00:00Z");
        let past_recent = meeting_at("2023-12-01T12:00:00Z");
        let future_soon = meeting_at("2024-02-01T12:00:00Z");
        let future_far = meeting_at("2024-06-01T12:00:00Z");

        // Ascending, descending and shuffled inputs must agree.
        for meetings in [
            vec![
                past_old.clone(),
                past_recent.clone(),
                future_soon.clone(),
                future_far.clone(),
            ],
            vec![
                future_far.clone(),
                future_soon.clone(),
                past_recent.clone(),
                past_old.clone(),
            ],
            vec![
                future_far.clone(),
                past_old.clone(),
                future_soon.clone(),
                past_recent.clone(),
            ],
        ] {
            let stats = relationship_stats(&meetings, now);
            assert_eq!(stats.pairwork_count, 2);
            assert_eq!(stats.last_session.as_ref().unwrap().id, past_recent.id);
            assert_eq!(stats.next_session.as_ref().unwrap().id, future_soon.id);
        }
    }

    #[test]
    fn ties_resolve_to_first_element_in_input_order() {
        let now = instant("2024-01-01T00:00:00Z");
        let first_past = meeting_at("2023-06-01T12:00:00Z");
        let second_past = meeting_at("2023-06-01T12:00:00Z");
        let first_future = meeting_at("2024-06-01T12:00:00Z");
        let second_future = meeting_at("2024-06-01T12:00:00Z");

        let meetings = vec![
            first_past.clone(),
            second_past,
            first_future.clone(),
            second_future,
        ];
        let stats = relationship_stats(&meetings, now);

        assert_eq!(stats.last_session.unwrap().id, first_past.id);
        assert_eq!(stats.next_session.unwrap().id, first_future.id);
    }

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let now = instant("2024-01-01T00:00:00Z");
        let meetings = vec![
            meeting_at("2023-01-01T00:00:00Z"),
            meeting_at("2024-01-01T00:00:00Z"),
            meeting_at("2024-01-01T00:00:01Z"),
            meeting_at("2025-01-01T00:00:00Z"),
        ];
        let stats = relationship_stats(&meetings, now);
        let future_count = meetings
            .iter()
            .filter(|m| m.scheduled_at > now)
            .count();

        assert_eq!(stats.pairwork_count + future_count, meetings.len());
    }
}
