//! Match joiner: pairs start and end events into match records
//!
//! This is an inner join on the match identifier: a start with no matching
//! end produces nothing, and an end with no matching start produces
//! nothing. Joined records with non-positive duration are dropped. The
//! output is sorted ascending by match identifier so downstream iteration
//! order is deterministic.

use std::collections::{HashMap, HashSet};

use crate::models::{EventId, MatchEndEvent, MatchRecord, MatchStartEvent};

/// Counters and records produced by the join
#[derive(Debug, Default, Clone)]
pub struct JoinOutcome {
    /// Joined matches, sorted ascending by match identifier
    pub matches: Vec<MatchRecord>,
    /// Starts with no end event sharing their match identifier
    pub unmatched_starts: usize,
    /// Joined pairs dropped because `end_time <= start_time`
    pub non_positive_duration: usize,
    /// Starts or ends discarded because an earlier record already
    /// claimed their match identifier
    pub duplicate_keys: usize,
}

/// Join match-start and match-end events sharing a match identifier.
pub fn join(starts: Vec<MatchStartEvent>, ends: Vec<MatchEndEvent>) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();

    // Index ends by match id. Duplicate keys should not survive upstream
    // deduplication (that dedups by event id, not match id); if they do,
    // the first end indexed wins.
    let mut end_index: HashMap<EventId, MatchEndEvent> = HashMap::with_capacity(ends.len());
    for end in ends {
        if end_index.contains_key(&end.match_id) {
            outcome.duplicate_keys += 1;
            tracing::debug!(match_id = %end.match_id, "Discarding duplicate match-end");
            continue;
        }
        end_index.insert(end.match_id.clone(), end);
    }

    let mut seen_matches: HashSet<EventId> = HashSet::with_capacity(starts.len());

    for start in starts {
        if !seen_matches.insert(start.match_id.clone()) {
            outcome.duplicate_keys += 1;
            tracing::debug!(match_id = %start.match_id, "Discarding duplicate match-start");
            continue;
        }

        let Some(end) = end_index.get(&start.match_id) else {
            outcome.unmatched_starts += 1;
            tracing::debug!(match_id = %start.match_id, "No match-end for this start");
            continue;
        };

        // A match must have strictly positive duration, regardless of
        // which timestamp appeared first in the event stream.
        if end.timestamp <= start.timestamp {
            outcome.non_positive_duration += 1;
            tracing::debug!(
                match_id = %start.match_id,
                start_time = start.timestamp,
                end_time = end.timestamp,
                "Dropping match with non-positive duration"
            );
            continue;
        }

        outcome.matches.push(MatchRecord {
            match_id: start.match_id.clone(),
            league_id: start.league_id.clone(),
            home_club: start.home_club.clone(),
            away_club: start.away_club.clone(),
            start_time: start.timestamp,
            end_time: end.timestamp,
            start_event_id: start.event_id.clone(),
            end_event_id: end.event_id.clone(),
        });
    }

    outcome.matches.sort_by(|a, b| a.match_id.cmp(&b.match_id));
    outcome
}
