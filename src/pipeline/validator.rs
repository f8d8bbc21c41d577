//! Goal validator: keeps goals that fall inside their match's window
//!
//! Resolution is a typed three-way outcome so "no such match" and "found
//! but outside the window" stay distinguishable; both exclude the goal
//! (fail-open to exclusion, never to inclusion), but they are counted
//! separately.

use std::collections::HashMap;

use crate::models::{EventId, GoalEvent, MatchRecord, ValidatedGoalEvent};

/// How a goal resolved against the joined matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalResolution<'a> {
    /// The goal's match exists and the timestamp is inside its window
    InWindow(&'a MatchRecord),
    /// No match record carries the goal's match identifier
    UnknownMatch,
    /// The match exists but the goal's timestamp is outside [start, end]
    OutsideWindow,
}

/// Counters and surviving goals from validation
#[derive(Debug, Default, Clone)]
pub struct ValidationOutcome {
    /// Goals inside their match's window, in input order
    pub goals: Vec<ValidatedGoalEvent>,
    /// Goals whose match identifier resolved to no match record
    pub unknown_match: usize,
    /// Goals outside their match's [start, end] window
    pub outside_window: usize,
}

/// Resolve a single goal against an index of matches by identifier.
pub fn resolve<'a>(
    goal: &GoalEvent,
    matches: &HashMap<&EventId, &'a MatchRecord>,
) -> GoalResolution<'a> {
    match matches.get(&goal.match_id) {
        None => GoalResolution::UnknownMatch,
        Some(record) if record.window_contains(goal.timestamp) => GoalResolution::InWindow(record),
        Some(_) => GoalResolution::OutsideWindow,
    }
}

/// Filter goals down to those that resolve to a known match and fall
/// within its window, inclusive at both ends.
pub fn validate(goals: Vec<GoalEvent>, matches: &[MatchRecord]) -> ValidationOutcome {
    let index: HashMap<&EventId, &MatchRecord> =
        matches.iter().map(|m| (&m.match_id, m)).collect();

    let mut outcome = ValidationOutcome::default();

    for goal in goals {
        match resolve(&goal, &index) {
            GoalResolution::InWindow(_) => outcome.goals.push(ValidatedGoalEvent {
                match_id: goal.match_id,
                scoring_club: goal.scoring_club,
                timestamp: goal.timestamp,
            }),
            GoalResolution::UnknownMatch => {
                outcome.unknown_match += 1;
                tracing::debug!(match_id = %goal.match_id, "Goal references unknown match");
            }
            GoalResolution::OutsideWindow => {
                outcome.outside_window += 1;
                tracing::debug!(
                    match_id = %goal.match_id,
                    timestamp = goal.timestamp,
                    "Goal outside match window"
                );
            }
        }
    }

    outcome
}
