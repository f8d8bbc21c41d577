//! Standings aggregator: turns matches and validated goals into per-club
//! statistics
//!
//! A single linear pass over the matches, which arrive sorted ascending by
//! match identifier, so league assignment and all updates are
//! deterministic. A match with no goal group is a 0-0 draw, not an error.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ClubStats, EventId, MatchRecord, ValidatedGoalEvent};

/// Points awarded for a win
const POINTS_WIN: u32 = 3;
/// Points awarded to each club for a draw
const POINTS_DRAW: u32 = 1;

/// Aggregate match results into one `ClubStats` entry per club.
///
/// Clubs are seeded from the home/away names of the given matches; a club
/// with no matches never appears. The map is keyed by club name.
pub fn aggregate(
    matches: &[MatchRecord],
    goals: &[ValidatedGoalEvent],
) -> BTreeMap<String, ClubStats> {
    let mut standings: BTreeMap<String, ClubStats> = BTreeMap::new();

    for record in matches {
        standings
            .entry(record.home_club.clone())
            .or_insert_with(|| ClubStats::new(&record.home_club));
        standings
            .entry(record.away_club.clone())
            .or_insert_with(|| ClubStats::new(&record.away_club));
    }

    let goal_groups = group_by_match(goals);

    for record in matches {
        // An absent group means a scoreless match: 0-0, a draw.
        let (home_goals, away_goals) = goal_groups
            .get(&record.match_id)
            .map(|group| count_goals(group, record))
            .unwrap_or((0, 0));

        apply_result(&mut standings, record, home_goals, away_goals);
    }

    standings
}

/// Group validated goals by their match identifier
fn group_by_match(
    goals: &[ValidatedGoalEvent],
) -> HashMap<&EventId, Vec<&ValidatedGoalEvent>> {
    let mut groups: HashMap<&EventId, Vec<&ValidatedGoalEvent>> = HashMap::new();
    for goal in goals {
        groups.entry(&goal.match_id).or_default().push(goal);
    }
    groups
}

/// Count goals scored by the home and away club within one match's group
fn count_goals(group: &[&ValidatedGoalEvent], record: &MatchRecord) -> (i64, i64) {
    let home = group
        .iter()
        .filter(|g| g.scoring_club == record.home_club)
        .count() as i64;
    let away = group
        .iter()
        .filter(|g| g.scoring_club == record.away_club)
        .count() as i64;
    (home, away)
}

/// Apply one match's result to both clubs' standings
fn apply_result(
    standings: &mut BTreeMap<String, ClubStats>,
    record: &MatchRecord,
    home_goals: i64,
    away_goals: i64,
) {
    // Home first, then away: this order decides which match sets the
    // league id if a club somehow appears under two leagues.
    for (club, own, opponent) in [
        (&record.home_club, home_goals, away_goals),
        (&record.away_club, away_goals, home_goals),
    ] {
        let stats = standings
            .get_mut(club)
            .expect("club was seeded from this match");

        if stats.league_id.is_none() {
            stats.league_id = Some(record.league_id.clone());
        }

        if own == opponent {
            stats.points += POINTS_DRAW;
        } else {
            if own > opponent {
                stats.points += POINTS_WIN;
            }
            // Actual counts, not +/-1: heavy defeats widen the difference
            stats.goal_difference += own - opponent;
        }
    }
}
