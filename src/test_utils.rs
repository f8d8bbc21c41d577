//! Test utilities for MatchLedger
//!
//! Mock repository and dataset builders shared by unit and integration
//! tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::db::club_repo::ClubStatsRepository;
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::{ClubStats, EventId, ScoreboardRow};

/// Mock implementation of ClubStatsRepository for testing
#[derive(Debug, Clone, Default)]
pub struct MockClubStatsRepository {
    clubs: Arc<Mutex<Vec<ClubStats>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockClubStatsRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on the next operation
    pub fn fail_next_operation(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Get all stored club rows
    pub fn all_clubs(&self) -> Vec<ClubStats> {
        self.clubs.lock().unwrap().clone()
    }

    fn check_failure(&self) -> RepositoryResult<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(RepositoryError::QueryExecution("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ClubStatsRepository for MockClubStatsRepository {
    async fn replace_all(&self, stats: &[ClubStats]) -> RepositoryResult<u64> {
        self.check_failure()?;
        let mut clubs = self.clubs.lock().unwrap();
        clubs.clear();
        clubs.extend_from_slice(stats);
        Ok(clubs.len() as u64)
    }

    async fn scoreboard(&self, league_id: &str) -> RepositoryResult<Vec<ScoreboardRow>> {
        self.check_failure()?;
        let clubs = self.clubs.lock().unwrap();
        let mut rows: Vec<ScoreboardRow> = clubs
            .iter()
            .filter(|c| {
                c.league_id
                    .as_ref()
                    .map(|l| l.to_string() == league_id)
                    .unwrap_or(false)
            })
            .map(|c| ScoreboardRow {
                club_name: c.club_name.clone(),
                points: c.points,
                goal_difference: c.goal_difference,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference.cmp(&a.goal_difference))
                .then(a.club_name.cmp(&b.club_name))
        });
        Ok(rows)
    }

    async fn find_club(&self, club_name: &str) -> RepositoryResult<Option<ClubStats>> {
        self.check_failure()?;
        let clubs = self.clubs.lock().unwrap();
        Ok(clubs.iter().find(|c| c.club_name == club_name).cloned())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        self.check_failure()?;
        Ok(self.clubs.lock().unwrap().len() as i64)
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        self.check_failure()
    }
}

/// Render one match-start event as a dataset line
pub fn start_line(
    event_id: i64,
    match_id: i64,
    timestamp: i64,
    league: &str,
    home: &str,
    away: &str,
) -> String {
    format!(
        r#"{{"event_id": {}, "event_type": "match_start", "timestamp": {}, "event_data": {{"match_id": {}, "league_id": "{}", "home_club": "{}", "away_club": "{}"}}}}"#,
        event_id, timestamp, match_id, league, home, away
    )
}

/// Render one match-end event as a dataset line
pub fn end_line(event_id: i64, match_id: i64, timestamp: i64) -> String {
    format!(
        r#"{{"event_id": {}, "event_type": "match_end", "timestamp": {}, "event_data": {{"match_id": {}}}}}"#,
        event_id, timestamp, match_id
    )
}

/// Render one goal event as a dataset line
pub fn goal_line(event_id: i64, match_id: i64, timestamp: i64, club: &str) -> String {
    format!(
        r#"{{"event_id": {}, "event_type": "goal", "timestamp": {}, "event_data": {{"match_id": {}, "scoring_club": "{}"}}}}"#,
        event_id, timestamp, match_id, club
    )
}

/// Create a ClubStats entry for tests
pub fn club(name: &str, league: &str, points: u32, goal_difference: i64) -> ClubStats {
    ClubStats {
        club_name: name.to_string(),
        league_id: Some(EventId::from(league)),
        points,
        goal_difference,
    }
}
