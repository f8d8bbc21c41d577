//! Club standings repository for MatchLedger
//!
//! SQLite implementation of the storage contracts: a full-table replace
//! write of the aggregated standings, and the ranked scoreboard read for
//! one league.

use async_trait::async_trait;
use sqlx::Row;

use crate::db::{
    repository::{RepositoryError, RepositoryResult},
    DbPool,
};
use crate::models::{ClubStats, EventId, ScoreboardRow};

/// Storage contract for club standings
#[async_trait]
pub trait ClubStatsRepository: Send + Sync {
    /// Replace the whole clubs table with the given standings.
    ///
    /// Replace semantics, not append/merge: prior contents are gone after
    /// this call. Runs in one transaction and is not retried on failure.
    async fn replace_all(&self, stats: &[ClubStats]) -> RepositoryResult<u64>;

    /// Rows for one league ordered by points descending, then goal
    /// difference descending, then club name ascending. Rank is implied
    /// by position (1-based) and assigned by the presentation layer.
    async fn scoreboard(&self, league_id: &str) -> RepositoryResult<Vec<ScoreboardRow>>;

    /// Find a single club's standings row
    async fn find_club(&self, club_name: &str) -> RepositoryResult<Option<ClubStats>>;

    /// Count stored clubs
    async fn count(&self) -> RepositoryResult<i64>;

    /// Health check for the repository
    async fn health_check(&self) -> RepositoryResult<()>;
}

/// SQLite implementation of ClubStatsRepository
pub struct SqliteClubStatsRepository {
    pool: DbPool,
}

impl SqliteClubStatsRepository {
    /// Create a new SQLite club standings repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to ClubStats
    fn row_to_stats(row: &sqlx::sqlite::SqliteRow) -> RepositoryResult<ClubStats> {
        let league: String = row.try_get("league_id")?;
        let points: i64 = row.try_get("points")?;

        Ok(ClubStats {
            club_name: row.try_get("club_name")?,
            league_id: Some(EventId::Text(league)),
            points: u32::try_from(points)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
            goal_difference: row.try_get("goal_difference")?,
        })
    }
}

#[async_trait]
impl ClubStatsRepository for SqliteClubStatsRepository {
    async fn replace_all(&self, stats: &[ClubStats]) -> RepositoryResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM clubs").execute(&mut *tx).await?;

        let mut inserted = 0u64;
        for club in stats {
            // Every seeded club comes from a match, so the league is
            // always assigned by the time aggregation finishes.
            let league = club
                .league_id
                .as_ref()
                .map(|l| l.to_string())
                .unwrap_or_default();

            let result = sqlx::query(
                r#"
                INSERT INTO clubs (club_name, league_id, points, goal_difference)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&club.club_name)
            .bind(league)
            .bind(club.points as i64)
            .bind(club.goal_difference)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!(clubs = inserted, "Standings written");
        Ok(inserted)
    }

    async fn scoreboard(&self, league_id: &str) -> RepositoryResult<Vec<ScoreboardRow>> {
        let rows = sqlx::query(
            r#"
            SELECT club_name, points, goal_difference
            FROM clubs
            WHERE league_id = $1
            ORDER BY points DESC, goal_difference DESC, club_name ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let points: i64 = row.try_get("points")?;
                Ok(ScoreboardRow {
                    club_name: row.try_get("club_name")?,
                    points: u32::try_from(points)
                        .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
                    goal_difference: row.try_get("goal_difference")?,
                })
            })
            .collect()
    }

    async fn find_club(&self, club_name: &str) -> RepositoryResult<Option<ClubStats>> {
        let result = sqlx::query(
            r#"
            SELECT club_name, league_id, points, goal_difference
            FROM clubs
            WHERE club_name = $1
            "#,
        )
        .bind(club_name)
        .fetch_optional(&self.pool)
        .await?;

        match result {
            Some(row) => Ok(Some(Self::row_to_stats(&row)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clubs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::Connection(format!("Health check failed: {}", e)))
    }
}
