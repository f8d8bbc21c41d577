//! Database module for MatchLedger
//!
//! Provides connectivity, migrations, and the club standings repository.

pub mod club_repo;
pub mod pool;
pub mod repository;

// Re-export commonly used types
pub use club_repo::{ClubStatsRepository, SqliteClubStatsRepository};
pub use pool::{create_pool, DbPool};
pub use repository::{RepositoryError, RepositoryResult};

use sqlx::migrate::Migrator;

/// Database migrator for running schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| ())
}
