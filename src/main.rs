//! MatchLedger - league standings from sporting event logs
//!
//! Loads a line-delimited JSON event log, reconciles match and goal
//! events into validated records, aggregates standings per club, and
//! persists them to SQLite. A second subcommand prints the ranked
//! scoreboard for one league.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use matchledger::config::{Config, PipelineConfig};
use matchledger::db::{self, ClubStatsRepository, SqliteClubStatsRepository};
use matchledger::error::{Error, Result};
use matchledger::logging;
use matchledger::models::ClubStats;
use matchledger::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "matchledger")]
#[command(about = "Reconcile sporting event logs into league standings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset, compute standings, and replace the clubs table
    Ingest {
        /// Path to the '.jsonl' dataset file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Optional pipeline config JSON (defaults apply if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the ranked scoreboard for one league
    Scoreboard {
        /// League identifier
        #[arg(short, long)]
        league: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.app.log_level, &config.app.environment)?;
    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting MatchLedger");

    let cli = Cli::parse();

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| Error::database(format!("Migration failed: {}", e)))?;
    let repo = SqliteClubStatsRepository::new(pool);

    match cli.command {
        Commands::Ingest { dataset, config } => {
            let pipeline_config = match config {
                Some(path) => PipelineConfig::from_file(&path)?,
                None => PipelineConfig::default(),
            };

            let pipeline = Pipeline::new(pipeline_config);
            let output = pipeline.run(&dataset)?;

            let stats: Vec<ClubStats> = output.standings.into_values().collect();
            let written = repo.replace_all(&stats).await?;

            println!("Ingested {} -> {} clubs written", dataset.display(), written);
        }
        Commands::Scoreboard { league } => {
            let rows = repo.scoreboard(&league).await?;

            if rows.is_empty() {
                println!("No standings found for league '{}'", league);
            } else {
                println!("{:>4}  {:<24} {:>6}  {:>5}", "Rank", "Club", "Points", "GD");
                for (index, row) in rows.iter().enumerate() {
                    println!(
                        "{:>4}  {:<24} {:>6}  {:>+5}",
                        index + 1,
                        row.club_name,
                        row.points,
                        row.goal_difference
                    );
                }
            }
        }
    }

    Ok(())
}
