//! Configuration module for MatchLedger
//!
//! Two layers of configuration, loaded separately:
//!
//! - [`Config`]: runtime settings (database, logging) read from environment
//!   variables, with `.env` support for local development.
//! - [`PipelineConfig`]: the dataset schema read from a JSON file — event
//!   type tags, required field lists per type, and the field names used for
//!   deduplication and start/end joining.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    /// Application configuration
    #[envconfig(nested)]
    pub app: AppConfig,

    /// Database configuration
    #[envconfig(nested)]
    pub database: DatabaseConfig,
}

/// Application-level settings
#[derive(Debug, Clone, Envconfig)]
pub struct AppConfig {
    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,
}

impl AppConfig {
    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Database configuration
#[derive(Debug, Clone, Envconfig)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[envconfig(from = "DATABASE_URL", default = "sqlite://standings.db")]
    pub url: String,

    /// Maximum pool size
    #[envconfig(from = "DATABASE_POOL_MAX_SIZE", default = "5")]
    pub pool_max_size: u32,

    /// Pool acquire timeout in seconds
    #[envconfig(from = "DATABASE_POOL_TIMEOUT_SECONDS", default = "30")]
    pub pool_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Get pool timeout as Duration
    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_seconds)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(Error::config("Database URL cannot be empty"));
        }

        if self.database.pool_max_size == 0 {
            return Err(Error::config("Database pool size must be at least 1"));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!(
            environment = %self.app.environment,
            log_level = %self.app.log_level,
            database_url = %self.database.url,
            pool_size = %self.database.pool_max_size,
            "Runtime configuration"
        );
    }
}

/// Dataset schema configuration, loaded from a JSON file
///
/// Mirrors the shape of the ingestion config: which type tags mark goal,
/// match-start and match-end events, which payload fields each type
/// requires, and which fields drive deduplication and joining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Event type discriminator values
    #[serde(default)]
    pub event_types: EventTypeTags,

    /// Required payload fields per type tag
    #[serde(default = "default_required_fields")]
    pub required_fields: HashMap<String, Vec<String>>,

    /// Top-level and payload field names
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Discriminator values for the three event types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeTags {
    #[serde(default = "default_goal_tag")]
    pub goal: String,
    #[serde(default = "default_match_start_tag")]
    pub match_start: String,
    #[serde(default = "default_match_end_tag")]
    pub match_end: String,
}

/// Field names used to read raw events and their payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Top-level field holding the event type tag
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Top-level field holding the event timestamp
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,

    /// Top-level field holding the nested payload object
    #[serde(default = "default_payload_field")]
    pub payload_field: String,

    /// Top-level field used for deduplication (the event identifier)
    #[serde(default = "default_dedup_field")]
    pub dedup_field: String,

    /// Payload field used to join match starts to match ends
    #[serde(default = "default_join_field")]
    pub join_field: String,

    /// Payload field holding the league identifier (match starts)
    #[serde(default = "default_league_id_field")]
    pub league_id_field: String,

    /// Payload field holding the home club name (match starts)
    #[serde(default = "default_home_club_field")]
    pub home_club_field: String,

    /// Payload field holding the away club name (match starts)
    #[serde(default = "default_away_club_field")]
    pub away_club_field: String,

    /// Payload field holding the scoring club name (goals)
    #[serde(default = "default_scoring_club_field")]
    pub scoring_club_field: String,
}

fn default_goal_tag() -> String {
    "goal".to_string()
}

fn default_match_start_tag() -> String {
    "match_start".to_string()
}

fn default_match_end_tag() -> String {
    "match_end".to_string()
}

fn default_type_field() -> String {
    "event_type".to_string()
}

fn default_timestamp_field() -> String {
    "timestamp".to_string()
}

fn default_payload_field() -> String {
    "event_data".to_string()
}

fn default_dedup_field() -> String {
    "event_id".to_string()
}

fn default_join_field() -> String {
    "match_id".to_string()
}

fn default_league_id_field() -> String {
    "league_id".to_string()
}

fn default_home_club_field() -> String {
    "home_club".to_string()
}

fn default_away_club_field() -> String {
    "away_club".to_string()
}

fn default_scoring_club_field() -> String {
    "scoring_club".to_string()
}

fn default_required_fields() -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    map.insert(
        default_goal_tag(),
        vec![default_join_field(), default_scoring_club_field()],
    );
    map.insert(
        default_match_start_tag(),
        vec![
            default_join_field(),
            default_league_id_field(),
            default_home_club_field(),
            default_away_club_field(),
        ],
    );
    map.insert(default_match_end_tag(), vec![default_join_field()]);
    map
}

impl Default for EventTypeTags {
    fn default() -> Self {
        Self {
            goal: default_goal_tag(),
            match_start: default_match_start_tag(),
            match_end: default_match_end_tag(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            type_field: default_type_field(),
            timestamp_field: default_timestamp_field(),
            payload_field: default_payload_field(),
            dedup_field: default_dedup_field(),
            join_field: default_join_field(),
            league_id_field: default_league_id_field(),
            home_club_field: default_home_club_field(),
            away_club_field: default_away_club_field(),
            scoring_club_field: default_scoring_club_field(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            event_types: EventTypeTags::default(),
            required_fields: default_required_fields(),
            schema: SchemaConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read pipeline config {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: PipelineConfig = serde_json::from_str(&contents).map_err(|e| {
            Error::config(format!(
                "Failed to parse pipeline config {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Required payload fields for a given type tag
    pub fn required_for(&self, tag: &str) -> &[String] {
        self.required_fields
            .get(tag)
            .map(|fields| fields.as_slice())
            .unwrap_or(&[])
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let tags = [
            &self.event_types.goal,
            &self.event_types.match_start,
            &self.event_types.match_end,
        ];

        if tags.iter().any(|tag| tag.is_empty()) {
            return Err(Error::config("Event type tags cannot be empty"));
        }

        if tags[0] == tags[1] || tags[0] == tags[2] || tags[1] == tags[2] {
            return Err(Error::config("Event type tags must be distinct"));
        }

        // Joining and goal validation both resolve through the join field,
        // so every type must extract it.
        for tag in tags {
            if !self.required_for(tag).contains(&self.schema.join_field) {
                return Err(Error::config(format!(
                    "Required fields for '{}' must include the join field '{}'",
                    tag, self.schema.join_field
                )));
            }
        }

        Ok(())
    }
}
