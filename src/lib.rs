//! MatchLedger Library
//!
//! Batch pipeline that ingests a log of timestamped sporting events,
//! reconciles them into validated match records, and computes league
//! standings per club. This library exposes the pipeline stages, the
//! storage layer, and shared test utilities.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod test_utils;

// Re-export commonly used types at the crate root
pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};

// Re-export model types
pub use models::{
    ClubStats, EventId, GoalEvent, MatchEndEvent, MatchRecord, MatchStartEvent, RawEvent,
    ScoreboardRow, ValidatedGoalEvent,
};

// Re-export the pipeline entry points
pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
