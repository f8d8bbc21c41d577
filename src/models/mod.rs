//! Data models for MatchLedger
//!
//! This module contains the domain records used throughout the pipeline,
//! from raw parsed events to the per-club standings entries, plus the
//! record-level validation error types.

pub mod error;
pub mod event;

// Re-export commonly used types
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use event::{
    ClubStats, EventId, GoalEvent, MatchEndEvent, MatchRecord, MatchStartEvent, RawEvent,
    ScoreboardRow, ValidatedGoalEvent,
};
