//! Event classifier: partitions raw events by type and extracts payload
//! fields into flat typed records
//!
//! An event survives classification only if every field declared required
//! for its type is present and non-null in the payload. Events failing
//! even one field are dropped whole; no partial records are retained.

use crate::config::PipelineConfig;
use crate::models::{
    GoalEvent, MatchEndEvent, MatchStartEvent, RawEvent, ValidationError, ValidationErrorKind,
    ValidationErrors,
};

/// Counters produced while classifying events
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifyStats {
    /// Match-start events dropped for missing or unusable fields
    pub invalid_starts: usize,
    /// Match-end events dropped for missing or unusable fields
    pub invalid_ends: usize,
    /// Goal events dropped for missing or unusable fields
    pub invalid_goals: usize,
    /// Events whose type tag matched none of the declared types
    pub unclassified: usize,
}

/// The per-type output of classification
#[derive(Debug, Default, Clone)]
pub struct ClassifiedEvents {
    pub starts: Vec<MatchStartEvent>,
    pub ends: Vec<MatchEndEvent>,
    pub goals: Vec<GoalEvent>,
    pub stats: ClassifyStats,
}

/// Partition raw events by declared type tag and extract the required
/// payload fields for each.
pub fn classify(events: Vec<RawEvent>, config: &PipelineConfig) -> ClassifiedEvents {
    let mut out = ClassifiedEvents::default();
    let tags = &config.event_types;

    for event in events {
        if event.kind == tags.match_start {
            match extract(&event, config.required_for(&tags.match_start))
                .and_then(|_| to_match_start(&event, config))
            {
                Ok(start) => out.starts.push(start),
                Err(errors) => {
                    out.stats.invalid_starts += 1;
                    tracing::debug!(event_id = %event.id, %errors, "Dropping invalid match-start");
                }
            }
        } else if event.kind == tags.match_end {
            match extract(&event, config.required_for(&tags.match_end))
                .and_then(|_| to_match_end(&event, config))
            {
                Ok(end) => out.ends.push(end),
                Err(errors) => {
                    out.stats.invalid_ends += 1;
                    tracing::debug!(event_id = %event.id, %errors, "Dropping invalid match-end");
                }
            }
        } else if event.kind == tags.goal {
            match extract(&event, config.required_for(&tags.goal))
                .and_then(|_| to_goal(&event, config))
            {
                Ok(goal) => out.goals.push(goal),
                Err(errors) => {
                    out.stats.invalid_goals += 1;
                    tracing::debug!(event_id = %event.id, %errors, "Dropping invalid goal");
                }
            }
        } else {
            out.stats.unclassified += 1;
            tracing::debug!(event_id = %event.id, kind = %event.kind, "Unclassified event type");
        }
    }

    out
}

/// Check that every required field is present and non-null in the payload.
/// All missing fields are collected so the drop reason is complete.
fn extract(event: &RawEvent, required: &[String]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in required {
        if event.field(field).is_none() {
            errors.add(ValidationError::new(
                ValidationErrorKind::MissingField,
                field.clone(),
            ));
        }
    }

    errors.into_result(())
}

fn to_match_start(
    event: &RawEvent,
    config: &PipelineConfig,
) -> Result<MatchStartEvent, ValidationErrors> {
    let schema = &config.schema;
    Ok(MatchStartEvent {
        event_id: event.id.clone(),
        timestamp: event.timestamp,
        match_id: event.require_id(&schema.join_field)?,
        league_id: event.require_id(&schema.league_id_field)?,
        home_club: event.require_string(&schema.home_club_field)?,
        away_club: event.require_string(&schema.away_club_field)?,
    })
}

fn to_match_end(
    event: &RawEvent,
    config: &PipelineConfig,
) -> Result<MatchEndEvent, ValidationErrors> {
    Ok(MatchEndEvent {
        event_id: event.id.clone(),
        timestamp: event.timestamp,
        match_id: event.require_id(&config.schema.join_field)?,
    })
}

fn to_goal(event: &RawEvent, config: &PipelineConfig) -> Result<GoalEvent, ValidationErrors> {
    let schema = &config.schema;
    Ok(GoalEvent {
        event_id: event.id.clone(),
        timestamp: event.timestamp,
        match_id: event.require_id(&schema.join_field)?,
        scoring_club: event.require_string(&schema.scoring_club_field)?,
    })
}
