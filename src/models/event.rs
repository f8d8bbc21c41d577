//! Event data models for MatchLedger
//!
//! This module defines the records that flow through the pipeline: raw
//! events parsed from the input log, the per-type classified events, the
//! reconciled match records, and the per-club standings entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};

/// Identifier value as it appears in the input log.
///
/// Event, match and league identifiers may arrive as JSON numbers or
/// strings; both forms are kept as-is and compared without coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    /// Numeric identifier
    Int(i64),
    /// String identifier
    Text(String),
}

impl EventId {
    /// Read an identifier out of a JSON value.
    ///
    /// Accepts integers and strings; everything else (floats included) is
    /// rejected so that identifier equality stays exact.
    pub fn from_value(value: &Value, field: &str) -> ValidationResult<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(EventId::Int).ok_or_else(|| {
                ValidationError::with_context(
                    ValidationErrorKind::WrongType {
                        expected: "integer or string",
                    },
                    field,
                    "non-integer number",
                )
            }),
            Value::String(s) => Ok(EventId::Text(s.clone())),
            other => Err(ValidationError::with_context(
                ValidationErrorKind::WrongType {
                    expected: "integer or string",
                },
                field,
                format!("got {}", json_type_name(other)),
            )),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        EventId::Int(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

/// Name of a JSON value's type, for validation error context
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Raw event as parsed from one line of the input log
///
/// This is the shape every event shares before classification: identifier,
/// type tag, timestamp, and the type-specific payload object. Raw events
/// are discarded once classification has extracted what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique event identifier (dedup key)
    pub id: EventId,

    /// Declared event type tag
    pub kind: String,

    /// When the event occurred, as a comparable ordinal
    pub timestamp: i64,

    /// Nested type-specific fields
    pub payload: Map<String, Value>,
}

impl RawEvent {
    /// Look up a payload field, treating JSON null as absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name).filter(|v| !v.is_null())
    }

    /// Read a payload field as an identifier
    pub fn require_id(&self, name: &str) -> ValidationResult<EventId> {
        let value = self
            .field(name)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingField, name))?;
        EventId::from_value(value, name)
    }

    /// Read a payload field as a string
    pub fn require_string(&self, name: &str) -> ValidationResult<String> {
        let value = self
            .field(name)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingField, name))?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ValidationError::with_context(
                    ValidationErrorKind::WrongType { expected: "string" },
                    name,
                    format!("got {}", json_type_name(value)),
                )
            })
    }
}

/// A match-start event with every required field extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStartEvent {
    pub event_id: EventId,
    pub timestamp: i64,
    pub match_id: EventId,
    pub league_id: EventId,
    pub home_club: String,
    pub away_club: String,
}

/// A match-end event with every required field extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEndEvent {
    pub event_id: EventId,
    pub timestamp: i64,
    pub match_id: EventId,
}

/// A goal event with every required field extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvent {
    pub event_id: EventId,
    pub timestamp: i64,
    pub match_id: EventId,
    pub scoring_club: String,
}

/// One reconciled match, built from exactly one start and one end event
/// sharing a match identifier.
///
/// Invariant: `end_time > start_time`, and `match_id` is unique across the
/// joined set. Match records live for the duration of aggregation only;
/// they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub match_id: EventId,
    pub league_id: EventId,
    pub home_club: String,
    pub away_club: String,
    pub start_time: i64,
    pub end_time: i64,
    pub start_event_id: EventId,
    pub end_event_id: EventId,
}

impl MatchRecord {
    /// Whether a timestamp falls inside this match's window,
    /// inclusive at both ends.
    pub fn window_contains(&self, timestamp: i64) -> bool {
        self.start_time <= timestamp && timestamp <= self.end_time
    }
}

/// A goal that resolved to a known match and fell inside its window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGoalEvent {
    pub match_id: EventId,
    pub scoring_club: String,
    pub timestamp: i64,
}

/// Per-club standings entry
///
/// Seeded with zero points and zero goal difference for every club that
/// appears in a match. `league_id` stays `None` until the club's first
/// match is aggregated and is never overwritten after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubStats {
    pub club_name: String,
    pub league_id: Option<EventId>,
    pub points: u32,
    pub goal_difference: i64,
}

impl ClubStats {
    /// Create a fresh entry for a club with no results yet
    pub fn new(club_name: impl Into<String>) -> Self {
        Self {
            club_name: club_name.into(),
            league_id: None,
            points: 0,
            goal_difference: 0,
        }
    }
}

/// One row of the ranked scoreboard projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardRow {
    pub club_name: String,
    pub points: u32,
    pub goal_difference: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(payload: Value) -> RawEvent {
        RawEvent {
            id: EventId::from(1),
            kind: "goal".to_string(),
            timestamp: 100,
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_event_id_from_value() {
        assert_eq!(
            EventId::from_value(&json!(7), "id").unwrap(),
            EventId::Int(7)
        );
        assert_eq!(
            EventId::from_value(&json!("m-1"), "id").unwrap(),
            EventId::Text("m-1".to_string())
        );
        assert!(EventId::from_value(&json!(1.5), "id").is_err());
        assert!(EventId::from_value(&json!([1]), "id").is_err());
    }

    #[test]
    fn test_event_id_display() {
        assert_eq!(EventId::from(42).to_string(), "42");
        assert_eq!(EventId::from("L1").to_string(), "L1");
    }

    #[test]
    fn test_event_id_untagged_deserialization() {
        let n: EventId = serde_json::from_str("12").unwrap();
        assert_eq!(n, EventId::Int(12));
        let s: EventId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(s, EventId::Text("abc".to_string()));
    }

    #[test]
    fn test_field_treats_null_as_absent() {
        let event = raw(json!({ "match_id": null, "scoring_club": "A" }));
        assert!(event.field("match_id").is_none());
        assert!(event.field("scoring_club").is_some());
        assert!(event.field("nonexistent").is_none());
    }

    #[test]
    fn test_require_id_and_string() {
        let event = raw(json!({ "match_id": 3, "scoring_club": "A" }));
        assert_eq!(event.require_id("match_id").unwrap(), EventId::Int(3));
        assert_eq!(event.require_string("scoring_club").unwrap(), "A");

        assert!(event.require_id("missing").is_err());
        assert!(event.require_string("match_id").is_err());
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let record = MatchRecord {
            match_id: EventId::from(1),
            league_id: EventId::from("L1"),
            home_club: "A".to_string(),
            away_club: "B".to_string(),
            start_time: 100,
            end_time: 200,
            start_event_id: EventId::from(10),
            end_event_id: EventId::from(11),
        };

        assert!(record.window_contains(100));
        assert!(record.window_contains(150));
        assert!(record.window_contains(200));
        assert!(!record.window_contains(99));
        assert!(!record.window_contains(201));
    }

    #[test]
    fn test_club_stats_new() {
        let stats = ClubStats::new("Arsenal");
        assert_eq!(stats.club_name, "Arsenal");
        assert_eq!(stats.points, 0);
        assert_eq!(stats.goal_difference, 0);
        assert!(stats.league_id.is_none());
    }
}
