//! Event store: parses the raw event log and deduplicates it
//!
//! The input is a closed batch of line-delimited JSON. A line that is not
//! valid JSON is a fatal error for the whole load — there is no partial
//! ingestion. Individual objects that lack the structural fields (id, type
//! tag, timestamp) are dropped and counted instead.

use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{EventId, RawEvent};

/// Expected dataset file extension
const DATASET_EXTENSION: &str = "jsonl";

/// Counters produced while loading the dataset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines parsed into raw events
    pub parsed: usize,
    /// Objects dropped for missing id, type tag or timestamp
    pub malformed: usize,
    /// Events dropped as duplicates of an earlier identifier
    pub duplicates: usize,
}

/// Load the dataset at `path`, parse every line, and deduplicate by the
/// configured identifier field (first occurrence in source order wins).
pub fn load(path: &Path, config: &PipelineConfig) -> Result<(Vec<RawEvent>, LoadStats)> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(DATASET_EXTENSION) {
        return Err(Error::dataset(format!(
            "Invalid dataset path '{}': only '.{}' files are supported",
            path.display(),
            DATASET_EXTENSION
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    let mut events = Vec::new();
    let mut stats = LoadStats::default();

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line).map_err(|e| {
            Error::dataset(format!("Malformed JSON on line {}: {}", index + 1, e))
        })?;

        let object = value.as_object().ok_or_else(|| {
            Error::dataset(format!("Line {} is not a JSON object", index + 1))
        })?;

        match parse_event(object, config) {
            Some(event) => {
                stats.parsed += 1;
                events.push(event);
            }
            None => {
                stats.malformed += 1;
                tracing::debug!(line = index + 1, "Dropping event with missing structural fields");
            }
        }
    }

    let deduped = dedup(events, &mut stats);
    Ok((deduped, stats))
}

/// Build a raw event from one parsed object, or `None` if the structural
/// fields are missing or unusable.
fn parse_event(
    object: &serde_json::Map<String, Value>,
    config: &PipelineConfig,
) -> Option<RawEvent> {
    let schema = &config.schema;

    let id = object
        .get(&schema.dedup_field)
        .and_then(|v| EventId::from_value(v, &schema.dedup_field).ok())?;

    let kind = object.get(&schema.type_field)?.as_str()?.to_string();

    let timestamp = object.get(&schema.timestamp_field)?.as_i64()?;

    // Simple events may omit the payload entirely; required-field checks
    // happen later, during classification.
    let payload = object
        .get(&schema.payload_field)
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    Some(RawEvent {
        id,
        kind,
        timestamp,
        payload,
    })
}

/// Keep the first occurrence of every identifier, in source order
fn dedup(events: Vec<RawEvent>, stats: &mut LoadStats) -> Vec<RawEvent> {
    let mut seen: HashSet<EventId> = HashSet::with_capacity(events.len());
    let mut unique = Vec::with_capacity(events.len());

    for event in events {
        if seen.insert(event.id.clone()) {
            unique.push(event);
        } else {
            stats.duplicates += 1;
            tracing::debug!(event_id = %event.id, "Dropping duplicate event");
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_dataset(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".jsonl").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let file = Builder::new().suffix(".csv").tempfile().unwrap();
        let result = load(file.path(), &PipelineConfig::default());
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let file = write_dataset(&[
            r#"{"event_id": 1, "event_type": "goal", "timestamp": 10, "event_data": {}}"#,
            "not json at all",
        ]);
        let result = load(file.path(), &PipelineConfig::default());
        match result {
            Err(Error::Dataset(msg)) => assert!(msg.contains("line 2")),
            other => panic!("expected dataset error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_non_object_line_is_fatal() {
        let file = write_dataset(&[r#"[1, 2, 3]"#]);
        let result = load(file.path(), &PipelineConfig::default());
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let file = write_dataset(&[
            r#"{"event_id": 1, "event_type": "goal", "timestamp": 10, "event_data": {"a": 1}}"#,
            r#"{"event_id": 1, "event_type": "goal", "timestamp": 99, "event_data": {"a": 2}}"#,
            r#"{"event_id": 2, "event_type": "match_end", "timestamp": 20, "event_data": {}}"#,
        ]);
        let (events, stats) = load(file.path(), &PipelineConfig::default()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(events[0].timestamp, 10);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let line = r#"{"event_id": 7, "event_type": "goal", "timestamp": 5, "event_data": {}}"#;
        let once = write_dataset(&[line]);
        let twice = write_dataset(&[line, line]);

        let (events_once, _) = load(once.path(), &PipelineConfig::default()).unwrap();
        let (events_twice, stats) = load(twice.path(), &PipelineConfig::default()).unwrap();

        assert_eq!(events_once, events_twice);
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn test_structural_fields_missing_drops_event() {
        let file = write_dataset(&[
            r#"{"event_type": "goal", "timestamp": 10}"#,
            r#"{"event_id": 1, "timestamp": 10}"#,
            r#"{"event_id": 2, "event_type": "goal"}"#,
            r#"{"event_id": 3, "event_type": "goal", "timestamp": 10}"#,
        ]);
        let (events, stats) = load(file.path(), &PipelineConfig::default()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(stats.malformed, 3);
        assert_eq!(stats.parsed, 1);
    }

    #[test]
    fn test_missing_payload_becomes_empty_map() {
        let file = write_dataset(&[
            r#"{"event_id": 1, "event_type": "match_end", "timestamp": 10}"#,
        ]);
        let (events, _) = load(file.path(), &PipelineConfig::default()).unwrap();
        assert!(events[0].payload.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let file = write_dataset(&[
            r#"{"event_id": 1, "event_type": "goal", "timestamp": 10, "event_data": {}}"#,
            "",
            "   ",
        ]);
        let (events, stats) = load(file.path(), &PipelineConfig::default()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(stats.malformed, 0);
    }

    #[test]
    fn test_string_identifiers() {
        let file = write_dataset(&[
            r#"{"event_id": "ev-1", "event_type": "goal", "timestamp": 10, "event_data": {}}"#,
        ]);
        let (events, _) = load(file.path(), &PipelineConfig::default()).unwrap();
        assert_eq!(events[0].id, EventId::from("ev-1"));
    }
}
