//! The event reconciliation and standings-aggregation pipeline
//!
//! Data flows strictly downward: store -> classifier -> joiner/validator
//! -> aggregator. Every stage consumes a complete upstream collection
//! before producing its own; there is no streaming mode. Record-level
//! problems are handled by exclusion and surface only as counters in the
//! [`PipelineReport`].

pub mod aggregator;
pub mod classifier;
pub mod joiner;
pub mod store;
pub mod validator;

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::logging::Timer;
use crate::models::ClubStats;

pub use classifier::{ClassifiedEvents, ClassifyStats};
pub use joiner::JoinOutcome;
pub use store::LoadStats;
pub use validator::{GoalResolution, ValidationOutcome};

/// Drop counters accumulated across the whole run
#[derive(Debug, Default, Clone)]
pub struct PipelineReport {
    pub load: LoadStats,
    pub classify: ClassifyStats,
    pub matches_joined: usize,
    pub unmatched_starts: usize,
    pub non_positive_duration: usize,
    pub duplicate_join_keys: usize,
    pub goals_validated: usize,
    pub goals_unknown_match: usize,
    pub goals_outside_window: usize,
    pub clubs: usize,
}

impl PipelineReport {
    /// Log the report at info level
    pub fn log(&self) {
        tracing::info!(
            events_parsed = self.load.parsed,
            events_malformed = self.load.malformed,
            events_duplicate = self.load.duplicates,
            invalid_starts = self.classify.invalid_starts,
            invalid_ends = self.classify.invalid_ends,
            invalid_goals = self.classify.invalid_goals,
            unclassified = self.classify.unclassified,
            matches_joined = self.matches_joined,
            unmatched_starts = self.unmatched_starts,
            non_positive_duration = self.non_positive_duration,
            duplicate_join_keys = self.duplicate_join_keys,
            goals_validated = self.goals_validated,
            goals_unknown_match = self.goals_unknown_match,
            goals_outside_window = self.goals_outside_window,
            clubs = self.clubs,
            "Pipeline run complete"
        );
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Final standings keyed by club name
    pub standings: BTreeMap<String, ClubStats>,
    /// Per-stage counters
    pub report: PipelineReport,
}

/// The batch pipeline, configured once and run over one dataset
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given dataset schema
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline over the dataset at `path`.
    ///
    /// Only structural failures (bad extension, malformed JSON line)
    /// return an error; individual bad records are dropped and counted.
    pub fn run(&self, path: &Path) -> Result<PipelineOutput> {
        let mut report = PipelineReport::default();

        let timer = Timer::start("load");
        let (raw_events, load_stats) = store::load(path, &self.config)?;
        report.load = load_stats;
        timer.stop();

        tracing::info!(events = raw_events.len(), "Dataset loaded");

        let timer = Timer::start("classify");
        let classified = classifier::classify(raw_events, &self.config);
        report.classify = classified.stats.clone();
        timer.stop();

        tracing::info!(
            starts = classified.starts.len(),
            ends = classified.ends.len(),
            goals = classified.goals.len(),
            "Events classified"
        );

        let timer = Timer::start("join");
        let joined = joiner::join(classified.starts, classified.ends);
        report.matches_joined = joined.matches.len();
        report.unmatched_starts = joined.unmatched_starts;
        report.non_positive_duration = joined.non_positive_duration;
        report.duplicate_join_keys = joined.duplicate_keys;
        timer.stop();

        let timer = Timer::start("validate_goals");
        let validated = validator::validate(classified.goals, &joined.matches);
        report.goals_validated = validated.goals.len();
        report.goals_unknown_match = validated.unknown_match;
        report.goals_outside_window = validated.outside_window;
        timer.stop();

        let timer = Timer::start("aggregate");
        let standings = aggregator::aggregate(&joined.matches, &validated.goals);
        report.clubs = standings.len();
        timer.stop();

        report.log();

        Ok(PipelineOutput { standings, report })
    }
}
