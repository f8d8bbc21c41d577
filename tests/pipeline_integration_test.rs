//! End-to-end pipeline tests for MatchLedger
//!
//! These tests run the full pipeline over real dataset files and check
//! the aggregated standings and drop counters.

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use matchledger::config::PipelineConfig;
use matchledger::db::ClubStatsRepository;
use matchledger::models::{ClubStats, EventId};
use matchledger::pipeline::Pipeline;
use matchledger::test_utils::{end_line, goal_line, start_line, MockClubStatsRepository};

fn write_dataset(lines: &[String]) -> NamedTempFile {
    let mut file = Builder::new().suffix(".jsonl").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn run(lines: &[String]) -> matchledger::PipelineOutput {
    let file = write_dataset(lines);
    Pipeline::new(PipelineConfig::default()).run(file.path()).unwrap()
}

#[test]
fn test_single_match_scenario() {
    // match 1: A vs B in L1, window [100, 200]; A scores inside the
    // window, B's goal at t=500 is outside and must be dropped.
    let output = run(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
        goal_line(3, 1, 150, "A"),
        goal_line(4, 1, 500, "B"),
    ]);

    assert_eq!(output.report.matches_joined, 1);
    assert_eq!(output.report.goals_validated, 1);
    assert_eq!(output.report.goals_outside_window, 1);

    let a = &output.standings["A"];
    assert_eq!(a.points, 3);
    assert_eq!(a.goal_difference, 1);
    assert_eq!(a.league_id, Some(EventId::from("L1")));

    let b = &output.standings["B"];
    assert_eq!(b.points, 0);
    assert_eq!(b.goal_difference, -1);
    assert_eq!(b.league_id, Some(EventId::from("L1")));
}

#[tokio::test]
async fn test_scenario_scoreboard_query() {
    let output = run(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
        goal_line(3, 1, 150, "A"),
        goal_line(4, 1, 500, "B"),
    ]);

    let repo = MockClubStatsRepository::new();
    let stats: Vec<ClubStats> = output.standings.into_values().collect();
    repo.replace_all(&stats).await.unwrap();

    let rows = repo.scoreboard("L1").await.unwrap();
    let result: Vec<(String, u32, i64)> = rows
        .into_iter()
        .map(|r| (r.club_name, r.points, r.goal_difference))
        .collect();

    assert_eq!(
        result,
        vec![("A".to_string(), 3, 1), ("B".to_string(), 0, -1)]
    );
}

#[test]
fn test_duplicate_events_are_idempotent() {
    let base = vec![
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
        goal_line(3, 1, 150, "A"),
    ];

    let mut doubled = base.clone();
    doubled.extend(base.clone());

    let once = run(&base);
    let twice = run(&doubled);

    assert_eq!(once.standings, twice.standings);
    assert_eq!(twice.report.load.duplicates, 3);
}

#[test]
fn test_unmatched_events_produce_no_match() {
    let output = run(&[
        // start without end
        start_line(1, 1, 100, "L1", "A", "B"),
        // end without start
        end_line(2, 2, 200),
        // goal referencing the unjoined match
        goal_line(3, 1, 150, "A"),
    ]);

    assert_eq!(output.report.matches_joined, 0);
    assert_eq!(output.report.unmatched_starts, 1);
    assert_eq!(output.report.goals_unknown_match, 1);
    assert!(output.standings.is_empty());
}

#[test]
fn test_non_positive_duration_match_dropped() {
    let output = run(&[
        start_line(1, 1, 200, "L1", "A", "B"),
        end_line(2, 1, 200),
        start_line(3, 2, 300, "L1", "C", "D"),
        end_line(4, 2, 250),
    ]);

    assert_eq!(output.report.matches_joined, 0);
    assert_eq!(output.report.non_positive_duration, 2);
    assert!(output.standings.is_empty());
}

#[test]
fn test_goal_boundary_inclusion() {
    let output = run(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
        goal_line(3, 1, 100, "A"),
        goal_line(4, 1, 200, "A"),
        goal_line(5, 1, 99, "B"),
        goal_line(6, 1, 201, "B"),
    ]);

    assert_eq!(output.report.goals_validated, 2);
    assert_eq!(output.report.goals_outside_window, 2);
    assert_eq!(output.standings["A"].points, 3);
    assert_eq!(output.standings["A"].goal_difference, 2);
}

#[test]
fn test_draw_with_no_goal_data() {
    let output = run(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
    ]);

    assert_eq!(output.standings["A"].points, 1);
    assert_eq!(output.standings["B"].points, 1);
    assert_eq!(output.standings["A"].goal_difference, 0);
    assert_eq!(output.standings["B"].goal_difference, 0);
}

#[test]
fn test_points_conservation_across_league() {
    let output = run(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        end_line(2, 1, 200),
        start_line(3, 2, 300, "L1", "C", "D"),
        end_line(4, 2, 400),
        start_line(5, 3, 500, "L1", "A", "C"),
        end_line(6, 3, 600),
        goal_line(7, 1, 150, "A"),
        goal_line(8, 3, 550, "C"),
        goal_line(9, 3, 560, "A"),
    ]);

    let total: u32 = output.standings.values().map(|s| s.points).sum();
    assert_eq!(total, 2 * output.report.matches_joined as u32);
}

#[test]
fn test_invalid_events_excluded_not_fatal() {
    let output = run(&[
        // missing home_club: dropped during classification
        r#"{"event_id": 1, "event_type": "match_start", "timestamp": 100, "event_data": {"match_id": 1, "league_id": "L1", "away_club": "B"}}"#.to_string(),
        start_line(2, 2, 100, "L1", "C", "D"),
        end_line(3, 2, 200),
        // goal missing scoring_club
        r#"{"event_id": 4, "event_type": "goal", "timestamp": 150, "event_data": {"match_id": 2}}"#.to_string(),
    ]);

    assert_eq!(output.report.classify.invalid_starts, 1);
    assert_eq!(output.report.classify.invalid_goals, 1);
    assert_eq!(output.report.matches_joined, 1);
    assert_eq!(output.standings.len(), 2);
}

#[test]
fn test_malformed_line_aborts_run() {
    let file = write_dataset(&[
        start_line(1, 1, 100, "L1", "A", "B"),
        "{{{ not json".to_string(),
    ]);

    let result = Pipeline::new(PipelineConfig::default()).run(file.path());
    assert!(result.is_err());
}

#[test]
fn test_wrong_extension_aborts_run() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(file, "{}", start_line(1, 1, 100, "L1", "A", "B")).unwrap();

    let result = Pipeline::new(PipelineConfig::default()).run(file.path());
    assert!(result.is_err());
}

#[test]
fn test_league_assignment_pinned_to_match_id_order() {
    // Matches arrive in the log out of order; aggregation still runs in
    // ascending match-id order, so A's league comes from match 1.
    let output = run(&[
        start_line(1, 2, 300, "L2", "A", "C"),
        end_line(2, 2, 400),
        start_line(3, 1, 100, "L1", "A", "B"),
        end_line(4, 1, 200),
    ]);

    assert_eq!(output.standings["A"].league_id, Some(EventId::from("L1")));
}
