//! Integration tests for the league-rating crate
//!
//! These tests drive the public API end to end:
//! - configuration loading into a rating engine
//! - single match updates through the calculator trait
//! - whole rating periods against a roster

mod fixtures;

use league_rating::config::AppConfig;
use league_rating::rating::{RatingCalculator, RatingEngine, RatingPeriod};
use league_rating::types::{MatchResult, UpdateMode};
use league_rating::RatingError;
use std::sync::Arc;

use fixtures::{league_roster, week_results};

fn default_engine() -> Arc<dyn RatingCalculator> {
    Arc::new(RatingEngine::new(AppConfig::default().rating).unwrap())
}

#[test]
fn test_week_snapshot_workflow() {
    let period = RatingPeriod::new(default_engine(), UpdateMode::Snapshot);
    let summary = period
        .process(7, &league_roster(), &week_results())
        .unwrap();

    assert_eq!(summary.period, 7);
    assert_eq!(summary.ratings.len(), 4);

    // ana: expected win over ben, upset loss to chloe
    assert_eq!(summary.ratings["ana"], 1713);
    assert_eq!(summary.ratings["ben"], 1539);
    // chloe's upset win and upset loss cancel out
    assert_eq!(summary.ratings["chloe"], 1500);
    assert_eq!(summary.ratings["dev"], 1268);

    let ids: Vec<&str> = summary
        .changes
        .iter()
        .map(|change| change.player_id.as_str())
        .collect();
    assert_eq!(ids, vec!["ana", "ben", "chloe", "dev"]);

    for change in &summary.changes {
        assert_eq!(change.wins + change.losses, 2);
    }
}

#[test]
fn test_summary_serializes_to_json() {
    let period = RatingPeriod::new(default_engine(), UpdateMode::Snapshot);
    let summary = period
        .process(1, &league_roster(), &week_results())
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["period"], 1);
    assert_eq!(json["update_mode"], "snapshot");
    assert_eq!(json["ratings"]["dev"], 1268);
}

#[test]
fn test_sequential_replays_running_ratings() {
    let engine = default_engine();
    let roster = league_roster();
    let results = week_results();

    let sequential = RatingPeriod::new(engine.clone(), UpdateMode::Sequential)
        .process(1, &roster, &results)
        .unwrap();

    // Replay by hand with running ratings
    let mut current = roster.clone();
    for MatchResult { winner, loser } in &results {
        let winner_rating = current[winner];
        let loser_rating = current[loser];
        let winner_new = engine.update_rating(winner_rating, loser_rating, true);
        let loser_new = engine.update_rating(loser_rating, winner_rating, false);
        current.insert(winner.clone(), winner_new as f64);
        current.insert(loser.clone(), loser_new as f64);
    }

    for (player_id, rating) in &current {
        assert_eq!(sequential.ratings[player_id], *rating as i64);
    }
}

#[test]
fn test_configured_curve_changes_results() {
    let config = AppConfig::from_toml(
        r#"
        [rating]
        erc_scale = 12.0
        "#,
    )
    .unwrap();
    let engine = RatingEngine::new(config.rating).unwrap();

    // At equal ratings the expected change is the curve scale
    assert_eq!(engine.update_rating(1500.0, 1500.0, true), 1512);
}

#[test]
fn test_invalid_results_leave_no_partial_update() {
    let period = RatingPeriod::new(default_engine(), UpdateMode::Snapshot);
    let mut results = week_results();
    results.push(MatchResult::new("ana", "zoe"));

    let err = period.process(1, &league_roster(), &results).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RatingError>(),
        Some(RatingError::PlayerNotFound { player_id }) if player_id == "zoe"
    ));
}

#[test]
fn test_readjust_is_reported_not_guessed() {
    let engine = default_engine();
    assert!(engine.readjust_rating(1509.0, None).is_err());
    assert!(engine.readjust_rating(1509.0, Some(1500.0)).is_err());
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = default_engine();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine.update_rating(1500.0, 1400.0 + i as f64 * 100.0, true)
            })
        })
        .collect();

    let ratings: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ratings[1], 1509);
    assert_eq!(ratings, vec![1508, 1509, 1511, 1513]);
}
