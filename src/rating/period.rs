//! Rating periods
//!
//! A league publishes ratings once per period (a week of matches). This
//! module applies a period's results to a roster using any
//! [`RatingCalculator`].

use crate::error::{RatingError, Result};
use crate::rating::calculator::RatingCalculator;
use crate::types::{
    MatchResult, PeriodSummary, PlayerId, PlayerPeriodChange, Roster, UpdateMode,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Apply a list of `(opponent_rating, won)` results to a single player
///
/// Opponent ratings are taken as given. In snapshot mode every match is
/// rated against `rating` and the summed change is rounded once; in
/// sequential mode each match starts from the previous match's result.
pub fn apply_matches(
    calculator: &dyn RatingCalculator,
    rating: f64,
    matches: &[(f64, bool)],
    mode: UpdateMode,
) -> i64 {
    match mode {
        UpdateMode::Snapshot => {
            let total: f64 = matches
                .iter()
                .map(|&(opponent, won)| calculator.rating_change(rating, opponent, won).delta)
                .sum();
            (rating + total).round() as i64
        }
        UpdateMode::Sequential => {
            let current = matches.iter().fold(rating, |current, &(opponent, won)| {
                calculator.update_rating(current, opponent, won) as f64
            });
            current.round() as i64
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    delta: f64,
    wins: u32,
    losses: u32,
}

/// Processes the match results of one rating period
pub struct RatingPeriod {
    calculator: Arc<dyn RatingCalculator>,
    mode: UpdateMode,
}

impl RatingPeriod {
    pub fn new(calculator: Arc<dyn RatingCalculator>, mode: UpdateMode) -> Self {
        Self { calculator, mode }
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Apply `results` to `roster` and return the new ratings
    ///
    /// All results are checked before any rating is computed, so an invalid
    /// result leaves nothing half-applied.
    pub fn process(
        &self,
        period: u32,
        roster: &Roster,
        results: &[MatchResult],
    ) -> Result<PeriodSummary> {
        validate_results(roster, results)?;

        let tallies = match self.mode {
            UpdateMode::Snapshot => self.tally_snapshot(roster, results),
            UpdateMode::Sequential => self.tally_sequential(roster, results),
        };

        let mut ratings = HashMap::with_capacity(roster.len());
        for (player_id, rating) in roster {
            let delta = tallies.get(player_id).map_or(0.0, |tally| tally.delta);
            ratings.insert(player_id.clone(), (rating + delta).round() as i64);
        }

        let changes: Vec<PlayerPeriodChange> = tallies
            .into_iter()
            .map(|(player_id, tally)| {
                let old_rating = roster[&player_id];
                let new_rating = ratings[&player_id];
                PlayerPeriodChange {
                    player_id,
                    old_rating,
                    new_rating,
                    delta: new_rating as f64 - old_rating,
                    wins: tally.wins,
                    losses: tally.losses,
                }
            })
            .collect();

        info!(
            period,
            mode = %self.mode,
            matches = results.len(),
            players = changes.len(),
            "Processed rating period"
        );

        Ok(PeriodSummary {
            period,
            update_mode: self.mode,
            ratings,
            changes,
        })
    }

    fn tally_snapshot(
        &self,
        roster: &Roster,
        results: &[MatchResult],
    ) -> BTreeMap<PlayerId, Tally> {
        let mut tallies: BTreeMap<PlayerId, Tally> = BTreeMap::new();

        for result in results {
            let winner_rating = roster[&result.winner];
            let loser_rating = roster[&result.loser];

            let winner = self
                .calculator
                .rating_change(winner_rating, loser_rating, true);
            let loser = self
                .calculator
                .rating_change(loser_rating, winner_rating, false);

            let tally = tallies.entry(result.winner.clone()).or_default();
            tally.delta += winner.delta;
            tally.wins += 1;

            let tally = tallies.entry(result.loser.clone()).or_default();
            tally.delta += loser.delta;
            tally.losses += 1;
        }

        tallies
    }

    fn tally_sequential(
        &self,
        roster: &Roster,
        results: &[MatchResult],
    ) -> BTreeMap<PlayerId, Tally> {
        let mut current: HashMap<&str, f64> = roster
            .iter()
            .map(|(id, rating)| (id.as_str(), *rating))
            .collect();
        let mut tallies: BTreeMap<PlayerId, Tally> = BTreeMap::new();

        for result in results {
            let winner_rating = current[result.winner.as_str()];
            let loser_rating = current[result.loser.as_str()];

            let winner_new = self
                .calculator
                .update_rating(winner_rating, loser_rating, true) as f64;
            let loser_new = self
                .calculator
                .update_rating(loser_rating, winner_rating, false) as f64;

            debug!(
                winner = %result.winner,
                loser = %result.loser,
                winner_new,
                loser_new,
                "Applied match result"
            );

            current.insert(result.winner.as_str(), winner_new);
            current.insert(result.loser.as_str(), loser_new);

            tallies.entry(result.winner.clone()).or_default().wins += 1;
            tallies.entry(result.loser.clone()).or_default().losses += 1;
        }

        for (player_id, tally) in tallies.iter_mut() {
            tally.delta = current[player_id.as_str()] - roster[player_id];
        }

        tallies
    }
}

fn validate_results(roster: &Roster, results: &[MatchResult]) -> Result<()> {
    for result in results {
        if result.winner == result.loser {
            return Err(RatingError::InvalidMatchResult {
                reason: format!("{} cannot play against themselves", result.winner),
            }
            .into());
        }

        for player_id in [&result.winner, &result.loser] {
            if !roster.contains_key(player_id) {
                return Err(RatingError::PlayerNotFound {
                    player_id: player_id.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}
