//! Rating calculator trait
//!
//! This module defines the interface the rating period processor uses to
//! turn head-to-head results into new ratings.

use crate::types::RatingUpdate;

/// Trait for calculating rating changes after a head-to-head match
pub trait RatingCalculator: Send + Sync {
    /// Calculate the full breakdown of a rating update
    ///
    /// # Arguments
    /// * `initial_rating` - Current rating of the subject player
    /// * `opponent_rating` - Current rating of the opponent
    /// * `won` - Whether the subject won the match
    fn rating_change(&self, initial_rating: f64, opponent_rating: f64, won: bool) -> RatingUpdate;

    /// Calculate the subject's new, rounded rating
    fn update_rating(&self, initial_rating: f64, opponent_rating: f64, won: bool) -> i64 {
        self.rating_change(initial_rating, opponent_rating, won)
            .new_rating
    }

    /// Reconcile a rating against a previously known rating
    fn readjust_rating(
        &self,
        new_rating: f64,
        initial_rating: Option<f64>,
    ) -> crate::error::Result<f64>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
