//! Handicap difference between two players
//!
//! The rating gap is expressed in handicap units and bounded so the rating
//! curves are only evaluated on their tuned domain.

use crate::config::rating::DEFAULT_MAX_HANDICAP;
use crate::error::RatingError;
use serde::{Deserialize, Serialize};

/// Clamp a raw handicap to `[-max_handicap, max_handicap]`
///
/// # Panics
/// Panics if `max_handicap` is negative or NaN.
pub fn clamp_handicap(handicap: f64, max_handicap: f64) -> f64 {
    handicap.clamp(-max_handicap, max_handicap)
}

/// Skill gap from the subject's point of view, positive when the opponent
/// is rated higher
///
/// Always within `[-8, 8]`; deserialized values outside that range are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct HandicapDifference(f64);

impl TryFrom<f64> for HandicapDifference {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.abs() > DEFAULT_MAX_HANDICAP {
            return Err(RatingError::invalid_parameter("handicap", value));
        }
        Ok(Self(value))
    }
}

impl HandicapDifference {
    /// Compute the clamped handicap between a subject and an opponent
    pub fn from_ratings(
        subject_rating: f64,
        opponent_rating: f64,
        divisor: f64,
        max_handicap: f64,
    ) -> Self {
        let rating_diff = opponent_rating - subject_rating;
        Self(clamp_handicap(rating_diff / divisor, max_handicap))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Absolute size of the gap, the input to the rating curves
    pub fn magnitude(&self) -> f64 {
        self.0.abs()
    }

    /// Strictly positive gap; equal ratings are not "stronger"
    pub fn opponent_stronger(&self) -> bool {
        self.0 > 0.0
    }
}
