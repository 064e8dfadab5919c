//! Inverse-log rating engine
//!
//! A win or loss moves a rating by one of two amounts:
//! - the expected rating change (ERC) when the result matches the ratings
//!   (stronger player wins, weaker player loses);
//! - the upset rating change (URC) when it doesn't.
//!
//! Both shrink or grow with the handicap between the players. URC is ERC
//! scaled by `(1 - p) / p` where `p` is the modelled upset probability, so
//! rarer upsets move ratings further.

use crate::config::rating::{
    RatingConfig, DEFAULT_ERC_SCALE, DEFAULT_ERC_SENSITIVITY, DEFAULT_HANDICAP_DIVISOR,
    DEFAULT_MAX_HANDICAP, DEFAULT_UPSET_SCALE, DEFAULT_UPSET_SENSITIVITY,
};
use crate::curve::CurveParams;
use crate::error::{RatingError, Result};
use crate::rating::calculator::RatingCalculator;
use crate::rating::handicap::HandicapDifference;
use crate::types::RatingUpdate;
use tracing::{debug, warn};

/// Rating calculator driven by the inverse-log curve
#[derive(Debug, Clone)]
pub struct RatingEngine {
    erc_curve: CurveParams,
    upset_curve: CurveParams,
    handicap_divisor: f64,
    max_handicap: f64,
    config: RatingConfig,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            erc_curve: CurveParams::new_unchecked(DEFAULT_ERC_SCALE, DEFAULT_ERC_SENSITIVITY),
            upset_curve: CurveParams::new_unchecked(
                DEFAULT_UPSET_SCALE,
                DEFAULT_UPSET_SENSITIVITY,
            ),
            handicap_divisor: DEFAULT_HANDICAP_DIVISOR,
            max_handicap: DEFAULT_MAX_HANDICAP,
            config: RatingConfig::default(),
        }
    }
}

impl RatingEngine {
    /// Create a new engine from validated configuration
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            erc_curve: config.erc_curve()?,
            upset_curve: config.upset_curve()?,
            handicap_divisor: config.handicap_divisor,
            max_handicap: config.max_handicap,
            config,
        })
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Clamped handicap of the subject against the opponent
    pub fn handicap(&self, initial_rating: f64, opponent_rating: f64) -> HandicapDifference {
        HandicapDifference::from_ratings(
            initial_rating,
            opponent_rating,
            self.handicap_divisor,
            self.max_handicap,
        )
    }

    /// Expected rating change for a handicap magnitude
    pub fn expected_change(&self, handicap: &HandicapDifference) -> f64 {
        self.erc_curve.evaluate(handicap.magnitude())
    }

    /// Modelled probability that the weaker player wins
    pub fn upset_probability(&self, handicap: &HandicapDifference) -> f64 {
        self.upset_curve.evaluate(handicap.magnitude()) / 100.0
    }

    /// Rounded rating change applied for an upset
    pub fn upset_change(&self, handicap: &HandicapDifference) -> f64 {
        let erc = self.expected_change(handicap);
        let p = self.upset_probability(handicap);
        (erc * (1.0 - p) / p).round()
    }
}

impl RatingCalculator for RatingEngine {
    fn rating_change(
        &self,
        initial_rating: f64,
        opponent_rating: f64,
        won: bool,
    ) -> RatingUpdate {
        let handicap = self.handicap(initial_rating, opponent_rating);
        let erc = self.expected_change(&handicap);
        let upset_probability = self.upset_probability(&handicap);
        let urc = self.upset_change(&handicap);

        // Beating a stronger player or losing to a weaker-or-equal one.
        let upset = won == handicap.opponent_stronger();
        let magnitude = if upset { urc } else { erc };
        let delta = if won { magnitude } else { -magnitude };
        let new_rating = (initial_rating + delta).round() as i64;

        debug!(
            initial_rating,
            opponent_rating,
            won,
            handicap = handicap.value(),
            erc,
            urc,
            upset,
            new_rating,
            "Calculated rating update"
        );

        RatingUpdate {
            initial_rating,
            opponent_rating,
            won,
            handicap: handicap.value(),
            erc,
            upset_probability,
            urc,
            upset,
            delta,
            new_rating,
        }
    }

    fn readjust_rating(&self, new_rating: f64, initial_rating: Option<f64>) -> Result<f64> {
        let branch = match initial_rating {
            None => "no prior rating",
            Some(_) => "prior rating exists",
        };

        warn!(
            new_rating,
            ?initial_rating,
            "Rating readjustment requested but not implemented ({})",
            branch
        );

        Err(RatingError::NotImplemented {
            branch: branch.to_string(),
        }
        .into())
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
