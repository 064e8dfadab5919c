//! Rating system configuration
//!
//! The curve-shape constants were tuned empirically for the league; they are
//! kept as named values so they can be adjusted without touching the engine.

use crate::curve::CurveParams;
use crate::error::{RatingError, Result};
use crate::types::UpdateMode;
use serde::{Deserialize, Serialize};

/// Baseline scale of the expected rating change curve
pub const DEFAULT_ERC_SCALE: f64 = 9.0;

/// Sensitivity of the expected rating change curve to the handicap
pub const DEFAULT_ERC_SENSITIVITY: f64 = 0.05;

/// Baseline scale of the upset probability curve (in percent)
pub const DEFAULT_UPSET_SCALE: f64 = 50.0;

/// Sensitivity of the upset probability curve to the handicap
pub const DEFAULT_UPSET_SENSITIVITY: f64 = 1.1 * 0.01;

/// Rating points per handicap unit
pub const DEFAULT_HANDICAP_DIVISOR: f64 = 100.0;

/// Largest handicap magnitude fed into the curves
pub const DEFAULT_MAX_HANDICAP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub erc_scale: f64,
    pub erc_sensitivity: f64,
    pub upset_scale: f64,
    pub upset_sensitivity: f64,
    pub handicap_divisor: f64,
    pub max_handicap: f64,
    /// How a rating period applies its match results
    pub update_mode: UpdateMode,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            erc_scale: DEFAULT_ERC_SCALE,
            erc_sensitivity: DEFAULT_ERC_SENSITIVITY,
            upset_scale: DEFAULT_UPSET_SCALE,
            upset_sensitivity: DEFAULT_UPSET_SENSITIVITY,
            handicap_divisor: DEFAULT_HANDICAP_DIVISOR,
            max_handicap: DEFAULT_MAX_HANDICAP,
            update_mode: UpdateMode::default(),
        }
    }
}

impl RatingConfig {
    /// Curve used for the expected rating change
    pub fn erc_curve(&self) -> Result<CurveParams> {
        CurveParams::new(self.erc_scale, self.erc_sensitivity)
    }

    /// Curve used for the upset probability
    pub fn upset_curve(&self) -> Result<CurveParams> {
        CurveParams::new(self.upset_scale, self.upset_sensitivity)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.erc_curve()?;
        self.upset_curve()?;

        if !self.handicap_divisor.is_finite() || self.handicap_divisor <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Handicap divisor must be positive, got {}",
                    self.handicap_divisor
                ),
            }
            .into());
        }

        if !self.max_handicap.is_finite()
            || self.max_handicap <= 0.0
            || self.max_handicap > DEFAULT_MAX_HANDICAP
        {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Max handicap must be in (0, {}], got {}",
                    DEFAULT_MAX_HANDICAP, self.max_handicap
                ),
            }
            .into());
        }

        // Upset probability is the curve value in percent.
        if self.upset_scale >= 100.0 {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Upset scale must be below 100 percent, got {}",
                    self.upset_scale
                ),
            }
            .into());
        }

        Ok(())
    }
}
