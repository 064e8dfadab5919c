//! Inverse-logarithm curve used to shape rating changes
//!
//! `curve(x, a, b) = 1 / log10(10^(1/a) + x * b)`
//!
//! At `x = 0` the curve evaluates to `a`; it decays towards zero as `x`
//! grows, quickly at first and then slowly. `b` controls how fast.

use crate::error::{RatingError, Result};
use serde::Serialize;

/// Evaluate the inverse-log curve for caller-supplied parameters
///
/// # Errors
/// Returns [`RatingError::InvalidParameter`] when `a` or `b` is not a
/// finite positive number, or when `x` is negative or not finite.
pub fn inverse_log_curve(x: f64, a: f64, b: f64) -> Result<f64> {
    let params = CurveParams::new(a, b)?;
    if !x.is_finite() || x < 0.0 {
        return Err(RatingError::invalid_parameter("x", x).into());
    }
    Ok(params.evaluate(x))
}

/// A validated pair of curve shape parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveParams {
    /// Baseline scale (`a`), the curve's value at `x = 0`
    scale: f64,
    /// Sensitivity to the input (`b`)
    sensitivity: f64,
}

impl CurveParams {
    /// Create a parameter pair, rejecting non-positive or non-finite values
    pub fn new(scale: f64, sensitivity: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RatingError::invalid_parameter("scale", scale).into());
        }
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(RatingError::invalid_parameter("sensitivity", sensitivity).into());
        }
        Ok(Self { scale, sensitivity })
    }

    /// Build a pair from constants already known to be valid
    pub(crate) const fn new_unchecked(scale: f64, sensitivity: f64) -> Self {
        Self { scale, sensitivity }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Evaluate the curve at `x`
    ///
    /// `x` must be non-negative. With validated parameters the log argument
    /// is then strictly greater than 1 and the result is finite and positive.
    /// [`inverse_log_curve`] is the checked entry point for outside callers.
    pub(crate) fn evaluate(&self, x: f64) -> f64 {
        debug_assert!(
            x >= 0.0 || x.is_nan(),
            "curve input must be non-negative, got {}",
            x
        );
        1.0 / (10f64.powf(1.0 / self.scale) + x * self.sensitivity).log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_curve_at_zero_is_scale() {
        assert_close(inverse_log_curve(0.0, 9.0, 0.05).unwrap(), 9.0);
        assert_close(inverse_log_curve(0.0, 50.0, 0.011).unwrap(), 50.0);
    }

    #[test]
    fn test_curve_known_values() {
        assert_close(
            inverse_log_curve(1.0, 9.0, 0.05).unwrap(),
            7.836575726232567,
        );
        assert_close(
            inverse_log_curve(8.0, 9.0, 0.05).unwrap(),
            4.380494030980278,
        );
        assert_close(
            inverse_log_curve(8.0, 50.0, 0.011).unwrap(),
            18.166939077911426,
        );
    }

    #[test]
    fn test_curve_positive_on_rating_domain() {
        for (a, b) in [(9.0, 0.05), (50.0, 0.011), (9.0, 0.011), (50.0, 0.05)] {
            for step in 0..=80 {
                let x = step as f64 / 10.0;
                let value = inverse_log_curve(x, a, b).unwrap();
                assert!(value.is_finite() && value > 0.0, "curve({}, {}, {})", x, a, b);
            }
        }
    }

    #[test]
    fn test_curve_decreasing_in_x() {
        let params = CurveParams::new(9.0, 0.05).unwrap();
        let mut previous = params.evaluate(0.0);
        for step in 1..=80 {
            let current = params.evaluate(step as f64 / 10.0);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -9.0, f64::NAN, f64::INFINITY] {
            let err = inverse_log_curve(1.0, scale, 0.05).unwrap_err();
            match err.downcast_ref::<RatingError>() {
                Some(RatingError::InvalidParameter { name, .. }) => assert_eq!(name, "scale"),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_sensitivity() {
        let err = inverse_log_curve(1.0, 9.0, 0.0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::InvalidParameter { name, .. }) if name == "sensitivity"
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(inverse_log_curve(-0.5, 9.0, 0.05).is_err());
        assert!(inverse_log_curve(f64::NAN, 9.0, 0.05).is_err());
    }

    #[test]
    fn test_params_accessors() {
        let params = CurveParams::new(50.0, 0.011).unwrap();
        assert_eq!(params.scale(), 50.0);
        assert_eq!(params.sensitivity(), 0.011);
    }
}
