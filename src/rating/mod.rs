//! Head-to-head rating updates driven by the inverse-log curve
//!
//! This module provides the handicap bounding, the rating engine, and the
//! period processor that applies a week of results to a roster.

pub mod calculator;
pub mod engine;
pub mod handicap;
pub mod period;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use engine::RatingEngine;
pub use handicap::{clamp_handicap, HandicapDifference};
pub use period::{apply_matches, RatingPeriod};
