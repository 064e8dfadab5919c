//! League Rating - inverse-log curve rating updates for head-to-head matches
//!
//! This crate computes a player's new rating after a match from the two
//! players' current ratings and the outcome, and applies whole rating
//! periods to a roster. Persistence of ratings is left to the caller.

pub mod config;
pub mod curve;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use curve::{inverse_log_curve, CurveParams};
pub use rating::{RatingCalculator, RatingEngine, RatingPeriod};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
