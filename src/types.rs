//! Common types used throughout the rating service

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Unique identifier for players
pub type PlayerId = String;

/// Current ratings of a league's players
pub type Roster = HashMap<PlayerId, f64>;

/// How the matches of a rating period are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Every match is rated against the ratings at the start of the period
    #[default]
    Snapshot,
    /// Matches are applied in order against running ratings
    Sequential,
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateMode::Snapshot => write!(f, "snapshot"),
            UpdateMode::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snapshot" => Ok(UpdateMode::Snapshot),
            "sequential" => Ok(UpdateMode::Sequential),
            other => Err(format!("unknown update mode: {}", other)),
        }
    }
}

/// Outcome of a single head-to-head match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

impl MatchResult {
    pub fn new(winner: impl Into<PlayerId>, loser: impl Into<PlayerId>) -> Self {
        Self {
            winner: winner.into(),
            loser: loser.into(),
        }
    }
}

/// Full breakdown of a single rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub initial_rating: f64,
    pub opponent_rating: f64,
    pub won: bool,
    /// Clamped skill gap in handicap units (positive = opponent stronger)
    pub handicap: f64,
    /// Expected rating change
    pub erc: f64,
    pub upset_probability: f64,
    /// Upset rating change (rounded)
    pub urc: f64,
    /// Whether the outcome contradicted the ratings
    pub upset: bool,
    /// Signed change applied before final rounding
    pub delta: f64,
    pub new_rating: i64,
}

/// Rating movement of one player over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPeriodChange {
    pub player_id: PlayerId,
    pub old_rating: f64,
    pub new_rating: i64,
    pub delta: f64,
    pub wins: u32,
    pub losses: u32,
}

/// Result of processing a rating period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Period number (e.g. league week)
    pub period: u32,
    pub update_mode: UpdateMode,
    pub ratings: HashMap<PlayerId, i64>,
    /// Changes for players who played at least one match, sorted by player id
    pub changes: Vec<PlayerPeriodChange>,
}
