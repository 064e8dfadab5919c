//! Test fixtures for integration testing

use league_rating::types::{MatchResult, Roster};

/// Ratings for a small four-player league
pub fn league_roster() -> Roster {
    [
        ("ana", 1720.0),
        ("ben", 1540.0),
        ("chloe", 1500.0),
        ("dev", 1260.0),
    ]
    .into_iter()
    .map(|(id, rating)| (id.to_string(), rating))
    .collect()
}

/// One week of results for [`league_roster`], including two upsets
pub fn week_results() -> Vec<MatchResult> {
    vec![
        MatchResult::new("ana", "ben"),
        MatchResult::new("chloe", "ana"),
        MatchResult::new("ben", "dev"),
        MatchResult::new("dev", "chloe"),
    ]
}
