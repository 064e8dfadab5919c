//! Error types for the rating service
//!
//! Fallible operations return `anyhow::Result`; the typed variants below
//! can be recovered with `downcast_ref::<RatingError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating calculations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: String, value: f64 },

    #[error("Not implemented: {branch}")]
    NotImplemented { branch: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Invalid match result: {reason}")]
    InvalidMatchResult { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RatingError {
    pub(crate) fn invalid_parameter(name: &str, value: f64) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
        }
    }
}
