//! Error types for the rating service
//!
//! The rating engine itself is total over finite floats and never fails.
//! Errors only arise at the boundary: resolving teams, reading match input,
//! loading configuration.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: u64 },

    #[error("Invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: u64, reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
