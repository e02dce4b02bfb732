//! Esports ELO - rating engine and match predictor for esports teams and players
//!
//! This crate provides an ELO rating system with dynamic K-factors,
//! inactivity decay and outcome prediction, plus a batch processor that
//! applies completed matches to stored team ratings.

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use collector::{InMemoryTeamStore, MatchProcessor, TeamStore};
pub use models::{Player, Team};
pub use rating::{EloEngine, RatedEntity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
