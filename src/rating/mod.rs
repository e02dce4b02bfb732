//! ELO rating system for esports teams and players
//!
//! This module provides the rating engine, the per-kind rating curves,
//! the rating state carried by each entity, and distribution statistics.

pub mod engine;
pub mod entity;
pub mod profile;
pub mod stats;

// Re-export commonly used types
pub use engine::EloEngine;
pub use entity::{HistoryEntry, RatedEntity, DEFAULT_HISTORY_LIMIT, DEFAULT_RATING};
pub use profile::{RatingProfile, PLAYER_PROFILE, TEAM_PROFILE};
pub use stats::{RatingDistribution, RatingTier};
