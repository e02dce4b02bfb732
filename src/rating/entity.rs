//! Rating state carried by every team and player
//!
//! The engine reads and mutates these records; their owners (teams, players,
//! the match processor) decide where they live and how long.

use crate::rating::profile::RatingProfile;
use crate::types::EntityKind;
use crate::utils::mean;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Rating every entity starts from
pub const DEFAULT_RATING: f64 = 1200.0;

/// Number of history entries kept unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Window used for form and roster stability calculations
pub const RECENT_WINDOW: usize = 10;

/// One committed rating change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the match was played; `None` if the source did not say
    pub timestamp: Option<DateTime<Utc>>,
    pub delta: f64,
}

/// Rating, experience and recent history of a team or player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedEntity {
    pub kind: EntityKind,
    pub rating: f64,
    pub match_count: u32,
    /// Oldest first, bounded by the engine's history limit
    pub history: VecDeque<HistoryEntry>,
}

impl RatedEntity {
    /// Create an unrated entity at the default rating
    pub fn new(kind: EntityKind) -> Self {
        Self::with_rating(kind, DEFAULT_RATING)
    }

    pub fn team() -> Self {
        Self::new(EntityKind::Team)
    }

    pub fn player() -> Self {
        Self::new(EntityKind::Player)
    }

    /// Create an entity with a seeded rating and no history
    pub fn with_rating(kind: EntityKind, rating: f64) -> Self {
        Self {
            kind,
            rating,
            match_count: 0,
            history: VecDeque::new(),
        }
    }

    pub fn profile(&self) -> &'static RatingProfile {
        RatingProfile::for_kind(self.kind)
    }

    /// Timestamp of the most recent history entry, if it has one
    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        self.history.back().and_then(|entry| entry.timestamp)
    }

    /// Deltas of the last `count` history entries, oldest first
    pub fn recent_deltas(&self, count: usize) -> Vec<f64> {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip).map(|entry| entry.delta).collect()
    }

    /// Mean rating change over the recent window; 0.0 with fewer than two entries
    pub fn current_form(&self) -> f64 {
        if self.history.len() < 2 {
            return 0.0;
        }
        mean(&self.recent_deltas(RECENT_WINDOW))
    }

    /// Apply a rating change and record it, evicting the oldest entries past `history_limit`
    pub fn record(&mut self, delta: f64, timestamp: Option<DateTime<Utc>>, history_limit: usize) {
        self.rating += delta;
        self.match_count += 1;
        self.history.push_back(HistoryEntry { timestamp, delta });

        while self.history.len() > history_limit {
            self.history.pop_front();
        }
    }
}
