//! Rating curves for the two kinds of rated entity
//!
//! Teams and players share the same update algorithm but use different
//! constants. A `RatingProfile` bundles those constants so the engine never
//! branches on entity kind at the call site.

use crate::types::{EntityKind, MatchImportance};

/// Kind-specific constants used by the K-factor and confidence calculations
#[derive(Debug, Clone, PartialEq)]
pub struct RatingProfile {
    /// `(upper_bound, factor)` pairs checked in order; the first bound the
    /// rating falls below wins
    pub rating_factor_bands: [(f64, f64); 3],
    /// Factor for ratings at or above the last band bound
    pub elite_rating_factor: f64,
    /// Experience factor never drops below this
    pub experience_floor: f64,
    /// Match count at which the experience factor would reach zero
    pub experience_divisor: f64,
    /// Extra multiplier stacked on top of the S tier lookup
    pub top_tier_boost: f64,
    /// Extra multiplier stacked on top of the A tier lookup
    pub second_tier_boost: f64,
    /// Whether recent rating volatility damps or amplifies K
    pub uses_roster_stability: bool,
    /// `(match_count_below, confidence)` pairs checked in order
    pub confidence_steps: [(u32, f64); 3],
    /// Confidence once every step threshold has been passed
    pub full_confidence: f64,
}

/// Player curve: steeper for newcomers, no roster adjustment
pub static PLAYER_PROFILE: RatingProfile = RatingProfile {
    rating_factor_bands: [(1200.0, 1.5), (2000.0, 1.2), (2400.0, 1.0)],
    elite_rating_factor: 0.8,
    experience_floor: 0.5,
    experience_divisor: 1000.0,
    top_tier_boost: 1.0,
    second_tier_boost: 1.0,
    uses_roster_stability: false,
    confidence_steps: [(10, 0.3), (50, 0.6), (200, 0.8)],
    full_confidence: 1.0,
};

/// Team curve: higher volatility in top tiers, roster stability applies
pub static TEAM_PROFILE: RatingProfile = RatingProfile {
    rating_factor_bands: [(1200.0, 1.3), (2000.0, 1.1), (2400.0, 1.0)],
    elite_rating_factor: 0.8,
    experience_floor: 0.6,
    experience_divisor: 500.0,
    top_tier_boost: 1.3,
    second_tier_boost: 1.1,
    uses_roster_stability: true,
    confidence_steps: [(20, 0.3), (100, 0.6), (500, 0.8)],
    full_confidence: 1.0,
};

impl RatingProfile {
    /// Profile for the given entity kind
    pub fn for_kind(kind: EntityKind) -> &'static RatingProfile {
        match kind {
            EntityKind::Player => &PLAYER_PROFILE,
            EntityKind::Team => &TEAM_PROFILE,
        }
    }

    pub fn rating_factor(&self, rating: f64) -> f64 {
        self.rating_factor_bands
            .iter()
            .find(|(upper, _)| rating < *upper)
            .map(|(_, factor)| *factor)
            .unwrap_or(self.elite_rating_factor)
    }

    pub fn experience_factor(&self, match_count: u32) -> f64 {
        (1.0 - match_count as f64 / self.experience_divisor).max(self.experience_floor)
    }

    /// Kind-specific boost stacked on the configured tier multiplier
    pub fn tier_boost(&self, importance: MatchImportance) -> f64 {
        match importance {
            MatchImportance::S => self.top_tier_boost,
            MatchImportance::A => self.second_tier_boost,
            _ => 1.0,
        }
    }

    pub fn confidence(&self, match_count: u32) -> f64 {
        self.confidence_steps
            .iter()
            .find(|(below, _)| match_count < *below)
            .map(|(_, confidence)| *confidence)
            .unwrap_or(self.full_confidence)
    }
}
