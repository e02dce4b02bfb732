//! Rating system configuration

use crate::error::RatingError;
use crate::types::MatchImportance;
use serde::{Deserialize, Serialize};

/// Base K-factor multipliers per tournament tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceMultipliers {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub qualifier: f64,
    pub league: f64,
    /// Applied to tags outside the known tiers
    pub unrecognized: f64,
}

impl Default for ImportanceMultipliers {
    fn default() -> Self {
        Self {
            s: 1.5,
            a: 1.2,
            b: 1.0,
            c: 0.8,
            qualifier: 1.1,
            league: 0.9,
            unrecognized: 1.0,
        }
    }
}

impl ImportanceMultipliers {
    /// Look up the multiplier for a tier
    pub fn get(&self, importance: MatchImportance) -> f64 {
        match importance {
            MatchImportance::S => self.s,
            MatchImportance::A => self.a,
            MatchImportance::B => self.b,
            MatchImportance::C => self.c,
            MatchImportance::Qualifier => self.qualifier,
            MatchImportance::League => self.league,
            MatchImportance::Unrecognized => self.unrecognized,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("s", self.s),
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("qualifier", self.qualifier),
            ("league", self.league),
            ("unrecognized", self.unrecognized),
        ]
        .into_iter()
    }
}

/// Parameters of the ELO rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub base_k_factor: f64,
    /// Days of inactivity before decay kicks in
    pub decay_threshold_days: i64,
    /// Length of one decay step once past the threshold
    pub decay_period_days: i64,
    /// Fraction of the distance to the baseline kept per decay step
    pub decay_factor: f64,
    /// Starting rating of entities the engine creates and the value decay regresses toward
    pub baseline_rating: f64,
    /// Maximum rating history entries kept per entity
    pub history_limit: usize,
    pub importance_multipliers: ImportanceMultipliers,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            base_k_factor: 32.0,
            decay_threshold_days: 365,
            decay_period_days: 30,
            decay_factor: 0.95,
            baseline_rating: 1200.0,
            history_limit: 100,
            importance_multipliers: ImportanceMultipliers::default(),
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.base_k_factor > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Base K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.decay_threshold_days < 0 {
            return Err(RatingError::ConfigurationError {
                message: "Decay threshold must be non-negative".to_string(),
            }
            .into());
        }

        if self.decay_period_days <= 0 {
            return Err(RatingError::ConfigurationError {
                message: "Decay period must be greater than 0".to_string(),
            }
            .into());
        }

        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(RatingError::ConfigurationError {
                message: format!("Decay factor must be in (0, 1], got {}", self.decay_factor),
            }
            .into());
        }

        if !self.baseline_rating.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Baseline rating must be finite".to_string(),
            }
            .into());
        }

        if self.history_limit == 0 {
            return Err(RatingError::ConfigurationError {
                message: "History limit must be greater than 0".to_string(),
            }
            .into());
        }

        for (tier, multiplier) in self.importance_multipliers.iter() {
            if !(multiplier > 0.0) {
                return Err(RatingError::ConfigurationError {
                    message: format!("Multiplier for tier '{}' must be positive", tier),
                }
                .into());
            }
        }

        Ok(())
    }
}
