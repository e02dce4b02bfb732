//! ELO rating engine
//!
//! Computes expected scores, dynamic K-factors, inactivity decay, rating
//! updates and match predictions. The engine holds only its configuration;
//! every piece of mutable state lives in the `RatedEntity` records passed in.
//!
//! Callers must not run two updates against the same entity at once. The
//! read-compute-write sequence in [`EloEngine::update_rating`] takes `&mut`
//! access, so a single owner processing matches in order is enough.

use crate::config::RatingConfig;
use crate::rating::entity::{RatedEntity, RECENT_WINDOW};
use crate::types::{
    EntityKind, MatchImportance, MatchPrediction, MatchRatingChange, PredictionLabel, Side,
};
use crate::utils::std_dev;
use chrono::{DateTime, Utc};
use skillratings::elo::{expected_score, EloRating};
use tracing::debug;

/// Minimum history length before roster stability is considered
const ROSTER_MIN_HISTORY: usize = 5;

/// Minimum recent deltas needed to measure volatility
const ROSTER_MIN_DELTAS: usize = 3;

/// ELO engine with dynamic K-factor and inactivity decay
#[derive(Debug, Clone, Default)]
pub struct EloEngine {
    config: RatingConfig,
}

impl EloEngine {
    /// Create a new engine from a validated configuration
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Unrated entity starting at the configured baseline
    pub fn new_entity(&self, kind: EntityKind) -> RatedEntity {
        RatedEntity::with_rating(kind, self.config.baseline_rating)
    }

    /// Probability that a side rated `rating_a` beats a side rated `rating_b`
    pub fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        let (expected_a, _) = expected_score(
            &EloRating { rating: rating_a },
            &EloRating { rating: rating_b },
        );
        expected_a
    }

    /// Sensitivity of the entity's rating to a single match
    ///
    /// `base × rating factor × tier multiplier × experience × roster stability`,
    /// with every factor taken from the entity's profile.
    pub fn k_factor(&self, entity: &RatedEntity, importance: MatchImportance) -> f64 {
        let profile = entity.profile();

        let rating_factor = profile.rating_factor(entity.rating);
        let tournament_multiplier =
            self.config.importance_multipliers.get(importance) * profile.tier_boost(importance);
        let experience_factor = profile.experience_factor(entity.match_count);
        let roster_factor = if profile.uses_roster_stability {
            self.roster_stability_factor(entity)
        } else {
            1.0
        };

        self.config.base_k_factor
            * rating_factor
            * tournament_multiplier
            * experience_factor
            * roster_factor
    }

    /// Volatility heuristic standing in for real roster tracking
    ///
    /// Large recent swings suggest stand-ins or lineup churn and damp K;
    /// a steady record amplifies it.
    pub fn roster_stability_factor(&self, entity: &RatedEntity) -> f64 {
        if entity.history.len() < ROSTER_MIN_HISTORY {
            return 1.0;
        }

        let deltas = entity.recent_deltas(RECENT_WINDOW);
        if deltas.len() < ROSTER_MIN_DELTAS {
            return 1.0;
        }

        let volatility = std_dev(&deltas);
        if volatility > 50.0 {
            0.7
        } else if volatility > 30.0 {
            0.85
        } else if volatility < 15.0 {
            1.2
        } else {
            1.0
        }
    }

    /// Rating after regressing toward the baseline for inactivity up to `as_of`
    ///
    /// Returns the current rating unchanged when there is no history, no
    /// reference date, or the latest history entry carries no timestamp.
    pub fn decayed_rating(&self, entity: &RatedEntity, as_of: Option<DateTime<Utc>>) -> f64 {
        let (Some(as_of), Some(last_played)) = (as_of, entity.last_played()) else {
            return entity.rating;
        };

        let days_elapsed = (as_of - last_played).num_days();
        if days_elapsed <= self.config.decay_threshold_days {
            return entity.rating;
        }

        let periods =
            (days_elapsed - self.config.decay_threshold_days) / self.config.decay_period_days;
        let factor = self
            .config
            .decay_factor
            .powi(i32::try_from(periods).unwrap_or(i32::MAX));

        let baseline = self.config.baseline_rating;
        baseline + (entity.rating - baseline) * factor
    }

    /// Apply inactivity decay to the entity in place
    pub fn apply_decay(&self, entity: &mut RatedEntity, as_of: Option<DateTime<Utc>>) {
        let decayed = self.decayed_rating(entity, as_of);
        if decayed != entity.rating {
            debug!(
                "Decayed {} rating {:.1} -> {:.1}",
                entity.kind, entity.rating, decayed
            );
            entity.rating = decayed;
        }
    }

    /// Update one entity's rating after a match and return the new rating
    ///
    /// Decay is applied first, using only history recorded before this match,
    /// so both the expectation and the K-factor see the rating as of
    /// `match_date`. `actual_score` is used as given: 1.0 win, 0.5 draw,
    /// 0.0 loss.
    pub fn update_rating(
        &self,
        entity: &mut RatedEntity,
        opponent_rating: f64,
        actual_score: f64,
        match_date: Option<DateTime<Utc>>,
        importance: MatchImportance,
    ) -> f64 {
        self.apply_decay(entity, match_date);

        let expected = self.expected_score(entity.rating, opponent_rating);
        let k_factor = self.k_factor(entity, importance);
        let delta = k_factor * (actual_score - expected);

        debug!(
            "{} update: rating={:.1} opponent={:.1} expected={:.3} actual={} k={:.2} delta={:+.2}",
            entity.kind, entity.rating, opponent_rating, expected, actual_score, k_factor, delta
        );

        entity.record(delta, match_date, self.config.history_limit);
        entity.rating
    }

    /// Rating deltas for both sides of a match, without touching either side
    ///
    /// Both deltas use pre-match ratings and K-factors. An undetermined
    /// result yields no change.
    pub fn match_rating_change(
        &self,
        winner: Option<Side>,
        side_a: &RatedEntity,
        side_b: &RatedEntity,
        importance: MatchImportance,
    ) -> MatchRatingChange {
        let Some(winner) = winner else {
            return MatchRatingChange::default();
        };

        let (score_a, score_b) = match winner {
            Side::A => (1.0, 0.0),
            Side::B => (0.0, 1.0),
        };

        let expected_a = self.expected_score(side_a.rating, side_b.rating);
        let expected_b = self.expected_score(side_b.rating, side_a.rating);

        let k_a = self.k_factor(side_a, importance);
        let k_b = self.k_factor(side_b, importance);

        MatchRatingChange {
            delta_a: k_a * (score_a - expected_a),
            delta_b: k_b * (score_b - expected_b),
        }
    }

    /// Commit a change computed by [`EloEngine::match_rating_change`] to both sides
    pub fn commit_match_change(
        &self,
        side_a: &mut RatedEntity,
        side_b: &mut RatedEntity,
        change: MatchRatingChange,
        played_at: Option<DateTime<Utc>>,
    ) {
        side_a.record(change.delta_a, played_at, self.config.history_limit);
        side_b.record(change.delta_b, played_at, self.config.history_limit);
    }

    /// How much the entity's rating can be trusted, from its match count
    pub fn confidence(&self, entity: &RatedEntity) -> f64 {
        entity.profile().confidence(entity.match_count)
    }

    /// Predict the outcome of side A against side B
    pub fn predict(
        &self,
        side_a: &RatedEntity,
        side_b: &RatedEntity,
        importance: MatchImportance,
    ) -> MatchPrediction {
        let expected_a = self.expected_score(side_a.rating, side_b.rating);
        let expected_b = self.expected_score(side_b.rating, side_a.rating);

        let confidence_a = self.confidence(side_a);
        let confidence_b = self.confidence(side_b);

        let prediction = MatchPrediction {
            expected_a,
            expected_b,
            label: PredictionLabel::from_expected(expected_a),
            rating_difference: side_a.rating - side_b.rating,
            confidence: (confidence_a + confidence_b) / 2.0,
            confidence_a,
            confidence_b,
        };

        debug!(
            "Prediction ({} tier): {} (A={:.3}, B={:.3})",
            importance, prediction.label, expected_a, expected_b
        );

        prediction
    }
}
