//! Rating distribution statistics for a group of teams or players

use crate::rating::entity::RatedEntity;
use crate::utils::{mean, median, std_dev};
use serde::{Deserialize, Serialize};

/// Named rating bands used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
}

impl RatingTier {
    pub const ALL: [RatingTier; 7] = [
        RatingTier::Bronze,
        RatingTier::Silver,
        RatingTier::Gold,
        RatingTier::Platinum,
        RatingTier::Diamond,
        RatingTier::Master,
        RatingTier::Grandmaster,
    ];

    /// Band a rating falls into; lower bounds are inclusive
    pub fn for_rating(rating: f64) -> Self {
        match rating {
            r if r < 1200.0 => RatingTier::Bronze,
            r if r < 1400.0 => RatingTier::Silver,
            r if r < 1600.0 => RatingTier::Gold,
            r if r < 1800.0 => RatingTier::Platinum,
            r if r < 2000.0 => RatingTier::Diamond,
            r if r < 2200.0 => RatingTier::Master,
            _ => RatingTier::Grandmaster,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RatingTier::Bronze => "Bronze (<1200)",
            RatingTier::Silver => "Silver (1200-1400)",
            RatingTier::Gold => "Gold (1400-1600)",
            RatingTier::Platinum => "Platinum (1600-1800)",
            RatingTier::Diamond => "Diamond (1800-2000)",
            RatingTier::Master => "Master (2000-2200)",
            RatingTier::Grandmaster => "Grandmaster (2200+)",
        };
        f.write_str(label)
    }
}

/// Summary of how ratings are spread across a group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub total: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Entity count per tier, indexed in `RatingTier::ALL` order
    pub tier_counts: [usize; 7],
}

impl RatingDistribution {
    /// Compute statistics over the given entities; all zeros when empty
    pub fn from_entities<'a>(entities: impl IntoIterator<Item = &'a RatedEntity>) -> Self {
        let ratings: Vec<f64> = entities.into_iter().map(|e| e.rating).collect();
        Self::from_ratings(&ratings)
    }

    pub fn from_ratings(ratings: &[f64]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let mut tier_counts = [0usize; 7];
        for rating in ratings {
            tier_counts[RatingTier::for_rating(*rating).index()] += 1;
        }

        Self {
            total: ratings.len(),
            mean: mean(ratings),
            median: median(ratings),
            std_dev: std_dev(ratings),
            min: ratings.iter().copied().fold(f64::INFINITY, f64::min),
            max: ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            tier_counts,
        }
    }

    pub fn count(&self, tier: RatingTier) -> usize {
        self.tier_counts[tier.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;

    #[test]
    fn test_empty_distribution_is_zero() {
        let stats = RatingDistribution::from_entities(&Vec::<RatedEntity>::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert!(RatingTier::ALL.iter().all(|tier| stats.count(*tier) == 0));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RatingTier::for_rating(1199.99), RatingTier::Bronze);
        assert_eq!(RatingTier::for_rating(1200.0), RatingTier::Silver);
        assert_eq!(RatingTier::for_rating(1599.0), RatingTier::Gold);
        assert_eq!(RatingTier::for_rating(1600.0), RatingTier::Platinum);
        assert_eq!(RatingTier::for_rating(1999.0), RatingTier::Diamond);
        assert_eq!(RatingTier::for_rating(2000.0), RatingTier::Master);
        assert_eq!(RatingTier::for_rating(2200.0), RatingTier::Grandmaster);
    }

    #[test]
    fn test_distribution_of_entities() {
        let entities: Vec<RatedEntity> = [1100.0, 1300.0, 1500.0, 2300.0]
            .into_iter()
            .map(|rating| RatedEntity::with_rating(EntityKind::Player, rating))
            .collect();

        let stats = RatingDistribution::from_entities(&entities);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.mean, 1550.0);
        assert_eq!(stats.median, 1400.0);
        assert_eq!(stats.min, 1100.0);
        assert_eq!(stats.max, 2300.0);
        assert_eq!(stats.count(RatingTier::Bronze), 1);
        assert_eq!(stats.count(RatingTier::Silver), 1);
        assert_eq!(stats.count(RatingTier::Gold), 1);
        assert_eq!(stats.count(RatingTier::Grandmaster), 1);
        assert_eq!(stats.count(RatingTier::Master), 0);
        assert!(stats.std_dev > 0.0);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(RatingTier::Grandmaster.to_string(), "Grandmaster (2200+)");
        assert_eq!(RatingTier::Bronze.to_string(), "Bronze (<1200)");
    }
}
