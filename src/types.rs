//! Common types used throughout the rating service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for teams
pub type TeamId = u64;

/// Unique identifier for players
pub type PlayerId = u64;

/// Unique identifier for matches
pub type MatchId = u64;

/// Kind of rated participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Team,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Player => write!(f, "Player"),
            EntityKind::Team => write!(f, "Team"),
        }
    }
}

/// Tournament tier a match was played in
///
/// Parsing never fails: tags outside the known tiers become `Unrecognized`
/// and are weighted like a regular `B` tier match. The original tag is not
/// kept, so such a tier serializes back as `"Unrecognized"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchImportance {
    /// Major tournaments
    S,
    /// Minor tournaments
    A,
    /// Regular tournaments
    #[default]
    B,
    /// Small tournaments
    C,
    Qualifier,
    League,
    Unrecognized,
}

impl MatchImportance {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchImportance::S => "S",
            MatchImportance::A => "A",
            MatchImportance::B => "B",
            MatchImportance::C => "C",
            MatchImportance::Qualifier => "Qualifier",
            MatchImportance::League => "League",
            MatchImportance::Unrecognized => "Unrecognized",
        }
    }
}

impl FromStr for MatchImportance {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "S" => MatchImportance::S,
            "A" => MatchImportance::A,
            "B" => MatchImportance::B,
            "C" => MatchImportance::C,
            "Qualifier" => MatchImportance::Qualifier,
            "League" => MatchImportance::League,
            _ => MatchImportance::Unrecognized,
        })
    }
}

impl From<&str> for MatchImportance {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(importance) => importance,
            Err(never) => match never {},
        }
    }
}

impl From<String> for MatchImportance {
    fn from(tag: String) -> Self {
        MatchImportance::from(tag.as_str())
    }
}

impl From<MatchImportance> for String {
    fn from(importance: MatchImportance) -> Self {
        importance.as_str().to_string()
    }
}

impl std::fmt::Display for MatchImportance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// A team taking part in a match, as reported by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSide {
    pub team_id: TeamId,
    pub team_name: String,
}

/// Completed (or abandoned) match as delivered by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub side_a: MatchSide,
    pub side_b: MatchSide,
    /// `None` when the match has no determined result
    pub winner: Option<Side>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
    /// Tier reported by the source, if any
    #[serde(default)]
    pub importance: Option<MatchImportance>,
}

/// Rating deltas for both sides of a match, not yet committed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchRatingChange {
    pub delta_a: f64,
    pub delta_b: f64,
}

/// Categorical outcome prediction derived from side A's win probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionLabel {
    StrongFavoriteA,
    SlightFavoriteA,
    EvenMatch,
    SlightFavoriteB,
    StrongFavoriteB,
}

impl PredictionLabel {
    /// Classify side A's expected score
    pub fn from_expected(expected_a: f64) -> Self {
        if expected_a > 0.6 {
            PredictionLabel::StrongFavoriteA
        } else if expected_a > 0.55 {
            PredictionLabel::SlightFavoriteA
        } else if expected_a > 0.45 {
            PredictionLabel::EvenMatch
        } else if expected_a > 0.4 {
            PredictionLabel::SlightFavoriteB
        } else {
            PredictionLabel::StrongFavoriteB
        }
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PredictionLabel::StrongFavoriteA => "Strong favorite A",
            PredictionLabel::SlightFavoriteA => "Slight favorite A",
            PredictionLabel::EvenMatch => "Even match",
            PredictionLabel::SlightFavoriteB => "Slight favorite B",
            PredictionLabel::StrongFavoriteB => "Strong favorite B",
        };
        f.write_str(label)
    }
}

/// Prediction for a match between side A and side B
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    /// Win probability for side A
    pub expected_a: f64,
    /// Win probability for side B
    pub expected_b: f64,
    pub label: PredictionLabel,
    /// Rating of A minus rating of B
    pub rating_difference: f64,
    /// Mean of both sides' rating confidence
    pub confidence: f64,
    pub confidence_a: f64,
    pub confidence_b: f64,
}
