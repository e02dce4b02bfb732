//! Team and player records
//!
//! Only the fields the rating flow touches are modelled here; rosters, hero
//! pools and per-match statistics belong to the data source.

use crate::rating::RatedEntity;
use crate::types::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// A professional team and its rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub tag: Option<String>,
    pub elo: RatedEntity,
}

impl Team {
    /// Create a team at the default rating
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: None,
            elo: RatedEntity::team(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A professional player and their individual rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub elo: RatedEntity,
}

impl Player {
    /// Create a player at the default rating
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            team_id: None,
            elo: RatedEntity::player(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;

    #[test]
    fn test_new_records_use_matching_kind() {
        let team = Team::new(1, "Team Liquid").with_tag("TL");
        assert_eq!(team.elo.kind, EntityKind::Team);
        assert_eq!(team.tag.as_deref(), Some("TL"));

        let player = Player::new(7, "Miracle-");
        assert_eq!(player.elo.kind, EntityKind::Player);
        assert_eq!(player.elo.rating, 1200.0);
        assert_eq!(player.team_id, None);
    }

    #[test]
    fn test_team_json_shape() {
        let team = Team::new(2, "Evil Geniuses");
        let value = serde_json::to_value(&team).unwrap();

        assert_eq!(value["name"], "Evil Geniuses");
        assert_eq!(value["elo"]["rating"], 1200.0);
        assert_eq!(value["elo"]["kind"], "Team");
    }
}
