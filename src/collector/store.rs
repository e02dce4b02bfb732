//! Team storage interface and implementations
//!
//! This module defines the interface the match processor uses to load and
//! persist team ratings, with an in-memory implementation.

use crate::models::Team;
use crate::types::TeamId;
use std::collections::HashMap;

/// Trait for team storage operations
#[cfg_attr(test, mockall::automock)]
pub trait TeamStore {
    /// Get a team by id
    fn get_team(&self, team_id: TeamId) -> crate::error::Result<Option<Team>>;

    /// Store or replace a team
    fn store_team(&mut self, team: Team) -> crate::error::Result<()>;

    /// Store several teams together; either all are stored or none are
    fn store_teams(&mut self, teams: Vec<Team>) -> crate::error::Result<()>;

    /// Get every stored team
    fn get_all_teams(&self) -> crate::error::Result<Vec<Team>>;

    /// Get total number of stored teams
    fn team_count(&self) -> crate::error::Result<usize>;
}

/// In-memory team storage implementation
#[derive(Debug, Default, Clone)]
pub struct InMemoryTeamStore {
    teams: HashMap<TeamId, Team>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing teams
    pub fn with_teams(teams: impl IntoIterator<Item = Team>) -> Self {
        Self {
            teams: teams.into_iter().map(|team| (team.id, team)).collect(),
        }
    }
}

impl TeamStore for InMemoryTeamStore {
    fn get_team(&self, team_id: TeamId) -> crate::error::Result<Option<Team>> {
        Ok(self.teams.get(&team_id).cloned())
    }

    fn store_team(&mut self, team: Team) -> crate::error::Result<()> {
        self.teams.insert(team.id, team);
        Ok(())
    }

    fn store_teams(&mut self, teams: Vec<Team>) -> crate::error::Result<()> {
        for team in teams {
            self.teams.insert(team.id, team);
        }
        Ok(())
    }

    fn get_all_teams(&self) -> crate::error::Result<Vec<Team>> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by_key(|team| team.id);
        Ok(teams)
    }

    fn team_count(&self) -> crate::error::Result<usize> {
        Ok(self.teams.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get_team() {
        let mut store = InMemoryTeamStore::new();
        assert!(store.get_team(1).unwrap().is_none());

        store.store_team(Team::new(1, "Alpha")).unwrap();

        let team = store.get_team(1).unwrap().unwrap();
        assert_eq!(team.name, "Alpha");
        assert_eq!(store.team_count().unwrap(), 1);
    }

    #[test]
    fn test_store_replaces_existing() {
        let mut store = InMemoryTeamStore::with_teams([Team::new(1, "Alpha")]);

        let mut updated = Team::new(1, "Alpha");
        updated.elo.rating = 1500.0;
        store.store_team(updated).unwrap();

        assert_eq!(store.team_count().unwrap(), 1);
        assert_eq!(store.get_team(1).unwrap().unwrap().elo.rating, 1500.0);
    }

    #[test]
    fn test_store_many_and_list_sorted() {
        let mut store = InMemoryTeamStore::new();
        store
            .store_teams(vec![Team::new(3, "Gamma"), Team::new(1, "Alpha")])
            .unwrap();

        let ids: Vec<TeamId> = store.get_all_teams().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
