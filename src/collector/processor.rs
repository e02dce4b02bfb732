//! Batch processing of completed matches
//!
//! The processor sits between the match data source and the rating engine.
//! It resolves both teams, brings their ratings up to the match date, applies
//! the two-sided rating change and stores the result. A bad match is logged
//! and counted; it never aborts the rest of the batch.

use crate::collector::store::TeamStore;
use crate::error::RatingError;
use crate::models::Team;
use crate::rating::{EloEngine, RatingDistribution};
use crate::types::{
    EntityKind, MatchImportance, MatchPrediction, MatchRatingChange, MatchRecord, TeamId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Outcome counts for a processed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Matches whose result was applied to both teams
    pub processed: usize,
    /// Matches without a determined result
    pub skipped: usize,
    /// Matches that raised an error and were left out
    pub failed: usize,
}

impl std::fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processed, {} skipped, {} failed",
            self.processed, self.skipped, self.failed
        )
    }
}

/// Applies match results to stored team ratings, one match at a time
#[derive(Debug)]
pub struct MatchProcessor<S: TeamStore> {
    engine: EloEngine,
    store: S,
    default_importance: MatchImportance,
}

impl<S: TeamStore> MatchProcessor<S> {
    pub fn new(engine: EloEngine, store: S) -> Self {
        Self {
            engine,
            store,
            default_importance: MatchImportance::default(),
        }
    }

    /// Tier used for matches that do not report one
    pub fn with_default_importance(mut self, importance: MatchImportance) -> Self {
        self.default_importance = importance;
        self
    }

    pub fn engine(&self) -> &EloEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a team, creating it at the engine's baseline rating if it is unknown
    pub fn ensure_team(&mut self, team_id: TeamId, name: &str) -> crate::error::Result<Team> {
        if let Some(team) = self.store.get_team(team_id)? {
            return Ok(team);
        }

        let team = Team {
            elo: self.engine.new_entity(EntityKind::Team),
            ..Team::new(team_id, name)
        };
        self.store.store_team(team.clone())?;
        info!("Created team {} (ID: {})", team.name, team_id);
        Ok(team)
    }

    /// Apply one match; `Ok(None)` when the match has no result
    pub fn process_match(
        &mut self,
        record: &MatchRecord,
    ) -> crate::error::Result<Option<MatchRatingChange>> {
        if record.side_a.team_id == record.side_b.team_id {
            return Err(RatingError::InvalidMatch {
                match_id: record.match_id,
                reason: format!("team {} cannot play itself", record.side_a.team_id),
            }
            .into());
        }

        let mut team_a = self.ensure_team(record.side_a.team_id, &record.side_a.team_name)?;
        let mut team_b = self.ensure_team(record.side_b.team_id, &record.side_b.team_name)?;

        if record.winner.is_none() {
            warn!("Skipping match {}: no result", record.match_id);
            return Ok(None);
        }

        let importance = record.importance.unwrap_or(self.default_importance);

        self.engine.apply_decay(&mut team_a.elo, record.played_at);
        self.engine.apply_decay(&mut team_b.elo, record.played_at);

        let change =
            self.engine.match_rating_change(record.winner, &team_a.elo, &team_b.elo, importance);
        self.engine.commit_match_change(
            &mut team_a.elo,
            &mut team_b.elo,
            change,
            record.played_at,
        );

        info!(
            "Updated ratings for match {} ({} tier): {} {:+.1}, {} {:+.1}",
            record.match_id,
            importance,
            team_a.name,
            change.delta_a,
            team_b.name,
            change.delta_b
        );

        self.store.store_teams(vec![team_a, team_b])?;
        Ok(Some(change))
    }

    /// Apply matches in the order given, logging and counting failures
    pub fn process_matches(&mut self, records: &[MatchRecord]) -> ProcessingSummary {
        let mut summary = ProcessingSummary::default();

        for record in records {
            match self.process_match(record) {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing match {}: {:#}", record.match_id, e);
                    summary.failed += 1;
                }
            }
        }

        info!("Match processing complete: {}", summary);
        summary
    }

    /// Predict a match between two stored teams
    pub fn predict(
        &self,
        team_a: TeamId,
        team_b: TeamId,
        importance: MatchImportance,
    ) -> crate::error::Result<MatchPrediction> {
        let a = self.require_team(team_a)?;
        let b = self.require_team(team_b)?;

        let prediction = self.engine.predict(&a.elo, &b.elo, importance);
        debug!("Predicted {} vs {}: {}", a.name, b.name, prediction.label);
        Ok(prediction)
    }

    /// All teams ordered by rating, highest first
    pub fn standings(&self) -> crate::error::Result<Vec<Team>> {
        let mut teams = self.store.get_all_teams()?;
        teams.sort_by(|a, b| b.elo.rating.total_cmp(&a.elo.rating));
        Ok(teams)
    }

    pub fn rating_distribution(&self) -> crate::error::Result<RatingDistribution> {
        let teams = self.store.get_all_teams()?;
        Ok(RatingDistribution::from_entities(teams.iter().map(|t| &t.elo)))
    }

    fn require_team(&self, team_id: TeamId) -> crate::error::Result<Team> {
        self.store
            .get_team(team_id)?
            .ok_or_else(|| RatingError::TeamNotFound { team_id }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::store::{InMemoryTeamStore, MockTeamStore};
    use crate::types::{MatchSide, PredictionLabel, Side};
    use chrono::{TimeZone, Utc};

    fn record(match_id: u64, a: TeamId, b: TeamId, winner: Option<Side>) -> MatchRecord {
        MatchRecord {
            match_id,
            side_a: MatchSide {
                team_id: a,
                team_name: format!("Team {}", a),
            },
            side_b: MatchSide {
                team_id: b,
                team_name: format!("Team {}", b),
            },
            winner,
            played_at: Some(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
            importance: None,
        }
    }

    fn processor() -> MatchProcessor<InMemoryTeamStore> {
        MatchProcessor::new(EloEngine::default(), InMemoryTeamStore::new())
    }

    #[test]
    fn test_process_match_updates_both_teams() {
        let mut processor = processor();

        let change = processor
            .process_match(&record(1, 10, 20, Some(Side::A)))
            .unwrap()
            .unwrap();

        // Fresh teams at 1200 in a B tier match: 35.2 * 0.5
        assert!((change.delta_a - 17.6).abs() < 1e-9);
        assert!((change.delta_b + 17.6).abs() < 1e-9);

        let winner = processor.store().get_team(10).unwrap().unwrap();
        let loser = processor.store().get_team(20).unwrap().unwrap();
        assert!((winner.elo.rating - 1217.6).abs() < 1e-9);
        assert!((loser.elo.rating - 1182.4).abs() < 1e-9);
        assert_eq!(winner.elo.match_count, 1);
        assert_eq!(loser.elo.history.len(), 1);
    }

    #[test]
    fn test_undetermined_match_creates_teams_without_rating() {
        let mut processor = processor();

        let change = processor.process_match(&record(2, 1, 2, None)).unwrap();

        assert!(change.is_none());
        assert_eq!(processor.store().team_count().unwrap(), 2);
        let team = processor.store().get_team(1).unwrap().unwrap();
        assert_eq!(team.elo.match_count, 0);
        assert!(team.elo.history.is_empty());
    }

    #[test]
    fn test_new_teams_start_at_configured_baseline() {
        let config = crate::config::RatingConfig {
            baseline_rating: 1500.0,
            ..Default::default()
        };
        let engine = EloEngine::new(config).unwrap();
        let mut processor = MatchProcessor::new(engine, InMemoryTeamStore::new());

        let fresh = processor.ensure_team(9, "Fresh").unwrap();
        assert_eq!(fresh.elo.rating, 1500.0);

        let mut opener = record(1, 1, 2, Some(Side::A));
        opener.played_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let change = processor.process_match(&opener).unwrap().unwrap();
        // Teams at 1500: 32 * 1.1 * 0.5
        assert!((change.delta_a - 17.6).abs() < 1e-9);

        let mut comeback = record(2, 2, 3, Some(Side::A));
        comeback.played_at = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        let change = processor.process_match(&comeback).unwrap().unwrap();

        // The idle loser regresses toward its 1500 start, never past it
        let team = processor.store().get_team(2).unwrap().unwrap();
        let decayed = team.elo.rating - change.delta_a;
        assert!(decayed > 1500.0 - 17.6);
        assert!(decayed < 1500.0);
    }

    #[test]
    fn test_self_match_rejected() {
        let mut processor = processor();
        assert!(processor.process_match(&record(3, 5, 5, Some(Side::A))).is_err());
    }

    #[test]
    fn test_default_importance_applies() {
        let mut processor = processor().with_default_importance(MatchImportance::S);

        let change = processor
            .process_match(&record(4, 1, 2, Some(Side::A)))
            .unwrap()
            .unwrap();

        // 32 * 1.1 * (1.5 * 1.3) * 0.5
        assert!((change.delta_a - 34.32).abs() < 1e-9);
    }

    #[test]
    fn test_batch_counts_outcomes() {
        let mut processor = processor();
        let records = vec![
            record(1, 1, 2, Some(Side::A)),
            record(2, 1, 2, None),
            record(3, 3, 3, Some(Side::B)),
            record(4, 2, 3, Some(Side::B)),
        ];

        let summary = processor.process_matches(&records);

        assert_eq!(
            summary,
            ProcessingSummary {
                processed: 2,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(summary.to_string(), "2 processed, 1 skipped, 1 failed");
    }

    #[test]
    fn test_storage_failure_does_not_abort_batch() {
        let mut store = MockTeamStore::new();
        store.expect_get_team().returning(|id| Ok(Some(Team::new(id, "Known"))));

        let mut calls = 0;
        store.expect_store_teams().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(RatingError::StorageError {
                    message: "disk full".to_string(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let mut processor = MatchProcessor::new(EloEngine::default(), store);
        let summary = processor.process_matches(&[
            record(1, 1, 2, Some(Side::A)),
            record(2, 1, 2, Some(Side::B)),
        ]);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 1);
    }

    #[test]
    fn test_predict_unknown_team() {
        let processor = processor();
        let result = processor.predict(1, 2, MatchImportance::B);
        assert!(result.is_err());
    }

    #[test]
    fn test_predict_and_standings() {
        let mut processor = processor();
        for match_id in 0..5 {
            processor
                .process_match(&record(match_id, 1, 2, Some(Side::A)))
                .unwrap();
        }

        let prediction = processor.predict(1, 2, MatchImportance::B).unwrap();
        assert_eq!(prediction.label, PredictionLabel::StrongFavoriteA);

        let standings = processor.standings().unwrap();
        assert_eq!(standings[0].id, 1);
        assert_eq!(standings[1].id, 2);

        let distribution = processor.rating_distribution().unwrap();
        assert_eq!(distribution.total, 2);
        assert_eq!(distribution.max, standings[0].elo.rating);
        assert_eq!(distribution.min, standings[1].elo.rating);
    }
}
