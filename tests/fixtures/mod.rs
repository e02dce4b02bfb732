//! Shared builders for the integration test suites

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use esports_elo::collector::{InMemoryTeamStore, MatchProcessor};
use esports_elo::rating::{EloEngine, RatedEntity};
use esports_elo::types::{EntityKind, MatchImportance, MatchRecord, MatchSide, Side, TeamId};
use esports_elo::Team;

/// Midnight UTC on the given day
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Team seeded at a fixed rating with no history
pub fn seeded_team(id: TeamId, name: &str, rating: f64) -> Team {
    let mut team = Team::new(id, name);
    team.elo = RatedEntity::with_rating(EntityKind::Team, rating);
    team
}

/// Team entity that last played on `last_played`, with a rating of exactly `rating`
pub fn team_last_played(rating: f64, last_played: DateTime<Utc>) -> RatedEntity {
    let mut team = RatedEntity::with_rating(EntityKind::Team, rating);
    team.record(0.0, Some(last_played), 100);
    team
}

/// Builder for match records fed to the processor
pub struct MatchBuilder {
    record: MatchRecord,
}

impl MatchBuilder {
    pub fn new(match_id: u64, team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            record: MatchRecord {
                match_id,
                side_a: MatchSide {
                    team_id: team_a,
                    team_name: format!("Team {}", team_a),
                },
                side_b: MatchSide {
                    team_id: team_b,
                    team_name: format!("Team {}", team_b),
                },
                winner: None,
                played_at: None,
                importance: None,
            },
        }
    }

    pub fn won_by(mut self, side: Side) -> Self {
        self.record.winner = Some(side);
        self
    }

    pub fn played_at(mut self, played_at: DateTime<Utc>) -> Self {
        self.record.played_at = Some(played_at);
        self
    }

    pub fn importance(mut self, importance: MatchImportance) -> Self {
        self.record.importance = Some(importance);
        self
    }

    pub fn build(self) -> MatchRecord {
        self.record
    }
}

/// A week-spaced series where `team_a` beats `team_b` every time
pub fn winning_streak(
    first_match_id: u64,
    team_a: TeamId,
    team_b: TeamId,
    count: usize,
    start: DateTime<Utc>,
) -> Vec<MatchRecord> {
    (0..count)
        .map(|i| {
            MatchBuilder::new(first_match_id + i as u64, team_a, team_b)
                .won_by(Side::A)
                .played_at(start + Duration::weeks(i as i64))
                .build()
        })
        .collect()
}

/// Processor backed by an in-memory store holding `teams`
pub fn processor_with_teams(teams: Vec<Team>) -> MatchProcessor<InMemoryTeamStore> {
    MatchProcessor::new(EloEngine::default(), InMemoryTeamStore::with_teams(teams))
}
