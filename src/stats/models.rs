use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display sentinel for players without any known team
pub const NO_TEAM_LABEL: &str = "Ingen lag";

/// Outcome of a finished game seen from one team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Draw,
    Loss,
}

/// One row of a tournament's league table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: u32,
}

impl TeamRow {
    pub fn new(team_id: Uuid, team_name: String) -> Self {
        Self {
            team_id,
            team_name,
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

/// Lifetime record of one player, reconstructed from full history on every
/// call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: Uuid,
    pub name: String,
    pub number: i32,
    /// Current team if assigned, otherwise the most specific historical
    /// team name available, otherwise the "no team" sentinel
    pub team_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_scored: u32,
    pub own_goals: u32,
    pub tournaments_participated: usize,
}

/// One row of a tournament's top-scorer list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopScorerRow {
    pub player_id: Uuid,
    pub player_name: String,
    pub player_number: i32,
    pub team_name: String,
    pub goals: u32,
}
