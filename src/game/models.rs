use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Lifecycle state of a game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "game_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Finished,
}

/// Database model for games table
///
/// Scores are maintained together with the goal set: every goal insertion
/// or deletion updates the credited side's score in the same write.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GameModel {
    pub id: Uuid,
    /// None for legacy games created before tournaments existed
    pub tournament_id: Option<Uuid>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub status: GameStatus,
    /// Games are display-ordered by creation time
    pub created_at: DateTime<Utc>,
}

impl GameModel {
    /// Creates a new scheduled game with a generated ID
    pub fn new(tournament_id: Option<Uuid>, home_team_id: Uuid, away_team_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            home_team_id,
            away_team_id,
            home_score: 0,
            away_score: 0,
            status: GameStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    pub fn involves_team(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// The opposing team, given one of the game's two teams
    pub fn opponent_of(&self, team_id: Uuid) -> Option<Uuid> {
        if team_id == self.home_team_id {
            Some(self.away_team_id)
        } else if team_id == self.away_team_id {
            Some(self.home_team_id)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}

/// Database model for goals table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GoalModel {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    /// The credited team: the team whose score this goal increments. For an
    /// own goal this is the opponent of the scorer's team.
    pub team_id: Uuid,
    pub own_goal: bool,
    pub created_at: DateTime<Utc>,
}

impl GoalModel {
    pub fn new(game_id: Uuid, player_id: Uuid, team_id: Uuid, own_goal: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            player_id,
            team_id,
            own_goal,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(GameStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            "SCHEDULED".parse::<GameStatus>().unwrap(),
            GameStatus::Scheduled
        );
        let json = serde_json::to_string(&GameStatus::Finished).unwrap();
        assert_eq!(json, "\"FINISHED\"");
    }

    #[test]
    fn opponent_resolution() {
        let game = GameModel::new(None, Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(game.opponent_of(game.home_team_id), Some(game.away_team_id));
        assert_eq!(game.opponent_of(game.away_team_id), Some(game.home_team_id));
        assert_eq!(game.opponent_of(Uuid::new_v4()), None);
    }
}
