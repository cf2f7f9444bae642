use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::GameStatus;

/// Request payload for creating a new game
#[derive(Debug, Deserialize)]
pub struct GameCreateRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

/// Request payload for registering a goal
#[derive(Debug, Deserialize)]
pub struct GoalCreateRequest {
    pub player_id: Uuid,
    #[serde(default)]
    pub own_goal: bool,
}

/// Response for goal information
#[derive(Debug, Serialize, Deserialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    /// None when the scorer has since been hard-deleted
    pub player_name: Option<String>,
    pub team_id: Uuid,
    pub own_goal: bool,
    pub created_at: DateTime<Utc>,
}

/// Response for game information, including team names and goals
#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub tournament_id: Option<Uuid>,
    pub home_team_id: Uuid,
    pub home_team_name: Option<String>,
    pub away_team_id: Uuid,
    pub away_team_name: Option<String>,
    pub home_score: i32,
    pub away_score: i32,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    pub goals: Vec<GoalResponse>,
}
