use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for creating a new tournament
#[derive(Debug, Deserialize)]
pub struct TournamentCreateRequest {
    pub name: String,
}

/// Request payload for updating a tournament's lifecycle state
#[derive(Debug, Deserialize)]
pub struct TournamentUpdateRequest {
    pub is_finished: bool,
}

/// Response for tournament creation and tournament information
#[derive(Debug, Serialize, Deserialize)]
pub struct TournamentResponse {
    pub id: Uuid,
    pub name: String,
    pub is_finished: bool,
    pub team_count: usize,
    pub game_count: usize,
    pub created_at: DateTime<Utc>,
}
