use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for creating a free-pool player
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub name: String,
    pub number: i32,
}

/// Response for player creation and player information
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub number: i32,
    pub team_id: Option<Uuid>,
    pub tournament_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::player::models::PlayerModel> for PlayerResponse {
    fn from(player: crate::player::models::PlayerModel) -> Self {
        Self {
            id: player.id,
            name: player.name,
            number: player.number,
            team_id: player.team_id,
            tournament_id: player.tournament_id,
            created_at: player.created_at,
        }
    }
}
