use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for creating a new team
#[derive(Debug, Deserialize)]
pub struct TeamCreateRequest {
    pub name: String,
}

/// Request payload for adding a player to a roster.
///
/// Either a new player (name + number) or an existing free-pool player
/// (`from_player_id`, with an optional replacement number).
#[derive(Debug, Deserialize)]
pub struct RosterAddRequest {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub from_player_id: Option<Uuid>,
}

/// Response for team creation and team information
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub tournament_id: Option<Uuid>,
    pub player_count: usize,
}
