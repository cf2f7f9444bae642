use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for players table
///
/// A player with no team is "free" (pooled) and can be attached to any
/// roster. The current team assignment is mutable state and is never used
/// as evidence of historical participation; the membership ledger is.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: Uuid,
    pub name: String,
    /// Shirt number, 1-150. Unique among free players and within a team's
    /// current roster, not globally.
    pub number: i32,
    pub team_id: Option<Uuid>,
    pub tournament_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PlayerModel {
    /// Creates a new free (unassigned) player with a generated ID
    pub fn new_free(name: String, number: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            number,
            team_id: None,
            tournament_id: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a new player directly on a team roster
    pub fn new_on_team(name: String, number: i32, team_id: Uuid, tournament_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            number,
            team_id: Some(team_id),
            tournament_id: Some(tournament_id),
            created_at: Utc::now(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.team_id.is_none()
    }
}
