use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the membership ledger.
///
/// One row is the durable fact "player P was on team T during tournament
/// Tm". Rows are written at most once per distinct triple and are never
/// touched by roster changes; they are the source of truth for historical
/// participation after the current roster has mutated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub tournament_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl MembershipRecord {
    pub fn new(tournament_id: Uuid, team_id: Uuid, player_id: Uuid) -> Self {
        Self {
            tournament_id,
            team_id,
            player_id,
            created_at: Utc::now(),
        }
    }

    /// The identity of a record: the triple, not the timestamp
    pub fn key(&self) -> (Uuid, Uuid, Uuid) {
        (self.tournament_id, self.team_id, self.player_id)
    }
}
