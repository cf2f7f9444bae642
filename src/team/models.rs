use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for teams table
///
/// The current roster is the set of players pointing at this team. It is
/// mutable, unversioned state; historical participation lives in the
/// membership ledger.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamModel {
    pub id: Uuid,
    pub name: String,
    pub tournament_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TeamModel {
    /// Creates a new team in a tournament with a generated ID
    pub fn new(name: String, tournament_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tournament_id: Some(tournament_id),
            created_at: Utc::now(),
        }
    }
}
