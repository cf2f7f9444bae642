use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for tournaments table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentModel {
    pub id: Uuid,
    pub name: String,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
}

impl TournamentModel {
    /// Creates a new, unfinished tournament with a generated ID
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            is_finished: false,
            created_at: Utc::now(),
        }
    }
}
