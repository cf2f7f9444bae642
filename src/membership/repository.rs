use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::MembershipRecord;
use crate::shared::AppError;

/// Trait for membership ledger operations.
///
/// The ledger is insert-only: `record` is idempotent and nothing short of a
/// tournament purge removes rows.
#[async_trait]
pub trait MembershipRepository {
    /// Inserts a record if its triple is not already present. Returns true
    /// when a new row was written, false when it already existed.
    async fn record(&self, record: &MembershipRecord) -> Result<bool, AppError>;

    /// Every ledger row for a player, oldest first
    async fn teams_for_player(&self, player_id: Uuid) -> Result<Vec<MembershipRecord>, AppError>;

    /// A player's ledger rows within one tournament, oldest first
    async fn teams_for_player_in_tournament(
        &self,
        player_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<Vec<MembershipRecord>, AppError>;

    /// Removes every row of a tournament. Only the explicit tournament
    /// purge may do this; the tournament's statistical contribution is
    /// forfeited with the rows.
    async fn purge_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;
}

/// In-memory implementation of MembershipRepository for development and
/// testing
pub struct InMemoryMembershipRepository {
    records: Mutex<HashMap<(Uuid, Uuid, Uuid), MembershipRecord>>,
}

impl Default for InMemoryMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMembershipRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    #[instrument(skip(self, record))]
    async fn record(&self, record: &MembershipRecord) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.key()) {
            debug!(
                tournament_id = %record.tournament_id,
                team_id = %record.team_id,
                player_id = %record.player_id,
                "Membership already recorded"
            );
            return Ok(false);
        }
        records.insert(record.key(), record.clone());

        debug!(
            tournament_id = %record.tournament_id,
            team_id = %record.team_id,
            player_id = %record.player_id,
            "Membership recorded in memory"
        );
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn teams_for_player(&self, player_id: Uuid) -> Result<Vec<MembershipRecord>, AppError> {
        let records = self.records.lock().unwrap();
        let mut rows: Vec<MembershipRecord> = records
            .values()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn teams_for_player_in_tournament(
        &self,
        player_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<Vec<MembershipRecord>, AppError> {
        let records = self.records.lock().unwrap();
        let mut rows: Vec<MembershipRecord> = records
            .values()
            .filter(|r| r.player_id == player_id && r.tournament_id == tournament_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn purge_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, r| r.tournament_id != tournament_id);
        let purged = (before - records.len()) as u64;

        debug!(tournament_id = %tournament_id, purged, "Membership ledger purged for tournament");
        Ok(purged)
    }
}

/// PostgreSQL implementation of the membership ledger
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    #[instrument(skip(self, record))]
    async fn record(&self, record: &MembershipRecord) -> Result<bool, AppError> {
        debug!(
            tournament_id = %record.tournament_id,
            team_id = %record.team_id,
            player_id = %record.player_id,
            "Recording membership in database"
        );

        let result = sqlx::query(
            "INSERT INTO memberships (tournament_id, team_id, player_id, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (tournament_id, team_id, player_id) DO NOTHING",
        )
        .bind(record.tournament_id)
        .bind(record.team_id)
        .bind(record.player_id)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to record membership in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn teams_for_player(&self, player_id: Uuid) -> Result<Vec<MembershipRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT tournament_id, team_id, player_id, created_at \
             FROM memberships WHERE player_id = $1 ORDER BY created_at",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player_id = %player_id, "Failed to fetch memberships from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|row| MembershipRecord {
                tournament_id: row.get("tournament_id"),
                team_id: row.get("team_id"),
                player_id: row.get("player_id"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn teams_for_player_in_tournament(
        &self,
        player_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<Vec<MembershipRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT tournament_id, team_id, player_id, created_at \
             FROM memberships WHERE player_id = $1 AND tournament_id = $2 ORDER BY created_at",
        )
        .bind(player_id)
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(
                error = %e,
                player_id = %player_id,
                tournament_id = %tournament_id,
                "Failed to fetch tournament memberships from database"
            );
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|row| MembershipRecord {
                tournament_id: row.get("tournament_id"),
                team_id: row.get("team_id"),
                player_id: row.get("player_id"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn purge_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM memberships WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, tournament_id = %tournament_id, "Failed to purge memberships from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }
}
