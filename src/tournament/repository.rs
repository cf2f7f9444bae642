use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::TournamentModel;
use crate::shared::AppError;

/// Trait for tournament repository operations
#[async_trait]
pub trait TournamentRepository {
    async fn create_tournament(&self, tournament: &TournamentModel) -> Result<(), AppError>;
    async fn get_tournament(&self, tournament_id: Uuid) -> Result<Option<TournamentModel>, AppError>;
    async fn list_tournaments(&self) -> Result<Vec<TournamentModel>, AppError>;
    async fn set_finished(&self, tournament_id: Uuid, is_finished: bool) -> Result<TournamentModel, AppError>;
    async fn delete_tournament(&self, tournament_id: Uuid) -> Result<(), AppError>;
}

/// In-memory implementation of TournamentRepository for development and testing
pub struct InMemoryTournamentRepository {
    tournaments: Mutex<HashMap<Uuid, TournamentModel>>,
}

impl Default for InMemoryTournamentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTournamentRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            tournaments: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    #[instrument(skip(self, tournament))]
    async fn create_tournament(&self, tournament: &TournamentModel) -> Result<(), AppError> {
        debug!(tournament_id = %tournament.id, name = %tournament.name, "Creating tournament in memory");

        let mut tournaments = self.tournaments.lock().unwrap();
        if tournaments.contains_key(&tournament.id) {
            warn!(tournament_id = %tournament.id, "Tournament already exists in memory");
            return Err(AppError::DatabaseError(
                "Tournament already exists".to_string(),
            ));
        }
        tournaments.insert(tournament.id, tournament.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_tournament(&self, tournament_id: Uuid) -> Result<Option<TournamentModel>, AppError> {
        let tournaments = self.tournaments.lock().unwrap();
        Ok(tournaments.get(&tournament_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_tournaments(&self) -> Result<Vec<TournamentModel>, AppError> {
        let tournaments = self.tournaments.lock().unwrap();
        let mut all: Vec<TournamentModel> = tournaments.values().cloned().collect();
        // Newest first for display
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn set_finished(&self, tournament_id: Uuid, is_finished: bool) -> Result<TournamentModel, AppError> {
        debug!(tournament_id = %tournament_id, is_finished, "Updating tournament status in memory");

        let mut tournaments = self.tournaments.lock().unwrap();
        let tournament = tournaments.get_mut(&tournament_id).ok_or_else(|| {
            warn!(tournament_id = %tournament_id, "Tournament not found for update in memory");
            AppError::NotFound("Tournament not found".to_string())
        })?;
        tournament.is_finished = is_finished;

        Ok(tournament.clone())
    }

    #[instrument(skip(self))]
    async fn delete_tournament(&self, tournament_id: Uuid) -> Result<(), AppError> {
        debug!(tournament_id = %tournament_id, "Deleting tournament from memory");

        let mut tournaments = self.tournaments.lock().unwrap();
        if tournaments.remove(&tournament_id).is_none() {
            warn!(tournament_id = %tournament_id, "Tournament not found for delete in memory");
            return Err(AppError::NotFound("Tournament not found".to_string()));
        }

        Ok(())
    }
}
