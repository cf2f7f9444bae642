use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::PlayerModel;
use crate::shared::AppError;

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError>;
    async fn get_player(&self, player_id: Uuid) -> Result<Option<PlayerModel>, AppError>;
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError>;
    async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<PlayerModel>, AppError>;

    /// Finds a free (unassigned) player carrying the given shirt number
    async fn find_free_by_number(&self, number: i32) -> Result<Option<PlayerModel>, AppError>;

    /// Finds a player on the given team carrying the given shirt number
    async fn find_by_team_and_number(
        &self,
        team_id: Uuid,
        number: i32,
    ) -> Result<Option<PlayerModel>, AppError>;

    /// Attaches a player to a team roster within a tournament context
    async fn assign_to_team(
        &self,
        player_id: Uuid,
        team_id: Uuid,
        tournament_id: Uuid,
        number: i32,
    ) -> Result<PlayerModel, AppError>;

    /// Releases a player back to the free pool
    async fn release_player(&self, player_id: Uuid) -> Result<PlayerModel, AppError>;

    /// Releases every player currently rostered on the given team
    async fn release_by_team(&self, team_id: Uuid) -> Result<u64, AppError>;

    /// Releases every rostered player in the given tournament context
    async fn release_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;

    async fn delete_player(&self, player_id: Uuid) -> Result<(), AppError>;

    /// Deletes every player still bound to the given tournament context
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<Uuid, PlayerModel>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, name = %player.name, "Creating player in memory");

        let mut players = self.players.lock().unwrap();
        if players.contains_key(&player.id) {
            warn!(player_id = %player.id, "Player already exists in memory");
            return Err(AppError::DatabaseError("Player already exists".to_string()));
        }
        players.insert(player.id, player.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: Uuid) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players.get(&player_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        let mut all: Vec<PlayerModel> = players.values().cloned().collect();
        // Newest first for display
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        let mut on_team: Vec<PlayerModel> = players
            .values()
            .filter(|p| p.team_id == Some(team_id))
            .cloned()
            .collect();
        on_team.sort_by_key(|p| p.number);
        Ok(on_team)
    }

    #[instrument(skip(self))]
    async fn find_free_by_number(&self, number: i32) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players
            .values()
            .find(|p| p.is_free() && p.number == number)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_team_and_number(
        &self,
        team_id: Uuid,
        number: i32,
    ) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players
            .values()
            .find(|p| p.team_id == Some(team_id) && p.number == number)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn assign_to_team(
        &self,
        player_id: Uuid,
        team_id: Uuid,
        tournament_id: Uuid,
        number: i32,
    ) -> Result<PlayerModel, AppError> {
        debug!(player_id = %player_id, team_id = %team_id, "Assigning player to team in memory");

        let mut players = self.players.lock().unwrap();
        let player = players.get_mut(&player_id).ok_or_else(|| {
            warn!(player_id = %player_id, "Player not found for assignment in memory");
            AppError::NotFound("Player not found".to_string())
        })?;
        player.team_id = Some(team_id);
        player.tournament_id = Some(tournament_id);
        player.number = number;

        Ok(player.clone())
    }

    #[instrument(skip(self))]
    async fn release_player(&self, player_id: Uuid) -> Result<PlayerModel, AppError> {
        debug!(player_id = %player_id, "Releasing player to free pool in memory");

        let mut players = self.players.lock().unwrap();
        let player = players.get_mut(&player_id).ok_or_else(|| {
            warn!(player_id = %player_id, "Player not found for release in memory");
            AppError::NotFound("Player not found".to_string())
        })?;
        player.team_id = None;
        player.tournament_id = None;

        Ok(player.clone())
    }

    #[instrument(skip(self))]
    async fn release_by_team(&self, team_id: Uuid) -> Result<u64, AppError> {
        let mut players = self.players.lock().unwrap();
        let mut released = 0;
        for player in players.values_mut() {
            if player.team_id == Some(team_id) {
                player.team_id = None;
                player.tournament_id = None;
                released += 1;
            }
        }
        Ok(released)
    }

    #[instrument(skip(self))]
    async fn release_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let mut players = self.players.lock().unwrap();
        let mut released = 0;
        for player in players.values_mut() {
            if player.tournament_id == Some(tournament_id) && player.team_id.is_some() {
                player.team_id = None;
                player.tournament_id = None;
                released += 1;
            }
        }
        Ok(released)
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: Uuid) -> Result<(), AppError> {
        debug!(player_id = %player_id, "Deleting player from memory");

        let mut players = self.players.lock().unwrap();
        if players.remove(&player_id).is_none() {
            warn!(player_id = %player_id, "Player not found for delete in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let mut players = self.players.lock().unwrap();
        let before = players.len();
        players.retain(|_, p| p.tournament_id != Some(tournament_id));
        Ok((before - players.len()) as u64)
    }
}
