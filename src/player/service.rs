use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::PlayerModel,
    repository::PlayerRepository,
    types::{PlayerCreateRequest, PlayerResponse},
};
use crate::shared::AppError;

/// Shirt numbers follow the club convention of 1-150
pub fn validate_shirt_number(number: i32) -> Result<(), AppError> {
    if !(1..=150).contains(&number) {
        return Err(AppError::Validation(
            "Player number must be between 1 and 150".to_string(),
        ));
    }
    Ok(())
}

/// Service for handling free-pool player business logic
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Lists all players, newest first
    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<PlayerResponse>, AppError> {
        let players = self.repository.list_players().await?;
        debug!(player_count = players.len(), "Players retrieved");
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }

    /// Creates a player in the free pool. Shirt numbers are unique among
    /// free players; the same number may exist on different rosters.
    #[instrument(skip(self))]
    pub async fn create_player(
        &self,
        request: PlayerCreateRequest,
    ) -> Result<PlayerResponse, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Player name is required".to_string()));
        }
        validate_shirt_number(request.number)?;

        if let Some(existing) = self.repository.find_free_by_number(request.number).await? {
            debug!(
                player_id = %existing.id,
                number = request.number,
                "Free-pool shirt number already taken"
            );
            return Err(AppError::ConstraintViolation(format!(
                "Spillernummer {} finnes allerede.",
                request.number
            )));
        }

        let player = PlayerModel::new_free(name.to_string(), request.number);
        self.repository.create_player(&player).await?;

        info!(player_id = %player.id, name = %player.name, "Player created in free pool");
        Ok(PlayerResponse::from(player))
    }

    /// Deletes a player. A rostered player is released back to the free
    /// pool instead of being removed; a free player is deleted outright.
    /// Ledger rows and goals survive either way.
    #[instrument(skip(self))]
    pub async fn delete_player(&self, player_id: Uuid) -> Result<(), AppError> {
        let player = self
            .repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        if player.team_id.is_some() {
            self.repository.release_player(player_id).await?;
            info!(player_id = %player_id, "Rostered player released to free pool");
        } else {
            self.repository.delete_player(player_id).await?;
            info!(player_id = %player_id, "Free player deleted");
        }

        Ok(())
    }
}
