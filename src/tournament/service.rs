use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::TournamentModel,
    repository::TournamentRepository,
    types::{TournamentCreateRequest, TournamentResponse, TournamentUpdateRequest},
};
use crate::{
    game::repository::GameRepository, membership::repository::MembershipRepository,
    player::repository::PlayerRepository, shared::AppError, team::repository::TeamRepository,
};

/// Service for handling tournament business logic
pub struct TournamentService {
    repository: Arc<dyn TournamentRepository + Send + Sync>,
    team_repository: Arc<dyn TeamRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
}

impl TournamentService {
    pub fn new(
        repository: Arc<dyn TournamentRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            team_repository,
            player_repository,
            game_repository,
            membership_repository,
        }
    }

    /// Creates a new tournament with a generated ID
    #[instrument(skip(self))]
    pub async fn create_tournament(
        &self,
        request: TournamentCreateRequest,
    ) -> Result<TournamentResponse, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Tournament name is required".to_string(),
            ));
        }

        let tournament = TournamentModel::new(name.to_string());
        self.repository.create_tournament(&tournament).await?;

        info!(tournament_id = %tournament.id, name = %tournament.name, "Tournament created successfully");

        Ok(TournamentResponse {
            id: tournament.id,
            name: tournament.name,
            is_finished: tournament.is_finished,
            team_count: 0,
            game_count: 0,
            created_at: tournament.created_at,
        })
    }

    /// Gets a single tournament with its team and game counts
    #[instrument(skip(self))]
    pub async fn get_tournament(&self, tournament_id: Uuid) -> Result<TournamentResponse, AppError> {
        let tournament = self
            .repository
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        self.to_response(tournament).await
    }

    /// Lists all tournaments, newest first
    #[instrument(skip(self))]
    pub async fn list_tournaments(&self) -> Result<Vec<TournamentResponse>, AppError> {
        let tournaments = self.repository.list_tournaments().await?;
        debug!(tournament_count = tournaments.len(), "Tournaments retrieved");

        let mut responses = Vec::new();
        for tournament in tournaments {
            responses.push(self.to_response(tournament).await?);
        }
        Ok(responses)
    }

    /// Updates the finished flag. Finishing a tournament severs all active
    /// roster links; membership records persist and keep historical stats
    /// resolvable afterwards.
    #[instrument(skip(self))]
    pub async fn update_tournament(
        &self,
        tournament_id: Uuid,
        request: TournamentUpdateRequest,
    ) -> Result<TournamentResponse, AppError> {
        self.repository
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let updated = self
            .repository
            .set_finished(tournament_id, request.is_finished)
            .await?;

        if request.is_finished {
            let released = self
                .player_repository
                .release_by_tournament(tournament_id)
                .await?;
            info!(
                tournament_id = %tournament_id,
                released_players = released,
                "Tournament finished, rosters severed"
            );
        }

        self.to_response(updated).await
    }

    /// Deletes a tournament and everything it owns: teams, players in its
    /// context, games, goals and membership records. The tournament's
    /// contribution to lifetime player statistics is forfeited with it.
    #[instrument(skip(self))]
    pub async fn delete_tournament(&self, tournament_id: Uuid) -> Result<(), AppError> {
        self.repository
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        self.game_repository
            .delete_by_tournament(tournament_id)
            .await?;
        self.player_repository
            .delete_by_tournament(tournament_id)
            .await?;
        self.team_repository
            .delete_by_tournament(tournament_id)
            .await?;
        self.membership_repository
            .purge_tournament(tournament_id)
            .await?;
        self.repository.delete_tournament(tournament_id).await?;

        info!(tournament_id = %tournament_id, "Tournament deleted with all owned records");
        Ok(())
    }

    async fn to_response(&self, tournament: TournamentModel) -> Result<TournamentResponse, AppError> {
        let team_count = self
            .team_repository
            .list_by_tournament(tournament.id)
            .await?
            .len();
        let game_count = self
            .game_repository
            .list_by_tournament(tournament.id)
            .await?
            .len();

        Ok(TournamentResponse {
            id: tournament.id,
            name: tournament.name,
            is_finished: tournament.is_finished,
            team_count,
            game_count,
            created_at: tournament.created_at,
        })
    }
}
