use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::TeamModel,
    repository::TeamRepository,
    types::{RosterAddRequest, TeamCreateRequest, TeamResponse},
    ROSTER_CAPACITY,
};
use crate::{
    membership::{models::MembershipRecord, repository::MembershipRepository},
    player::{
        models::PlayerModel, repository::PlayerRepository, service::validate_shirt_number,
        types::PlayerResponse,
    },
    shared::AppError,
    tournament::repository::TournamentRepository,
};

/// Service for handling team and roster business logic
pub struct TeamService {
    repository: Arc<dyn TeamRepository + Send + Sync>,
    tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
}

impl TeamService {
    pub fn new(
        repository: Arc<dyn TeamRepository + Send + Sync>,
        tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            tournament_repository,
            player_repository,
            membership_repository,
        }
    }

    /// Lists the teams of a tournament with their current roster sizes
    #[instrument(skip(self))]
    pub async fn list_teams(&self, tournament_id: Uuid) -> Result<Vec<TeamResponse>, AppError> {
        self.require_tournament(tournament_id).await?;

        let teams = self.repository.list_by_tournament(tournament_id).await?;
        let mut responses = Vec::new();
        for team in teams {
            let player_count = self.player_repository.list_by_team(team.id).await?.len();
            responses.push(TeamResponse {
                id: team.id,
                name: team.name,
                tournament_id: team.tournament_id,
                player_count,
            });
        }
        Ok(responses)
    }

    /// Creates a new team in a tournament
    #[instrument(skip(self))]
    pub async fn create_team(
        &self,
        tournament_id: Uuid,
        request: TeamCreateRequest,
    ) -> Result<TeamResponse, AppError> {
        self.require_tournament(tournament_id).await?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Team name is required".to_string()));
        }

        let team = TeamModel::new(name.to_string(), tournament_id);
        self.repository.create_team(&team).await?;

        info!(team_id = %team.id, name = %team.name, "Team created");
        Ok(TeamResponse {
            id: team.id,
            name: team.name,
            tournament_id: team.tournament_id,
            player_count: 0,
        })
    }

    /// Deletes a team; its players return to the free pool. Membership
    /// records are kept, they are the durable participation evidence.
    #[instrument(skip(self))]
    pub async fn delete_team(&self, tournament_id: Uuid, team_id: Uuid) -> Result<(), AppError> {
        self.require_team_in_tournament(tournament_id, team_id)
            .await?;

        let released = self.player_repository.release_by_team(team_id).await?;
        self.repository.delete_team(team_id).await?;

        info!(team_id = %team_id, released_players = released, "Team deleted, roster freed");
        Ok(())
    }

    /// Lists the current roster of a team
    #[instrument(skip(self))]
    pub async fn list_roster(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<PlayerResponse>, AppError> {
        self.require_team_in_tournament(tournament_id, team_id)
            .await?;

        let players = self.player_repository.list_by_team(team_id).await?;
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }

    /// Adds a player to a roster, either by creating a new player or by
    /// attaching a free-pool player. Every successful add writes a
    /// membership record so the participation survives later roster churn.
    #[instrument(skip(self, request))]
    pub async fn add_to_roster(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        request: RosterAddRequest,
    ) -> Result<PlayerResponse, AppError> {
        self.require_team_in_tournament(tournament_id, team_id)
            .await?;

        let roster = self.player_repository.list_by_team(team_id).await?;
        if roster.len() >= ROSTER_CAPACITY {
            return Err(AppError::ConstraintViolation(format!(
                "Team already has maximum number of players ({})",
                ROSTER_CAPACITY
            )));
        }

        let player = match request.from_player_id {
            Some(from_player_id) => {
                self.attach_free_player(tournament_id, team_id, from_player_id, request.number)
                    .await?
            }
            None => {
                self.create_rostered_player(tournament_id, team_id, request)
                    .await?
            }
        };

        let inserted = self
            .membership_repository
            .record(&MembershipRecord::new(tournament_id, team_id, player.id))
            .await?;
        debug!(
            player_id = %player.id,
            team_id = %team_id,
            newly_recorded = inserted,
            "Membership recorded for roster add"
        );

        info!(player_id = %player.id, team_id = %team_id, "Player added to roster");
        Ok(PlayerResponse::from(player))
    }

    /// Removes a player from a roster back to the free pool. The membership
    /// record stays; historical games still resolve to this team.
    #[instrument(skip(self))]
    pub async fn remove_from_roster(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), AppError> {
        self.require_team_in_tournament(tournament_id, team_id)
            .await?;

        let player = self
            .player_repository
            .get_player(player_id)
            .await?
            .filter(|p| p.team_id == Some(team_id))
            .ok_or_else(|| AppError::NotFound("Player not found on this team".to_string()))?;

        self.player_repository.release_player(player.id).await?;
        info!(player_id = %player_id, team_id = %team_id, "Player removed from roster");
        Ok(())
    }

    async fn attach_free_player(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        from_player_id: Uuid,
        number: Option<i32>,
    ) -> Result<PlayerModel, AppError> {
        let free_player = self
            .player_repository
            .get_player(from_player_id)
            .await?
            .filter(|p| p.is_free())
            .ok_or_else(|| AppError::NotFound("Unassigned player not found".to_string()))?;

        // Use provided number if set, otherwise keep the player's number
        let new_number = match number {
            Some(n) => {
                validate_shirt_number(n)?;
                n
            }
            None => free_player.number,
        };

        if self
            .player_repository
            .find_by_team_and_number(team_id, new_number)
            .await?
            .is_some()
        {
            return Err(AppError::ConstraintViolation(
                "Player number already taken on this team".to_string(),
            ));
        }

        self.player_repository
            .assign_to_team(free_player.id, team_id, tournament_id, new_number)
            .await
    }

    async fn create_rostered_player(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        request: RosterAddRequest,
    ) -> Result<PlayerModel, AppError> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("Player name is required".to_string()))?;
        let number = request
            .number
            .ok_or_else(|| AppError::Validation("Player number is required".to_string()))?;
        validate_shirt_number(number)?;

        if self
            .player_repository
            .find_by_team_and_number(team_id, number)
            .await?
            .is_some()
        {
            return Err(AppError::ConstraintViolation(
                "Player number already taken".to_string(),
            ));
        }

        let player = PlayerModel::new_on_team(name.to_string(), number, team_id, tournament_id);
        self.player_repository.create_player(&player).await?;
        Ok(player)
    }

    async fn require_tournament(&self, tournament_id: Uuid) -> Result<(), AppError> {
        self.tournament_repository
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;
        Ok(())
    }

    async fn require_team_in_tournament(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
    ) -> Result<TeamModel, AppError> {
        self.repository
            .get_team(team_id)
            .await?
            .filter(|t| t.tournament_id == Some(tournament_id))
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
    }
}
