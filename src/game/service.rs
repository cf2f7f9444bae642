use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::{GameModel, GameStatus, GoalModel},
    repository::{AddGoalResult, DeleteGoalResult, GameRepository, TransitionResult},
    types::{GameCreateRequest, GameResponse, GoalCreateRequest, GoalResponse},
};
use crate::{
    membership::service::MembershipService, player::repository::PlayerRepository,
    shared::AppError, team::repository::TeamRepository,
    tournament::repository::TournamentRepository,
};

/// Service for handling game lifecycle and goal business logic
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
    team_repository: Arc<dyn TeamRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    membership_service: MembershipService,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn GameRepository + Send + Sync>,
        tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        membership_service: MembershipService,
    ) -> Self {
        Self {
            repository,
            tournament_repository,
            team_repository,
            player_repository,
            membership_service,
        }
    }

    /// Lists the games of a tournament in creation order
    #[instrument(skip(self))]
    pub async fn list_tournament_games(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<GameResponse>, AppError> {
        self.require_tournament(tournament_id).await?;

        let games = self.repository.list_by_tournament(tournament_id).await?;
        let mut responses = Vec::new();
        for game in games {
            responses.push(self.to_response(game).await?);
        }
        Ok(responses)
    }

    /// Creates a scheduled game between two distinct teams of a tournament
    #[instrument(skip(self))]
    pub async fn create_tournament_game(
        &self,
        tournament_id: Uuid,
        request: GameCreateRequest,
    ) -> Result<GameResponse, AppError> {
        self.require_tournament(tournament_id).await?;

        if request.home_team_id == request.away_team_id {
            return Err(AppError::Validation(
                "Home and away teams cannot be the same".to_string(),
            ));
        }

        for team_id in [request.home_team_id, request.away_team_id] {
            let in_tournament = self
                .team_repository
                .get_team(team_id)
                .await?
                .map(|t| t.tournament_id == Some(tournament_id))
                .unwrap_or(false);
            if !in_tournament {
                return Err(AppError::Validation(
                    "One or both teams not found in tournament".to_string(),
                ));
            }
        }

        let game = GameModel::new(
            Some(tournament_id),
            request.home_team_id,
            request.away_team_id,
        );
        self.repository.create_game(&game).await?;

        info!(game_id = %game.id, tournament_id = %tournament_id, "Game created");
        self.to_response(game).await
    }

    /// Fetches a single game of a tournament
    #[instrument(skip(self))]
    pub async fn get_tournament_game(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameResponse, AppError> {
        let game = self.require_tournament_game(tournament_id, game_id).await?;
        self.to_response(game).await
    }

    /// Deletes a game of a tournament together with its goals
    #[instrument(skip(self))]
    pub async fn delete_tournament_game(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
    ) -> Result<(), AppError> {
        self.require_tournament_game(tournament_id, game_id).await?;
        self.repository.delete_game(game_id).await?;
        info!(game_id = %game_id, "Game deleted");
        Ok(())
    }

    /// Starts a scheduled game of a tournament
    #[instrument(skip(self))]
    pub async fn start_tournament_game(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameResponse, AppError> {
        self.require_tournament_game(tournament_id, game_id).await?;
        self.start(game_id).await
    }

    /// Finishes an in-progress game of a tournament
    #[instrument(skip(self))]
    pub async fn finish_tournament_game(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameResponse, AppError> {
        let game = self.require_tournament_game(tournament_id, game_id).await?;
        self.finish(game).await
    }

    /// Registers a goal on a tournament game. This surface accepts finished
    /// games as well, so scores can be corrected after the final whistle.
    #[instrument(skip(self, request))]
    pub async fn add_tournament_goal(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
        request: GoalCreateRequest,
    ) -> Result<GoalResponse, AppError> {
        let game = self.require_tournament_game(tournament_id, game_id).await?;
        self.add_goal_to(game, request, true).await
    }

    /// Deletes a goal from a tournament game, decrementing the credited
    /// side's score in the same write
    #[instrument(skip(self))]
    pub async fn delete_tournament_goal(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
        goal_id: Uuid,
    ) -> Result<(), AppError> {
        let game = self.require_tournament_game(tournament_id, game_id).await?;

        let goal = self
            .repository
            .get_goal(goal_id)
            .await?
            .filter(|g| g.game_id == game.id)
            .ok_or_else(|| AppError::NotFound("Goal not found".to_string()))?;

        match self.repository.delete_goal(goal.id).await? {
            DeleteGoalResult::Success { .. } => {
                info!(goal_id = %goal_id, game_id = %game_id, "Goal deleted");
                Ok(())
            }
            DeleteGoalResult::GoalNotFound => {
                Err(AppError::NotFound("Goal not found".to_string()))
            }
        }
    }

    /// Lists all games, newest first (legacy surface)
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<GameResponse>, AppError> {
        let games = self.repository.list_games().await?;
        let mut responses = Vec::new();
        for game in games {
            responses.push(self.to_response(game).await?);
        }
        Ok(responses)
    }

    /// Creates a non-tournament game between two distinct teams (legacy
    /// surface for data predating tournaments)
    #[instrument(skip(self))]
    pub async fn create_game(&self, request: GameCreateRequest) -> Result<GameResponse, AppError> {
        if request.home_team_id == request.away_team_id {
            return Err(AppError::Validation(
                "Home and away teams cannot be the same".to_string(),
            ));
        }

        for team_id in [request.home_team_id, request.away_team_id] {
            if self.team_repository.get_team(team_id).await?.is_none() {
                return Err(AppError::Validation(
                    "One or both teams not found".to_string(),
                ));
            }
        }

        let game = GameModel::new(None, request.home_team_id, request.away_team_id);
        self.repository.create_game(&game).await?;

        info!(game_id = %game.id, "Legacy game created");
        self.to_response(game).await
    }

    /// Starts a scheduled game (legacy surface)
    #[instrument(skip(self))]
    pub async fn start_game(&self, game_id: Uuid) -> Result<GameResponse, AppError> {
        self.require_game(game_id).await?;
        self.start(game_id).await
    }

    /// Finishes an in-progress game (legacy surface)
    #[instrument(skip(self))]
    pub async fn finish_game(&self, game_id: Uuid) -> Result<GameResponse, AppError> {
        let game = self.require_game(game_id).await?;
        self.finish(game).await
    }

    /// Registers a goal on an in-progress game (legacy surface, no
    /// post-finish corrections here)
    #[instrument(skip(self, request))]
    pub async fn add_goal(
        &self,
        game_id: Uuid,
        request: GoalCreateRequest,
    ) -> Result<GoalResponse, AppError> {
        let game = self.require_game(game_id).await?;
        self.add_goal_to(game, request, false).await
    }

    /// Deletes every game and goal (admin surface)
    #[instrument(skip(self))]
    pub async fn clear_games(&self) -> Result<(u64, u64), AppError> {
        self.repository.clear_games().await
    }

    async fn start(&self, game_id: Uuid) -> Result<GameResponse, AppError> {
        match self
            .repository
            .try_transition(game_id, GameStatus::Scheduled, GameStatus::InProgress)
            .await?
        {
            TransitionResult::Success(game) => {
                info!(game_id = %game_id, "Game started");
                self.to_response(game).await
            }
            TransitionResult::GameNotFound => {
                Err(AppError::NotFound("Game not found".to_string()))
            }
            TransitionResult::WrongStatus(status) => Err(AppError::InvalidState(format!(
                "Game is not scheduled (status {})",
                status
            ))),
        }
    }

    /// Finishes a game. The first finished game of a tournament triggers
    /// the roster backstop: every current team/player pair of the
    /// tournament is captured into the membership ledger, so rosters that
    /// predate consistent ledger writes still resolve historically.
    async fn finish(&self, game: GameModel) -> Result<GameResponse, AppError> {
        let finished_before = match game.tournament_id {
            Some(tournament_id) => Some(
                self.repository
                    .count_finished_by_tournament(tournament_id)
                    .await?,
            ),
            None => None,
        };

        let updated = match self
            .repository
            .try_transition(game.id, GameStatus::InProgress, GameStatus::Finished)
            .await?
        {
            TransitionResult::Success(game) => game,
            TransitionResult::GameNotFound => {
                return Err(AppError::NotFound("Game not found".to_string()))
            }
            TransitionResult::WrongStatus(status) => {
                return Err(AppError::InvalidState(format!(
                    "Game is not in progress (status {})",
                    status
                )))
            }
        };

        if let (Some(tournament_id), Some(0)) = (game.tournament_id, finished_before) {
            let captured = self
                .membership_service
                .capture_tournament_rosters(tournament_id)
                .await?;
            info!(
                tournament_id = %tournament_id,
                captured,
                "First game finished, rosters captured into membership ledger"
            );
        }

        info!(game_id = %game.id, "Game finished");
        self.to_response(updated).await
    }

    async fn add_goal_to(
        &self,
        game: GameModel,
        request: GoalCreateRequest,
        allow_finished: bool,
    ) -> Result<GoalResponse, AppError> {
        let accepted = game.status == GameStatus::InProgress
            || (allow_finished && game.status == GameStatus::Finished);
        if !accepted {
            let expected = if allow_finished {
                "Game is not in progress or finished"
            } else {
                "Game is not in progress"
            };
            return Err(AppError::InvalidState(expected.to_string()));
        }

        let player = self
            .player_repository
            .get_player(request.player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        // The scorer must be on the current roster of either side
        let player_team = player
            .team_id
            .filter(|team_id| game.involves_team(*team_id))
            .ok_or_else(|| {
                AppError::Validation("Player is not part of this game".to_string())
            })?;

        // Own goals credit the opponent of the scorer's team
        let credited_team = if request.own_goal {
            game.opponent_of(player_team).ok_or(AppError::Internal)?
        } else {
            player_team
        };

        let goal = GoalModel::new(game.id, player.id, credited_team, request.own_goal);
        match self.repository.add_goal(&goal).await? {
            AddGoalResult::Success { goal, game } => {
                debug!(
                    goal_id = %goal.id,
                    credited_team = %credited_team,
                    own_goal = goal.own_goal,
                    home_score = game.home_score,
                    away_score = game.away_score,
                    "Goal registered"
                );
                Ok(GoalResponse {
                    id: goal.id,
                    game_id: goal.game_id,
                    player_id: goal.player_id,
                    player_name: Some(player.name),
                    team_id: goal.team_id,
                    own_goal: goal.own_goal,
                    created_at: goal.created_at,
                })
            }
            AddGoalResult::GameNotFound => Err(AppError::NotFound("Game not found".to_string())),
            // The credited team was derived from the game's own sides above
            AddGoalResult::CreditedTeamNotInGame => Err(AppError::Internal),
        }
    }

    async fn to_response(&self, game: GameModel) -> Result<GameResponse, AppError> {
        let home_team_name = match self.team_repository.get_team(game.home_team_id).await? {
            Some(team) => Some(team.name),
            None => None,
        };
        let away_team_name = match self.team_repository.get_team(game.away_team_id).await? {
            Some(team) => Some(team.name),
            None => None,
        };

        let mut goals = Vec::new();
        for goal in self.repository.list_goals_by_game(game.id).await? {
            let player_name = self
                .player_repository
                .get_player(goal.player_id)
                .await?
                .map(|p| p.name);
            goals.push(GoalResponse {
                id: goal.id,
                game_id: goal.game_id,
                player_id: goal.player_id,
                player_name,
                team_id: goal.team_id,
                own_goal: goal.own_goal,
                created_at: goal.created_at,
            });
        }

        Ok(GameResponse {
            id: game.id,
            tournament_id: game.tournament_id,
            home_team_id: game.home_team_id,
            home_team_name,
            away_team_id: game.away_team_id,
            away_team_name,
            home_score: game.home_score,
            away_score: game.away_score,
            status: game.status,
            created_at: game.created_at,
            goals,
        })
    }

    async fn require_tournament(&self, tournament_id: Uuid) -> Result<(), AppError> {
        self.tournament_repository
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;
        Ok(())
    }

    async fn require_game(&self, game_id: Uuid) -> Result<GameModel, AppError> {
        self.repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    async fn require_tournament_game(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameModel, AppError> {
        self.repository
            .get_game(game_id)
            .await?
            .filter(|g| g.tournament_id == Some(tournament_id))
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}
