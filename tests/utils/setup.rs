#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;
use uuid::Uuid;

use ligaen::{
    game::{
        service::GameService,
        types::{GameCreateRequest, GoalCreateRequest},
    },
    membership::{repository::InMemoryMembershipRepository, service::MembershipService},
    player::{repository::InMemoryPlayerRepository, service::PlayerService},
    stats::StatsService,
    team::{
        repository::InMemoryTeamRepository,
        service::TeamService,
        types::{RosterAddRequest, TeamCreateRequest},
    },
    tournament::{
        repository::InMemoryTournamentRepository, service::TournamentService,
        types::TournamentCreateRequest,
    },
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// All services wired against shared in-memory repositories, plus direct
/// repository handles for assertions.
pub struct TestSetup {
    pub tournament_service: TournamentService,
    pub team_service: TeamService,
    pub player_service: PlayerService,
    pub game_service: GameService,
    pub stats_service: StatsService,
    pub membership_repository: Arc<InMemoryMembershipRepository>,
    pub player_repository: Arc<InMemoryPlayerRepository>,
    pub game_repository: Arc<ligaen::game::repository::InMemoryGameRepository>,
}

impl TestSetup {
    pub fn new() -> Self {
        let tournament_repository = Arc::new(InMemoryTournamentRepository::new());
        let team_repository = Arc::new(InMemoryTeamRepository::new());
        let player_repository = Arc::new(InMemoryPlayerRepository::new());
        let game_repository = Arc::new(ligaen::game::repository::InMemoryGameRepository::new());
        let membership_repository = Arc::new(InMemoryMembershipRepository::new());

        let membership_service = MembershipService::new(
            membership_repository.clone(),
            team_repository.clone(),
            player_repository.clone(),
        );

        Self {
            tournament_service: TournamentService::new(
                tournament_repository.clone(),
                team_repository.clone(),
                player_repository.clone(),
                game_repository.clone(),
                membership_repository.clone(),
            ),
            team_service: TeamService::new(
                team_repository.clone(),
                tournament_repository.clone(),
                player_repository.clone(),
                membership_repository.clone(),
            ),
            player_service: PlayerService::new(player_repository.clone()),
            game_service: GameService::new(
                game_repository.clone(),
                tournament_repository.clone(),
                team_repository.clone(),
                player_repository.clone(),
                membership_service,
            ),
            stats_service: StatsService::new(
                game_repository.clone(),
                team_repository.clone(),
                player_repository.clone(),
                membership_repository.clone(),
            ),
            membership_repository,
            player_repository,
            game_repository,
        }
    }

    // ========================================================================
    // Action Helpers
    // ========================================================================

    pub async fn create_tournament(&self, name: &str) -> Uuid {
        self.tournament_service
            .create_tournament(TournamentCreateRequest {
                name: name.to_string(),
            })
            .await
            .expect("tournament creation should succeed")
            .id
    }

    pub async fn create_team(&self, tournament_id: Uuid, name: &str) -> Uuid {
        self.team_service
            .create_team(
                tournament_id,
                TeamCreateRequest {
                    name: name.to_string(),
                },
            )
            .await
            .expect("team creation should succeed")
            .id
    }

    pub async fn add_roster_player(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        name: &str,
        number: i32,
    ) -> Uuid {
        self.team_service
            .add_to_roster(
                tournament_id,
                team_id,
                RosterAddRequest {
                    name: Some(name.to_string()),
                    number: Some(number),
                    from_player_id: None,
                },
            )
            .await
            .expect("roster add should succeed")
            .id
    }

    /// Creates a game and starts it
    pub async fn start_game(&self, tournament_id: Uuid, home: Uuid, away: Uuid) -> Uuid {
        let game = self
            .game_service
            .create_tournament_game(
                tournament_id,
                GameCreateRequest {
                    home_team_id: home,
                    away_team_id: away,
                },
            )
            .await
            .expect("game creation should succeed");
        self.game_service
            .start_tournament_game(tournament_id, game.id)
            .await
            .expect("game start should succeed");
        game.id
    }

    pub async fn score(&self, tournament_id: Uuid, game_id: Uuid, player_id: Uuid) -> Uuid {
        self.score_goal(tournament_id, game_id, player_id, false)
            .await
    }

    pub async fn score_goal(
        &self,
        tournament_id: Uuid,
        game_id: Uuid,
        player_id: Uuid,
        own_goal: bool,
    ) -> Uuid {
        self.game_service
            .add_tournament_goal(
                tournament_id,
                game_id,
                GoalCreateRequest {
                    player_id,
                    own_goal,
                },
            )
            .await
            .expect("goal should be registered")
            .id
    }

    pub async fn finish_game(&self, tournament_id: Uuid, game_id: Uuid) {
        self.game_service
            .finish_tournament_game(tournament_id, game_id)
            .await
            .expect("game finish should succeed");
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}
