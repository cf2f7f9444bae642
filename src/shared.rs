use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::repository::GameRepository;
use crate::membership::repository::MembershipRepository;
use crate::player::repository::PlayerRepository;
use crate::team::repository::TeamRepository;
use crate::tournament::repository::TournamentRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
    pub team_repository: Arc<dyn TeamRepository + Send + Sync>,
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    pub game_repository: Arc<dyn GameRepository + Send + Sync>,
    pub membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        tournament_repository: Arc<dyn TournamentRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
    ) -> Self {
        Self {
            tournament_repository,
            team_repository,
            player_repository,
            game_repository,
            membership_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, msg),
            AppError::ConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::game::repository::InMemoryGameRepository;
    use crate::membership::repository::InMemoryMembershipRepository;
    use crate::player::repository::InMemoryPlayerRepository;
    use crate::team::repository::InMemoryTeamRepository;
    use crate::tournament::repository::InMemoryTournamentRepository;

    /// Builder for creating AppState with overrides for testing.
    /// Defaults every repository to a fresh in-memory implementation.
    pub struct AppStateBuilder {
        tournament_repository: Option<Arc<dyn TournamentRepository + Send + Sync>>,
        team_repository: Option<Arc<dyn TeamRepository + Send + Sync>>,
        player_repository: Option<Arc<dyn PlayerRepository + Send + Sync>>,
        game_repository: Option<Arc<dyn GameRepository + Send + Sync>>,
        membership_repository: Option<Arc<dyn MembershipRepository + Send + Sync>>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                tournament_repository: None,
                team_repository: None,
                player_repository: None,
                game_repository: None,
                membership_repository: None,
            }
        }

        pub fn with_tournament_repository(
            mut self,
            repo: Arc<dyn TournamentRepository + Send + Sync>,
        ) -> Self {
            self.tournament_repository = Some(repo);
            self
        }

        pub fn with_team_repository(
            mut self,
            repo: Arc<dyn TeamRepository + Send + Sync>,
        ) -> Self {
            self.team_repository = Some(repo);
            self
        }

        pub fn with_player_repository(
            mut self,
            repo: Arc<dyn PlayerRepository + Send + Sync>,
        ) -> Self {
            self.player_repository = Some(repo);
            self
        }

        pub fn with_game_repository(
            mut self,
            repo: Arc<dyn GameRepository + Send + Sync>,
        ) -> Self {
            self.game_repository = Some(repo);
            self
        }

        pub fn with_membership_repository(
            mut self,
            repo: Arc<dyn MembershipRepository + Send + Sync>,
        ) -> Self {
            self.membership_repository = Some(repo);
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                tournament_repository: self
                    .tournament_repository
                    .unwrap_or_else(|| Arc::new(InMemoryTournamentRepository::new())),
                team_repository: self
                    .team_repository
                    .unwrap_or_else(|| Arc::new(InMemoryTeamRepository::new())),
                player_repository: self
                    .player_repository
                    .unwrap_or_else(|| Arc::new(InMemoryPlayerRepository::new())),
                game_repository: self
                    .game_repository
                    .unwrap_or_else(|| Arc::new(InMemoryGameRepository::new())),
                membership_repository: self
                    .membership_repository
                    .unwrap_or_else(|| Arc::new(InMemoryMembershipRepository::new())),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
