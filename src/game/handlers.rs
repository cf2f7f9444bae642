use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::{
    service::GameService,
    types::{GameCreateRequest, GameResponse, GoalCreateRequest, GoalResponse},
};
use crate::membership::service::MembershipService;
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> GameService {
    let membership_service = MembershipService::new(
        Arc::clone(&state.membership_repository),
        Arc::clone(&state.team_repository),
        Arc::clone(&state.player_repository),
    );
    GameService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.tournament_repository),
        Arc::clone(&state.team_repository),
        Arc::clone(&state.player_repository),
        membership_service,
    )
}

/// HTTP handler for listing a tournament's games
///
/// GET /tournaments/:id/games
#[instrument(name = "list_tournament_games", skip(state))]
pub async fn list_tournament_games(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let games = service(&state).list_tournament_games(tournament_id).await?;
    Ok(Json(games))
}

/// HTTP handler for creating a game in a tournament
///
/// POST /tournaments/:id/games
#[instrument(name = "create_tournament_game", skip(state))]
pub async fn create_tournament_game(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<GameCreateRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state)
        .create_tournament_game(tournament_id, request)
        .await?;
    Ok(Json(game))
}

/// HTTP handler for fetching a single tournament game
///
/// GET /tournaments/:id/games/:game_id
#[instrument(name = "get_tournament_game", skip(state))]
pub async fn get_tournament_game(
    State(state): State<AppState>,
    Path((tournament_id, game_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state)
        .get_tournament_game(tournament_id, game_id)
        .await?;
    Ok(Json(game))
}

/// HTTP handler for deleting a tournament game
///
/// DELETE /tournaments/:id/games/:game_id
#[instrument(name = "delete_tournament_game", skip(state))]
pub async fn delete_tournament_game(
    State(state): State<AppState>,
    Path((tournament_id, game_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    service(&state)
        .delete_tournament_game(tournament_id, game_id)
        .await?;
    Ok(Json(json!({ "message": "Game deleted successfully" })))
}

/// HTTP handler for starting a tournament game
///
/// POST /tournaments/:id/games/:game_id/start
#[instrument(name = "start_tournament_game", skip(state))]
pub async fn start_tournament_game(
    State(state): State<AppState>,
    Path((tournament_id, game_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state)
        .start_tournament_game(tournament_id, game_id)
        .await?;
    Ok(Json(game))
}

/// HTTP handler for finishing a tournament game
///
/// POST /tournaments/:id/games/:game_id/finish
#[instrument(name = "finish_tournament_game", skip(state))]
pub async fn finish_tournament_game(
    State(state): State<AppState>,
    Path((tournament_id, game_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state)
        .finish_tournament_game(tournament_id, game_id)
        .await?;
    Ok(Json(game))
}

/// HTTP handler for registering a goal on a tournament game
///
/// POST /tournaments/:id/games/:game_id/goals
#[instrument(name = "add_tournament_goal", skip(state))]
pub async fn add_tournament_goal(
    State(state): State<AppState>,
    Path((tournament_id, game_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<GoalCreateRequest>,
) -> Result<Json<GoalResponse>, AppError> {
    let goal = service(&state)
        .add_tournament_goal(tournament_id, game_id, request)
        .await?;
    Ok(Json(goal))
}

/// HTTP handler for deleting a goal from a tournament game
///
/// DELETE /tournaments/:id/games/:game_id/goals/:goal_id
#[instrument(name = "delete_tournament_goal", skip(state))]
pub async fn delete_tournament_goal(
    State(state): State<AppState>,
    Path((tournament_id, game_id, goal_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    service(&state)
        .delete_tournament_goal(tournament_id, game_id, goal_id)
        .await?;
    Ok(Json(json!({ "message": "Goal deleted successfully" })))
}

/// HTTP handler for listing all games (legacy surface)
///
/// GET /games
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let games = service(&state).list_games().await?;
    Ok(Json(games))
}

/// HTTP handler for creating a non-tournament game (legacy surface)
///
/// POST /games
#[instrument(name = "create_game", skip(state))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<GameCreateRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state).create_game(request).await?;
    Ok(Json(game))
}

/// HTTP handler for starting a game (legacy surface)
///
/// POST /games/:id/start
#[instrument(name = "start_game", skip(state))]
pub async fn start_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state).start_game(game_id).await?;
    Ok(Json(game))
}

/// HTTP handler for finishing a game (legacy surface)
///
/// POST /games/:id/finish
#[instrument(name = "finish_game", skip(state))]
pub async fn finish_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state).finish_game(game_id).await?;
    Ok(Json(game))
}

/// HTTP handler for registering a goal (legacy surface)
///
/// POST /games/:id/goals
#[instrument(name = "add_goal", skip(state))]
pub async fn add_goal(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<GoalCreateRequest>,
) -> Result<Json<GoalResponse>, AppError> {
    let goal = service(&state).add_goal(game_id, request).await?;
    Ok(Json(goal))
}

/// HTTP handler for purging all games and goals
///
/// DELETE /admin/clear-games
#[instrument(name = "clear_games", skip(state))]
pub async fn clear_games(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (games, goals) = service(&state).clear_games().await?;
    Ok(Json(json!({
        "success": true,
        "message": "All games and goals have been deleted",
        "games": games,
        "goals": goals,
    })))
}
