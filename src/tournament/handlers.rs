use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    service::TournamentService,
    types::{TournamentCreateRequest, TournamentResponse, TournamentUpdateRequest},
};
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> TournamentService {
    TournamentService::new(
        Arc::clone(&state.tournament_repository),
        Arc::clone(&state.team_repository),
        Arc::clone(&state.player_repository),
        Arc::clone(&state.game_repository),
        Arc::clone(&state.membership_repository),
    )
}

/// HTTP handler for creating a new tournament
///
/// POST /tournaments
#[instrument(name = "create_tournament", skip(state))]
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<TournamentCreateRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = service(&state).create_tournament(request).await?;

    info!(tournament_id = %tournament.id, "Tournament created");
    Ok(Json(tournament))
}

/// HTTP handler for listing all tournaments
///
/// GET /tournaments
#[instrument(name = "list_tournaments", skip(state))]
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TournamentResponse>>, AppError> {
    let tournaments = service(&state).list_tournaments().await?;
    Ok(Json(tournaments))
}

/// HTTP handler for fetching a single tournament
///
/// GET /tournaments/:id
#[instrument(name = "get_tournament", skip(state))]
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = service(&state).get_tournament(tournament_id).await?;
    Ok(Json(tournament))
}

/// HTTP handler for updating a tournament's finished flag
///
/// PATCH /tournaments/:id
#[instrument(name = "update_tournament", skip(state))]
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<TournamentUpdateRequest>,
) -> Result<Json<TournamentResponse>, AppError> {
    let tournament = service(&state)
        .update_tournament(tournament_id, request)
        .await?;
    Ok(Json(tournament))
}

/// HTTP handler for deleting a tournament and everything it owns
///
/// DELETE /tournaments/:id
#[instrument(name = "delete_tournament", skip(state))]
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service(&state).delete_tournament(tournament_id).await?;
    Ok(Json(json!({ "message": "Tournament deleted successfully" })))
}
