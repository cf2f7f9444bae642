use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::{
    service::PlayerService,
    types::{PlayerCreateRequest, PlayerResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all players
///
/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let players = service.list_players().await?;
    Ok(Json(players))
}

/// HTTP handler for creating a free-pool player
///
/// POST /players
#[instrument(name = "create_player", skip(state))]
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.create_player(request).await?;
    Ok(Json(player))
}

/// HTTP handler for deleting (or freeing) a player
///
/// DELETE /players/:id
#[instrument(name = "delete_player", skip(state))]
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    service.delete_player(player_id).await?;
    Ok(Json(json!({ "success": true })))
}
