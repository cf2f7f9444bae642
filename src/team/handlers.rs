use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::{
    service::TeamService,
    types::{RosterAddRequest, TeamCreateRequest, TeamResponse},
};
use crate::player::types::PlayerResponse;
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> TeamService {
    TeamService::new(
        Arc::clone(&state.team_repository),
        Arc::clone(&state.tournament_repository),
        Arc::clone(&state.player_repository),
        Arc::clone(&state.membership_repository),
    )
}

/// HTTP handler for listing the teams of a tournament
///
/// GET /tournaments/:id/teams
#[instrument(name = "list_teams", skip(state))]
pub async fn list_teams(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    let teams = service(&state).list_teams(tournament_id).await?;
    Ok(Json(teams))
}

/// HTTP handler for creating a team in a tournament
///
/// POST /tournaments/:id/teams
#[instrument(name = "create_team", skip(state))]
pub async fn create_team(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<TeamCreateRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    let team = service(&state).create_team(tournament_id, request).await?;
    Ok(Json(team))
}

/// HTTP handler for deleting a team
///
/// DELETE /tournaments/:id/teams/:team_id
#[instrument(name = "delete_team", skip(state))]
pub async fn delete_team(
    State(state): State<AppState>,
    Path((tournament_id, team_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    service(&state).delete_team(tournament_id, team_id).await?;
    Ok(Json(json!({ "message": "Team deleted successfully" })))
}

/// HTTP handler for listing a team's current roster
///
/// GET /tournaments/:id/teams/:team_id/players
#[instrument(name = "list_roster", skip(state))]
pub async fn list_roster(
    State(state): State<AppState>,
    Path((tournament_id, team_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    let roster = service(&state).list_roster(tournament_id, team_id).await?;
    Ok(Json(roster))
}

/// HTTP handler for adding a player to a roster
///
/// POST /tournaments/:id/teams/:team_id/players
#[instrument(name = "add_to_roster", skip(state, request))]
pub async fn add_to_roster(
    State(state): State<AppState>,
    Path((tournament_id, team_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<RosterAddRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = service(&state)
        .add_to_roster(tournament_id, team_id, request)
        .await?;
    Ok(Json(player))
}

/// HTTP handler for removing a player from a roster
///
/// DELETE /tournaments/:id/teams/:team_id/players/:player_id
#[instrument(name = "remove_from_roster", skip(state))]
pub async fn remove_from_roster(
    State(state): State<AppState>,
    Path((tournament_id, team_id, player_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    service(&state)
        .remove_from_roster(tournament_id, team_id, player_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
