use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::models::{PlayerRecord, TeamRow, TopScorerRow};
use super::service::StatsService;
use crate::shared::{AppError, AppState};

/// Combined standings view: league table plus top scorers
#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<TeamRow>,
    pub top_scorers: Vec<TopScorerRow>,
}

fn service(state: &AppState) -> StatsService {
    StatsService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.team_repository),
        Arc::clone(&state.player_repository),
        Arc::clone(&state.membership_repository),
    )
}

/// HTTP handler for a tournament's standings and top scorers
///
/// GET /tournaments/:id/standings
#[instrument(name = "tournament_standings", skip(state))]
pub async fn tournament_standings(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<StandingsResponse>, AppError> {
    state
        .tournament_repository
        .get_tournament(tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

    let service = service(&state);
    let standings = service.standings(tournament_id).await?;
    let top_scorers = service.top_scorers(tournament_id).await?;

    Ok(Json(StandingsResponse {
        standings,
        top_scorers,
    }))
}

/// HTTP handler for lifetime player statistics
///
/// GET /players/stats
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerRecord>>, AppError> {
    let records = service(&state).player_stats().await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn standings_for_missing_tournament_is_404() {
        let app_state = AppStateBuilder::new().build();
        let app = Router::new()
            .route(
                "/tournaments/:id/standings",
                axum::routing::get(tournament_standings),
            )
            .with_state(app_state);

        let request = Request::builder()
            .method("GET")
            .uri(format!("/tournaments/{}/standings", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn player_stats_empty_store_is_empty_list() {
        let app_state = AppStateBuilder::new().build();
        let app = Router::new()
            .route("/players/stats", axum::routing::get(player_stats))
            .with_state(app_state);

        let request = Request::builder()
            .method("GET")
            .uri("/players/stats")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let records: Vec<PlayerRecord> = serde_json::from_slice(&body).unwrap();
        assert!(records.is_empty());
    }
}
