mod game;
mod membership;
mod player;
mod shared;
mod stats;
mod team;
mod tournament;

use axum::{
    routing::{delete, get, post},
    Router,
};
use game::repository::InMemoryGameRepository;
use membership::repository::InMemoryMembershipRepository;
// use membership::repository::PostgresMembershipRepository; // For production
use player::repository::InMemoryPlayerRepository;
use shared::AppState;
use std::sync::Arc;
use team::repository::InMemoryTeamRepository;
use tournament::repository::InMemoryTournamentRepository;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ligaen=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tournament tracking server");

    // Create shared application state with dependency injection
    let tournament_repository = Arc::new(InMemoryTournamentRepository::new());
    let team_repository = Arc::new(InMemoryTeamRepository::new());
    let player_repository = Arc::new(InMemoryPlayerRepository::new());
    let game_repository = Arc::new(InMemoryGameRepository::new());
    let membership_repository = Arc::new(InMemoryMembershipRepository::new());

    // For production, the membership ledger (the one store historical stats
    // depend on) runs against PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let membership_repository = Arc::new(PostgresMembershipRepository::new(pool));

    let app_state = AppState::new(
        tournament_repository,
        team_repository,
        player_repository,
        game_repository,
        membership_repository,
    );

    let app = Router::new()
        .route(
            "/tournaments",
            get(tournament::handlers::list_tournaments)
                .post(tournament::handlers::create_tournament),
        )
        .route(
            "/tournaments/:id",
            get(tournament::handlers::get_tournament)
                .patch(tournament::handlers::update_tournament)
                .delete(tournament::handlers::delete_tournament),
        )
        .route(
            "/tournaments/:id/teams",
            get(team::handlers::list_teams).post(team::handlers::create_team),
        )
        .route(
            "/tournaments/:id/teams/:team_id",
            delete(team::handlers::delete_team),
        )
        .route(
            "/tournaments/:id/teams/:team_id/players",
            get(team::handlers::list_roster).post(team::handlers::add_to_roster),
        )
        .route(
            "/tournaments/:id/teams/:team_id/players/:player_id",
            delete(team::handlers::remove_from_roster),
        )
        .route(
            "/tournaments/:id/games",
            get(game::handlers::list_tournament_games)
                .post(game::handlers::create_tournament_game),
        )
        .route(
            "/tournaments/:id/games/:game_id",
            get(game::handlers::get_tournament_game)
                .delete(game::handlers::delete_tournament_game),
        )
        .route(
            "/tournaments/:id/games/:game_id/start",
            post(game::handlers::start_tournament_game),
        )
        .route(
            "/tournaments/:id/games/:game_id/finish",
            post(game::handlers::finish_tournament_game),
        )
        .route(
            "/tournaments/:id/games/:game_id/goals",
            post(game::handlers::add_tournament_goal),
        )
        .route(
            "/tournaments/:id/games/:game_id/goals/:goal_id",
            delete(game::handlers::delete_tournament_goal),
        )
        .route(
            "/tournaments/:id/standings",
            get(stats::handlers::tournament_standings),
        )
        .route(
            "/players",
            get(player::handlers::list_players).post(player::handlers::create_player),
        )
        .route("/players/stats", get(stats::handlers::player_stats))
        .route("/players/:id", delete(player::handlers::delete_player))
        .route(
            "/games",
            get(game::handlers::list_games).post(game::handlers::create_game),
        )
        .route("/games/:id/start", post(game::handlers::start_game))
        .route("/games/:id/finish", post(game::handlers::finish_game))
        .route("/games/:id/goals", post(game::handlers::add_goal))
        .route("/admin/clear-games", delete(game::handlers::clear_games))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
