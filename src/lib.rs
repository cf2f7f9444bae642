// Library crate for the football tournament tracking server
// This file exposes the public API for integration tests

pub mod game;
pub mod membership;
pub mod player;
pub mod shared;
pub mod stats;
pub mod team;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use game::{models::GameStatus, repository::GameRepository, service::GameService};
pub use membership::{repository::MembershipRepository, service::MembershipService};
pub use shared::{AppError, AppState};
pub use stats::{GameOutcome, PlayerRecord, StatsService, TeamRow, TopScorerRow};
