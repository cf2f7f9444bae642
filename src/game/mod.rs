// Public API - what other modules can use
pub use models::{GameModel, GameStatus, GoalModel};
pub use service::GameService;

// Internal modules
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
