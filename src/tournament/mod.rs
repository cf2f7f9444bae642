// Public API - what other modules can use
pub use models::TournamentModel;
pub use service::TournamentService;

// Internal modules
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
