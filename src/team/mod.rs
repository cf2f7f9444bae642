// Public API - what other modules can use
pub use models::TeamModel;
pub use service::TeamService;

// Internal modules
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

/// A team roster never holds more than 10 players
pub const ROSTER_CAPACITY: usize = 10;
