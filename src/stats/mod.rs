pub mod handlers;
pub mod models;

mod classify;
mod errors;
mod players;
mod resolve;
mod scorers;
mod service;
mod standings;

pub use classify::classify;
pub use errors::StatsError;
pub use models::*;
pub use resolve::resolve_participant;
pub use service::StatsService;
