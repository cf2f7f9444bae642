// Public API - what other modules can use
pub use models::MembershipRecord;
pub use service::MembershipService;

// Internal modules
pub mod models;
pub mod repository;
pub mod service;
