use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<AppError> for StatsError {
    fn from(error: AppError) -> Self {
        StatsError::Repository(error.to_string())
    }
}

impl From<StatsError> for AppError {
    fn from(error: StatsError) -> Self {
        match error {
            StatsError::Repository(msg) => AppError::DatabaseError(msg),
        }
    }
}
