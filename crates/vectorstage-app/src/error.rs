//! Application errors.

use thiserror::Error;
use vectorstage_core::StageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error("Script error: {0}")]
    Script(String),
}

pub type AppResult<T> = Result<T, AppError>;
