//! Error types for the gt-cli front end.

use gt_core::GtError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Gear train error: {0}")]
    Train(#[from] GtError),

    #[error("Invalid step '{input}': {message}")]
    InvalidStep { input: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
