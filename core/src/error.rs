use std::path::PathBuf;

use thiserror::Error;

/// Feil fra plan-motoren og JSON-lagringen.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("session count must be at least 1 (got {0})")]
    InvalidSessionCount(u32),

    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json parse error in {} at {}: {source}", .path.display(), .source.path())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("json serialize error: {0}")]
    JsonWrite(#[from] serde_json::Error),
}

impl PlanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlanError::Io { path: path.into(), source }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
