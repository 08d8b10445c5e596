//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::{QuizError, ValidationError};

/// Errors emitted while fetching the raw question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("HTTP error! Status: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted by the load pipeline (fetch, then validate).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadPoolError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("failed to load questions: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors emitted while reading service configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Load(#[from] LoadPoolError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
