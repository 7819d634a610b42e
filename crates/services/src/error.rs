//! Shared error types for the services crate.

use thiserror::Error;

use guess_core::RoundError;

/// Errors emitted by the collaborator clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("hint generator returned an empty hint")]
    EmptyHint,
    #[error("service reported status {0:?}")]
    Unhealthy(String),
    #[error(transparent)]
    InvalidRound(#[from] RoundError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base URL {raw:?}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
    #[error("invalid request timeout {raw:?}")]
    InvalidTimeout { raw: String },
}

/// Returned by `GameHandle` once the session loop has stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("game session has shut down")]
pub struct SessionClosed;
