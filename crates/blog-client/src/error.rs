//! Client error types

use thiserror::Error;

/// Why a discovery attempt produced no URL. Never surfaced to callers of the
/// resolver; `discover()` logs it and falls back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Tunnel agent unreachable: {0}")]
    Unreachable(String),

    #[error("Tunnel agent timed out")]
    Timeout,

    #[error("Tunnel agent returned status {0}")]
    Status(u16),

    #[error("Malformed tunnel payload: {0}")]
    Malformed(String),

    #[error("No public URL found in tunnel payload")]
    NoMatch,
}

/// One failed request attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Undecodable response body: {0}")]
    Decode(String),
}

/// Both attempts of a wrapped request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Request failed after retry (first attempt: {first}; retry: {retry})")]
pub struct RequestFailure {
    pub first: AttemptError,
    pub retry: AttemptError,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Override store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Override store format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Resolver construction failures.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid public URL pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
