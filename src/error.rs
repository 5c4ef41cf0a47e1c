use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Local persistence errors (pending-secret and session files).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {what}: {source}")]
    Read {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {what}: {source}")]
    Write {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Login-flow errors with structured variants.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("login flow is not in the {expected} state")]
    UnexpectedState { expected: &'static str },

    #[error("no session credential is held")]
    MissingToken,

    #[error("profile fetch failed, credential retained: {0}")]
    ProfileUnavailable(String),

    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
