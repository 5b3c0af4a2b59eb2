//! Error types shared across the crate.
//!
//! [`AttemptError`] describes why a single request to the endpoint failed.
//! It never escapes the retry loop: the resilient caller folds it into a
//! [`CallFailure`](crate::resilience::CallFailure) once attempts run out.

use thiserror::Error;

/// Why one attempt against the text-generation endpoint failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Connection, TLS or body-read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not valid JSON.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Valid JSON without a non-empty `candidates[0].content.parts[0].text`.
    #[error("response carried no generated text")]
    MissingText,
}

/// A request that must not be sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("system instruction must not be empty")]
    EmptySystemInstruction,

    #[error("no company at position {0}")]
    UnknownCompany(usize),
}

/// Illegal transition of the analysis session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an analysis is already in progress")]
    Busy,

    #[error("no analysis is in progress")]
    NotInFlight,
}

/// Why the desk could not start an analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeskError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Settings that cannot be resolved into a working configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: pass --api-key or set {0}")]
    MissingApiKey(&'static str),

    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),

    #[error("base URL must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}
