//! Core error types for quizroom-core.
//!
//! This module defines the error hierarchy using thiserror. Failures at the
//! three scoring-service call sites are kept apart so the presentation
//! layer can show a distinct message and retry affordance for each.

use std::path::PathBuf;
use thiserror::Error;

use crate::quiz::SessionState;

/// Core error type for quizroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Quiz session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Scoring service errors
    #[error("Scoring service error: {0}")]
    Service(#[from] ServiceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Failures raised at the controller boundary.
///
/// None of these is fatal to the controller: each leaves it in the state it
/// was in before the failed operation, so the operation can be retried.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    /// The question set could not be retrieved while loading.
    #[error("Failed to fetch questions: {0}")]
    FetchQuestionsFailed(#[source] ServiceError),

    /// A session identity could not be acquired.
    #[error("Failed to start session: {0}")]
    SessionStartFailed(#[source] ServiceError),

    /// The answer vector could not be submitted.
    #[error("Failed to submit answers: {0}")]
    SubmissionFailed(#[source] ServiceError),

    /// The operation is not valid in the current state.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// Submission requested with unanswered questions.
    #[error("Answers missing for questions {missing:?}")]
    IncompleteAnswers { missing: Vec<usize> },
}

impl SessionError {
    /// Message suitable for showing to the person taking the quiz.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::FetchQuestionsFailed(_) => {
                "Could not load the questions. Check the connection and try again."
            }
            SessionError::SessionStartFailed(_) => "Could not start the quiz. Please try again.",
            SessionError::SubmissionFailed(_) => {
                "Could not send your answers. Your answers are kept; try submitting again."
            }
            SessionError::InvalidState { .. } => "That action is not available right now.",
            SessionError::IncompleteAnswers { .. } => "Some questions have not been answered yet.",
        }
    }

    /// Whether repeating the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::FetchQuestionsFailed(_)
                | SessionError::SessionStartFailed(_)
                | SessionError::SubmissionFailed(_)
        )
    }
}

/// Scoring service (HTTP) errors.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded or lacks expected fields.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The configured endpoint base cannot be used to build request URLs.
    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable configuration directory
    #[error("Cannot determine configuration directory: {0}")]
    NoConfigDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Rating outside the Likert scale
    #[error("Rating {value} is outside 1..=5")]
    RatingOutOfRange { value: i64 },

    /// Rating input that is not an integer
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
