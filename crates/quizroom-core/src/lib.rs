//! # Quizroom Core Library
//!
//! This library provides the core logic for the Quizroom Likert-scale quiz
//! client. All quiz behavior lives here; the CLI binary is a thin
//! presentation layer that drives the controller through its public
//! operations.
//!
//! ## Architecture
//!
//! - **Quiz Controller**: A clock-driven state machine that requires the
//!   caller to invoke `tick()` once a scheduled transition is due
//! - **Scoring Service**: Trait for the external HTTP service that owns
//!   questions, scoring, and report rendering
//! - **Report**: Result schemas and the presentation adapter over them
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`QuizSessionController`]: Core quiz state machine
//! - [`ScoringService`]: Trait for scoring backends; [`HttpScoringService`]
//!   is the production client
//! - [`ProfileView`]: Schema-independent view of a result
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod quiz;
pub mod report;
pub mod service;
pub mod storage;

pub use error::{ConfigError, CoreError, ServiceError, SessionError, ValidationError};
pub use events::{InputOutcome, SessionEvent};
pub use quiz::{
    AnswerVector, Clock, IdGenerator, IdentitySource, ManualClock, PendingAction, Question,
    QuestionSet, QuizSessionController, Rating, RestartPolicy, SessionConfig, SessionIdentity,
    SessionState, SystemClock, UuidGenerator,
};
pub use report::{ChartImages, ProfileView, Report, ResultPayload, ResultSchema, Section};
pub use service::{HealthStatus, HttpScoringService, ScoringService};
pub use storage::Config;
