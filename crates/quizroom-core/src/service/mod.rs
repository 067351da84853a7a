//! Scoring service collaborator.
//!
//! The service owns question content, scoring, and report rendering. The
//! controller only depends on the [`ScoringService`] trait; the HTTP client
//! is the production implementation.

mod http;
mod wire;

pub use http::HttpScoringService;
pub use wire::{HealthStatus, StartResponse, SubmitRequest};

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::quiz::{QuestionSet, SessionIdentity};
use crate::report::{ChartImages, Report, ResultPayload};

#[async_trait]
pub trait ScoringService: Send + Sync {
    /// `GET questions`. Called once per controller load.
    async fn fetch_questions(&self) -> Result<QuestionSet, ServiceError>;

    /// `POST start`. Issues a session identity.
    async fn start_session(&self) -> Result<SessionIdentity, ServiceError>;

    /// `POST submit`. `answers` has one entry per question, each in `1..=5`.
    async fn submit(
        &self,
        session: &SessionIdentity,
        answers: &[u8],
    ) -> Result<ResultPayload, ServiceError>;

    /// `GET pdf/{id}`. Not part of the session state machine.
    async fn fetch_report(&self, session: &SessionIdentity) -> Result<Report, ServiceError>;

    /// `GET charts/{id}`.
    async fn fetch_charts(&self, session: &SessionIdentity) -> Result<ChartImages, ServiceError>;

    /// `GET health`.
    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}
