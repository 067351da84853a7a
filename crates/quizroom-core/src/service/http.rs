//! HTTP scoring service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use super::wire::{HealthStatus, StartResponse, SubmitRequest};
use super::ScoringService;
use crate::error::ServiceError;
use crate::quiz::{QuestionSet, SessionIdentity};
use crate::report::{filename_from_content_disposition, ChartImages, Report, ResultPayload};
use crate::storage::ServiceConfig;

/// Scoring service reached over HTTP, rooted at an endpoint base such as
/// `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct HttpScoringService {
    client: reqwest::Client,
    base: Url,
}

impl HttpScoringService {
    /// Create a client for `endpoint_base` with a per-request timeout.
    pub fn new(endpoint_base: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let invalid = |message: String| ServiceError::InvalidEndpoint {
            endpoint: endpoint_base.to_string(),
            message,
        };
        let base = Url::parse(endpoint_base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quizroom/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Self::new(
            &config.endpoint_base,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint_base(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidEndpoint {
                endpoint: self.base.to_string(),
                message: "URL cannot be used as a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a response into its body, mapping non-2xx to `Status`.
    async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, ServiceError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, ServiceError> {
        serde_json::from_slice(body)
            .map_err(|e| ServiceError::Malformed(format!("{what} response: {e}")))
    }

    async fn get(&self, segments: &[&str]) -> Result<reqwest::Response, ServiceError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        Ok(self.client.get(url).send().await?)
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn fetch_questions(&self) -> Result<QuestionSet, ServiceError> {
        let response = self.get(&["questions"]).await?;
        let body = Self::success_body(response).await?;
        let set: QuestionSet = Self::decode(&body, "questions")?;
        set.check().map_err(ServiceError::Malformed)?;
        tracing::debug!(count = set.len(), "questions fetched");
        Ok(set)
    }

    async fn start_session(&self) -> Result<SessionIdentity, ServiceError> {
        let url = self.endpoint(&["start"])?;
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).send().await?;
        let body = Self::success_body(response).await?;
        let start: StartResponse = Self::decode(&body, "start")?;
        SessionIdentity::new(start.user_id)
            .ok_or_else(|| ServiceError::Malformed("start response has an empty user_id".into()))
    }

    async fn submit(
        &self,
        session: &SessionIdentity,
        answers: &[u8],
    ) -> Result<ResultPayload, ServiceError> {
        let url = self.endpoint(&["submit"])?;
        tracing::debug!(%url, answers = answers.len(), "POST");
        let response = self
            .client
            .post(url)
            .json(&SubmitRequest {
                user_id: session.as_str(),
                answers,
            })
            .send()
            .await?;
        let body = Self::success_body(response).await?;
        ResultPayload::from_slice(&body)
    }

    async fn fetch_report(&self, session: &SessionIdentity) -> Result<Report, ServiceError> {
        let response = self.get(&["pdf", session.as_str()]).await?;
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let file_name = header(CONTENT_DISPOSITION)
            .as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| Report::default_file_name(session));
        let bytes = Self::success_body(response).await?;
        if bytes.is_empty() {
            return Err(ServiceError::Malformed("report body is empty".into()));
        }
        Ok(Report {
            file_name,
            content_type,
            bytes,
        })
    }

    async fn fetch_charts(&self, session: &SessionIdentity) -> Result<ChartImages, ServiceError> {
        let response = self.get(&["charts", session.as_str()]).await?;
        let body = Self::success_body(response).await?;
        Self::decode(&body, "charts")
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let response = self.get(&["health"]).await?;
        let body = Self::success_body(response).await?;
        Self::decode(&body, "health")
    }
}
