use serde::{Deserialize, Serialize};

/// `POST start` response. Older backends call the token `session_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartResponse {
    #[serde(alias = "session_id")]
    pub user_id: String,
    #[serde(default)]
    pub started_at: Option<String>,
}

/// `POST submit` body.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest<'a> {
    pub user_id: &'a str,
    pub answers: &'a [u8],
}

/// `GET health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub mode: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
