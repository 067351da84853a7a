//! Submit-response schemas.
//!
//! The scoring service sends no schema tag, so the three known result
//! shapes are told apart by their required fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Which result shape a payload carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSchema {
    Creator,
    Domain,
    Mbti,
}

/// Result returned by the scoring service for one submitted session.
///
/// Variant order matters for decoding: the first whose required fields are
/// present wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Creator(CreatorProfile),
    Domain(DomainProfile),
    Mbti(MbtiProfile),
}

impl ResultPayload {
    /// Decode a submit response body, keeping the service's key order.
    pub fn from_slice(body: &[u8]) -> Result<Self, ServiceError> {
        match serde_json::from_slice::<ResultPayload>(body) {
            Ok(payload) => Ok(payload),
            Err(_) => Err(classify_failure(serde_json::from_slice(body))),
        }
    }

    /// Decode an already-parsed value. Map order follows `serde_json::Value`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ServiceError> {
        if !value.is_object() {
            return Err(ServiceError::Malformed("result is not a JSON object".into()));
        }
        serde_json::from_value(value)
            .map_err(|_| ServiceError::Malformed("result matches no known schema".into()))
    }

    pub fn schema(&self) -> ResultSchema {
        match self {
            ResultPayload::Creator(_) => ResultSchema::Creator,
            ResultPayload::Domain(_) => ResultSchema::Domain,
            ResultPayload::Mbti(_) => ResultSchema::Mbti,
        }
    }

    /// Session token echoed back by the service, if any.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            ResultPayload::Creator(p) => p.user_id.as_deref(),
            ResultPayload::Domain(p) => p.user_id.as_deref(),
            ResultPayload::Mbti(p) => p.user_id.as_deref(),
        }
    }
}

fn classify_failure(parsed: serde_json::Result<serde_json::Value>) -> ServiceError {
    match parsed {
        Ok(value) if value.is_object() => {
            ServiceError::Malformed("result matches no known schema".into())
        }
        Ok(_) => ServiceError::Malformed("result is not a JSON object".into()),
        Err(e) => ServiceError::Malformed(format!("result is not JSON: {e}")),
    }
}

/// Creator-core profile with a radar of trait scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    pub main_core_name: String,
    #[serde(default)]
    pub sub_core_title: String,
    #[serde(default)]
    pub suited_for: String,
    #[serde(default)]
    pub not_suited_for: String,
    #[serde(default)]
    pub synthesis: String,
    pub radar_scores: IndexMap<String, f64>,
    #[serde(default)]
    pub data_analysis: Option<DataAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataAnalysis {
    #[serde(default)]
    pub extremeness_score: Option<f64>,
    #[serde(default)]
    pub extremeness_comment: Option<String>,
    #[serde(default)]
    pub most_unique_trait: Option<String>,
    #[serde(default)]
    pub uniqueness_comment: Option<String>,
}

/// Domain/category score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    pub scores: DomainScores,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScores {
    pub domain_scores: IndexMap<String, DomainScore>,
    #[serde(default)]
    pub category_scores: IndexMap<String, f64>,
    #[serde(default)]
    pub total_responses: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub name: String,
    pub raw_score: f64,
    pub weighted_score: f64,
    #[serde(default)]
    pub evidence_weight: Option<f64>,
    #[serde(default)]
    pub description: String,
}

/// Four-letter type profile with an animal persona and content strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbtiProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    pub mbti_type: String,
    #[serde(default)]
    pub animal_name: String,
    #[serde(default)]
    pub animal_icon: String,
    #[serde(default)]
    pub animal_description: String,
    #[serde(default)]
    pub top_strengths: Vec<String>,
    #[serde(default)]
    pub youtube_strategy: Option<ContentStrategy>,
    /// Per-axis scores, when the service includes them.
    #[serde(default)]
    pub scores: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStrategy {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub success_tips: String,
}
