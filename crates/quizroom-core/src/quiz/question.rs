use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One Likert-scale statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Statement shown to the user. The deployed service calls this `q`.
    #[serde(rename = "q", alias = "text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Axis letter for type-style quizzes (`"E"`, `"N"`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            domain: None,
            category: None,
            kind: None,
            weight: None,
        }
    }
}

/// The ordered, immutable question set for one controller lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
    /// Domain metadata some backends attach; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domains: Option<serde_json::Value>,
}

impl QuestionSet {
    /// Build a question set. Returns `None` when `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            domains: None,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn domains(&self) -> Option<&serde_json::Value> {
        self.domains.as_ref()
    }

    /// Check the shape a usable question set must have.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        if self.questions.is_empty() {
            return Err("question set is empty".into());
        }
        if let Some(i) = self.questions.iter().position(|q| q.text.trim().is_empty()) {
            return Err(format!("question {i} has no text"));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// A single answer on the five-point scale.
///
/// Values are never clamped: anything outside `1..=5` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// All ratings from strongest agreement down, in display order.
    pub const SCALE: [Rating; 5] = [Rating(5), Rating(4), Rating(3), Rating(2), Rating(1)];

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::RatingOutOfRange { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            5 => "Strongly agree",
            4 => "Agree",
            3 => "Neutral",
            2 => "Disagree",
            _ => "Strongly disagree",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

impl std::str::FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
        Rating::new(value)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
