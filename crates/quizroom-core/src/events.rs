use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::SessionState;

/// Every accepted controller transition produces an Event.
/// The presentation layer renders from them; the CLI can print them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    QuestionsLoaded {
        count: usize,
        at: DateTime<Utc>,
    },
    SessionStarted {
        session_id: String,
        question_count: usize,
        at: DateTime<Utc>,
    },
    AnswerRecorded {
        index: usize,
        rating: u8,
        at: DateTime<Utc>,
    },
    QuestionAdvanced {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    /// Back navigation; the slot at `from` was cleared.
    WentBack {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    /// Back-navigation debounce elapsed.
    Unlocked {
        at: DateTime<Utc>,
    },
    SubmissionCompleted {
        session_id: String,
        at: DateTime<Utc>,
    },
    Restarted {
        state: SessionState,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        current_index: usize,
        question_count: usize,
        answers: Vec<u8>,
        locked: bool,
        session_id: Option<String>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

/// Outcome of an input that may be rejected by the transition lock.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Accepted(SessionEvent),
    /// Dropped without any state change.
    Ignored,
}

impl InputOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, InputOutcome::Accepted(_))
    }
}
