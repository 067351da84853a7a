//! Shared fixtures for controller tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quizroom_core::report::{ChartImages, Report, ResultPayload};
use quizroom_core::service::{HealthStatus, ScoringService};
use quizroom_core::{
    ManualClock, Question, QuestionSet, QuizSessionController, Rating, ServiceError,
    SessionConfig, SessionIdentity,
};

pub const DELAY: Duration = Duration::from_millis(200);

// ============================================================================
// Fake scoring service
// ============================================================================

/// In-memory scoring service with call counters and failure switches.
pub struct FakeScoringService {
    question_count: usize,
    pub fail_fetch: AtomicBool,
    pub fail_start: AtomicBool,
    pub fail_submit: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub submitted: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeScoringService {
    pub fn new(question_count: usize) -> Self {
        Self {
            question_count,
            fail_fetch: AtomicBool::new(false),
            fail_start: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn submit_calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn last_submission(&self) -> Option<(String, Vec<u8>)> {
        self.submitted.lock().unwrap().last().cloned()
    }

    fn down() -> ServiceError {
        ServiceError::Network("connection refused".into())
    }
}

#[async_trait]
impl ScoringService for FakeScoringService {
    async fn fetch_questions(&self) -> Result<QuestionSet, ServiceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::down());
        }
        let questions = (0..self.question_count)
            .map(|i| Question::new(format!("Statement {i}")))
            .collect();
        QuestionSet::new(questions).ok_or_else(|| ServiceError::Malformed("no questions".into()))
    }

    async fn start_session(&self) -> Result<SessionIdentity, ServiceError> {
        let n = self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(Self::down());
        }
        SessionIdentity::new(format!("session-{n:04}-0000"))
            .ok_or_else(|| ServiceError::Malformed("empty".into()))
    }

    async fn submit(
        &self,
        session: &SessionIdentity,
        answers: &[u8],
    ) -> Result<ResultPayload, ServiceError> {
        self.submitted
            .lock()
            .unwrap()
            .push((session.as_str().to_string(), answers.to_vec()));
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ServiceError::Status {
                status: 503,
                body: "scoring unavailable".into(),
            });
        }
        ResultPayload::from_slice(
            br#"{
                "main_core_name": "Explorer",
                "sub_core_title": "Curious builder",
                "radar_scores": {"Openness": 8.0, "Drive": 6.5}
            }"#,
        )
    }

    async fn fetch_report(&self, _session: &SessionIdentity) -> Result<Report, ServiceError> {
        Err(Self::down())
    }

    async fn fetch_charts(&self, _session: &SessionIdentity) -> Result<ChartImages, ServiceError> {
        Err(Self::down())
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        Ok(HealthStatus {
            status: "ok".into(),
            mode: Some("test".into()),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn controller(
    service: &Arc<FakeScoringService>,
    config: SessionConfig,
) -> (QuizSessionController, ManualClock) {
    let clock = ManualClock::new();
    let service: Arc<dyn ScoringService> = service.clone();
    let ctl = QuizSessionController::new(service, config).with_clock(Arc::new(clock.clone()));
    (ctl, clock)
}

pub fn rating(v: i64) -> Rating {
    Rating::new(v).unwrap()
}

/// Rate the current question and fire the follow-up transition.
pub async fn answer(ctl: &mut QuizSessionController, clock: &ManualClock, v: i64) {
    assert!(ctl.rate(rating(v)).unwrap().is_accepted());
    clock.advance(ctl.config().transition_delay);
    ctl.tick().await.unwrap();
}
