//! Quiz session controller.
//!
//! The controller is a clock-driven state machine. It owns no thread and no
//! runtime timer: transitions that must wait (the pause after a rating, the
//! back-navigation debounce) are recorded as a deadline, and the caller
//! fires them with `tick()`. `time_until_due()` says how long to wait.
//!
//! ## State Transitions
//!
//! ```text
//! Loading -> Intro -> InProgress -> Completed
//!              ^                        |
//!              +------ restart ---------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut ctl = QuizSessionController::new(service, SessionConfig::default());
//! ctl.load().await?;
//! ctl.start().await?;
//! ctl.rate(Rating::new(4)?)?;
//! // After `time_until_due()`:
//! ctl.tick().await?; // Advances, or submits after the last question
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::answers::AnswerVector;
use super::clock::{Clock, SystemClock, TaskSlot};
use super::identity::{IdGenerator, IdentitySource, SessionIdentity, UuidGenerator};
use super::question::{Question, QuestionSet, Rating};
use crate::error::{ServiceError, SessionError};
use crate::events::{InputOutcome, SessionEvent};
use crate::report::ResultPayload;
use crate::service::ScoringService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the question set.
    Loading,
    /// Questions loaded; waiting for the user to begin.
    Intro,
    InProgress,
    /// A result has been received.
    Completed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Loading => "loading",
            SessionState::Intro => "intro",
            SessionState::InProgress => "in progress",
            SessionState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// What `restart()` does with the question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Reuse the loaded set and go straight to `Intro`.
    #[default]
    KeepQuestions,
    /// Drop the set and go back to `Loading`.
    RefetchQuestions,
}

/// Controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause between accepting a rating and acting on it. Also the
    /// back-navigation debounce.
    pub transition_delay: Duration,
    pub identity: IdentitySource,
    pub restart: RestartPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transition_delay: Duration::from_millis(200),
            identity: IdentitySource::Service,
            restart: RestartPolicy::KeepQuestions,
        }
    }
}

/// Deferred transition waiting in the task slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    /// Move to the next question and release the lock.
    Advance,
    /// Submit the completed answer vector.
    Submit,
    /// Release the lock held after back navigation.
    Unlock,
}

/// Drives one quiz attempt at a time against a [`ScoringService`].
pub struct QuizSessionController {
    service: Arc<dyn ScoringService>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    state: SessionState,
    questions: Option<QuestionSet>,
    answers: AnswerVector,
    current_index: usize,
    session: Option<SessionIdentity>,
    result: Option<ResultPayload>,
    /// Transition lock. Inputs are dropped while held.
    locked: bool,
    pending: TaskSlot<PendingAction>,
    last_error: Option<SessionError>,
}

impl std::fmt::Debug for QuizSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSessionController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("answers", &self.answers)
            .field("session", &self.session)
            .field("locked", &self.locked)
            .field("pending", &self.pending.pending())
            .finish_non_exhaustive()
    }
}

impl QuizSessionController {
    /// Create a controller in `Loading` using the system clock and UUID
    /// session ids.
    pub fn new(service: Arc<dyn ScoringService>, config: SessionConfig) -> Self {
        Self {
            service,
            config,
            clock: Arc::new(SystemClock),
            ids: Box::new(UuidGenerator),
            state: SessionState::Loading,
            questions: None,
            answers: AnswerVector::default(),
            current_index: 0,
            session: None,
            result: None,
            locked: false,
            pending: TaskSlot::default(),
            last_error: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn question_count(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question on screen. Only present while `InProgress`.
    pub fn current_question(&self) -> Option<&Question> {
        if self.state != SessionState::InProgress {
            return None;
        }
        self.questions.as_ref()?.get(self.current_index)
    }

    pub fn answers(&self) -> &AnswerVector {
        &self.answers
    }

    pub fn session(&self) -> Option<&SessionIdentity> {
        self.session.as_ref()
    }

    pub fn result(&self) -> Option<&ResultPayload> {
        self.result.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending.pending()
    }

    /// Most recent service failure. Cleared by the next success.
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// 0.0 .. 100.0, counting the question on screen as reached.
    pub fn progress_pct(&self) -> f64 {
        let total = self.question_count();
        match self.state {
            SessionState::InProgress if total > 0 => {
                ((self.current_index + 1) as f64 / total as f64 * 100.0).min(100.0)
            }
            SessionState::Completed => 100.0,
            _ => 0.0,
        }
    }

    /// How long until `tick()` has something to fire. `None` if nothing is
    /// scheduled.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.pending.remaining(self.clock.now_ms())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> SessionEvent {
        SessionEvent::StateSnapshot {
            state: self.state,
            current_index: self.current_index,
            question_count: self.question_count(),
            answers: self.answers.to_wire(),
            locked: self.locked,
            session_id: self.session.as_ref().map(|s| s.as_str().to_string()),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Fetch the question set. On failure the controller stays in
    /// `Loading` and `load()` may be called again.
    pub async fn load(&mut self) -> Result<SessionEvent, SessionError> {
        self.require(SessionState::Loading, "load questions")?;

        let fetched = self
            .service
            .fetch_questions()
            .await
            .and_then(|set| set.check().map(|_| set).map_err(ServiceError::Malformed));

        match fetched {
            Ok(set) => {
                let count = set.len();
                self.answers = AnswerVector::zeroed(count);
                self.questions = Some(set);
                self.current_index = 0;
                self.state = SessionState::Intro;
                self.last_error = None;
                tracing::info!(count, "questions loaded");
                Ok(SessionEvent::QuestionsLoaded {
                    count,
                    at: Utc::now(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "question fetch failed");
                self.fail(SessionError::FetchQuestionsFailed(e))
            }
        }
    }

    /// Acquire a session identity and show the first question.
    pub async fn start(&mut self) -> Result<SessionEvent, SessionError> {
        self.require(SessionState::Intro, "start")?;

        let identity = match self.config.identity {
            IdentitySource::Service => self.service.start_session().await,
            IdentitySource::Local => SessionIdentity::new(self.ids.generate()).ok_or_else(|| {
                ServiceError::Malformed("generated session id is empty".into())
            }),
        };

        let session = match identity {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "session start failed");
                return self.fail(SessionError::SessionStartFailed(e));
            }
        };

        let question_count = self.question_count();
        self.answers = AnswerVector::zeroed(question_count);
        self.current_index = 0;
        self.result = None;
        self.locked = false;
        self.pending.cancel();
        self.last_error = None;
        self.state = SessionState::InProgress;
        tracing::info!(session = %session.short(), question_count, "session started");

        let session_id = session.as_str().to_string();
        self.session = Some(session);
        Ok(SessionEvent::SessionStarted {
            session_id,
            question_count,
            at: Utc::now(),
        })
    }

    /// Record a rating for the question on screen.
    ///
    /// Dropped while the transition lock is held. Otherwise the lock is
    /// taken and the follow-up (advance, or submit on the last question)
    /// is scheduled after the transition delay.
    pub fn rate(&mut self, rating: Rating) -> Result<InputOutcome, SessionError> {
        self.require(SessionState::InProgress, "rate")?;
        if self.locked {
            tracing::debug!(index = self.current_index, "rating ignored while locked");
            return Ok(InputOutcome::Ignored);
        }

        let index = self.current_index;
        if let Err(e) = self.answers.set(index, rating) {
            tracing::warn!(error = %e, "rating dropped");
            return Ok(InputOutcome::Ignored);
        }

        let action = if index + 1 < self.question_count() {
            PendingAction::Advance
        } else {
            PendingAction::Submit
        };
        self.locked = true;
        self.pending
            .schedule(action, self.clock.now_ms(), self.config.transition_delay);

        Ok(InputOutcome::Accepted(SessionEvent::AnswerRecorded {
            index,
            rating: rating.value(),
            at: Utc::now(),
        }))
    }

    /// Return to the previous question, clearing the answer on the one
    /// being left. Holds the lock for the transition delay.
    pub fn go_back(&mut self) -> Result<InputOutcome, SessionError> {
        self.require(SessionState::InProgress, "go back")?;
        if self.locked || self.current_index == 0 {
            return Ok(InputOutcome::Ignored);
        }

        let from = self.current_index;
        self.answers.clear(from);
        self.current_index = from - 1;
        self.locked = true;
        self.pending.schedule(
            PendingAction::Unlock,
            self.clock.now_ms(),
            self.config.transition_delay,
        );
        tracing::debug!(from, to = self.current_index, "went back");

        Ok(InputOutcome::Accepted(SessionEvent::WentBack {
            from,
            to: self.current_index,
            at: Utc::now(),
        }))
    }

    /// Fire the scheduled transition if its deadline has passed.
    pub async fn tick(&mut self) -> Result<Option<SessionEvent>, SessionError> {
        let Some(action) = self.pending.take_due(self.clock.now_ms()) else {
            return Ok(None);
        };

        match action {
            PendingAction::Advance => {
                let from = self.current_index;
                if self.state != SessionState::InProgress || from + 1 >= self.question_count() {
                    self.locked = false;
                    return Ok(None);
                }
                self.current_index = from + 1;
                self.locked = false;
                Ok(Some(SessionEvent::QuestionAdvanced {
                    from,
                    to: self.current_index,
                    at: Utc::now(),
                }))
            }
            PendingAction::Unlock => {
                self.locked = false;
                Ok(Some(SessionEvent::Unlocked { at: Utc::now() }))
            }
            PendingAction::Submit => self.submit().await.map(Some),
        }
    }

    /// Submit the preserved answers again after a failed submission.
    pub async fn retry_submission(&mut self) -> Result<InputOutcome, SessionError> {
        self.require(SessionState::InProgress, "retry submission")?;
        if self.locked || self.pending.is_pending() {
            return Ok(InputOutcome::Ignored);
        }
        if self.current_index + 1 != self.question_count() {
            return Err(SessionError::InvalidState {
                operation: "retry submission before the last question",
                state: self.state,
            });
        }

        self.locked = true;
        self.submit().await.map(InputOutcome::Accepted)
    }

    /// Discard the attempt and go back to `Intro` (or `Loading`).
    pub fn restart(&mut self) -> Result<SessionEvent, SessionError> {
        self.require(SessionState::Completed, "restart")?;

        self.pending.cancel();
        self.locked = false;
        self.session = None;
        self.result = None;
        self.current_index = 0;
        self.last_error = None;

        match self.config.restart {
            RestartPolicy::KeepQuestions => {
                self.answers.reset();
                self.state = SessionState::Intro;
            }
            RestartPolicy::RefetchQuestions => {
                self.questions = None;
                self.answers = AnswerVector::default();
                self.state = SessionState::Loading;
            }
        }
        tracing::info!(state = %self.state, "session restarted");

        Ok(SessionEvent::Restarted {
            state: self.state,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn require(&self, expected: SessionState, operation: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn fail<T>(&mut self, err: SessionError) -> Result<T, SessionError> {
        self.last_error = Some(err.clone());
        Err(err)
    }

    /// Expects the lock to be held; releases it on every path.
    async fn submit(&mut self) -> Result<SessionEvent, SessionError> {
        let missing = self.answers.missing();
        if !missing.is_empty() {
            self.locked = false;
            return Err(SessionError::IncompleteAnswers { missing });
        }
        let Some(session) = self.session.clone() else {
            self.locked = false;
            return Err(SessionError::InvalidState {
                operation: "submit without a session",
                state: self.state,
            });
        };

        let answers = self.answers.to_wire();
        tracing::debug!(session = %session.short(), count = answers.len(), "submitting answers");

        match self.service.submit(&session, &answers).await {
            Ok(payload) => {
                tracing::info!(
                    session = %session.short(),
                    schema = ?payload.schema(),
                    "submission completed"
                );
                self.result = Some(payload);
                self.state = SessionState::Completed;
                self.locked = false;
                self.last_error = None;
                Ok(SessionEvent::SubmissionCompleted {
                    session_id: session.as_str().to_string(),
                    at: Utc::now(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed");
                self.locked = false;
                self.fail(SessionError::SubmissionFailed(e))
            }
        }
    }
}
