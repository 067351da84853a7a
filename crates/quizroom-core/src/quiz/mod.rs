mod answers;
mod clock;
mod controller;
mod identity;
mod question;

pub use answers::AnswerVector;
pub use clock::{Clock, ManualClock, SystemClock, TaskSlot};
pub use controller::{
    PendingAction, QuizSessionController, RestartPolicy, SessionConfig, SessionState,
};
pub use identity::{IdGenerator, IdentitySource, SessionIdentity, UuidGenerator};
pub use question::{Question, QuestionSet, Rating};
