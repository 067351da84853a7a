//! Interactive quiz session.
//!
//! Reads one line per input from stdin. End of input quits.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use quizroom_core::storage::{Config, ServiceConfig};
use quizroom_core::{
    IdentitySource, InputOutcome, PendingAction, ProfileView, QuizSessionController, Rating,
    SessionError, SessionEvent, SessionState,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{effective_config, http_service, CommandResult};
use crate::render;

#[derive(Args)]
pub struct TakeArgs {
    /// Generate the session id locally instead of calling `start`
    #[arg(long)]
    local_id: bool,
    /// Pause after each answer, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
    /// Print session events as JSON lines on stderr
    #[arg(long)]
    events: bool,
}

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }
}

struct Session {
    ctl: QuizSessionController,
    prompt: Prompt,
    events: bool,
}

/// How the question loop ended.
enum Flow {
    Finished,
    Quit,
}

pub async fn run(args: TakeArgs, api_base: Option<String>) -> CommandResult {
    let mut config = effective_config(api_base)?;
    if args.local_id {
        config.session.identity = IdentitySource::Local;
    }
    if let Some(ms) = args.delay_ms {
        config.session.transition_delay_ms = ms;
    }

    let service = Arc::new(http_service(&config)?);
    tracing::info!(endpoint = %service.endpoint_base(), "taking quiz");
    let mut session = Session {
        ctl: QuizSessionController::new(service, config.session_config()),
        prompt: Prompt::new(),
        events: args.events,
    };

    loop {
        if session.ctl.state() == SessionState::Loading && !session.load(&config.service).await? {
            return Ok(());
        }
        if !session.intro().await? {
            return Ok(());
        }
        match session.questions().await? {
            Flow::Quit => {
                println!("\nQuiz abandoned.");
                return Ok(());
            }
            Flow::Finished => session.show_result(&config),
        }

        let again = session.prompt.ask("\nTake the quiz again? [y/N] ").await?;
        if !matches!(again.as_deref(), Some("y" | "Y" | "yes")) {
            return Ok(());
        }
        let event = session.ctl.restart()?;
        session.emit(&event);
    }
}

impl Session {
    fn emit(&self, event: &SessionEvent) {
        if !self.events {
            return;
        }
        match serde_json::to_string(event) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => tracing::warn!(error = %e, "event not serializable"),
        }
    }

    /// Ask whether to retry after a failure. `false` means quit.
    async fn offer_retry(&mut self, err: &SessionError) -> std::io::Result<bool> {
        println!("\n{}", err.user_message());
        println!("  ({err})");
        loop {
            match self.prompt.ask("[r]etry or [q]uit: ").await?.as_deref() {
                Some("r" | "R" | "") => return Ok(true),
                Some("q" | "Q") | None => return Ok(false),
                Some(_) => continue,
            }
        }
    }

    /// Fetch questions, retrying with backoff before asking the user.
    async fn load(&mut self, service: &ServiceConfig) -> Result<bool, Box<dyn std::error::Error>> {
        println!("Loading questions...");
        let attempts = service.fetch_attempts.max(1);
        let backoff = Duration::from_millis(service.retry_backoff_ms);
        loop {
            let mut last = None;
            for attempt in 1..=attempts {
                match self.ctl.load().await {
                    Ok(event) => {
                        self.emit(&event);
                        return Ok(true);
                    }
                    Err(e) => {
                        tracing::warn!(attempt, attempts, error = %e, "question fetch failed");
                        last = Some(e);
                        if attempt < attempts {
                            tokio::time::sleep(backoff).await;
                        }
                    }
                }
            }
            let Some(err) = last else {
                return Ok(false);
            };
            if !self.offer_retry(&err).await? {
                return Ok(false);
            }
        }
    }

    async fn intro(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        let count = self.ctl.question_count();
        println!("\nThis quiz has {count} statements.");
        println!("Rate each one from 5 (strongly agree) to 1 (strongly disagree).");
        println!("Type b to go back one question, q to quit.");
        match self.prompt.ask("\nPress Enter to begin (q to quit) ").await?.as_deref() {
            None | Some("q" | "Q") => return Ok(false),
            Some(_) => {}
        }

        loop {
            match self.ctl.start().await {
                Ok(event) => {
                    self.emit(&event);
                    return Ok(true);
                }
                Err(e) if e.is_retryable() => {
                    if !self.offer_retry(&e).await? {
                        return Ok(false);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn questions(&mut self) -> Result<Flow, Box<dyn std::error::Error>> {
        while self.ctl.state() == SessionState::InProgress {
            if let Some(wait) = self.ctl.time_until_due() {
                if self.ctl.pending() == Some(PendingAction::Submit) {
                    println!("\nSubmitting your answers...");
                }
                tokio::time::sleep(wait).await;
                match self.ctl.tick().await {
                    Ok(Some(event)) => self.emit(&event),
                    Ok(None) => {}
                    Err(e @ SessionError::SubmissionFailed(_)) => {
                        if !self.submission_failed(e).await? {
                            return Ok(Flow::Quit);
                        }
                    }
                    Err(e) => return Err(e.into()),
                }
                continue;
            }

            let Some(q) = self.ctl.current_question() else {
                break;
            };
            let index = self.ctl.current_index();
            print!(
                "{}",
                render::question(index, self.ctl.progress_pct(), self.ctl.answers(), q)
            );

            let Some(line) = self.prompt.ask("> ").await? else {
                return Ok(Flow::Quit);
            };
            match line.as_str() {
                "q" | "Q" => return Ok(Flow::Quit),
                "b" | "B" => match self.ctl.go_back()? {
                    InputOutcome::Accepted(event) => self.emit(&event),
                    InputOutcome::Ignored => println!("Already at the first question."),
                },
                other => match other.parse::<Rating>() {
                    Ok(rating) => {
                        if let InputOutcome::Accepted(event) = self.ctl.rate(rating)? {
                            self.emit(&event);
                        }
                    }
                    Err(e) => println!("{e}. Enter a number from 1 to 5, b, or q."),
                },
            }
        }
        Ok(Flow::Finished)
    }

    /// Answers are kept and the user may resubmit or go back and revise.
    /// `false` means quit.
    async fn submission_failed(&mut self, mut err: SessionError) -> Result<bool, Box<dyn std::error::Error>> {
        loop {
            println!("\n{}", err.user_message());
            println!("  ({err})");
            let choice = self
                .prompt
                .ask("[r]etry submission, [b]ack to revise, or [q]uit: ")
                .await?;
            match choice.as_deref() {
                Some("r" | "R" | "") => match self.ctl.retry_submission().await {
                    Ok(InputOutcome::Accepted(event)) => {
                        self.emit(&event);
                        return Ok(true);
                    }
                    Ok(InputOutcome::Ignored) => return Ok(true),
                    Err(e) => err = e,
                },
                Some("b" | "B") => {
                    if let InputOutcome::Accepted(event) = self.ctl.go_back()? {
                        self.emit(&event);
                    }
                    return Ok(true);
                }
                Some("q" | "Q") | None => return Ok(false),
                Some(_) => {}
            }
        }
    }

    fn show_result(&self, config: &Config) {
        let Some(result) = self.ctl.result() else {
            return;
        };
        print!("{}", render::profile(&ProfileView::from(result), &config.display));
        if let Some(session) = self.ctl.session() {
            println!("\nSession: {session}");
            println!("Download the PDF report with: quizroom-cli report {session}");
        }
    }
}
