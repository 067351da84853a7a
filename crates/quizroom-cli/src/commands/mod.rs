pub mod charts;
pub mod config;
pub mod health;
pub mod questions;
pub mod report;
pub mod take;

use quizroom_core::{Config, HttpScoringService, SessionIdentity};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Effective config: file, then `QUIZROOM_API_BASE`, then `--api-base`.
pub fn effective_config(api_base: Option<String>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load()?.with_env_overrides();
    if let Some(base) = api_base {
        config.service.endpoint_base = base;
    }
    Ok(config)
}

pub fn http_service(config: &Config) -> Result<HttpScoringService, Box<dyn std::error::Error>> {
    Ok(HttpScoringService::from_config(&config.service)?)
}

pub fn parse_session_id(raw: &str) -> Result<SessionIdentity, Box<dyn std::error::Error>> {
    Ok(SessionIdentity::new(raw.trim()).ok_or("session id must not be empty")?)
}
