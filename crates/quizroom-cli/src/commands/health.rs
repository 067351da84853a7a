use quizroom_core::ScoringService;

use super::{effective_config, http_service, CommandResult};

pub async fn run(api_base: Option<String>) -> CommandResult {
    let config = effective_config(api_base)?;
    let service = http_service(&config)?;
    let health = service.health().await?;

    if !health.is_ok() {
        return Err(format!("service reported status '{}'", health.status).into());
    }
    match health.mode {
        Some(mode) => println!("ok ({mode}) {}", service.endpoint_base()),
        None => println!("ok {}", service.endpoint_base()),
    }
    Ok(())
}
