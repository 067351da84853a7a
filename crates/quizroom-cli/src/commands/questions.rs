use clap::Args;
use quizroom_core::ScoringService;

use super::{effective_config, http_service, CommandResult};

#[derive(Args)]
pub struct QuestionsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: QuestionsArgs, api_base: Option<String>) -> CommandResult {
    let config = effective_config(api_base)?;
    let set = http_service(&config)?.fetch_questions().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    for (i, q) in set.iter().enumerate() {
        let tags: Vec<&str> = [q.domain.as_deref(), q.category.as_deref(), q.kind.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if tags.is_empty() {
            println!("{:>3}. {}", i + 1, q.text);
        } else {
            println!("{:>3}. {} [{}]", i + 1, q.text, tags.join(", "));
        }
    }
    println!("\n{} questions", set.len());
    Ok(())
}
