use std::path::PathBuf;

use clap::Args;
use quizroom_core::ScoringService;

use super::{effective_config, http_service, parse_session_id, CommandResult};

#[derive(Args)]
pub struct ReportArgs {
    /// Session id printed at the end of `take`
    session_id: String,
    /// Output file or directory (default: current directory)
    #[arg(long, short)]
    out: Option<PathBuf>,
    /// Open the report after saving
    #[arg(long)]
    open: bool,
}

pub async fn run(args: ReportArgs, api_base: Option<String>) -> CommandResult {
    let session = parse_session_id(&args.session_id)?;
    let config = effective_config(api_base)?;
    let report = http_service(&config)?.fetch_report(&session).await?;

    if !report.looks_like_pdf() {
        tracing::warn!(
            content_type = report.content_type.as_deref().unwrap_or("unknown"),
            "report does not look like a PDF"
        );
    }

    let path = match args.out {
        Some(out) if out.is_dir() => out.join(&report.file_name),
        Some(out) => out,
        None => PathBuf::from(&report.file_name),
    };
    std::fs::write(&path, &report.bytes)?;
    println!("saved {} ({} bytes)", path.display(), report.bytes.len());

    if args.open {
        open::that(&path)?;
    }
    Ok(())
}
