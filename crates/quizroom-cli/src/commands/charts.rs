use std::path::PathBuf;

use clap::Args;
use quizroom_core::ScoringService;

use super::{effective_config, http_service, parse_session_id, CommandResult};

#[derive(Args)]
pub struct ChartsArgs {
    /// Session id printed at the end of `take`
    session_id: String,
    /// Directory for radar.png and bar.png
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

pub async fn run(args: ChartsArgs, api_base: Option<String>) -> CommandResult {
    let session = parse_session_id(&args.session_id)?;
    let config = effective_config(api_base)?;
    let charts = http_service(&config)?.fetch_charts(&session).await?;

    std::fs::create_dir_all(&args.out_dir)?;
    for (name, bytes) in [("radar.png", charts.radar_png()?), ("bar.png", charts.bar_png()?)] {
        let path = args.out_dir.join(name);
        std::fs::write(&path, &bytes)?;
        println!("saved {}", path.display());
    }
    Ok(())
}
