use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "quizroom-cli", version, about = "Quizroom CLI")]
struct Cli {
    /// Scoring service endpoint base (overrides config and QUIZROOM_API_BASE)
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Take(commands::take::TakeArgs),
    /// Print the question set
    Questions(commands::questions::QuestionsArgs),
    /// Download the PDF report for a session
    Report(commands::report::ReportArgs),
    /// Save the chart images for a session
    Charts(commands::charts::ChartsArgs),
    /// Check that the scoring service is reachable
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("QUIZROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let api_base = cli.api_base;
    let result = match cli.command {
        Commands::Take(args) => commands::take::run(args, api_base).await,
        Commands::Questions(args) => commands::questions::run(args, api_base).await,
        Commands::Report(args) => commands::report::run(args, api_base).await,
        Commands::Charts(args) => commands::charts::run(args, api_base).await,
        Commands::Health => commands::health::run(api_base).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
