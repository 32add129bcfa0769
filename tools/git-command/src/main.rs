//! git-command: print the pipeline that exports commits for scoring.
//!
//! Usage:
//!   git-command --author "Ana Dev"                         # current month
//!   git-command --author "Ana Dev" --since 2024-02-01 --until 2024-02-29
//!   git-command --author "Ana Dev" --json                  # print the config instead
//!
//! Paste the output into a shell at the repository root.

use clap::Parser;
use git_command::{build_command, GitCommandConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "git-command")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the git log pipeline that produces scoring input files", long_about = None)]
struct Cli {
    /// Name of the commit author as configured in git
    #[arg(long)]
    author: String,

    /// First day to include (YYYY-MM-DD); defaults to the first day of this month
    #[arg(long)]
    since: Option<String>,

    /// Last day to include (YYYY-MM-DD); defaults to the last day of this month
    #[arg(long)]
    until: Option<String>,

    /// Message to apply to scored groups later (only printed with --json)
    #[arg(long, default_value = "")]
    message: String,

    /// Print the validated config as JSON instead of the command
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let mut config = GitCommandConfig::for_current_month(cli.author);
    if let Some(since) = cli.since {
        config.since = since;
    }
    if let Some(until) = cli.until {
        config.until = until;
    }
    config.message = cli.message;
    config.validate()?;
    debug!(since = %config.since, until = %config.until, "building command");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", build_command(&config));
    }
    Ok(())
}
