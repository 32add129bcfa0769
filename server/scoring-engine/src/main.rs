//! Binary entrypoint: score git name-status exports from the command line.
//!
//! Every subcommand reads the given files as one batch (fail-fast), runs the
//! pipeline, applies an optional overrides file, then prints to stdout.
//! Logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use git_command::GitCommandConfig;
use scoring_engine::{files, report, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scoring-engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score git name-status exports against the scoring guide", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct Input {
  /// Text files produced by the git-command pipeline
  #[arg(required = true, value_name = "FILE")]
  files: Vec<PathBuf>,

  /// JSON overrides: {"<guide code>": {"<index>": {"points": 16, "should_count": true}}}
  #[arg(long, value_name = "PATH")]
  overrides: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
  Text,
  Json,
}

#[derive(Subcommand)]
enum Commands {
  /// Print categories and totals
  Score {
    #[command(flatten)]
    input: Input,

    /// Enable a sprint ritual bonus (1 or 2); repeatable
    #[arg(long = "sprint", value_name = "N")]
    sprints: Vec<u8>,

    /// Message that replaces the text after ';' in applied groups
    #[arg(long, requires = "author")]
    message: Option<String>,

    /// Git author the exports were generated for
    #[arg(long)]
    author: Option<String>,

    /// Start of the exported date range (defaults to the first day of this month)
    #[arg(long, requires = "message")]
    since: Option<String>,

    /// End of the exported date range (defaults to the last day of this month)
    #[arg(long, requires = "message")]
    until: Option<String>,

    /// Guide code to apply --message to; repeatable
    #[arg(long = "apply-message", value_name = "CODE", requires = "message")]
    apply_to: Vec<String>,

    #[arg(long, value_enum, default_value = "text")]
    format: Format,
  },

  /// Print the selected lines of one category, newline-joined
  Copy {
    #[command(flatten)]
    input: Input,

    /// Guide code of the category
    #[arg(long)]
    group: String,

    /// Only the complexity tier with these effective points
    #[arg(long)]
    tier: Option<f64>,
  },

  /// Write the paginated document of selected lines
  Export {
    #[command(flatten)]
    input: Input,

    /// Output path (defaults to the configured file name)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();

  let cli = Cli::parse();
  match cli.command {
    Commands::Score {
      input,
      sprints,
      message,
      author,
      since,
      until,
      apply_to,
      format,
    } => {
      let mut session = load(&input).await?;
      for n in sprints {
        session.set_sprint(n, true)?;
      }
      if let (Some(message), Some(author)) = (message, author) {
        let mut config = GitCommandConfig::for_current_month(author);
        config.message = message;
        if let Some(since) = since {
          config.since = since;
        }
        if let Some(until) = until {
          config.until = until;
        }
        session.confirm_git_config(config)?;
        for code in &apply_to {
          session.apply_message_to_group(code)?;
        }
      }

      let report = session.report();
      match format {
        Format::Text => print!("{}", report::render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
      }
    }

    Commands::Copy { input, group, tier } => {
      let session = load(&input).await?;
      let text = match tier {
        Some(points) => session.copy_subgroup(&group, points)?,
        None => session.copy_group(&group)?,
      };
      println!("{}", text);
    }

    Commands::Export { input, output } => {
      let session = load(&input).await?;
      let document = session.export_document()?;
      let path = output.unwrap_or_else(|| PathBuf::from(&document.file_name));
      tokio::fs::write(&path, document.render())
        .await
        .with_context(|| format!("writing {}", path.display()))?;
      info!(path = %path.display(), pages = document.pages.len(), "document written");
      println!("{}", path.display());
    }
  }

  Ok(())
}

/// Read the batch, build a session and load any overrides.
async fn load(input: &Input) -> anyhow::Result<Session> {
  let batch = files::read_batch(&input.files).await?;
  let mut session = Session::with_defaults();
  session.add_files(batch);

  if let Some(path) = &input.overrides {
    let raw = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("reading {}", path.display()))?;
    session
      .load_overrides_json(&raw)
      .with_context(|| format!("parsing {}", path.display()))?;
  }
  Ok(session)
}
