use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
pub mod config;
pub mod orchestrator;
pub mod utils;

#[cfg(test)]
mod testing;

/// muxup - Bring tmux sessions up from a declared layout and tear them down again.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Start a session, or only the given windows of it
  Start {
    #[command(flatten)]
    target: LayoutArgs,
    /// Switch the tmux client to the session even when already inside tmux
    #[arg(short, long)]
    attach: bool,
  },
  /// Stop a session, or kill only the given windows
  Stop {
    #[command(flatten)]
    target: LayoutArgs,
  },
  /// Create a layout file from a template and open it in $EDITOR
  New { project: String },
  /// Open an existing layout file in $EDITOR
  Edit { project: String },
  /// List the layouts in the config directory
  List,
}

/// Which layout to use and which of its windows to act on.
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
  /// Project name, optionally followed by windows: `project:win1,win2`
  pub project: Option<String>,
  /// Path to a layout file instead of a project name
  #[arg(short, long, conflicts_with = "project")]
  pub file: Option<PathBuf>,
  /// Window to act on (repeatable). Without any, the whole session is used
  #[arg(short, long = "windows", value_name = "WINDOW")]
  pub windows: Vec<String>,
  /// Value for a `${KEY}` placeholder in the layout file (repeatable)
  #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
  pub vars: Vec<(String, String)>,
  /// Write every executed command to the muxup log file
  #[arg(short, long)]
  pub debug: bool,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
  if key.trim().is_empty() {
    return Err(format!("empty key in `{raw}`"));
  }
  Ok((key.trim().to_string(), value.to_string()))
}

pub fn parse() -> Cli {
  Cli::parse()
}

pub fn run() -> Result<()> {
  let cli = parse();
  utils::log::init_diagnostics();

  match cli.command {
    Commands::Start { target, attach } => commands::start::run(&target, attach),
    Commands::Stop { target } => commands::stop::run(&target),
    Commands::New { project } => commands::new::run(&project),
    Commands::Edit { project } => commands::edit::run(&project),
    Commands::List => commands::list::run(),
  }
}
