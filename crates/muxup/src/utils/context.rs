use std::path::PathBuf;

use anyhow::Result;

/// Facts about the invoking process that steer the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
  /// True when this process already runs inside an attached tmux client.
  pub inside_live_session: bool,
  /// Base for a relative or empty session root.
  pub cwd: PathBuf,
}

impl ExecutionContext {
  /// Detect the context from the `TMUX` environment variable and the working directory.
  ///
  /// # Errors
  /// Returns an error if the current directory cannot be read.
  pub fn detect() -> Result<Self> {
    let inside_live_session = std::env::var("TMUX").is_ok_and(|v| !v.trim().is_empty());
    Ok(Self {
      inside_live_session,
      cwd: std::env::current_dir()?,
    })
  }
}
