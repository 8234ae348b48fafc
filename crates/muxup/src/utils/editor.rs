use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::editor_argv;
use crate::utils::command::Command;

/// Open `path` in the user's editor and wait for it to exit.
pub fn open_path(path: &Path) -> Result<()> {
  let mut argv = editor_argv();
  argv.push(path.display().to_string());
  let cmd = Command::new(&argv)?;

  let status = std::process::Command::new(&cmd.program)
    .args(&cmd.args)
    .status()
    .with_context(|| format!("failed to spawn editor program: {}", cmd.program))?;
  if !status.success() {
    bail!("editor exited with non-zero status");
  }
  Ok(())
}
