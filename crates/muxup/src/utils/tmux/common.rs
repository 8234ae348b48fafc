use std::path::Path;

use crate::utils::command::Command;

/// Window created with a new session and removed once the real windows exist.
pub const PLACEHOLDER_WINDOW: &str = "muxup_def";
/// Layout applied to windows that do not declare one.
pub const DEFAULT_LAYOUT: &str = "even-horizontal";

/// Base tmux arguments. `MUXUP_TMUX_SOCKET` selects a dedicated server socket.
pub fn tmux_args_base() -> Vec<String> {
  match std::env::var("MUXUP_TMUX_SOCKET") {
    Ok(sock) if !sock.trim().is_empty() => vec!["-S".to_string(), sock],
    _ => Vec::new(),
  }
}

/// `session:` addresses the session itself.
pub fn session_target(session: &str) -> String {
  format!("{session}:")
}

/// `session:window`
pub fn window_target(session: &str, window: &str) -> String {
  format!("{session}:{window}")
}

/// `session:window.pane`
pub fn pane_target(window_target: &str, pane: impl std::fmt::Display) -> String {
  format!("{window_target}.{pane}")
}

/// Build a `tmux` invocation with the base args followed by `args`.
pub(super) fn tmux_cmd(base: &[String], args: &[&str]) -> Command {
  let mut all = base.to_vec();
  all.extend(args.iter().map(|a| (*a).to_string()));
  Command {
    program: "tmux".to_string(),
    args: all,
    cwd: None,
    stdio: Default::default(),
  }
}

pub(super) fn path_arg(path: &Path) -> String {
  path.display().to_string()
}
