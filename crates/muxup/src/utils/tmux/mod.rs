mod common;
mod pane;
mod session;
mod window;

use std::path::Path;

use serde::Deserialize;

use super::command::{Commander, ShellError};

// Re-export addressing helpers
pub use common::{
  DEFAULT_LAYOUT, PLACEHOLDER_WINDOW, pane_target, session_target, tmux_args_base, window_target,
};

/// Orientation of a pane split. `None` lets tmux pick its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
  Vertical,
  Horizontal,
  #[default]
  None,
}

/// One method per tmux primitive needed to build or destroy a layout.
///
/// Every call maps to exactly one external invocation and never retries.
pub trait Multiplexer {
  /// Create a detached session whose only window is `window_name`.
  fn new_session(&self, name: &str, root: &Path, window_name: &str) -> Result<String, ShellError>;
  /// Absence and query failure both report `false`.
  fn session_exists(&self, target: &str) -> bool;
  fn new_window(&self, session: &str, name: &str, root: &Path) -> Result<String, ShellError>;
  /// Split `target` and return the new pane id.
  fn split_window(&self, target: &str, split: SplitKind, root: &Path)
  -> Result<String, ShellError>;
  /// Type `command` into `target` followed by Enter.
  fn send_keys(&self, target: &str, command: &str) -> Result<(), ShellError>;
  fn select_layout(&self, target: &str, layout: &str) -> Result<(), ShellError>;
  fn kill_window(&self, target: &str) -> Result<(), ShellError>;
  /// Close gaps in window indices after deletions.
  fn renumber_windows(&self, session: &str) -> Result<(), ShellError>;
  /// Attach the current terminal. Blocks until the client detaches.
  fn attach(&self, target: &str) -> Result<(), ShellError>;
  fn switch_client(&self, target: &str) -> Result<(), ShellError>;
  fn stop_session(&self, target: &str) -> Result<(), ShellError>;
}

/// Production [`Multiplexer`] that shells out to `tmux` through a [`Commander`].
#[derive(Debug, Clone)]
pub struct Tmux<C> {
  commander: C,
  base_args: Vec<String>,
}

impl<C: Commander> Tmux<C> {
  pub fn new(commander: C) -> Self {
    Self {
      commander,
      base_args: tmux_args_base(),
    }
  }

  #[must_use]
  pub fn with_base_args(mut self, base_args: Vec<String>) -> Self {
    self.base_args = base_args;
    self
  }

  pub fn commander(&self) -> &C {
    &self.commander
  }
}

impl<C: Commander> Multiplexer for Tmux<C> {
  fn new_session(&self, name: &str, root: &Path, window_name: &str) -> Result<String, ShellError> {
    session::new_session(self, name, root, window_name)
  }

  fn session_exists(&self, target: &str) -> bool {
    session::session_exists(self, target)
  }

  fn new_window(&self, session: &str, name: &str, root: &Path) -> Result<String, ShellError> {
    window::new_window(self, session, name, root)
  }

  fn split_window(
    &self,
    target: &str,
    split: SplitKind,
    root: &Path,
  ) -> Result<String, ShellError> {
    pane::split_window(self, target, split, root)
  }

  fn send_keys(&self, target: &str, command: &str) -> Result<(), ShellError> {
    pane::send_keys(self, target, command)
  }

  fn select_layout(&self, target: &str, layout: &str) -> Result<(), ShellError> {
    window::select_layout(self, target, layout)
  }

  fn kill_window(&self, target: &str) -> Result<(), ShellError> {
    window::kill_window(self, target)
  }

  fn renumber_windows(&self, session: &str) -> Result<(), ShellError> {
    window::renumber_windows(self, session)
  }

  fn attach(&self, target: &str) -> Result<(), ShellError> {
    session::attach(self, target)
  }

  fn switch_client(&self, target: &str) -> Result<(), ShellError> {
    session::switch_client(self, target)
  }

  fn stop_session(&self, target: &str) -> Result<(), ShellError> {
    session::stop_session(self, target)
  }
}
