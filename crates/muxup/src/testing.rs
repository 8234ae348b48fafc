//! Recording test doubles for the command and tmux seams.

use std::cell::{Cell, RefCell};
use std::path::Path;

use crate::utils::command::{Command, Commander, ShellError, ShellFailure};
use crate::utils::tmux::{Multiplexer, SplitKind};

fn scripted_failure(command: String) -> ShellError {
  ShellError {
    command,
    cause: ShellFailure::Exit {
      status: "exit status: 1".to_string(),
      output: String::new(),
    },
  }
}

/// Records every [`Command`]; fails those whose command line contains a registered needle.
#[derive(Debug, Default)]
pub struct RecordingCommander {
  commands: RefCell<Vec<Command>>,
  failures: RefCell<Vec<String>>,
  responses: RefCell<Vec<(String, String)>>,
}

impl RecordingCommander {
  pub fn fail_when(&self, needle: &str) {
    self.failures.borrow_mut().push(needle.to_string());
  }

  /// Return `output` from `exec` for command lines containing `needle`.
  pub fn respond(&self, needle: &str, output: &str) {
    self
      .responses
      .borrow_mut()
      .push((needle.to_string(), output.to_string()));
  }

  pub fn commands(&self) -> Vec<Command> {
    self.commands.borrow().clone()
  }

  fn run(&self, cmd: &Command) -> Result<String, ShellError> {
    self.commands.borrow_mut().push(cmd.clone());
    let line = cmd.to_string();
    if self.failures.borrow().iter().any(|n| line.contains(n)) {
      return Err(ShellError::exit(cmd, "exit status: 1", ""));
    }
    Ok(
      self
        .responses
        .borrow()
        .iter()
        .find(|(needle, _)| line.contains(needle))
        .map(|(_, out)| out.clone())
        .unwrap_or_default(),
    )
  }
}

impl Commander for RecordingCommander {
  fn exec(&self, cmd: &Command) -> Result<String, ShellError> {
    self.run(cmd)
  }

  fn exec_silently(&self, cmd: &Command) -> Result<(), ShellError> {
    self.run(cmd).map(drop)
  }
}

/// In-memory [`Multiplexer`] that records each call as `"<method> <args...>"`.
///
/// Split calls hand out pane ids `%1`, `%2`, ... in call order.
#[derive(Debug, Default)]
pub struct RecordingMux {
  existing: bool,
  calls: RefCell<Vec<String>>,
  failures: RefCell<Vec<String>>,
  next_pane: Cell<u32>,
}

impl RecordingMux {
  /// A double whose session already exists.
  pub fn existing() -> Self {
    Self {
      existing: true,
      ..Default::default()
    }
  }

  pub fn fail_when(&self, needle: &str) {
    self.failures.borrow_mut().push(needle.to_string());
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  fn record(&self, call: String) -> Result<(), ShellError> {
    self.calls.borrow_mut().push(call.clone());
    if self.failures.borrow().iter().any(|n| call.contains(n)) {
      return Err(scripted_failure(call));
    }
    Ok(())
  }
}

impl Multiplexer for RecordingMux {
  fn new_session(&self, name: &str, root: &Path, window_name: &str) -> Result<String, ShellError> {
    self.record(format!(
      "new_session {name} {} {window_name}",
      root.display()
    ))?;
    Ok(String::new())
  }

  fn session_exists(&self, target: &str) -> bool {
    self.calls.borrow_mut().push(format!("session_exists {target}"));
    self.existing
  }

  fn new_window(&self, session: &str, name: &str, root: &Path) -> Result<String, ShellError> {
    self.record(format!("new_window {session} {name} {}", root.display()))?;
    Ok(String::new())
  }

  fn split_window(
    &self,
    target: &str,
    split: SplitKind,
    root: &Path,
  ) -> Result<String, ShellError> {
    self.record(format!(
      "split_window {target} {split:?} {}",
      root.display()
    ))?;
    self.next_pane.set(self.next_pane.get() + 1);
    Ok(format!("%{}", self.next_pane.get()))
  }

  fn send_keys(&self, target: &str, command: &str) -> Result<(), ShellError> {
    self.record(format!("send_keys {target} {command}"))
  }

  fn select_layout(&self, target: &str, layout: &str) -> Result<(), ShellError> {
    self.record(format!("select_layout {target} {layout}"))
  }

  fn kill_window(&self, target: &str) -> Result<(), ShellError> {
    self.record(format!("kill_window {target}"))
  }

  fn renumber_windows(&self, session: &str) -> Result<(), ShellError> {
    self.record(format!("renumber_windows {session}"))
  }

  fn attach(&self, target: &str) -> Result<(), ShellError> {
    self.record(format!("attach {target}"))
  }

  fn switch_client(&self, target: &str) -> Result<(), ShellError> {
    self.record(format!("switch_client {target}"))
  }

  fn stop_session(&self, target: &str) -> Result<(), ShellError> {
    self.record(format!("stop_session {target}"))
  }
}
