//! Start and stop state machines that turn a [`Layout`] into tmux calls.
//!
//! Every step runs in program order and the first failure is returned to the
//! caller unchanged. Nothing here prints or retries; the caller decides
//! whether a failed start is rolled back with [`Orchestrator::stop`].

use std::path::Path;

use crate::config::{Layout, Window};
use crate::utils::command::{Command, Commander, ShellError};
use crate::utils::context::ExecutionContext;
use crate::utils::paths::{resolve_root, resolve_session_root};
use crate::utils::tmux::{
  DEFAULT_LAYOUT, Multiplexer, PLACEHOLDER_WINDOW, pane_target, session_target, window_target,
};

/// What the caller asked for. An empty `windows` list means the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationRequest {
  pub windows: Vec<String>,
  pub attach: bool,
}

impl OperationRequest {
  fn whole_session(&self) -> bool {
    self.windows.is_empty()
  }

  /// Manual windows are skipped for a whole-session start; an explicit list overrides that.
  fn selects(&self, window: &Window) -> bool {
    if self.whole_session() {
      !window.manual
    } else {
      self.windows.iter().any(|w| *w == window.name)
    }
  }
}

pub struct Orchestrator<'a> {
  tmux: &'a dyn Multiplexer,
  commander: &'a dyn Commander,
}

impl<'a> Orchestrator<'a> {
  /// `commander` runs the layout's shell hooks; all tmux calls go through `tmux`.
  pub fn new(tmux: &'a dyn Multiplexer, commander: &'a dyn Commander) -> Self {
    Self { tmux, commander }
  }

  /// Bring the session (or the requested windows) up, then attach or switch.
  ///
  /// # Errors
  /// Returns the first failing hook or tmux call. No rollback is attempted.
  pub fn start(
    &self,
    layout: &Layout,
    request: &OperationRequest,
    ctx: &ExecutionContext,
  ) -> Result<(), ShellError> {
    let session = session_target(&layout.session);
    let session_root = resolve_session_root(&layout.root, &ctx.cwd);

    if !self.tmux.session_exists(&session) {
      self.run_hooks(&layout.before_start, &session_root)?;
      self
        .tmux
        .new_session(&layout.session, &session_root, PLACEHOLDER_WINDOW)?;
    } else if request.whole_session() {
      return self.switch_or_attach(&session, request.attach, ctx);
    }

    let mut first_window = None;
    for window in layout.windows.iter().filter(|w| request.selects(w)) {
      self.start_window(layout, window, &session_root)?;
      first_window.get_or_insert(window);
    }

    // Best-effort cleanup
    let placeholder = window_target(&layout.session, PLACEHOLDER_WINDOW);
    if let Err(err) = self.tmux.kill_window(&placeholder) {
      log::debug!("ignoring placeholder cleanup failure: {err}");
    }
    if let Err(err) = self.tmux.renumber_windows(&session) {
      log::debug!("ignoring renumber failure: {err}");
    }

    match first_window {
      Some(window) if request.whole_session() => {
        let target = window_target(&layout.session, &window.name);
        self.switch_or_attach(&target, request.attach, ctx)
      }
      _ => Ok(()),
    }
  }

  /// Tear the whole session down, or kill just the requested windows.
  ///
  /// # Errors
  /// Returns the first failing hook or tmux call. Windows killed before the
  /// failure stay killed.
  pub fn stop(
    &self,
    layout: &Layout,
    request: &OperationRequest,
    ctx: &ExecutionContext,
  ) -> Result<(), ShellError> {
    if request.whole_session() {
      let session_root = resolve_session_root(&layout.root, &ctx.cwd);
      self.run_hooks(&layout.stop, &session_root)?;
      return self.tmux.stop_session(&session_target(&layout.session));
    }

    for name in &request.windows {
      self.tmux.kill_window(&window_target(&layout.session, name))?;
    }
    Ok(())
  }

  fn start_window(
    &self,
    layout: &Layout,
    window: &Window,
    session_root: &Path,
  ) -> Result<(), ShellError> {
    let window_root = resolve_root(window.root.as_deref(), session_root);
    let target = window_target(&layout.session, &window.name);

    self.tmux.new_window(
      &session_target(&layout.session),
      &window.name,
      &window_root,
    )?;
    for command in &window.commands {
      self.tmux.send_keys(&target, command)?;
    }
    let kind = window.layout.as_deref().unwrap_or(DEFAULT_LAYOUT);
    self.tmux.select_layout(&target, kind)?;

    // Pane indices follow split order; the window's initial pane is 0.
    for (index, pane) in window.panes.iter().enumerate() {
      let pane_root = resolve_root(pane.root.as_deref(), &window_root);
      let pane_id = self
        .tmux
        .split_window(&pane_target(&target, index), pane.split, &pane_root)?;
      let pane_addr = pane_target(&target, &pane_id);
      for command in &pane.commands {
        self.tmux.send_keys(&pane_addr, command)?;
      }
    }
    Ok(())
  }

  fn run_hooks(&self, hooks: &[String], cwd: &Path) -> Result<(), ShellError> {
    for hook in hooks {
      self.commander.exec(&Command::shell(hook, cwd))?;
    }
    Ok(())
  }

  /// Inside tmux only an explicit attach switches the client; outside, always attach.
  fn switch_or_attach(
    &self,
    target: &str,
    attach: bool,
    ctx: &ExecutionContext,
  ) -> Result<(), ShellError> {
    if !ctx.inside_live_session {
      self.tmux.attach(target)
    } else if attach {
      self.tmux.switch_client(target)
    } else {
      Ok(())
    }
  }
}
