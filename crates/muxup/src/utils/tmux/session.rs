use std::path::Path;

use crate::utils::command::{Commander, ShellError, Stdio};

use super::Tmux;
use super::common::{path_arg, tmux_cmd};

pub(super) fn new_session<C: Commander>(
  tmux: &Tmux<C>,
  name: &str,
  root: &Path,
  window_name: &str,
) -> Result<String, ShellError> {
  let root = path_arg(root);
  let cmd = tmux_cmd(
    &tmux.base_args,
    &["new", "-Pd", "-s", name, "-n", window_name, "-c", &root],
  );
  tmux.commander.exec(&cmd)
}

pub(super) fn session_exists<C: Commander>(tmux: &Tmux<C>, target: &str) -> bool {
  let cmd = tmux_cmd(&tmux.base_args, &["has-session", "-t", target]);
  matches!(tmux.commander.exec(&cmd), Ok(out) if out.is_empty())
}

pub(super) fn attach<C: Commander>(tmux: &Tmux<C>, target: &str) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["attach", "-d", "-t", target]).with_stdio(Stdio::Inherit);
  tmux.commander.exec_silently(&cmd)
}

pub(super) fn switch_client<C: Commander>(tmux: &Tmux<C>, target: &str) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["switch-client", "-t", target]);
  tmux.commander.exec_silently(&cmd)
}

pub(super) fn stop_session<C: Commander>(tmux: &Tmux<C>, target: &str) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["kill-session", "-t", target]);
  tmux.commander.exec(&cmd).map(drop)
}
