use std::path::Path;

use crate::utils::command::{Commander, ShellError};

use super::Tmux;
use super::common::{path_arg, tmux_cmd};

pub(super) fn new_window<C: Commander>(
  tmux: &Tmux<C>,
  session: &str,
  name: &str,
  root: &Path,
) -> Result<String, ShellError> {
  let root = path_arg(root);
  let cmd = tmux_cmd(
    &tmux.base_args,
    &["neww", "-Pd", "-t", session, "-n", name, "-c", &root],
  );
  tmux.commander.exec(&cmd)
}

pub(super) fn select_layout<C: Commander>(
  tmux: &Tmux<C>,
  target: &str,
  layout: &str,
) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["select-layout", "-t", target, layout]);
  tmux.commander.exec(&cmd).map(drop)
}

pub(super) fn kill_window<C: Commander>(tmux: &Tmux<C>, target: &str) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["kill-window", "-t", target]);
  tmux.commander.exec(&cmd).map(drop)
}

pub(super) fn renumber_windows<C: Commander>(
  tmux: &Tmux<C>,
  session: &str,
) -> Result<(), ShellError> {
  let cmd = tmux_cmd(
    &tmux.base_args,
    &["move-window", "-r", "-s", session, "-t", session],
  );
  tmux.commander.exec(&cmd).map(drop)
}
