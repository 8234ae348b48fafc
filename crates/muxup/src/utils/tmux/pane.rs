use std::path::Path;

use crate::utils::command::{Commander, ShellError};

use super::common::{path_arg, tmux_cmd};
use super::{SplitKind, Tmux};

pub(super) fn split_window<C: Commander>(
  tmux: &Tmux<C>,
  target: &str,
  split: SplitKind,
  root: &Path,
) -> Result<String, ShellError> {
  let root = path_arg(root);
  let mut args = vec!["split-window", "-Pd"];
  match split {
    SplitKind::Vertical => args.push("-v"),
    SplitKind::Horizontal => args.push("-h"),
    SplitKind::None => {}
  }
  args.extend(["-t", target, "-c", &root, "-F", "#{pane_id}"]);
  tmux.commander.exec(&tmux_cmd(&tmux.base_args, &args))
}

/// Send keys to a tmux pane, followed by Enter.
pub(super) fn send_keys<C: Commander>(
  tmux: &Tmux<C>,
  target: &str,
  command: &str,
) -> Result<(), ShellError> {
  let cmd = tmux_cmd(&tmux.base_args, &["send-keys", "-t", target, command, "Enter"]);
  tmux.commander.exec_silently(&cmd)
}
