#![allow(dead_code)]
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;
use tempfile::{Builder, TempDir};

/// Stand-in for tmux: logs its argv, answers `split-window` with a pane id and
/// fails the subcommands listed in `$FAKE_TMUX_FAIL`.
const FAKE_TMUX: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_TMUX_LOG"
for sub in $FAKE_TMUX_FAIL; do
  if [ "$1" = "$sub" ]; then
    echo "fake failure: $1" >&2
    exit 1
  fi
done
case "$1" in
  has-session)
    [ "$FAKE_TMUX_EXISTING" = "1" ] || exit 1
    ;;
  split-window)
    echo "%1"
    ;;
esac
exit 0
"#;

#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("muxup-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    let env = Self { temp };
    for dir in [env.bin_dir(), env.config_home(), env.state_home(), env.project_root()] {
      std::fs::create_dir_all(&dir).expect("create test dir");
    }
    if let Err(err) = env.install_fake_tmux() {
      panic!("install fake tmux failed: {err}");
    }
    env
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.path().join("bin")
  }

  pub fn config_home(&self) -> PathBuf {
    self.path().join("config")
  }

  pub fn state_home(&self) -> PathBuf {
    self.path().join("state")
  }

  pub fn layouts_dir(&self) -> PathBuf {
    self.config_home().join("muxup")
  }

  /// Directory used as the session root in test layouts.
  pub fn project_root(&self) -> PathBuf {
    self.path().join("project")
  }

  pub fn tmux_log_path(&self) -> PathBuf {
    self.path().join("tmux.log")
  }

  fn install_fake_tmux(&self) -> Result<()> {
    let script = self.bin_dir().join("tmux");
    std::fs::write(&script, FAKE_TMUX).context("write fake tmux")?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt as _;
      let mut perms = std::fs::metadata(&script)?.permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(&script, perms)?;
    }
    Ok(())
  }

  /// Write `layouts/<project>.yml`, substituting `<root>` with the project root.
  pub fn write_layout(&self, project: &str, yaml: &str) -> Result<PathBuf> {
    let path = self.layouts_dir().join(format!("{project}.yml"));
    std::fs::create_dir_all(self.layouts_dir())?;
    let text = yaml.replace("<root>", &self.project_root().display().to_string());
    std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
  }

  pub fn bin_cmd(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("muxup")?;
    let path_value = match std::env::var("PATH") {
      Ok(existing) if !existing.is_empty() => format!("{}:{existing}", self.bin_dir().display()),
      _ => self.bin_dir().display().to_string(),
    };
    cmd
      .current_dir(self.path())
      .env("PATH", path_value)
      .env("XDG_CONFIG_HOME", self.config_home())
      .env("XDG_STATE_HOME", self.state_home())
      .env("FAKE_TMUX_LOG", self.tmux_log_path())
      .env("EDITOR", "true")
      .env_remove("TMUX")
      .env_remove("MUXUP_TMUX_SOCKET")
      .env_remove("FAKE_TMUX_FAIL")
      .env_remove("FAKE_TMUX_EXISTING");
    Ok(cmd)
  }

  /// Every fake tmux invocation so far, one argv per line.
  pub fn tmux_calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.tmux_log_path())
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// The fake tmux calls reduced to their subcommand names.
  pub fn tmux_subcommands(&self) -> Vec<String> {
    self
      .tmux_calls()
      .iter()
      .filter_map(|line| line.split_whitespace().next().map(str::to_string))
      .collect()
  }
}

/// Returns a workspace-local temp root for tests under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // Walk two parents up: crates/muxup -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}
