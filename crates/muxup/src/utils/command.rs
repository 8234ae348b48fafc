use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Stdio as ProcStdio;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use thiserror::Error;

/// How a silently executed command is wired to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stdio {
  /// Discard stdin, stdout and stderr.
  #[default]
  Null,
  /// Hand the current terminal to the child (interactive programs like `tmux attach`).
  Inherit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub stdio: Stdio,
}

impl Command {
  /// Construct from argv-like vector: first element is the program, rest are args.
  pub fn new(argv: &[String]) -> Result<Self> {
    if argv.is_empty() {
      bail!("command is empty");
    }
    let program = argv[0].clone();
    if program.trim().is_empty() {
      bail!("command program is empty");
    }
    Ok(Self {
      program,
      args: argv[1..].to_vec(),
      cwd: None,
      stdio: Stdio::Null,
    })
  }

  /// `/bin/sh -c <script>` running inside `cwd`.
  pub fn shell(script: &str, cwd: &Path) -> Self {
    Self {
      program: "/bin/sh".to_string(),
      args: vec!["-c".to_string(), script.to_string()],
      cwd: Some(cwd.to_path_buf()),
      stdio: Stdio::Null,
    }
  }

  #[must_use]
  pub fn with_stdio(mut self, stdio: Stdio) -> Self {
    self.stdio = stdio;
    self
  }

  fn to_process(&self) -> std::process::Command {
    let mut cmd = std::process::Command::new(&self.program);
    cmd.args(&self.args);
    if let Some(cwd) = &self.cwd {
      cmd.current_dir(cwd);
    }
    cmd
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// A command that could not be spawned or exited unsuccessfully.
#[derive(Debug, Error)]
#[error("cannot run `{command}`: {cause}")]
pub struct ShellError {
  pub command: String,
  #[source]
  pub cause: ShellFailure,
}

#[derive(Debug, Error)]
pub enum ShellFailure {
  #[error("{0}")]
  Spawn(#[from] std::io::Error),
  #[error("exited with {status}{}", output_suffix(.output))]
  Exit { status: String, output: String },
}

fn output_suffix(output: &str) -> String {
  if output.is_empty() {
    String::new()
  } else {
    format!(": {output}")
  }
}

impl ShellError {
  pub fn new(command: &Command, cause: impl Into<ShellFailure>) -> Self {
    Self {
      command: command.to_string(),
      cause: cause.into(),
    }
  }

  pub fn exit(command: &Command, status: impl fmt::Display, output: impl Into<String>) -> Self {
    Self::new(
      command,
      ShellFailure::Exit {
        status: status.to_string(),
        output: output.into(),
      },
    )
  }
}

/// Runs external commands on behalf of the tmux layer and the lifecycle hooks.
pub trait Commander {
  /// Run and capture stdout + stderr, trimmed of trailing whitespace.
  fn exec(&self, cmd: &Command) -> Result<String, ShellError>;
  /// Run without capturing output. Failure is still reported.
  fn exec_silently(&self, cmd: &Command) -> Result<(), ShellError>;
}

/// Append-only record of every command line and failure, used by `--debug`.
#[derive(Debug, Clone)]
pub struct CommandLog {
  file: Arc<Mutex<File>>,
}

impl CommandLog {
  /// Create (truncate) the log file at `path`, creating parent directories.
  pub fn create(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
      .create(true)
      .write(true)
      .truncate(true)
      .open(path)
      .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(Self {
      file: Arc::new(Mutex::new(file)),
    })
  }

  pub fn line(&self, text: impl fmt::Display) {
    let mut file = self.file.lock();
    let _ = writeln!(file, "{text}");
  }
}

#[derive(Debug, Clone, Default)]
pub struct DefaultCommander {
  log: Option<CommandLog>,
}

impl DefaultCommander {
  #[must_use]
  pub fn new(log: Option<CommandLog>) -> Self {
    Self { log }
  }

  fn record(&self, cmd: &Command) {
    log::debug!("exec: {cmd}");
    if let Some(log) = &self.log {
      log.line(cmd);
    }
  }

  fn fail(&self, err: ShellError) -> ShellError {
    log::debug!("{err}");
    if let Some(log) = &self.log {
      log.line(&err.cause);
    }
    err
  }
}

impl Commander for DefaultCommander {
  fn exec(&self, cmd: &Command) -> Result<String, ShellError> {
    self.record(cmd);
    let out = cmd
      .to_process()
      .stdin(ProcStdio::null())
      .output()
      .map_err(|e| self.fail(ShellError::new(cmd, e)))?;
    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    let text = text.trim_end().to_string();
    if !out.status.success() {
      return Err(self.fail(ShellError::exit(cmd, out.status, text)));
    }
    Ok(text)
  }

  fn exec_silently(&self, cmd: &Command) -> Result<(), ShellError> {
    self.record(cmd);
    let mut proc = cmd.to_process();
    match cmd.stdio {
      Stdio::Null => {
        proc
          .stdin(ProcStdio::null())
          .stdout(ProcStdio::null())
          .stderr(ProcStdio::null());
      }
      Stdio::Inherit => {
        proc
          .stdin(ProcStdio::inherit())
          .stdout(ProcStdio::inherit())
          .stderr(ProcStdio::inherit());
      }
    }
    let status = proc
      .status()
      .map_err(|e| self.fail(ShellError::new(cmd, e)))?;
    if !status.success() {
      return Err(self.fail(ShellError::exit(cmd, status, "")));
    }
    Ok(())
  }
}
