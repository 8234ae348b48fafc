use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::LayoutArgs;
use crate::config::{
  LOCAL_LAYOUT_FILE, Layout, ProjectRef, command_log_path, load_layout, project_path,
};
use crate::log_warn;
use crate::orchestrator::OperationRequest;
use crate::utils::command::{CommandLog, DefaultCommander};
use crate::utils::context::ExecutionContext;
use crate::utils::log::t;

pub mod edit;
pub mod list;
pub mod new;
pub mod start;
pub mod stop;

/// Everything a start or stop needs, resolved from the command line.
pub(crate) struct Plan {
  pub layout: Layout,
  pub request: OperationRequest,
  pub ctx: ExecutionContext,
  pub commander: DefaultCommander,
}

pub(crate) fn prepare(args: &LayoutArgs, attach: bool) -> Result<Plan> {
  let ctx = ExecutionContext::detect()?;
  let (path, mut windows) = resolve_layout_path(args, &ctx.cwd)?;
  windows.extend(args.windows.iter().cloned());

  let vars: BTreeMap<String, String> = args.vars.iter().cloned().collect();
  let layout = load_layout(&path, &vars)?;
  for name in &windows {
    if layout.window(name).is_none() {
      log_warn!(
        "Window {} is not declared in {}",
        name,
        path.display()
      );
    }
  }

  let log = if args.debug {
    let log_path = command_log_path()?;
    log::debug!("command log at {}", t::path(log_path.display()));
    Some(CommandLog::create(&log_path)?)
  } else {
    None
  };

  Ok(Plan {
    layout,
    request: OperationRequest { windows, attach },
    ctx,
    commander: DefaultCommander::new(log),
  })
}

/// Pick the layout file: `--file`, then the project name, then `./.muxup.yml`.
fn resolve_layout_path(args: &LayoutArgs, cwd: &Path) -> Result<(PathBuf, Vec<String>)> {
  if let Some(file) = &args.file {
    return Ok((file.clone(), Vec::new()));
  }
  if let Some(raw) = &args.project {
    let project = ProjectRef::parse(raw)?;
    if project.name.is_empty() {
      bail!("project name is empty in `{raw}`");
    }
    return Ok((project_path(&project.name)?, project.windows));
  }
  let local = cwd.join(LOCAL_LAYOUT_FILE);
  if local.is_file() {
    return Ok((local, Vec::new()));
  }
  bail!("no layout given: pass a project name, --file, or create {LOCAL_LAYOUT_FILE}")
}

#[cfg(test)]
mod tests {
  use super::resolve_layout_path;
  use crate::LayoutArgs;
  use anyhow::Result;
  use std::path::PathBuf;

  fn args(project: Option<&str>, file: Option<&str>) -> LayoutArgs {
    LayoutArgs {
      project: project.map(str::to_string),
      file: file.map(PathBuf::from),
      windows: Vec::new(),
      vars: Vec::new(),
      debug: false,
    }
  }

  #[test]
  fn file_wins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (path, windows) = resolve_layout_path(&args(None, Some("/x/l.yml")), dir.path())?;
    assert_eq!(path, PathBuf::from("/x/l.yml"));
    assert!(windows.is_empty());
    Ok(())
  }

  #[test]
  fn project_resolves_in_config_dir() -> Result<()> {
    let cfg = tempfile::tempdir()?;
    let cwd = tempfile::tempdir()?;
    temp_env::with_var("XDG_CONFIG_HOME", Some(cfg.path()), || -> Result<()> {
      let (path, windows) = resolve_layout_path(&args(Some("blog:a,b"), None), cwd.path())?;
      assert_eq!(path, cfg.path().join("muxup").join("blog.yml"));
      assert_eq!(windows, vec!["a", "b"]);
      Ok(())
    })
  }

  #[test]
  fn falls_back_to_local_layout() -> Result<()> {
    let cwd = tempfile::tempdir()?;
    assert!(resolve_layout_path(&args(None, None), cwd.path()).is_err());
    std::fs::write(cwd.path().join(".muxup.yml"), "session: here\n")?;
    let (path, _) = resolve_layout_path(&args(None, None), cwd.path())?;
    assert_eq!(path, cwd.path().join(".muxup.yml"));
    Ok(())
  }
}
