use std::fs;

use anyhow::{Context, Result, bail};

use crate::config::{layout_template, layouts_dir, project_path_in};
use crate::log_info;
use crate::utils::editor::open_path;
use crate::utils::log::t;

/// Write a template layout for `project` and open it for editing.
pub fn run(project: &str) -> Result<()> {
  if project.trim().is_empty() || project.contains(['/', ':', '.']) {
    bail!("invalid project name `{project}`: use letters, digits, '-' or '_'");
  }
  let dir = layouts_dir()?;
  let path = project_path_in(&dir, project);
  if path.exists() {
    bail!(
      "layout {} already exists. Use `muxup edit {project}`",
      path.display()
    );
  }
  fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
  fs::write(&path, layout_template(project))
    .with_context(|| format!("failed to write {}", path.display()))?;
  log_info!("Create layout {}", t::path(path.display()));
  open_path(&path)
}
