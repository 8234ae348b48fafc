use anyhow::{Result, bail};

use crate::config::project_path;
use crate::log_info;
use crate::utils::editor::open_path;
use crate::utils::log::t;

pub fn run(project: &str) -> Result<()> {
  let path = project_path(project)?;
  if !path.is_file() {
    bail!(
      "no layout for {project} at {}. Create one with `muxup new {project}`",
      path.display()
    );
  }
  log_info!("Edit layout {}", t::path(path.display()));
  open_path(&path)
}
