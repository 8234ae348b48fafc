use anyhow::Result;

use crate::config::{layouts_dir, list_projects_in};
use crate::log_info;
use crate::utils::log::t;

pub fn run() -> Result<()> {
  let dir = layouts_dir()?;
  let projects = list_projects_in(&dir)?;
  if projects.is_empty() {
    log_info!("No layouts in {}", t::path(dir.display()));
    return Ok(());
  }
  for project in projects {
    anstream::println!("{project}");
  }
  Ok(())
}
