use anyhow::Result;

use crate::LayoutArgs;
use crate::orchestrator::Orchestrator;
use crate::utils::log::t;
use crate::utils::tmux::Tmux;
use crate::{log_error, log_info};

use super::prepare;

/// Start the layout. A failed start is rolled back with a stop of the same request.
pub fn run(args: &LayoutArgs, attach: bool) -> Result<()> {
  let plan = prepare(args, attach)?;
  let tmux = Tmux::new(plan.commander.clone());
  let orchestrator = Orchestrator::new(&tmux, &plan.commander);

  if plan.request.windows.is_empty() {
    log_info!(
      "Starting a new session {}...",
      t::session(&plan.layout.session)
    );
  } else {
    log_info!(
      "Starting new windows {}...",
      t::window(plan.request.windows.join(", "))
    );
  }

  if let Err(err) = orchestrator.start(&plan.layout, &plan.request, &plan.ctx) {
    log_error!("Oops, an error occurred! Rolling back...");
    if let Err(rollback) = orchestrator.stop(&plan.layout, &plan.request, &plan.ctx) {
      log::debug!("rollback failed: {rollback}");
    }
    return Err(err.into());
  }
  Ok(())
}
