use anyhow::Result;

use crate::LayoutArgs;
use crate::orchestrator::Orchestrator;
use crate::utils::log::t;
use crate::utils::tmux::Tmux;
use crate::{log_info, log_success};

use super::prepare;

pub fn run(args: &LayoutArgs) -> Result<()> {
  let plan = prepare(args, false)?;
  let tmux = Tmux::new(plan.commander.clone());
  let orchestrator = Orchestrator::new(&tmux, &plan.commander);

  if plan.request.windows.is_empty() {
    log_info!(
      "Terminating session {}...",
      t::session(&plan.layout.session)
    );
  } else {
    log_info!(
      "Killing windows {}...",
      t::window(plan.request.windows.join(", "))
    );
  }

  orchestrator.stop(&plan.layout, &plan.request, &plan.ctx)?;
  log_success!("Stopped {}", plan.layout.session);
  Ok(())
}
