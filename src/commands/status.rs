use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::dataset;
use crate::desk::AnalystDesk;
use crate::session::CallState;

pub struct StatusCommand;

/// One-line summary of where the analysis panel is.
fn describe(state: &CallState) -> String {
    match state {
        CallState::Idle => "idle".to_string(),
        CallState::InFlight => "in progress".to_string(),
        CallState::Succeeded(text) => format!("ready ({} chars)", text.chars().count()),
        CallState::Failed(failure) => format!(
            "failed after {} attempt(s): {}",
            failure.attempts, failure.last_error
        ),
    }
}

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show model, retry policy, and analysis state"
    }

    async fn execute(&self, _args: &str, desk: &mut AnalystDesk) -> CommandResult {
        let policy = desk.caller().policy();
        let selected = desk
            .selected()
            .and_then(|i| dataset::records().get(i))
            .map(|r| r.name)
            .unwrap_or("none");
        println!("  model     {}", desk.model());
        println!(
            "  retries   {} attempts, first wait {:?}",
            policy.max_attempts(),
            policy.initial_delay()
        );
        println!("  selected  {selected}");
        println!("  analysis  {}", describe(desk.session().state()));
        CommandResult::Handled
    }
}
