use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::desk::AnalystDesk;

pub struct DismissCommand;

#[async_trait]
impl Command for DismissCommand {
    fn name(&self) -> &str {
        "/dismiss"
    }

    fn description(&self) -> &str {
        "clear the current analysis"
    }

    async fn execute(&self, _args: &str, desk: &mut AnalystDesk) -> CommandResult {
        match desk.dismiss() {
            Ok(()) => println!("  ✓ analysis dismissed"),
            Err(e) => eprintln!("  ✗ {e}"),
        }
        CommandResult::Handled
    }
}
