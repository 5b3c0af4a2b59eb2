use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::dashboard;
use crate::dataset;
use crate::desk::AnalystDesk;

pub struct SelectCommand;

#[async_trait]
impl Command for SelectCommand {
    fn name(&self) -> &str {
        "/select"
    }

    fn usage(&self) -> &str {
        "<company>"
    }

    fn description(&self) -> &str {
        "pick a company by number, ticker, or name"
    }

    async fn execute(&self, args: &str, desk: &mut AnalystDesk) -> CommandResult {
        let Some(index) = dataset::find(args) else {
            eprintln!("  ✗ unknown company: {args:?}");
            return CommandResult::Handled;
        };
        desk.select(index);
        if let Some(card) = dashboard::render_company(index) {
            print!("{card}");
        }
        CommandResult::Handled
    }
}
