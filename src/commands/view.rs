use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::dashboard;
use crate::dataset::SortKey;
use crate::desk::AnalystDesk;

/// The comprehensive matrix, optionally re-sorted.
pub struct TableCommand;

#[async_trait]
impl Command for TableCommand {
    fn name(&self) -> &str {
        "/table"
    }

    fn aliases(&self) -> &[&str] {
        &["/t"]
    }

    fn usage(&self) -> &str {
        "[name|date|revenue|growth|margin|sum]"
    }

    fn description(&self) -> &str {
        "show the earnings matrix"
    }

    async fn execute(&self, args: &str, desk: &mut AnalystDesk) -> CommandResult {
        if !args.is_empty() {
            match SortKey::parse(args) {
                Some(key) => desk.set_sort(key),
                None => {
                    eprintln!("  ✗ unknown sort column: {args}");
                    return CommandResult::Handled;
                }
            }
        }
        print!("{}", dashboard::render_matrix(desk.sort()));
        CommandResult::Handled
    }
}

pub struct ScorecardCommand;

#[async_trait]
impl Command for ScorecardCommand {
    fn name(&self) -> &str {
        "/scorecard"
    }

    fn description(&self) -> &str {
        "show Rule of 40 bars"
    }

    async fn execute(&self, _args: &str, _desk: &mut AnalystDesk) -> CommandResult {
        print!("{}", dashboard::render_scorecard());
        CommandResult::Handled
    }
}

pub struct CalendarCommand;

#[async_trait]
impl Command for CalendarCommand {
    fn name(&self) -> &str {
        "/calendar"
    }

    fn description(&self) -> &str {
        "show report dates"
    }

    async fn execute(&self, _args: &str, _desk: &mut AnalystDesk) -> CommandResult {
        print!("{}", dashboard::render_calendar());
        CommandResult::Handled
    }
}
