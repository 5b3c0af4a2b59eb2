use async_trait::async_trait;

use super::{Command, CommandResult};
use crate::dashboard;
use crate::dataset;
use crate::desk::AnalystDesk;
use crate::prompts::analysis::Analysis;
use crate::spinner::Spinner;

/// Run an analysis with a spinner and print the panel afterwards.
async fn run_analysis(desk: &mut AnalystDesk, analysis: Analysis) -> CommandResult {
    let spinner = Spinner::start("consulting", desk.events().subscribe());
    let result = desk.run(analysis).await;
    spinner.stop().await;

    match result {
        Ok(_) => print!("{}", dashboard::render_analysis(desk.session())),
        Err(e) => eprintln!("  ✗ {e}"),
    }
    CommandResult::Handled
}

pub struct SummaryCommand;

#[async_trait]
impl Command for SummaryCommand {
    fn name(&self) -> &str {
        "/summary"
    }

    fn description(&self) -> &str {
        "sector health: growth vs profitability"
    }

    async fn execute(&self, _args: &str, desk: &mut AnalystDesk) -> CommandResult {
        run_analysis(desk, Analysis::MarketSummary).await
    }
}

pub struct StrategyCommand;

#[async_trait]
impl Command for StrategyCommand {
    fn name(&self) -> &str {
        "/strategy"
    }

    fn description(&self) -> &str {
        "2026 growth drivers and projected winners (search-grounded)"
    }

    async fn execute(&self, _args: &str, desk: &mut AnalystDesk) -> CommandResult {
        run_analysis(desk, Analysis::GrowthStrategy).await
    }
}

pub struct DiveCommand;

#[async_trait]
impl Command for DiveCommand {
    fn name(&self) -> &str {
        "/dive"
    }

    fn usage(&self) -> &str {
        "[company]"
    }

    fn description(&self) -> &str {
        "SWOT deep-dive (defaults to the selected company)"
    }

    async fn execute(&self, args: &str, desk: &mut AnalystDesk) -> CommandResult {
        let index = if args.is_empty() {
            desk.selected()
        } else {
            dataset::find(args)
        };
        let Some(index) = index else {
            eprintln!("  ✗ no company: pass one or /select it first");
            return CommandResult::Handled;
        };
        desk.select(index);
        run_analysis(desk, Analysis::DeepDive(index)).await
    }
}
