use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use augur::banner::{BannerInfo, print_banner, print_farewell};
use augur::commands::{CommandRegistry, CommandResult};
use augur::config::{Overrides, Settings};
use augur::consts::API_KEY_ENV;
use augur::dashboard;
use augur::dataset::{self, SortKey};
use augur::desk::AnalystDesk;
use augur::generator::gemini::GeminiGenerator;
use augur::prompts::analysis::Analysis;
use augur::resilience::{CallOutcome, ResilientCaller};
use augur::spinner::Spinner;

#[derive(Parser)]
#[command(
    name = "augur",
    version,
    about = "Security & edge earnings, read by a strategy consultant."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// API key for the text-generation endpoint (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Total attempts per analysis, the first one included
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Wait before the first retry, in milliseconds (doubles after each failure)
    #[arg(long)]
    initial_delay_ms: Option<u64>,

    /// Log retries and responses to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the earnings matrix
    Table {
        #[arg(short, long, value_enum, default_value_t = SortKey::Sum)]
        sort: SortKey,
    },
    /// Print Rule of 40 bars
    Scorecard,
    /// Print report dates
    Calendar,
    /// Sector health analysis
    Summary,
    /// 2026 growth drivers and projected winners
    Strategy,
    /// SWOT deep-dive for one company (number, ticker, or name)
    Dive { company: String },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,augur=debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Offline views need no key
    match &cli.command {
        Some(Command::Table { sort }) => {
            print!("{}", dashboard::render_matrix(*sort));
            return Ok(());
        }
        Some(Command::Scorecard) => {
            print!("{}", dashboard::render_scorecard());
            return Ok(());
        }
        Some(Command::Calendar) => {
            print!("{}", dashboard::render_calendar());
            return Ok(());
        }
        _ => {}
    }

    let key_source = if cli.api_key.is_some() {
        "--api-key"
    } else {
        API_KEY_ENV
    };
    let settings = Settings::resolve(Overrides {
        api_key: cli.api_key,
        model: cli.model,
        base_url: cli.base_url,
        max_attempts: cli.max_attempts,
        initial_delay_ms: cli.initial_delay_ms,
    })
    .context("cannot configure the text-generation endpoint")?;

    let generator = GeminiGenerator::new(settings.api_key.clone(), Some(settings.model.clone()))
        .with_base_url(settings.base_url.clone());
    let caller = ResilientCaller::new(Arc::new(generator), settings.policy);
    let mut desk = AnalystDesk::new(caller, settings.model.clone());

    // Single analysis mode
    let one_shot = match cli.command {
        Some(Command::Summary) => Some(Analysis::MarketSummary),
        Some(Command::Strategy) => Some(Analysis::GrowthStrategy),
        Some(Command::Dive { company }) => {
            let index = dataset::find(&company)
                .with_context(|| format!("unknown company: {company}"))?;
            Some(Analysis::DeepDive(index))
        }
        _ => None,
    };
    if let Some(analysis) = one_shot {
        return run_once(&mut desk, analysis).await;
    }

    print_banner(&BannerInfo {
        model: &settings.model,
        endpoint: &settings.base_url,
        key_source,
        policy: settings.policy,
    });
    print!("{}", dashboard::render_matrix(desk.sort()));

    repl(&mut desk).await?;
    print_farewell();
    Ok(())
}

async fn run_once(desk: &mut AnalystDesk, analysis: Analysis) -> anyhow::Result<()> {
    let spinner = Spinner::start("consulting", desk.events().subscribe());
    let outcome = tokio::select! {
        result = desk.run(analysis) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.stop().await;

    match outcome {
        Some(Ok(CallOutcome::Text(_))) => {
            print!("{}", dashboard::render_analysis(desk.session()));
            Ok(())
        }
        Some(Ok(CallOutcome::Failed(failure))) => {
            anyhow::bail!("{} ({})", failure.message, failure.last_error)
        }
        Some(Err(e)) => Err(e.into()),
        None => {
            desk.abandon();
            eprintln!("\ninterrupted");
            Ok(())
        }
    }
}

async fn repl(desk: &mut AnalystDesk) -> anyhow::Result<()> {
    let registry = CommandRegistry::new();

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\naugur> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        // Ctrl+C during an analysis cancels it, not the REPL
        let result = tokio::select! {
            result = registry.dispatch(input, desk) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        match result {
            Some(CommandResult::Quit) => break,
            Some(CommandResult::Handled) => {}
            Some(CommandResult::NotACommand) => {
                println!("not a command: {input}");
                println!("type /help for available commands");
            }
            None => {
                desk.abandon();
                println!("\n\ninterrupted");
            }
        }
    }

    Ok(())
}
