//! Built-in REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! argument splitting and dynamic help generation. Extra commands can be
//! added at runtime via `registry.register(Arc::new(MyCommand))`.

mod analyze;
mod dismiss;
mod help;
mod quit;
mod select;
mod status;
mod view;

use async_trait::async_trait;
use std::sync::Arc;

use crate::desk::AnalystDesk;

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/summary"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument placeholder shown in help, e.g. `"<company>"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is everything after the command word, trimmed.
    async fn execute(&self, args: &str, desk: &mut AnalystDesk) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(view::TableCommand),
            Arc::new(view::ScorecardCommand),
            Arc::new(view::CalendarCommand),
            Arc::new(select::SelectCommand),
            Arc::new(analyze::SummaryCommand),
            Arc::new(analyze::StrategyCommand),
            Arc::new(analyze::DiveCommand),
            Arc::new(status::StatusCommand),
            Arc::new(dismiss::DismissCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Register an additional command.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, desk: &mut AnalystDesk) -> CommandResult {
        let input = input.trim();
        let (word, args) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        for command in &self.commands {
            if word == command.name() || command.aliases().contains(&word) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, desk).await;
            }
        }

        if word.starts_with('/') {
            println!("unknown command: {word}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.usage(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, usage: &str, aliases: &[&str]) -> String {
    let base = if usage.is_empty() {
        name.to_string()
    } else {
        format!("{name} {usage}")
    };
    if aliases.is_empty() {
        base
    } else {
        format!("{} ({})", base, aliases.join(", "))
    }
}
