//! `todo`: a terminal client that keeps a todo list in sync with a REST
//! gateway.
//!
//! Without a subcommand it opens an interactive shell. With one, it loads the
//! list, performs that single action, prints the list, and exits.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use todo_core::{TodoClient, TodoSession};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shell;
mod terminal;
mod transport;

use shell::ShellCommand;
use terminal::Terminal;
use transport::UreqTransport;

/// Keep a todo list in sync with a REST gateway
#[derive(Parser)]
#[command(name = "todo", version, about, long_about = None)]
struct Cli {
    /// Base URL of the todo gateway
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Upper bound for a single request, in seconds
    #[arg(long, env = "TODO_API_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the list
    List,

    /// Create a todo
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Flip the completed flag of a todo
    Toggle {
        /// Id as shown by `list`
        id: String,
    },

    /// Delete a todo
    Delete {
        /// Id as shown by `list`
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=warn,todo_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    debug!(base_url = %cli.base_url, timeout_secs = cli.timeout_secs, "starting");

    let assume_yes = matches!(cli.command, Some(Command::Delete { yes: true, .. }));
    let terminal = Terminal::new(io::stdin().lock(), io::stderr()).assume_yes(assume_yes);
    let transport = UreqTransport::new(Duration::from_secs(cli.timeout_secs));
    let mut session = TodoSession::new(TodoClient::new(&cli.base_url), transport, terminal);
    let mut out = io::stdout().lock();

    let Some(command) = cli.command else {
        shell::run(&mut session, &mut out).context("terminal I/O failed")?;
        return Ok(ExitCode::SUCCESS);
    };

    let command = match command {
        Command::List => ShellCommand::List,
        Command::Add { title, description } => ShellCommand::Add { title, description },
        Command::Toggle { id } => ShellCommand::Toggle(id),
        Command::Delete { id, .. } => ShellCommand::Delete(id),
    };
    let applied = shell::run_once(&mut session, command, &mut out).context("failed to write list")?;

    Ok(if applied { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
