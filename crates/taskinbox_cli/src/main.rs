//! `taskinbox` terminal client.
//!
//! # Responsibility
//! - Present the task inbox in a terminal and forward user actions to the API.
//! - Offer one-shot subcommands for scripting.
//!
//! # Invariants
//! - Every invocation loads the list from the server before acting, so row
//!   state always comes from a confirmed response.

mod shell;

use anyhow::Context;
use clap::{Parser, Subcommand};
use taskinbox_client::{ActionOutcome, HttpTaskApi, TaskInbox, DEFAULT_API_URL};
use taskinbox_core::{init_logging, TaskId};

#[derive(Debug, Parser)]
#[command(name = "taskinbox", version, about = "Terminal client for the task inbox API")]
struct Cli {
    /// Base URL of the task API.
    #[arg(long, env = "TASKINBOX_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "TASKINBOX_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "TASKINBOX_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive inbox (default).
    Shell,
    /// Print all tasks.
    List,
    /// Create a task.
    Add {
        /// Task title; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip completion of a task by id.
    Toggle { id: TaskId },
    /// Delete a task by id.
    Delete { id: TaskId },
    /// Check that the API is reachable.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_dir.as_deref()).context("initialize logging failed")?;

    let api = HttpTaskApi::new(cli.api_url.clone());
    if let Some(Command::Health) = cli.command {
        let status = api
            .health()
            .await
            .with_context(|| format!("health check against {} failed", cli.api_url))?;
        println!("{} status={status}", api.base_url());
        return Ok(());
    }

    let inbox = TaskInbox::new(api);
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => shell::run(&inbox).await,
        command => run_once(&inbox, command).await,
    }
}

async fn run_once(inbox: &TaskInbox<HttpTaskApi>, command: Command) -> anyhow::Result<()> {
    inbox.load().await.context("load tasks failed")?;

    match command {
        Command::List | Command::Shell | Command::Health => {}
        Command::Add { title } => {
            inbox.set_input(title.join(" "));
            if inbox.submit().await.context("create task failed")? == ActionOutcome::Skipped {
                anyhow::bail!("title must not be blank");
            }
        }
        Command::Toggle { id } => {
            if inbox.toggle(id).await.context("update task failed")? == ActionOutcome::Skipped {
                anyhow::bail!("no task with id {id}");
            }
        }
        Command::Delete { id } => {
            inbox.delete(id).await.context("delete task failed")?;
        }
    }

    print!("{}", inbox.view());
    Ok(())
}
