//! Interactive inbox loop.
//!
//! Rows are addressed by their 1-based position in the rendered list, which
//! always reflects the last confirmed mirror state.

use std::io::Write;
use taskinbox_client::{ActionOutcome, ClientError, TaskApi, TaskInbox};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  add <title>        create a task
  done <n>           complete or reopen row n (alias: toggle)
  rm <n>             delete row n (alias: delete)
  list               reload the list from the server (alias: reload)
  help               show this help
  quit               exit (alias: exit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Reload,
    Help,
    Quit,
    Empty,
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "add" | "a" => Ok(ShellCommand::Add(rest.to_string())),
        "done" | "toggle" | "t" => parse_position(rest).map(ShellCommand::Toggle),
        "rm" | "delete" | "d" => parse_position(rest).map(ShellCommand::Delete),
        "list" | "ls" | "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_position(text: &str) -> Result<usize, String> {
    match text.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("expected a row number, got `{text}`")),
    }
}

/// Runs the interactive loop until `quit` or end of input.
pub async fn run<A: TaskApi>(inbox: &TaskInbox<A>) -> anyhow::Result<()> {
    if let Err(err) = inbox.load().await {
        eprintln!("Failed to load tasks: {err}");
    }
    print!("{}", inbox.view());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Reload => {
                report("load", inbox.load().await.map(|()| ActionOutcome::Applied));
            }
            ShellCommand::Add(title) => {
                inbox.set_input(title);
                if report("create", inbox.submit().await) == Some(ActionOutcome::Skipped) {
                    eprintln!("Nothing to add: title is blank.");
                }
            }
            ShellCommand::Toggle(position) => match inbox.view().row(position) {
                Some(row) => {
                    report("update", inbox.toggle(row.id).await);
                }
                None => eprintln!("No task at row {position}."),
            },
            ShellCommand::Delete(position) => match inbox.view().row(position) {
                Some(row) => {
                    report("delete", inbox.delete(row.id).await);
                }
                None => eprintln!("No task at row {position}."),
            },
        }

        print!("{}", inbox.view());
    }

    Ok(())
}

fn report(action: &str, result: Result<ActionOutcome, ClientError>) -> Option<ActionOutcome> {
    match result {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            eprintln!("Failed to {action} task: {err}");
            None
        }
    }
}
