use crate::handlers::actions::{Action, CustomerConsole};
use crate::models::form::Field;
use anyhow::{Context, Result};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const PROMPT: &str = "customers> ";

const HELP: &str = "\
Commands:
  set <field> <value>   fill a form field
  unset <field>         empty a form field
  show                  print the form and results
  create | retrieve | update | delete | activate | deactivate | search
  clear                 reset the form
  help                  this text
  quit                  leave the shell
Fields: customer_id user_id first_name last_name password active street apartment city state zip_code
";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Set(Field, String),
    Unset(Field),
    Show,
    Help,
    Quit,
    Run(Action),
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    UnknownField(#[from] crate::models::form::UnknownField),
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => return Err(ShellError::Usage("set <field> <value>")),
            };
            Ok(ShellCommand::Set(field.parse()?, value.to_string()))
        }
        "unset" => {
            if rest.is_empty() {
                return Err(ShellError::Usage("unset <field>"));
            }
            Ok(ShellCommand::Unset(rest.parse()?))
        }
        "show" => Ok(ShellCommand::Show),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => other
            .parse::<Action>()
            .map(ShellCommand::Run)
            .map_err(|_| ShellError::UnknownCommand(other.to_string())),
    }
}

/// Read commands until EOF or `quit`, printing the screen after each action
///
/// One action is awaited at a time; the next line is not read until the
/// previous response has been rendered.
pub async fn run_shell<R, W>(console: &mut CustomerConsole, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            writeln!(out)?;
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!(command = ?command, "Shell command");

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => write!(out, "{}", HELP)?,
            ShellCommand::Show => write!(out, "{}", console.screen())?,
            ShellCommand::Set(field, value) => {
                if let Err(e) = console.form_mut().set(field, &value) {
                    writeln!(out, "{}", e)?;
                }
            }
            ShellCommand::Unset(field) => {
                // Empty text is valid for every field, the selector included
                let _ = console.form_mut().set(field, "");
            }
            ShellCommand::Run(action) => {
                // Failures are already painted into the status area
                let _ = console.run(action).await;
                write!(out, "{}", console.screen())?;
            }
        }
    }

    Ok(())
}
