//! Interactive line-based dashboard session.
//!
//! # Responsibility
//! - Parse typed commands into dashboard events.
//! - Ask confirmations on the same input stream.
//! - Redraw the dashboard after every state change.

use crate::render::{draw, draw_projects};
use std::io::{self, BufRead, Write};
use taskboard_core::{
    AutoConfirm, ConfirmationGate, DashboardController, DashboardEvent, ProjectRepository,
};

const HELP: &str = "\
Commands:
  projects                 show projects and the selected task list
  new <name>               create and select a project
  select <id>              select a project
  delete-project <id>      delete a project and its tasks
  add <title>              add a task to the selected project
  toggle <id>              flip a task's completed flag
  edit <id> <title>        change a task's title
  delete <id>              delete a task
  logout                   clear the selection
  help                     show this help
  quit                     leave the session";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(DashboardEvent),
    Show,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "" => ShellCommand::Empty,
        "projects" | "ls" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "logout" => ShellCommand::Event(DashboardEvent::Logout),
        "new" => ShellCommand::Event(DashboardEvent::CreateProject {
            name: rest.to_string(),
        }),
        "add" => ShellCommand::Event(DashboardEvent::AddTask {
            title: rest.to_string(),
        }),
        "select" => ShellCommand::Event(DashboardEvent::SelectProject {
            id: parse_id(rest)?,
        }),
        "delete-project" => ShellCommand::Event(DashboardEvent::DeleteProject {
            id: parse_id(rest)?,
        }),
        "toggle" => ShellCommand::Event(DashboardEvent::ToggleTask {
            id: parse_id(rest)?,
        }),
        "delete" => ShellCommand::Event(DashboardEvent::DeleteTask {
            id: parse_id(rest)?,
        }),
        "edit" => {
            let (id, title) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ShellCommand::Event(DashboardEvent::EditTask {
                id: parse_id(id)?,
                title: title.trim().to_string(),
            })
        }
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(command)
}

fn parse_id(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("expected a numeric id, got `{}`", value.trim()))
}

/// Confirmation gate asking on the session's own streams.
///
/// Only `y`/`yes` affirms; anything else, including end of input, cancels.
pub struct PromptGate<'a, I: BufRead, O: Write> {
    input: &'a mut I,
    output: &'a mut O,
}

impl<'a, I: BufRead, O: Write> PromptGate<'a, I, O> {
    pub fn new(input: &'a mut I, output: &'a mut O) -> Self {
        Self { input, output }
    }
}

impl<I: BufRead, O: Write> ConfirmationGate for PromptGate<'_, I, O> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Runs the session until `quit` or end of input.
pub fn run<R: ProjectRepository, I: BufRead, O: Write>(
    controller: &mut DashboardController<R>,
    input: &mut I,
    output: &mut O,
    assume_yes: bool,
) -> io::Result<()> {
    draw(&controller.render(), output)?;
    loop {
        write!(output, "taskboard> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => writeln!(output, "{HELP}")?,
            ShellCommand::Show => draw(&controller.render(), output)?,
            ShellCommand::Event(event) => {
                let outcome = if assume_yes {
                    controller.handle(event, &mut AutoConfirm)
                } else {
                    let mut gate = PromptGate::new(&mut *input, &mut *output);
                    controller.handle(event, &mut gate)
                };
                if let Some(alert) = &outcome.alert {
                    writeln!(output, "! {alert}")?;
                }
                if let Some(view) = &outcome.view {
                    draw(view, output)?;
                }
            }
        }
    }
}

/// Prints only the project list; used by one-shot commands.
pub fn print_projects<R: ProjectRepository, O: Write>(
    controller: &DashboardController<R>,
    output: &mut O,
) -> io::Result<()> {
    draw_projects(&controller.render().projects, output)
}
