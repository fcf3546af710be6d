//! Terminal front end for the Taskboard dashboard.
//!
//! # Responsibility
//! - Resolve configuration from defaults, environment and flags.
//! - Own the dashboard controller for the lifetime of the process.
//! - Offer an interactive shell plus one-shot commands.

mod render;
mod shell;

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::{
    core_version, init_logging, open_db, AutoConfirm, DashboardConfig, DashboardController,
    DashboardEvent, EventOutcome, KvProjectRepository, LoadReport, ProjectRepository,
    SqliteKeyValueStore,
};

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Projects and tasks in your terminal")]
struct Cli {
    /// SQLite file holding the dashboard state.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace | debug | info | warn | error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Answer yes to every confirmation.
    #[arg(short = 'y', long, global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive session (default).
    Shell,
    /// Print all projects.
    List,
    /// Create a project.
    NewProject { name: String },
    /// Delete a project and all of its tasks.
    DeleteProject { id: i64 },
    /// Add a task to a project.
    AddTask {
        #[arg(long)]
        project: i64,
        title: String,
    },
    /// Flip a task's completed flag.
    ToggleTask {
        #[arg(long)]
        project: i64,
        id: i64,
    },
    /// Change a task's title.
    EditTask {
        #[arg(long)]
        project: i64,
        id: i64,
        title: String,
    },
    /// Delete a task.
    DeleteTask {
        #[arg(long)]
        project: i64,
        id: i64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "error: cannot open dashboard storage `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let repo =
        KvProjectRepository::with_key(SqliteKeyValueStore::new(&conn), config.storage_key.clone());
    let (mut controller, report) = DashboardController::open(repo);
    if let LoadReport::Recovered { .. } = report {
        warn!("event=cli_start module=cli status=fallback source=seed");
    }

    match run_command(&mut controller, cli.command.unwrap_or(Command::Shell), cli.yes) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> DashboardConfig {
    let mut config = DashboardConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config
}

fn run_command<R: ProjectRepository>(
    controller: &mut DashboardController<R>,
    command: Command,
    assume_yes: bool,
) -> io::Result<ExitCode> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Command::Shell = command {
        shell::run(controller, &mut stdin.lock(), &mut stdout, assume_yes)?;
        return Ok(ExitCode::SUCCESS);
    }
    if let Command::List = command {
        shell::print_projects(controller, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let (project, event) = match command {
        Command::NewProject { name } => (None, DashboardEvent::CreateProject { name }),
        Command::DeleteProject { id } => (None, DashboardEvent::DeleteProject { id }),
        Command::AddTask { project, title } => (Some(project), DashboardEvent::AddTask { title }),
        Command::ToggleTask { project, id } => (Some(project), DashboardEvent::ToggleTask { id }),
        Command::EditTask { project, id, title } => {
            (Some(project), DashboardEvent::EditTask { id, title })
        }
        Command::DeleteTask { project, id } => (Some(project), DashboardEvent::DeleteTask { id }),
        Command::Shell | Command::List => return Ok(ExitCode::SUCCESS),
    };

    if let Some(project) = project {
        let selected =
            controller.handle(DashboardEvent::SelectProject { id: project }, &mut AutoConfirm);
        if !selected.changed() {
            eprintln!("error: project {project} not found");
            return Ok(ExitCode::FAILURE);
        }
    }

    let outcome = if assume_yes {
        controller.handle(event, &mut AutoConfirm)
    } else {
        let mut input = stdin.lock();
        let mut gate = shell::PromptGate::new(&mut input, &mut stdout);
        controller.handle(event, &mut gate)
    };
    report_outcome(&outcome, &mut stdout)
}

fn report_outcome(outcome: &EventOutcome, out: &mut impl Write) -> io::Result<ExitCode> {
    if let Some(alert) = &outcome.alert {
        eprintln!("error: {alert}");
        return Ok(ExitCode::FAILURE);
    }
    match &outcome.view {
        Some(view) => render::draw(view, out)?,
        None => writeln!(out, "Nothing changed.")?,
    }
    Ok(ExitCode::SUCCESS)
}
