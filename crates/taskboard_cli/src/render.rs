//! Text rendering of dashboard snapshots.

use std::io::{self, Write};
use taskboard_core::{DashboardView, ProjectListView, TaskListView};

pub fn draw(view: &DashboardView, out: &mut impl Write) -> io::Result<()> {
    draw_projects(&view.projects, out)?;
    match &view.tasks {
        Some(tasks) => draw_tasks(tasks, out),
        None => writeln!(out, "No project selected."),
    }
}

pub fn draw_projects(projects: &ProjectListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Projects")?;
    if projects.is_empty() {
        return writeln!(out, "  (none yet, use `new <name>`)");
    }
    for item in &projects.items {
        let marker = if item.selected { '>' } else { ' ' };
        writeln!(
            out,
            "{marker} [{}] {} ({}/{} done)",
            item.id, item.name, item.completed_count, item.task_count
        )?;
    }
    Ok(())
}

pub fn draw_tasks(tasks: &TaskListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Tasks in {} ({} remaining)",
        tasks.project_name,
        tasks.remaining()
    )?;
    if tasks.rows.is_empty() {
        return writeln!(out, "  (no tasks)");
    }
    for row in &tasks.rows {
        let check = if row.completed { 'x' } else { ' ' };
        writeln!(out, "  [{check}] {} {}", row.id, row.title)?;
    }
    Ok(())
}
