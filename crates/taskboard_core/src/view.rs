//! Render snapshots for front ends.
//!
//! Front ends redraw a whole region from one of these snapshots after every
//! handled event; nothing here is incremental.

use crate::model::project::{ProjectId, TaskId};
use crate::store::ProjectStore;

/// One row of the project sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListItem {
    pub id: ProjectId,
    pub name: String,
    pub task_count: usize,
    pub completed_count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectListView {
    pub items: Vec<ProjectListItem>,
}

impl ProjectListView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One row of the task panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

/// Task panel for the selected project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub project_id: ProjectId,
    pub project_name: String,
    pub rows: Vec<TaskRow>,
}

impl TaskListView {
    pub fn remaining(&self) -> usize {
        self.rows.iter().filter(|row| !row.completed).count()
    }
}

/// Both dashboard regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub projects: ProjectListView,
    /// `None` when nothing is selected.
    pub tasks: Option<TaskListView>,
}

pub fn render_project_list(store: &ProjectStore) -> ProjectListView {
    let selected = store.selected_project_id();
    ProjectListView {
        items: store
            .projects()
            .iter()
            .map(|project| ProjectListItem {
                id: project.id,
                name: project.name.clone(),
                task_count: project.tasks.len(),
                completed_count: project.completed_count(),
                selected: selected == Some(project.id),
            })
            .collect(),
    }
}

pub fn render_task_list(store: &ProjectStore) -> Option<TaskListView> {
    store.selected_project().map(|project| TaskListView {
        project_id: project.id,
        project_name: project.name.clone(),
        rows: project
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                title: task.title.clone(),
                completed: task.completed,
            })
            .collect(),
    })
}

pub fn render(store: &ProjectStore) -> DashboardView {
    DashboardView {
        projects: render_project_list(store),
        tasks: render_task_list(store),
    }
}
