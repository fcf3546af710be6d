//! In-memory dashboard state.
//!
//! # Responsibility
//! - Own the ordered project list and the single selection pointer.
//! - Apply CRUD mutations without any I/O; persistence is the caller's job.
//!
//! # Invariants
//! - `selected` is `None` or the id of a project present in `projects`.
//! - Every mutation either fully applies or leaves state untouched.
//! - Task operations only ever touch the selected project.

use crate::model::project::{fresh_id, now_epoch_ms, Project, ProjectId, Task, TaskId};
use crate::model::seed::seed_projects;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejections raised by store mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Project name is blank after trim.
    InvalidProjectName,
    /// Task title is blank after trim.
    InvalidTaskTitle,
    /// A task operation ran with nothing selected.
    NoProjectSelected,
    ProjectNotFound(ProjectId),
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProjectName => write!(f, "project name must not be blank"),
            Self::InvalidTaskTitle => write!(f, "task title must not be blank"),
            Self::NoProjectSelected => write!(f, "no project selected"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound {
                project_id,
                task_id,
            } => write!(f, "task {task_id} not found in project {project_id}"),
        }
    }
}

impl Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a title edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleEdit {
    Updated,
    /// New title equals the current one after trim; nothing changed.
    Unchanged,
}

/// Ordered projects plus the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStore {
    projects: Vec<Project>,
    selected: Option<ProjectId>,
}

impl ProjectStore {
    /// Creates a store over `projects` with nothing selected.
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            selected: None,
        }
    }

    /// Creates a store holding the built-in seed set.
    pub fn seeded() -> Self {
        Self::new(seed_projects())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn selected_project_id(&self) -> Option<ProjectId> {
        self.selected
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.and_then(|id| self.project(id))
    }

    /// Replaces the whole list and clears the selection.
    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.selected = None;
    }

    /// Appends a new empty project and selects it.
    pub fn create_project(&mut self, name: &str) -> StoreResult<ProjectId> {
        let name = non_blank(name).ok_or(StoreError::InvalidProjectName)?;
        let id = fresh_id(now_epoch_ms(), self.projects.iter().map(|p| p.id));
        self.projects.push(Project::new(id, name));
        self.selected = Some(id);
        Ok(id)
    }

    /// Removes a project together with its tasks.
    ///
    /// Clears the selection when the removed project was selected.
    pub fn remove_project(&mut self, id: ProjectId) -> StoreResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let removed = self.projects.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn select_project(&mut self, id: ProjectId) -> StoreResult<()> {
        if self.project(id).is_none() {
            return Err(StoreError::ProjectNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Clears the selection, returning what was selected.
    pub fn clear_selection(&mut self) -> Option<ProjectId> {
        self.selected.take()
    }

    /// Looks up a task of the selected project.
    pub fn selected_task(&self, task_id: TaskId) -> StoreResult<&Task> {
        let project = self.require_selected()?;
        project.task(task_id).ok_or(StoreError::TaskNotFound {
            project_id: project.id,
            task_id,
        })
    }

    /// Appends an open task to the selected project.
    pub fn add_task(&mut self, title: &str) -> StoreResult<TaskId> {
        let project = self.require_selected_mut()?;
        let title = non_blank(title).ok_or(StoreError::InvalidTaskTitle)?;
        let id = project.next_task_id();
        project.tasks.push(Task::new(id, title));
        Ok(id)
    }

    /// Flips `completed` and returns the new value.
    pub fn toggle_task(&mut self, task_id: TaskId) -> StoreResult<bool> {
        let task = self.selected_task_mut(task_id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn edit_task_title(&mut self, task_id: TaskId, title: &str) -> StoreResult<TitleEdit> {
        self.require_selected()?;
        let title = non_blank(title).ok_or(StoreError::InvalidTaskTitle)?;
        let task = self.selected_task_mut(task_id)?;
        if task.title == title {
            return Ok(TitleEdit::Unchanged);
        }
        task.title = title.to_string();
        Ok(TitleEdit::Updated)
    }

    pub fn remove_task(&mut self, task_id: TaskId) -> StoreResult<Task> {
        let project = self.require_selected_mut()?;
        let index = project
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or(StoreError::TaskNotFound {
                project_id: project.id,
                task_id,
            })?;
        Ok(project.tasks.remove(index))
    }

    fn require_selected(&self) -> StoreResult<&Project> {
        self.selected_project().ok_or(StoreError::NoProjectSelected)
    }

    fn require_selected_mut(&mut self) -> StoreResult<&mut Project> {
        let id = self.selected.ok_or(StoreError::NoProjectSelected)?;
        self.projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(StoreError::NoProjectSelected)
    }

    fn selected_task_mut(&mut self, task_id: TaskId) -> StoreResult<&mut Task> {
        let project = self.require_selected_mut()?;
        let project_id = project.id;
        project.task_mut(task_id).ok_or(StoreError::TaskNotFound {
            project_id,
            task_id,
        })
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
