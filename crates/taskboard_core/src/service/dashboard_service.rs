//! Dashboard use-case service.
//!
//! # Responsibility
//! - Own the explicit `ProjectStore` and the repository it persists through.
//! - Gate destructive operations behind a `ConfirmationGate`.
//! - Rewrite the full project list after every successful mutation.
//!
//! # Invariants
//! - Rejected operations (validation, lookup, cancel) never write storage.
//! - No-op edits never write storage.
//! - Selection is in-memory only and is not part of the persisted blob.

use crate::model::project::{Project, ProjectId, TaskId};
use crate::repo::project_repo::{LoadOutcome, ProjectRepository};
use crate::service::confirm::ConfirmationGate;
use crate::storage::StorageError;
use crate::store::{ProjectStore, StoreError, TitleEdit};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Service error for dashboard use-cases.
#[derive(Debug)]
pub enum DashboardError {
    /// Project name is blank after trim.
    InvalidProjectName,
    /// Task title is blank after trim.
    InvalidTaskTitle,
    /// Task operation attempted with no selected project.
    NoProjectSelected,
    ProjectNotFound(ProjectId),
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
    /// State changed in memory but could not be written.
    Storage(StorageError),
}

impl DashboardError {
    /// Whether this is a rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidProjectName | Self::InvalidTaskTitle)
    }

    /// Whether this is a failed id lookup (including missing selection).
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::NoProjectSelected | Self::ProjectNotFound(_) | Self::TaskNotFound { .. }
        )
    }

    /// Alert text shown to the user, when this error warrants one.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidProjectName => Some("Please enter a project name."),
            Self::InvalidTaskTitle => Some("Please enter a task title."),
            Self::Storage(_) => Some("Changes could not be saved."),
            _ => None,
        }
    }
}

impl Display for DashboardError {
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
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::InvalidProjectName => Self::InvalidProjectName,
            StoreError::InvalidTaskTitle => Self::InvalidTaskTitle,
            StoreError::NoProjectSelected => Self::NoProjectSelected,
            StoreError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            StoreError::TaskNotFound {
                project_id,
                task_id,
            } => Self::TaskNotFound {
                project_id,
                task_id,
            },
        }
    }
}

impl From<StorageError> for DashboardError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of a confirmed destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The gate declined; nothing changed.
    Cancelled,
}

/// How startup data was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Storage was empty; the seed set stays in place.
    Seeded,
    /// Storage held a valid list of `projects` entries.
    Restored { projects: usize },
    /// Storage held unusable data; the seed set stays in place.
    Recovered { reason: String },
}

/// Dashboard facade combining store state and persistence.
pub struct DashboardService<R: ProjectRepository> {
    store: ProjectStore,
    repo: R,
}

impl<R: ProjectRepository> DashboardService<R> {
    /// Creates a service holding the seed set; call `load` to read storage.
    pub fn new(repo: R) -> Self {
        Self {
            store: ProjectStore::seeded(),
            repo,
        }
    }

    /// Creates a service and immediately loads persisted state.
    pub fn open(repo: R) -> (Self, LoadReport) {
        let mut service = Self::new(repo);
        let report = service.load();
        (service, report)
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects()
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.store.project(id)
    }

    pub fn selected_project_id(&self) -> Option<ProjectId> {
        self.store.selected_project_id()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.store.selected_project()
    }

    /// Reads persisted state, keeping the in-memory list on missing or bad data.
    ///
    /// The selection is cleared when stored data replaces the list.
    pub fn load(&mut self) -> LoadReport {
        match self.repo.load_projects() {
            LoadOutcome::Missing => {
                info!("event=dashboard_load module=service status=ok source=seed");
                LoadReport::Seeded
            }
            LoadOutcome::Restored(projects) => {
                let count = projects.len();
                self.store.replace_projects(projects);
                info!(
                    "event=dashboard_load module=service status=ok source=storage projects={}",
                    count
                );
                LoadReport::Restored { projects: count }
            }
            LoadOutcome::Rejected { reason } => {
                warn!("event=dashboard_load module=service status=fallback source=seed");
                LoadReport::Recovered { reason }
            }
        }
    }

    /// Writes the full project list.
    pub fn save(&self) -> DashboardResult<()> {
        self.repo.save_projects(self.store.projects())?;
        Ok(())
    }

    /// Creates and selects a new project.
    pub fn create_project(&mut self, name: &str) -> DashboardResult<ProjectId> {
        let id = self.store.create_project(name).map_err(|err| {
            debug!("event=project_create module=service status=rejected reason=blank_name");
            DashboardError::from(err)
        })?;
        info!("event=project_create module=service status=ok project_id={id}");
        self.save()?;
        Ok(id)
    }

    /// Deletes a project and its tasks after confirmation.
    pub fn delete_project(
        &mut self,
        id: ProjectId,
        gate: &mut dyn ConfirmationGate,
    ) -> DashboardResult<Deletion> {
        let prompt = match self.store.project(id) {
            Some(project) => format!(
                "Delete project \"{}\" and all of its tasks?",
                project.name
            ),
            None => {
                debug!("event=project_delete module=service status=not_found project_id={id}");
                return Err(DashboardError::ProjectNotFound(id));
            }
        };
        if !gate.confirm(&prompt) {
            debug!("event=project_delete module=service status=cancelled project_id={id}");
            return Ok(Deletion::Cancelled);
        }

        let removed = self.store.remove_project(id)?;
        info!(
            "event=project_delete module=service status=ok project_id={} tasks={}",
            id,
            removed.tasks.len()
        );
        self.save()?;
        Ok(Deletion::Deleted)
    }

    /// Selects a project; unknown ids are reported as `ProjectNotFound`.
    pub fn select_project(&mut self, id: ProjectId) -> DashboardResult<()> {
        self.store.select_project(id).map_err(|err| {
            debug!("event=project_select module=service status=not_found project_id={id}");
            DashboardError::from(err)
        })?;
        debug!("event=project_select module=service status=ok project_id={id}");
        Ok(())
    }

    /// Clears the selection (logout).
    pub fn clear_selection(&mut self) -> Option<ProjectId> {
        let previous = self.store.clear_selection();
        debug!(
            "event=selection_clear module=service status=ok had_selection={}",
            previous.is_some()
        );
        previous
    }

    /// Adds an open task to the selected project.
    pub fn add_task(&mut self, title: &str) -> DashboardResult<TaskId> {
        let task_id = self.store.add_task(title).map_err(|err| self.reject("task_add", err))?;
        info!(
            "event=task_add module=service status=ok project_id={} task_id={}",
            self.selected_label(),
            task_id
        );
        self.save()?;
        Ok(task_id)
    }

    /// Flips completion of a task in the selected project; returns the new value.
    pub fn toggle_task_completion(&mut self, task_id: TaskId) -> DashboardResult<bool> {
        let completed = self
            .store
            .toggle_task(task_id)
            .map_err(|err| self.reject("task_toggle", err))?;
        info!(
            "event=task_toggle module=service status=ok project_id={} task_id={} completed={}",
            self.selected_label(),
            task_id,
            completed
        );
        self.save()?;
        Ok(completed)
    }

    /// Retitles a task; equal titles are a no-op without a write.
    pub fn edit_task_title(&mut self, task_id: TaskId, title: &str) -> DashboardResult<TitleEdit> {
        let edit = self
            .store
            .edit_task_title(task_id, title)
            .map_err(|err| self.reject("task_edit", err))?;
        if edit == TitleEdit::Unchanged {
            debug!("event=task_edit module=service status=unchanged task_id={task_id}");
            return Ok(edit);
        }
        info!(
            "event=task_edit module=service status=ok project_id={} task_id={}",
            self.selected_label(),
            task_id
        );
        self.save()?;
        Ok(edit)
    }

    /// Deletes a task from the selected project after confirmation.
    pub fn delete_task(
        &mut self,
        task_id: TaskId,
        gate: &mut dyn ConfirmationGate,
    ) -> DashboardResult<Deletion> {
        let prompt = match self.store.selected_task(task_id) {
            Ok(task) => format!("Delete task \"{}\"?", task.title),
            Err(err) => return Err(self.reject("task_delete", err)),
        };
        if !gate.confirm(&prompt) {
            debug!("event=task_delete module=service status=cancelled task_id={task_id}");
            return Ok(Deletion::Cancelled);
        }

        self.store.remove_task(task_id)?;
        info!(
            "event=task_delete module=service status=ok project_id={} task_id={}",
            self.selected_label(),
            task_id
        );
        self.save()?;
        Ok(Deletion::Deleted)
    }

    fn reject(&self, event: &str, err: StoreError) -> DashboardError {
        match err {
            StoreError::NoProjectSelected => {
                warn!("event={event} module=service status=rejected reason=no_selection");
            }
            StoreError::InvalidTaskTitle | StoreError::InvalidProjectName => {
                debug!("event={event} module=service status=rejected reason=blank_input");
            }
            _ => {
                debug!("event={event} module=service status=not_found error={err}");
            }
        }
        err.into()
    }

    fn selected_label(&self) -> String {
        self.store
            .selected_project_id()
            .map_or_else(|| "none".to_string(), |id| id.to_string())
    }
}
