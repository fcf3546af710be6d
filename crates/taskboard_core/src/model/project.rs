//! Project and task records.
//!
//! # Responsibility
//! - Define the persisted project/task shape.
//! - Validate list-level invariants before data is accepted from storage.
//!
//! # Invariants
//! - `Project::name` and `Task::title` are non-empty after trim.
//! - Project ids are unique in a list; task ids are unique per project.
//! - Every id lies within `-MAX_SAFE_ID..=MAX_SAFE_ID` so the JSON blob stays
//!   exact for readers that parse numbers as doubles.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Project identifier derived from creation time (epoch milliseconds).
pub type ProjectId = i64;

/// Task identifier, unique only inside its owning project.
pub type TaskId = i64;

/// Largest id accepted from storage or handed out by `fresh_id` (2^53 - 1).
pub const MAX_SAFE_ID: i64 = (1 << 53) - 1;

/// Titled unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Creates an open (not completed) task.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Named container owning an ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Project {
    /// Creates a project with an empty task list.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Number of tasks flagged as completed.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Returns a task id not used by any task of this project.
    pub fn next_task_id(&self) -> TaskId {
        fresh_id(now_epoch_ms(), self.tasks.iter().map(|task| task.id))
    }

    /// Checks per-project invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if !id_in_range(self.id) {
            return Err(ProjectValidationError::IdOutOfRange(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::BlankProjectName(self.id));
        }

        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !id_in_range(task.id) {
                return Err(ProjectValidationError::IdOutOfRange(task.id));
            }
            if task.title.trim().is_empty() {
                return Err(ProjectValidationError::BlankTaskTitle {
                    project_id: self.id,
                    task_id: task.id,
                });
            }
            if !seen.insert(task.id) {
                return Err(ProjectValidationError::DuplicateTaskId {
                    project_id: self.id,
                    task_id: task.id,
                });
            }
        }

        Ok(())
    }
}

/// Invariant violations detected on a project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    BlankProjectName(ProjectId),
    BlankTaskTitle {
        project_id: ProjectId,
        task_id: TaskId,
    },
    DuplicateProjectId(ProjectId),
    DuplicateTaskId {
        project_id: ProjectId,
        task_id: TaskId,
    },
    /// A project or task id outside `-MAX_SAFE_ID..=MAX_SAFE_ID`.
    IdOutOfRange(i64),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProjectName(id) => write!(f, "project {id} has a blank name"),
            Self::BlankTaskTitle {
                project_id,
                task_id,
            } => write!(f, "task {task_id} in project {project_id} has a blank title"),
            Self::DuplicateProjectId(id) => write!(f, "duplicate project id {id}"),
            Self::DuplicateTaskId {
                project_id,
                task_id,
            } => write!(f, "duplicate task id {task_id} in project {project_id}"),
            Self::IdOutOfRange(id) => write!(f, "id {id} is outside the safe integer range"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Validates a whole project list, including cross-project id uniqueness.
pub fn validate_projects(projects: &[Project]) -> Result<(), ProjectValidationError> {
    let mut seen = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen.insert(project.id) {
            return Err(ProjectValidationError::DuplicateProjectId(project.id));
        }
        project.validate()?;
    }
    Ok(())
}

/// Picks an id not present in `existing`.
///
/// Returns `now_ms`, or `max + 1` when an existing id is equal or later. When
/// that would pass `MAX_SAFE_ID`, the smallest unused positive id is returned
/// instead.
pub fn fresh_id(now_ms: i64, existing: impl IntoIterator<Item = i64>) -> i64 {
    let taken: BTreeSet<i64> = existing.into_iter().collect();
    let candidate = match taken.last() {
        Some(&max) if max >= now_ms => max.checked_add(1),
        _ => Some(now_ms),
    };
    match candidate {
        Some(id) if id_in_range(id) => id,
        _ => {
            let mut id = 1;
            while taken.contains(&id) {
                id += 1;
            }
            id
        }
    }
}

fn id_in_range(id: i64) -> bool {
    (-MAX_SAFE_ID..=MAX_SAFE_ID).contains(&id)
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        fresh_id, validate_projects, Project, ProjectValidationError, Task, MAX_SAFE_ID,
    };

    #[test]
    fn fresh_id_prefers_clock_when_ahead() {
        assert_eq!(fresh_id(500, [1, 2, 3]), 500);
        assert_eq!(fresh_id(500, []), 500);
    }

    #[test]
    fn fresh_id_bumps_past_collisions() {
        assert_eq!(fresh_id(500, [500]), 501);
        assert_eq!(fresh_id(500, [10, 900]), 901);
    }

    #[test]
    fn fresh_id_falls_back_to_smallest_free_id_at_the_ceiling() {
        assert_eq!(fresh_id(500, [MAX_SAFE_ID]), 1);
        assert_eq!(fresh_id(500, [1, 2, 4, MAX_SAFE_ID]), 3);
        assert_eq!(fresh_id(500, [MAX_SAFE_ID - 1]), MAX_SAFE_ID);
        assert_eq!(fresh_id(i64::MAX, [i64::MAX]), 1);
        assert_eq!(fresh_id(MAX_SAFE_ID + 1, []), 1);
    }

    #[test]
    fn validate_rejects_ids_outside_safe_range() {
        let err = validate_projects(&[Project::new(i64::MAX, "Max")]).unwrap_err();
        assert_eq!(err, ProjectValidationError::IdOutOfRange(i64::MAX));

        let mut project = Project::new(MAX_SAFE_ID, "Edge");
        project.tasks.push(Task::new(-MAX_SAFE_ID, "low edge"));
        assert!(validate_projects(std::slice::from_ref(&project)).is_ok());

        project.tasks.push(Task::new(MAX_SAFE_ID + 1, "past the edge"));
        let err = validate_projects(&[project]).unwrap_err();
        assert_eq!(err, ProjectValidationError::IdOutOfRange(MAX_SAFE_ID + 1));
    }

    #[test]
    fn validate_rejects_duplicate_task_ids_within_project() {
        let mut project = Project::new(1, "Chores");
        project.tasks.push(Task::new(7, "Sweep"));
        project.tasks.push(Task::new(7, "Mop"));

        let err = validate_projects(&[project]).unwrap_err();
        assert_eq!(
            err,
            ProjectValidationError::DuplicateTaskId {
                project_id: 1,
                task_id: 7
            }
        );
    }

    #[test]
    fn validate_allows_task_id_reuse_across_projects() {
        let mut first = Project::new(1, "A");
        first.tasks.push(Task::new(1, "one"));
        let mut second = Project::new(2, "B");
        second.tasks.push(Task::new(1, "uno"));

        assert!(validate_projects(&[first, second]).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_project_ids_and_blank_names() {
        let err = validate_projects(&[Project::new(3, "x"), Project::new(3, "y")]).unwrap_err();
        assert_eq!(err, ProjectValidationError::DuplicateProjectId(3));

        let err = validate_projects(&[Project::new(4, "   ")]).unwrap_err();
        assert_eq!(err, ProjectValidationError::BlankProjectName(4));
    }
}
