//! Project list repository over a `KeyValueStore`.
//!
//! # Responsibility
//! - Serialize the project list as a JSON array under a fixed key.
//! - Decode with a typed, shape-checked step before accepting stored data.
//!
//! # Invariants
//! - Decoded lists satisfy `validate_projects` or are rejected.
//! - Load never fails outright: unusable data yields a recovery outcome.

use crate::model::project::{validate_projects, Project, ProjectValidationError};
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default storage key for the project list blob.
pub const DEFAULT_PROJECTS_KEY: &str = "taskboard.projects";

/// Why a stored blob was rejected.
#[derive(Debug)]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape.
    Json(serde_json::Error),
    /// Well-formed but violates list invariants.
    Invalid(ProjectValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed project data: {err}"),
            Self::Invalid(err) => write!(f, "invalid project data: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ProjectValidationError> for DecodeError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Result of reading the stored project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Missing,
    /// Stored data decoded and validated.
    Restored(Vec<Project>),
    /// Stored data was unreadable or unusable.
    Rejected { reason: String },
}

/// Encodes a project list into the persisted blob format.
pub fn encode_projects(projects: &[Project]) -> serde_json::Result<String> {
    serde_json::to_string(projects)
}

/// Decodes and validates a persisted blob.
pub fn decode_projects(raw: &str) -> Result<Vec<Project>, DecodeError> {
    let projects: Vec<Project> = serde_json::from_str(raw)?;
    validate_projects(&projects)?;
    Ok(projects)
}

/// Repository contract for whole-list project persistence.
pub trait ProjectRepository {
    fn load_projects(&self) -> LoadOutcome;
    fn save_projects(&self, projects: &[Project]) -> StorageResult<()>;
}

/// `ProjectRepository` writing one JSON blob through a key-value store.
pub struct KvProjectRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvProjectRepository<S> {
    /// Creates a repository using `DEFAULT_PROJECTS_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_PROJECTS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ProjectRepository for KvProjectRepository<S> {
    fn load_projects(&self) -> LoadOutcome {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=projects_load module=repo status=missing");
                return LoadOutcome::Missing;
            }
            Err(err) => {
                error!(
                    "event=projects_load module=repo status=error error_code=storage_read_failed error={}",
                    err
                );
                return LoadOutcome::Rejected {
                    reason: err.to_string(),
                };
            }
        };

        match decode_projects(&raw) {
            Ok(projects) => {
                info!(
                    "event=projects_load module=repo status=ok projects={} bytes={}",
                    projects.len(),
                    raw.len()
                );
                LoadOutcome::Restored(projects)
            }
            Err(err) => {
                warn!(
                    "event=projects_load module=repo status=rejected bytes={} error={}",
                    raw.len(),
                    err
                );
                LoadOutcome::Rejected {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn save_projects(&self, projects: &[Project]) -> StorageResult<()> {
        let encoded = encode_projects(projects).map_err(StorageError::Encode)?;
        match self.store.set(&self.key, &encoded) {
            Ok(()) => {
                debug!(
                    "event=projects_save module=repo status=ok projects={} bytes={}",
                    projects.len(),
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=projects_save module=repo status=error error_code=storage_write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
