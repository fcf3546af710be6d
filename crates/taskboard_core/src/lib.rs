//! Core domain logic for Taskboard.
//! This crate is the single source of truth for project/task invariants;
//! front ends only translate events and draw render snapshots.

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use config::DashboardConfig;
pub use controller::{DashboardController, DashboardEvent, EventOutcome};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    Project, ProjectId, ProjectValidationError, Task, TaskId, MAX_SAFE_ID,
};
pub use model::seed::seed_projects;
pub use repo::project_repo::{
    decode_projects, encode_projects, DecodeError, KvProjectRepository, LoadOutcome,
    ProjectRepository, DEFAULT_PROJECTS_KEY,
};
pub use service::confirm::{AutoConfirm, AutoDecline, ConfirmationGate, PresetAnswer};
pub use service::dashboard_service::{
    DashboardError, DashboardResult, DashboardService, Deletion, LoadReport,
};
pub use storage::{
    latest_schema_version, open_db, open_db_in_memory, schema_version, KeyValueStore,
    MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use store::{ProjectStore, StoreError, TitleEdit};
pub use view::{DashboardView, ProjectListItem, ProjectListView, TaskListView, TaskRow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
