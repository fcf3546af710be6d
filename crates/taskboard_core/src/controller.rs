//! Event glue between a front end and the dashboard service.
//!
//! # Responsibility
//! - Translate user events into service calls.
//! - Resolve each failure locally: alert, silence, or log.
//! - Hand back a fresh render after every state change.
//!
//! # Invariants
//! - Validation failures produce an alert and no view.
//! - Lookup failures, cancels and no-op edits are silent and produce no view.

use crate::model::project::{ProjectId, TaskId};
use crate::repo::project_repo::ProjectRepository;
use crate::service::confirm::ConfirmationGate;
use crate::service::dashboard_service::{
    DashboardError, DashboardResult, DashboardService, Deletion, LoadReport,
};
use crate::store::TitleEdit;
use crate::view::{render, DashboardView};
use log::{debug, error};

/// User interaction delivered by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    CreateProject { name: String },
    SelectProject { id: ProjectId },
    DeleteProject { id: ProjectId },
    AddTask { title: String },
    ToggleTask { id: TaskId },
    EditTask { id: TaskId, title: String },
    DeleteTask { id: TaskId },
    /// Clears the selection; there is no real authentication.
    Logout,
}

/// What the front end should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Blocking message to show the user.
    pub alert: Option<String>,
    /// Fresh render when state changed.
    pub view: Option<DashboardView>,
}

impl EventOutcome {
    fn silent() -> Self {
        Self::default()
    }

    fn alert(message: &str) -> Self {
        Self {
            alert: Some(message.to_string()),
            view: None,
        }
    }

    pub fn changed(&self) -> bool {
        self.view.is_some()
    }
}

/// Owns the dashboard service for the lifetime of a front end session.
pub struct DashboardController<R: ProjectRepository> {
    service: DashboardService<R>,
}

impl<R: ProjectRepository> DashboardController<R> {
    pub fn new(service: DashboardService<R>) -> Self {
        Self { service }
    }

    /// Loads persisted state and wraps the resulting service.
    pub fn open(repo: R) -> (Self, LoadReport) {
        let (service, report) = DashboardService::open(repo);
        (Self::new(service), report)
    }

    pub fn service(&self) -> &DashboardService<R> {
        &self.service
    }

    /// Renders both regions from current state.
    pub fn render(&self) -> DashboardView {
        render(self.service.store())
    }

    /// Handles one event to completion.
    pub fn handle(
        &mut self,
        event: DashboardEvent,
        gate: &mut dyn ConfirmationGate,
    ) -> EventOutcome {
        let result = self.apply(event, gate);
        match result {
            Ok(true) => EventOutcome {
                alert: None,
                view: Some(self.render()),
            },
            Ok(false) => EventOutcome::silent(),
            Err(err) => self.resolve(err),
        }
    }

    /// Returns whether state changed.
    fn apply(
        &mut self,
        event: DashboardEvent,
        gate: &mut dyn ConfirmationGate,
    ) -> DashboardResult<bool> {
        match event {
            DashboardEvent::CreateProject { name } => {
                self.service.create_project(&name)?;
                Ok(true)
            }
            DashboardEvent::SelectProject { id } => {
                self.service.select_project(id)?;
                Ok(true)
            }
            DashboardEvent::DeleteProject { id } => {
                Ok(self.service.delete_project(id, gate)? == Deletion::Deleted)
            }
            DashboardEvent::AddTask { title } => {
                self.service.add_task(&title)?;
                Ok(true)
            }
            DashboardEvent::ToggleTask { id } => {
                self.service.toggle_task_completion(id)?;
                Ok(true)
            }
            DashboardEvent::EditTask { id, title } => {
                Ok(self.service.edit_task_title(id, &title)? == TitleEdit::Updated)
            }
            DashboardEvent::DeleteTask { id } => {
                Ok(self.service.delete_task(id, gate)? == Deletion::Deleted)
            }
            DashboardEvent::Logout => {
                self.service.clear_selection();
                Ok(true)
            }
        }
    }

    fn resolve(&self, err: DashboardError) -> EventOutcome {
        match &err {
            DashboardError::Storage(_) => {
                error!("event=dashboard_event module=controller status=error error={err}");
                // Memory already holds the change, so redraw it.
                EventOutcome {
                    alert: err.user_message().map(str::to_string),
                    view: Some(self.render()),
                }
            }
            _ if err.is_validation() => {
                EventOutcome::alert(err.user_message().unwrap_or("Invalid input."))
            }
            _ => {
                debug!("event=dashboard_event module=controller status=ignored error={err}");
                EventOutcome::silent()
            }
        }
    }
}
