use taskboard_core::{
    encode_projects, seed_projects, AutoConfirm, AutoDecline, DashboardError, DashboardService,
    Deletion, KvProjectRepository, LoadReport, MemoryKeyValueStore, PresetAnswer, TitleEdit,
    DEFAULT_PROJECTS_KEY, MAX_SAFE_ID,
};

type MemoryService = DashboardService<KvProjectRepository<MemoryKeyValueStore>>;

fn seeded_service() -> MemoryService {
    let (service, _) =
        DashboardService::open(KvProjectRepository::new(MemoryKeyValueStore::new()));
    service
}

fn service_over(blob: &str) -> (MemoryService, LoadReport) {
    DashboardService::open(KvProjectRepository::new(MemoryKeyValueStore::with_entry(
        DEFAULT_PROJECTS_KEY,
        blob,
    )))
}

fn writes(service: &MemoryService) -> usize {
    service.repository().store().writes()
}

fn completion_flags(service: &MemoryService) -> Vec<bool> {
    service
        .selected_project()
        .map(|project| project.tasks.iter().map(|task| task.completed).collect())
        .unwrap_or_default()
}

fn snapshot(service: &MemoryService) -> (String, Option<i64>) {
    (
        encode_projects(service.projects()).unwrap(),
        service.selected_project_id(),
    )
}

#[test]
fn blank_project_name_is_rejected_without_persisting() {
    let mut service = seeded_service();
    let before = snapshot(&service);

    for name in ["", "   ", "\t\n"] {
        let err = service.create_project(name).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidProjectName));
        assert!(err.is_validation());
        assert_eq!(err.user_message(), Some("Please enter a project name."));
    }

    assert_eq!(snapshot(&service), before);
    assert_eq!(writes(&service), 0);
}

#[test]
fn create_project_appends_selects_and_persists() {
    let mut service = seeded_service();
    let existing: Vec<i64> = service.projects().iter().map(|p| p.id).collect();

    let id = service.create_project("Groceries").unwrap();

    assert_eq!(service.projects().len(), existing.len() + 1);
    assert!(!existing.contains(&id));
    let last = service.projects().last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.name, "Groceries");
    assert!(last.tasks.is_empty());
    assert_eq!(service.selected_project_id(), Some(id));
    assert_eq!(writes(&service), 1);

    let stored = service
        .repository()
        .store()
        .raw(service.repository().key())
        .unwrap();
    assert_eq!(stored, encode_projects(service.projects()).unwrap());
}

#[test]
fn deleting_selected_project_clears_selection_and_tasks() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();

    let outcome = service.delete_project(1, &mut AutoConfirm).unwrap();

    assert_eq!(outcome, Deletion::Deleted);
    assert_eq!(service.selected_project_id(), None);
    assert!(service.project(1).is_none());
    assert!(matches!(
        service.select_project(1),
        Err(DashboardError::ProjectNotFound(1))
    ));
    assert!(matches!(
        service.toggle_task_completion(1),
        Err(DashboardError::NoProjectSelected)
    ));
    assert_eq!(writes(&service), 1);
}

#[test]
fn declined_confirmation_leaves_state_untouched() {
    let mut service = seeded_service();
    service.select_project(2).unwrap();
    let before = snapshot(&service);

    assert_eq!(
        service.delete_project(2, &mut AutoDecline).unwrap(),
        Deletion::Cancelled
    );
    assert_eq!(
        service.delete_task(1, &mut AutoDecline).unwrap(),
        Deletion::Cancelled
    );

    assert_eq!(snapshot(&service), before);
    assert_eq!(writes(&service), 0);
}

#[test]
fn confirmation_prompts_name_the_target() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();
    let mut gate = PresetAnswer::new(false);

    service.delete_task(3, &mut gate).unwrap();
    service.delete_project(1, &mut gate).unwrap();

    assert_eq!(
        gate.prompts(),
        [
            "Delete task \"Build landing page\"?".to_string(),
            "Delete project \"Website Redesign\" and all of its tasks?".to_string(),
        ]
    );
}

#[test]
fn toggling_twice_restores_completion_and_spares_siblings() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();
    let original = completion_flags(&service);

    assert!(service.toggle_task_completion(2).unwrap());
    assert_eq!(
        completion_flags(&service),
        vec![original[0], !original[1], original[2]]
    );

    assert!(!service.toggle_task_completion(2).unwrap());
    assert_eq!(completion_flags(&service), original);
    assert_eq!(writes(&service), 2);
}

#[test]
fn editing_title_to_current_value_skips_write() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();

    let edit = service
        .edit_task_title(2, "  Choose color palette  ")
        .unwrap();
    assert_eq!(edit, TitleEdit::Unchanged);
    assert_eq!(writes(&service), 0);

    let edit = service.edit_task_title(2, "Pick a palette").unwrap();
    assert_eq!(edit, TitleEdit::Updated);
    assert_eq!(writes(&service), 1);
    assert_eq!(
        service.selected_project().unwrap().tasks[1].title,
        "Pick a palette"
    );
}

#[test]
fn blank_task_title_is_rejected_on_add_and_edit() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();
    let before = snapshot(&service);

    assert!(matches!(
        service.add_task("  "),
        Err(DashboardError::InvalidTaskTitle)
    ));
    assert!(matches!(
        service.edit_task_title(1, ""),
        Err(DashboardError::InvalidTaskTitle)
    ));

    assert_eq!(snapshot(&service), before);
    assert_eq!(writes(&service), 0);
}

#[test]
fn add_task_appends_open_task_with_project_unique_id() {
    let mut service = seeded_service();
    service.select_project(2).unwrap();

    let id = service.add_task("  Write release notes ").unwrap();

    let project = service.selected_project().unwrap();
    assert_eq!(project.tasks.len(), 3);
    let task = project.tasks.last().unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Write release notes");
    assert!(!task.completed);
    assert_eq!(
        project.tasks.iter().filter(|t| t.id == id).count(),
        1,
        "task id must be unique within the project"
    );
    assert_eq!(writes(&service), 1);
}

#[test]
fn task_operations_without_selection_are_rejected() {
    let mut service = seeded_service();
    let before = snapshot(&service);

    let err = service.add_task("orphan").unwrap_err();
    assert!(matches!(err, DashboardError::NoProjectSelected));
    assert!(err.is_lookup());
    assert!(service.delete_task(1, &mut AutoConfirm).is_err());
    assert!(service.edit_task_title(1, "x").is_err());

    // Selection is checked before the title for both add and edit.
    assert!(matches!(
        service.add_task("   "),
        Err(DashboardError::NoProjectSelected)
    ));
    assert!(matches!(
        service.edit_task_title(1, "   "),
        Err(DashboardError::NoProjectSelected)
    ));

    assert_eq!(snapshot(&service), before);
    assert_eq!(writes(&service), 0);
}

#[test]
fn unknown_ids_leave_state_identical() {
    let mut service = seeded_service();
    service.select_project(1).unwrap();
    let before = snapshot(&service);
    let mut gate = PresetAnswer::new(true);

    assert!(matches!(
        service.delete_task(404, &mut gate),
        Err(DashboardError::TaskNotFound {
            project_id: 1,
            task_id: 404
        })
    ));
    assert!(matches!(
        service.delete_project(404, &mut gate),
        Err(DashboardError::ProjectNotFound(404))
    ));
    assert!(service.toggle_task_completion(404).is_err());
    assert!(service.edit_task_title(404, "renamed").is_err());
    assert!(service.select_project(404).is_err());

    assert!(gate.prompts().is_empty(), "missing targets are never confirmed");
    assert_eq!(snapshot(&service), before);
    assert_eq!(writes(&service), 0);
}

#[test]
fn clear_selection_does_not_persist() {
    let mut service = seeded_service();
    service.select_project(2).unwrap();

    assert_eq!(service.clear_selection(), Some(2));
    assert_eq!(service.selected_project_id(), None);
    assert_eq!(service.clear_selection(), None);
    assert_eq!(writes(&service), 0);
    assert_eq!(service.projects(), seed_projects().as_slice());
}

#[test]
fn stored_ids_past_safe_range_are_rejected_on_load() {
    let blob = format!(
        r#"[{{"id":{max},"name":"Max","tasks":[{{"id":{max},"title":"Edge","completed":false}}]}}]"#,
        max = i64::MAX
    );

    let (service, report) = service_over(&blob);

    assert!(matches!(report, LoadReport::Recovered { .. }));
    assert_eq!(service.projects(), seed_projects().as_slice());
}

#[test]
fn ids_at_the_ceiling_still_yield_unique_ids_that_reload() {
    let blob = format!(
        r#"[{{"id":{max},"name":"Max","tasks":[{{"id":{max},"title":"Edge","completed":false}}]}}]"#,
        max = MAX_SAFE_ID
    );
    let (mut service, report) = service_over(&blob);
    assert_eq!(report, LoadReport::Restored { projects: 1 });

    let project_id = service.create_project("New").unwrap();
    assert_ne!(project_id, MAX_SAFE_ID);
    service.select_project(MAX_SAFE_ID).unwrap();
    let task_id = service.add_task("dup").unwrap();
    assert_ne!(task_id, MAX_SAFE_ID);

    let saved = service
        .repository()
        .store()
        .raw(DEFAULT_PROJECTS_KEY)
        .expect("mutations persist the list");
    let (reloaded, report) = service_over(&saved);
    assert_eq!(report, LoadReport::Restored { projects: 2 });
    assert_eq!(reloaded.projects(), service.projects());
}
