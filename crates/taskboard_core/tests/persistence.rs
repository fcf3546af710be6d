use std::io;
use taskboard_core::{
    decode_projects, encode_projects, open_db, seed_projects, DashboardService, KeyValueStore,
    KvProjectRepository, LoadOutcome, LoadReport, MemoryKeyValueStore, Project,
    ProjectRepository, SqliteKeyValueStore, StorageError, StorageResult, Task,
    DEFAULT_PROJECTS_KEY,
};

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1_700_000_000_000,
            name: "Groceries".to_string(),
            tasks: vec![
                Task {
                    id: 1_700_000_000_100,
                    title: "Milk".to_string(),
                    completed: true,
                },
                Task::new(1_700_000_000_101, "Bread"),
            ],
        },
        Project::new(1_700_000_000_001, "Empty"),
        Project {
            id: 1_700_000_000_002,
            name: "Reuses task ids".to_string(),
            tasks: vec![Task::new(1_700_000_000_100, "Same id, other project")],
        },
    ]
}

#[test]
fn save_then_load_returns_equal_list() {
    let repo = KvProjectRepository::new(MemoryKeyValueStore::new());
    let projects = sample_projects();

    repo.save_projects(&projects).unwrap();

    assert_eq!(repo.load_projects(), LoadOutcome::Restored(projects));
}

#[test]
fn empty_list_round_trips() {
    let repo = KvProjectRepository::new(MemoryKeyValueStore::new());
    repo.save_projects(&[]).unwrap();
    assert_eq!(repo.load_projects(), LoadOutcome::Restored(Vec::new()));
}

#[test]
fn persisted_blob_matches_documented_layout() {
    let encoded = encode_projects(&sample_projects()[..1]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{
            "id": 1_700_000_000_000_i64,
            "name": "Groceries",
            "tasks": [
                {"id": 1_700_000_000_100_i64, "title": "Milk", "completed": true},
                {"id": 1_700_000_000_101_i64, "title": "Bread", "completed": false}
            ]
        }])
    );
    assert_eq!(decode_projects(&encoded).unwrap(), sample_projects()[..1]);
}

#[test]
fn missing_storage_keeps_seed() {
    let (service, report) =
        DashboardService::open(KvProjectRepository::new(MemoryKeyValueStore::new()));

    assert_eq!(report, LoadReport::Seeded);
    assert_eq!(service.projects(), seed_projects().as_slice());
    assert_eq!(service.selected_project_id(), None);
}

#[test]
fn corrupted_storage_loads_like_missing_storage() {
    let (empty, _) = DashboardService::open(KvProjectRepository::new(MemoryKeyValueStore::new()));

    for corrupt in [
        "{not json",
        "",
        "42",
        r#"{"projects": []}"#,
        r#"[{"id": 1, "name": "no tasks field"}]"#,
        r#"[{"id": 1, "name": "x", "tasks": [{"id": 1, "title": "t", "completed": "yes"}]}]"#,
        r#"[{"id": 1, "name": "   ", "tasks": []}]"#,
        r#"[{"id": 5, "name": "a", "tasks": []}, {"id": 5, "name": "b", "tasks": []}]"#,
    ] {
        let store = MemoryKeyValueStore::with_entry(DEFAULT_PROJECTS_KEY, corrupt);
        let (service, report) = DashboardService::open(KvProjectRepository::new(store));

        assert!(
            matches!(report, LoadReport::Recovered { .. }),
            "blob {corrupt:?} should be rejected"
        );
        assert_eq!(service.projects(), empty.projects(), "blob {corrupt:?}");
        assert_eq!(service.repository().store().writes(), 0);
    }
}

struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read denied",
        )))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[test]
fn unreadable_storage_loads_like_corrupted_storage() {
    let repo = KvProjectRepository::new(UnreadableStore);
    assert!(matches!(repo.load_projects(), LoadOutcome::Rejected { .. }));

    let (service, report) = DashboardService::open(repo);

    assert!(matches!(report, LoadReport::Recovered { .. }));
    assert_eq!(service.projects(), seed_projects().as_slice());
    assert_eq!(service.selected_project_id(), None);
}

#[test]
fn valid_storage_replaces_seed() {
    let store = MemoryKeyValueStore::with_entry(
        DEFAULT_PROJECTS_KEY,
        encode_projects(&sample_projects()).unwrap(),
    );
    let (service, report) = DashboardService::open(KvProjectRepository::new(store));

    assert_eq!(report, LoadReport::Restored { projects: 3 });
    assert_eq!(service.projects(), sample_projects().as_slice());
}

#[test]
fn custom_key_isolates_blobs() {
    let store = MemoryKeyValueStore::new();
    let repo_a = KvProjectRepository::with_key(&store, "board.a");
    let repo_b = KvProjectRepository::with_key(&store, "board.b");

    repo_a.save_projects(&sample_projects()).unwrap();

    assert_eq!(repo_b.load_projects(), LoadOutcome::Missing);
    assert_eq!(store.writes(), 1);
}

#[test]
fn sqlite_store_round_trips_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let (mut service, report) =
            DashboardService::open(KvProjectRepository::new(SqliteKeyValueStore::new(&conn)));
        assert_eq!(report, LoadReport::Seeded);
        service.create_project("Groceries").unwrap();
        service.add_task("Milk").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let (service, report) =
        DashboardService::open(KvProjectRepository::new(SqliteKeyValueStore::new(&conn)));
    assert_eq!(report, LoadReport::Restored { projects: 3 });
    let groceries = service.projects().last().unwrap();
    assert_eq!(groceries.name, "Groceries");
    assert_eq!(groceries.tasks.len(), 1);
    assert_eq!(groceries.tasks[0].title, "Milk");
    assert_eq!(service.selected_project_id(), None);
}

#[test]
fn sqlite_store_overwrites_existing_value() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("kv.sqlite3")).unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}
