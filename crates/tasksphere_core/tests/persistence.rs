use tasksphere_core::db::{open_db, open_db_in_memory, DbError};
use tasksphere_core::{
    Category, KeyValueStore, KvStateRepository, MemoryKeyValueStore, RepoError, RepoResult,
    SqliteKeyValueStore, Task, TaskId, TaskRepository, TaskStore, Theme, ThemeService, TASKS_KEY,
    THEME_KEY,
};

/// Key-value store whose writes always fail, like a full or disabled disk.
struct FullDiskStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for FullDiskStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            Some("database or disk is full".to_string()),
        ))))
    }
}

fn sqlite_repo(path: &std::path::Path) -> KvStateRepository<SqliteKeyValueStore> {
    let store = SqliteKeyValueStore::try_new(open_db(path).unwrap()).unwrap();
    KvStateRepository::new(store)
}

#[test]
fn tasks_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasksphere.db");

    let expected = {
        let mut store = TaskStore::open(sqlite_repo(&path));
        let a = store.add_task("Plan sprint", Category::Work);
        store.add_task("Read chapter 3", Category::Study);
        store.toggle_task(&a.id);
        store.tasks().to_vec()
    };

    let reopened = TaskStore::open(sqlite_repo(&path));
    assert_eq!(reopened.tasks(), expected.as_slice());
}

#[test]
fn empty_collection_round_trips() {
    let repo = KvStateRepository::new(
        SqliteKeyValueStore::try_new(open_db_in_memory().unwrap()).unwrap(),
    );
    repo.save_tasks(&[]).unwrap();
    assert_eq!(repo.load_tasks().unwrap(), Some(Vec::new()));
}

#[test]
fn stored_payload_uses_documented_json_shape() {
    let kv = MemoryKeyValueStore::new();
    let mut store = TaskStore::open(KvStateRepository::new(kv.clone()));
    let task = store.add_task("Call mom", Category::Personal);

    let raw = kv.get(TASKS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": task.id.as_str(),
            "title": "Call mom",
            "category": "Personal",
            "completed": false,
            "createdAt": task.created_at
        }])
    );
}

#[test]
fn legacy_timestamp_ids_load_unchanged() {
    let kv = MemoryKeyValueStore::new();
    kv.set(
        TASKS_KEY,
        r#"[{"id":"1718000000000","title":"Old task","category":"Other","completed":true,"createdAt":1718000000000}]"#,
    )
    .unwrap();

    let store = TaskStore::open(KvStateRepository::new(kv));
    let task = store.get_task(&TaskId::from("1718000000000")).unwrap();
    assert_eq!(task.title, "Old task");
    assert!(task.completed);
}

#[test]
fn malformed_storage_starts_empty_without_overwriting() {
    let kv = MemoryKeyValueStore::new();
    kv.set(TASKS_KEY, "{definitely not json").unwrap();

    let store = TaskStore::open(KvStateRepository::new(kv.clone()));
    assert!(store.tasks().is_empty());
    assert_eq!(
        kv.get(TASKS_KEY).unwrap().as_deref(),
        Some("{definitely not json")
    );
}

#[test]
fn hydration_never_writes() {
    let kv = MemoryKeyValueStore::new();
    let store = TaskStore::open(KvStateRepository::new(kv.clone()));

    assert!(store.tasks().is_empty());
    assert!(kv.is_empty());
}

#[test]
fn duplicate_stored_ids_are_rekeyed_on_open() {
    let kv = MemoryKeyValueStore::new();
    KvStateRepository::new(kv.clone())
        .save_tasks(&[
            Task::with_id(TaskId::from("42"), "first", Category::Work, 2),
            Task::with_id(TaskId::from("42"), "second", Category::Work, 1),
        ])
        .unwrap();

    let store = TaskStore::open(KvStateRepository::new(kv));
    let tasks = store.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id.as_str(), "42");
    assert_ne!(tasks[1].id, tasks[0].id);
    assert_eq!(tasks[1].title, "second");
}

#[test]
fn write_failures_keep_in_memory_state_authoritative() {
    let repo = KvStateRepository::new(FullDiskStore {
        inner: MemoryKeyValueStore::new(),
    });
    let mut store = TaskStore::open(repo);

    let task = store.add_task("Offline", Category::Other);
    store.toggle_task(&task.id);

    assert_eq!(store.tasks().len(), 1);
    assert!(store.tasks()[0].completed);
    assert_eq!(store.repo().load_tasks().unwrap(), None);
}

#[test]
fn theme_defaults_to_light_and_toggle_persists() {
    let kv = MemoryKeyValueStore::new();
    let mut themes = ThemeService::open(KvStateRepository::new(kv.clone()));
    assert_eq!(themes.theme(), Theme::Light);
    assert!(kv.is_empty());

    assert_eq!(themes.toggle_theme(), Theme::Dark);
    assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    let reopened = ThemeService::open(KvStateRepository::new(kv.clone()));
    assert_eq!(reopened.theme(), Theme::Dark);

    kv.set(THEME_KEY, "neon").unwrap();
    assert_eq!(
        ThemeService::open(KvStateRepository::new(kv)).theme(),
        Theme::Light
    );
}

#[test]
fn theme_and_tasks_use_independent_keys() {
    let kv = MemoryKeyValueStore::new();
    let mut store = TaskStore::open(KvStateRepository::new(kv.clone()));
    let mut themes = ThemeService::open(KvStateRepository::new(kv.clone()));

    store.add_task("x", Category::Work);
    themes.toggle_theme();

    assert_eq!(kv.len(), 2);
    assert_eq!(
        TaskStore::open(KvStateRepository::new(kv)).tasks(),
        store.tasks()
    );
}
