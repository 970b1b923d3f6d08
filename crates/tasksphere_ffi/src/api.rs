//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task intents (add/edit/toggle/delete/filter) to Dart via FRB.
//! - Act as the validating caller: trim titles, reject empty ones, parse
//!   category and filter literals before they reach the store.
//! - Keep one process-wide store so filters and memory state persist
//!   between calls.
//!
//! # Invariants
//! - The database path is resolved once per process; the task store and the
//!   theme service always share that file.
//! - Exported functions must not panic across FFI boundary.
//! - Each call holds the store lock for its whole operation.
//! - Return values are plain envelopes with stable string labels.
//!
//! # See also
//! - docs/architecture/logging.md

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tasksphere_core::db::open_db;
use tasksphere_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    resolve_db_path, resolve_log_level, Category, CategoryFilter, KvStateRepository,
    SqliteKeyValueStore, StatusFilter, Task, TaskId, TaskStore, ThemeService,
};

type SqliteStateRepository = KvStateRepository<SqliteKeyValueStore>;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static TASK_STORE: Mutex<Option<TaskStore<SqliteStateRepository>>> = Mutex::new(None);
static THEME_SERVICE: Mutex<Option<ThemeService<SqliteStateRepository>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
///   Blank falls back to `TASKSPHERE_LOG_LEVEL`, then the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => resolve_log_level(),
        explicit => explicit,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task as rendered by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub id: String,
    pub title: String,
    /// Category label (`Work|Personal|Study|Other`).
    pub category: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Envelope for single-task intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the intent was accepted.
    pub ok: bool,
    /// Task state after the intent, when the task exists.
    pub task: Option<TaskItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: Option<&Task>) -> Self {
        Self {
            ok: true,
            task: task.map(to_task_item),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Visible task list plus the selectors that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    /// Visible tasks, newest first.
    pub items: Vec<TaskItem>,
    /// Active status selector (`all|active|completed`).
    pub status_filter: String,
    /// Active category selector (`all` or a category label).
    pub category_filter: String,
    pub message: String,
}

/// Progress summary for the header card.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatsResponse {
    pub ok: bool,
    pub completed_count: u32,
    pub total_count: u32,
    pub remaining_count: u32,
    pub percentage: f64,
    /// Percentage rounded for display.
    pub rounded_percentage: u32,
    pub message: String,
}

/// Theme preference envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeResponse {
    pub ok: bool,
    /// `light` or `dark`.
    pub theme: String,
    pub message: String,
}

/// Adds a task from the entry form.
///
/// # FFI contract
/// - Title is trimmed; empty titles are rejected without touching the store.
/// - `category` must be an exact category label.
/// - Returns the created task on success.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_add(title: String, category: String) -> TaskActionResponse {
    let (title, category) = match validate_task_input(&title, &category) {
        Ok(input) => input,
        Err(message) => return TaskActionResponse::failure(format!("tasks_add failed: {message}")),
    };

    match with_task_store(|store| store.add_task(title, category)) {
        Ok(task) => TaskActionResponse::success("Task added.", Some(&task)),
        Err(err) => TaskActionResponse::failure(format!("tasks_add failed: {err}")),
    }
}

/// Replaces title and category of one task.
///
/// Same title/category validation as `tasks_add`. Unknown IDs succeed with
/// `task = None`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_edit(id: String, title: String, category: String) -> TaskActionResponse {
    let (title, category) = match validate_task_input(&title, &category) {
        Ok(input) => input,
        Err(message) => {
            return TaskActionResponse::failure(format!("tasks_edit failed: {message}"))
        }
    };

    let id = TaskId::from(id);
    match with_task_store(|store| {
        store.edit_task(&id, title, category);
        store.get_task(&id).map(to_task_item)
    }) {
        Ok(task) => action_result("Task updated.", task),
        Err(err) => TaskActionResponse::failure(format!("tasks_edit failed: {err}")),
    }
}

/// Flips completion of one task. Unknown IDs succeed with `task = None`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_toggle(id: String) -> TaskActionResponse {
    let id = TaskId::from(id);
    match with_task_store(|store| {
        store.toggle_task(&id);
        store.get_task(&id).map(to_task_item)
    }) {
        Ok(task) => action_result("Task toggled.", task),
        Err(err) => TaskActionResponse::failure(format!("tasks_toggle failed: {err}")),
    }
}

/// Deletes one task. Unknown IDs are a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_delete(id: String) -> TaskActionResponse {
    let id = TaskId::from(id);
    match with_task_store(|store| {
        let existed = store.get_task(&id).is_some();
        store.delete_task(&id);
        existed
    }) {
        Ok(true) => TaskActionResponse::success("Task deleted.", None),
        Ok(false) => TaskActionResponse::success("Task not found.", None),
        Err(err) => TaskActionResponse::failure(format!("tasks_delete failed: {err}")),
    }
}

/// Sets the status selector and returns the new visible list.
///
/// Accepts `all|active|completed`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_set_status_filter(value: String) -> TaskListResponse {
    let Some(status) = StatusFilter::parse(&value) else {
        return list_failure(format!(
            "tasks_set_status_filter failed: unsupported status filter `{}`",
            value.trim()
        ));
    };
    list_response(|store| store.set_status_filter(status))
}

/// Sets the category selector and returns the new visible list.
///
/// Accepts `all` or an exact category label.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_set_category_filter(value: String) -> TaskListResponse {
    let Some(category) = CategoryFilter::parse(&value) else {
        return list_failure(format!(
            "tasks_set_category_filter failed: unsupported category filter `{}`",
            value.trim()
        ));
    };
    list_response(|store| store.set_category_filter(category))
}

/// Returns the tasks visible under the current selectors.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_visible() -> TaskListResponse {
    list_response(|_| {})
}

/// Returns completion stats over all tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_stats() -> TaskStatsResponse {
    match with_task_store(|store| store.stats()) {
        Ok(stats) => TaskStatsResponse {
            ok: true,
            completed_count: count_to_u32(stats.completed_count),
            total_count: count_to_u32(stats.total_count),
            remaining_count: count_to_u32(stats.remaining_count()),
            percentage: stats.percentage,
            rounded_percentage: stats.rounded_percentage(),
            message: format!(
                "{}/{} tasks completed.",
                stats.completed_count, stats.total_count
            ),
        },
        Err(err) => TaskStatsResponse {
            ok: false,
            completed_count: 0,
            total_count: 0,
            remaining_count: 0,
            percentage: 0.0,
            rounded_percentage: 0,
            message: format!("tasks_stats failed: {err}"),
        },
    }
}

/// Returns the stored theme preference (`light` when unset).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> ThemeResponse {
    theme_response("theme_get", |service| service.theme())
}

/// Flips and persists the theme preference.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> ThemeResponse {
    theme_response("theme_toggle", |service| service.toggle_theme())
}

fn validate_task_input(title: &str, category: &str) -> Result<(String, Category), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("title cannot be empty".to_string());
    }
    let category = Category::parse(category)
        .ok_or_else(|| format!("unsupported category `{}`", category.trim()))?;
    Ok((trimmed.to_string(), category))
}

fn action_result(message: &str, task: Option<TaskItem>) -> TaskActionResponse {
    match task {
        Some(task) => TaskActionResponse {
            ok: true,
            task: Some(task),
            message: message.to_string(),
        },
        None => TaskActionResponse::success("Task not found.", None),
    }
}

fn list_response(
    update: impl FnOnce(&mut TaskStore<SqliteStateRepository>),
) -> TaskListResponse {
    let result = with_task_store(|store| {
        update(store);
        let filter = store.filter();
        let items = store
            .visible_tasks()
            .into_iter()
            .map(to_task_item)
            .collect::<Vec<_>>();
        (items, filter)
    });

    match result {
        Ok((items, filter)) => {
            let message = if items.is_empty() {
                "No tasks yet.".to_string()
            } else {
                format!("Showing {} task(s).", items.len())
            };
            TaskListResponse {
                ok: true,
                items,
                status_filter: filter.status.as_str().to_string(),
                category_filter: filter.category.as_str().to_string(),
                message,
            }
        }
        Err(err) => list_failure(format!("task list failed: {err}")),
    }
}

fn list_failure(message: String) -> TaskListResponse {
    TaskListResponse {
        ok: false,
        items: Vec::new(),
        status_filter: String::new(),
        category_filter: String::new(),
        message,
    }
}

fn theme_response(
    operation: &str,
    f: impl FnOnce(&mut ThemeService<SqliteStateRepository>) -> tasksphere_core::Theme,
) -> ThemeResponse {
    match with_theme_service(f) {
        Ok(theme) => ThemeResponse {
            ok: true,
            theme: theme.as_str().to_string(),
            message: String::new(),
        },
        Err(err) => ThemeResponse {
            ok: false,
            theme: tasksphere_core::Theme::default().as_str().to_string(),
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn state_db_path() -> &'static Path {
    DB_PATH.get_or_init(resolve_db_path)
}

fn open_state_repository() -> Result<SqliteStateRepository, String> {
    let conn = open_db(state_db_path()).map_err(|err| format!("state DB open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(conn)
        .map_err(|err| format!("state store init failed: {err}"))?;
    Ok(KvStateRepository::new(store))
}

fn with_task_store<T>(
    f: impl FnOnce(&mut TaskStore<SqliteStateRepository>) -> T,
) -> Result<T, String> {
    let mut guard = lock_ignoring_poison(&TASK_STORE);
    if guard.is_none() {
        *guard = Some(TaskStore::open(open_state_repository()?));
    }
    match guard.as_mut() {
        Some(store) => Ok(f(store)),
        None => Err("task store unavailable".to_string()),
    }
}

fn with_theme_service<T>(
    f: impl FnOnce(&mut ThemeService<SqliteStateRepository>) -> T,
) -> Result<T, String> {
    let mut guard = lock_ignoring_poison(&THEME_SERVICE);
    if guard.is_none() {
        *guard = Some(ThemeService::open(open_state_repository()?));
    }
    match guard.as_mut() {
        Some(service) => Ok(f(service)),
        None => Err("theme service unavailable".to_string()),
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn count_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        category: task.category.as_str().to_string(),
        completed: task.completed,
        created_at: task.created_at,
    }
}
