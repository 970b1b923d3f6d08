//! Core domain logic for TaskSphere.
//! This crate is the single source of truth for task collection invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{resolve_db_path, resolve_log_dir, resolve_log_level};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{CategoryFilter, FilterState, StatusFilter};
pub use model::stats::TaskStats;
pub use model::task::{Category, Task, TaskId};
pub use model::theme::Theme;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::state_repo::{
    KvStateRepository, TaskRepository, ThemeRepository, TASKS_KEY, THEME_KEY,
};
pub use service::task_store::TaskStore;
pub use service::theme_service::ThemeService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
