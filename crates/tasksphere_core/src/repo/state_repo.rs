//! Typed access to the persisted task collection and theme preference.
//!
//! # Responsibility
//! - Serialize the task collection under `tasksphere-tasks` as a JSON array.
//! - Persist the theme preference under `tasksphere-theme`.
//!
//! # Invariants
//! - `save_tasks` followed by `load_tasks` yields an equal collection.
//! - Unparseable or schema-mismatched payloads load as `None`.
//! - Unknown theme strings load as `None`.

use crate::model::task::Task;
use crate::model::theme::Theme;
use crate::repo::kv_store::{KeyValueStore, RepoResult};
use log::warn;

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasksphere-tasks";
/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "tasksphere-theme";

/// Load/save contract for the task collection.
pub trait TaskRepository {
    /// Returns the saved collection, or `None` when nothing valid is stored.
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>>;
    /// Overwrites the saved collection.
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Load/save contract for the theme preference.
pub trait ThemeRepository {
    fn load_theme(&self) -> RepoResult<Option<Theme>>;
    fn save_theme(&self, theme: Theme) -> RepoResult<()>;
}

/// Task and theme repository on top of any `KeyValueStore`.
pub struct KvStateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvStateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> TaskRepository for KvStateRepository<S> {
    fn load_tasks(&self) -> RepoResult<Option<Vec<Task>>> {
        let Some(raw) = self.store.get(TASKS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Ok(Some(tasks)),
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=error error_code=malformed_payload bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                Ok(None)
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &payload)
    }
}

impl<S: KeyValueStore> ThemeRepository for KvStateRepository<S> {
    fn load_theme(&self) -> RepoResult<Option<Theme>> {
        let theme = self.store.get(THEME_KEY)?;
        Ok(theme.as_deref().and_then(Theme::parse))
    }

    fn save_theme(&self, theme: Theme) -> RepoResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }
}
