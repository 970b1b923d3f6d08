//! Task collection store.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection and filter selectors.
//! - Apply add/edit/toggle/delete mutations and persist after each one.
//! - Derive the visible set and completion stats on demand.
//!
//! # Invariants
//! - Task ids are pairwise distinct at all times.
//! - The collection is newest-first; only `add_task` changes order.
//! - `created_at` is non-decreasing with insertion order.
//! - Hydration never writes; every effective mutation writes once.
//! - Persistence failures never fail a mutation; memory stays authoritative.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::filter::{CategoryFilter, FilterState, StatusFilter};
use crate::model::stats::TaskStats;
use crate::model::task::{Category, Task, TaskId};
use crate::repo::state_repo::TaskRepository;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Owned task store over a persistence repository.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    filter: FilterState,
    revision: u64,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Hydrates a store from `repo`.
    ///
    /// Never fails: absent, malformed or unreadable state starts an empty
    /// collection. Duplicate ids in stored data are re-keyed so the
    /// uniqueness invariant holds from the first read.
    pub fn open(repo: R) -> Self {
        let tasks = match repo.load_tasks() {
            Ok(Some(tasks)) => rekey_duplicate_ids(tasks),
            Ok(None) => Vec::new(),
            Err(err) => {
                error!(
                    "event=store_open module=store status=error error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        };

        info!(
            "event=store_open module=store status=ok task_count={}",
            tasks.len()
        );

        Self {
            repo,
            tasks,
            filter: FilterState::default(),
            revision: 0,
        }
    }

    /// Creates a task and prepends it to the collection.
    ///
    /// # Contract
    /// - Caller has already trimmed `title` and rejected empty input.
    /// - Returned task has `completed = false` and a fresh unique id.
    pub fn add_task(&mut self, title: impl Into<String>, category: Category) -> Task {
        let mut task = Task::new(title, category, self.next_created_at());
        while self.position(&task.id).is_some() {
            task.id = TaskId::generate();
        }

        self.tasks.insert(0, task.clone());
        self.commit("task_add", &task.id);
        task
    }

    /// Removes the task with `id`. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: &TaskId) {
        let Some(index) = self.position(id) else {
            debug!("event=task_delete module=store status=skipped reason=not_found task_id={id}");
            return;
        };

        self.tasks.remove(index);
        self.commit("task_delete", id);
    }

    /// Flips completion on the task with `id`. Unknown ids are a no-op.
    pub fn toggle_task(&mut self, id: &TaskId) {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_toggle module=store status=skipped reason=not_found task_id={id}");
            return;
        };

        task.completed = !task.completed;
        self.commit("task_toggle", id);
    }

    /// Replaces title and category on the task with `id`.
    ///
    /// Keeps `id`, `completed` and `created_at`. Unknown ids are a no-op.
    /// Caller is responsible for title trimming and emptiness checks.
    pub fn edit_task(&mut self, id: &TaskId, title: impl Into<String>, category: Category) {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_edit module=store status=skipped reason=not_found task_id={id}");
            return;
        };

        task.title = title.into();
        task.category = category;
        self.commit("task_edit", id);
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Current filter selectors.
    pub fn filter(&self) -> FilterState {
        self.filter
    }

    /// Tasks passing both selectors, newest first.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    /// Completion stats over the whole collection, ignoring filters.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Number of incomplete tasks.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active()).count()
    }

    /// Full collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Counter bumped by every effective mutation.
    ///
    /// View layers compare it against the last rendered value to decide
    /// whether to re-read. Filter changes do not bump it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Borrows the backing repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn next_created_at(&self) -> i64 {
        let newest = self.tasks.iter().map(|task| task.created_at).max();
        let now = now_epoch_ms();
        newest.map_or(now, |newest| now.max(newest))
    }

    fn commit(&mut self, event: &'static str, id: &TaskId) {
        self.revision += 1;
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => info!(
                "event={event} module=store status=ok task_id={id} task_count={}",
                self.tasks.len()
            ),
            Err(err) => error!(
                "event={event} module=store status=error error_code=persist_failed task_id={id} error={err}"
            ),
        }
    }
}

fn rekey_duplicate_ids(mut tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut rekeyed = 0usize;

    for task in &mut tasks {
        if seen.contains(&task.id) {
            let mut fresh = TaskId::generate();
            while seen.contains(&fresh) {
                fresh = TaskId::generate();
            }
            task.id = fresh;
            rekeyed += 1;
        }
        seen.insert(task.id.clone());
    }

    if rekeyed > 0 {
        warn!("event=store_open module=store status=repaired duplicate_ids={rekeyed}");
    }
    tasks
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
