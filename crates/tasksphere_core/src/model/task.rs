//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted under `tasksphere-tasks`.
//! - Define the closed category set and its stable string labels.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `created_at` is never mutated after creation.
//! - Serialized field names and category labels match the persisted schema
//!   (`id`, `title`, `category`, `completed`, `createdAt`).
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Stored as a plain string so ids written by older builds (decimal
/// timestamps) keep loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Fixed task category set.
///
/// `Personal` is the category preselected by the entry form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    #[default]
    Personal,
    Study,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Study,
        Category::Other,
    ];

    /// Stable label used in storage and at the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Study => "Study",
            Self::Other => "Other",
        }
    }

    /// Parses one stable label. Labels are case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Work" => Some(Self::Work),
            "Personal" => Some(Self::Personal),
            "Study" => Some(Self::Study),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identity, unique within a collection.
    pub id: TaskId,
    /// Trimmed, non-empty text. Enforced by callers.
    pub title: String,
    pub category: Category,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task with a generated id.
    pub fn new(title: impl Into<String>, category: Category, created_at: i64) -> Self {
        Self::with_id(TaskId::generate(), title, category, created_at)
    }

    /// Creates an incomplete task with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        category: Category,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            completed: false,
            created_at,
        }
    }

    /// Returns whether the task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
