//! Filter selectors over the task collection.
//!
//! # Responsibility
//! - Define the status and category selectors used by list views.
//! - Decide task visibility with AND semantics across both selectors.
//!
//! # Invariants
//! - Selectors are transient view state and are never persisted.
//! - Both selectors default to `all`.

use crate::model::task::{Category, Task};

/// Completion-state selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Category selector: everything, or exactly one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Parses `all` or one category label.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed == "all" {
            return Some(Self::All);
        }
        Category::parse(trimmed).map(Self::Only)
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

/// Both selectors combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

impl FilterState {
    /// Returns whether `task` passes the status AND category selectors.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task) && self.category.matches(task)
    }

    /// Returns the tasks passing both selectors, preserving input order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, FilterState, StatusFilter};
    use crate::model::task::{Category, Task};

    fn task(title: &str, category: Category, completed: bool) -> Task {
        let mut task = Task::new(title, category, 0);
        task.completed = completed;
        task
    }

    #[test]
    fn default_state_shows_everything() {
        let tasks = vec![
            task("a", Category::Work, false),
            task("b", Category::Other, true),
        ];
        assert_eq!(FilterState::default().apply(&tasks).len(), 2);
    }

    #[test]
    fn status_and_category_combine_with_and() {
        let tasks = vec![
            task("work open", Category::Work, false),
            task("work done", Category::Work, true),
            task("study open", Category::Study, false),
        ];
        let state = FilterState {
            status: StatusFilter::Active,
            category: CategoryFilter::Only(Category::Work),
        };

        let visible = state.apply(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "work open");
    }

    #[test]
    fn completed_filter_keeps_only_completed() {
        let tasks = vec![
            task("a", Category::Work, true),
            task("b", Category::Study, false),
            task("c", Category::Other, true),
        ];
        let state = FilterState {
            status: StatusFilter::Completed,
            ..FilterState::default()
        };

        let titles: Vec<&str> = state
            .apply(&tasks)
            .into_iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn parse_accepts_known_literals_only() {
        assert_eq!(StatusFilter::parse("active"), Some(StatusFilter::Active));
        assert_eq!(StatusFilter::parse("done"), None);
        assert_eq!(CategoryFilter::parse("all"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("Study"),
            Some(CategoryFilter::Only(Category::Study))
        );
        assert_eq!(CategoryFilter::parse("Hobby"), None);
    }
}
