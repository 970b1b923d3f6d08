//! Completion statistics derived from the task collection.

use crate::model::task::Task;

/// Progress summary over the whole collection, ignoring filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStats {
    pub completed_count: usize,
    pub total_count: usize,
    /// `completed_count / total_count * 100`, or `0.0` for an empty collection.
    pub percentage: f64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed_count = tasks.iter().filter(|task| task.completed).count();
        let total_count = tasks.len();
        let percentage = if total_count > 0 {
            completed_count as f64 / total_count as f64 * 100.0
        } else {
            0.0
        };

        Self {
            completed_count,
            total_count,
            percentage,
        }
    }

    /// Whole-number percentage for display. Halves round away from zero.
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }

    /// Number of tasks still to do.
    pub fn remaining_count(&self) -> usize {
        self.total_count - self.completed_count
    }
}
