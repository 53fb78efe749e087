//! Progress summary types.

use serde::{Deserialize, Serialize};

use super::{Plan, Task, TaskStatus};

/// Number of tasks in each status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
    pub blocked: usize,
    pub failed: usize,
}

impl StatusCounts {
    /// Count for a single status.
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
            TaskStatus::Blocked => self.blocked,
            TaskStatus::Failed => self.failed,
        }
    }

    fn bump(&mut self, status: TaskStatus) {
        let slot = match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Blocked => &mut self.blocked,
            TaskStatus::Failed => &mut self.failed,
        };
        *slot += 1;
    }
}

impl<'a> FromIterator<&'a Task> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a Task>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for task in iter {
            counts.bump(task.status);
        }
        counts
    }
}

/// Snapshot of a plan's progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSummary {
    /// Plan ID
    pub plan_id: String,
    /// Goal of the plan
    pub goal: String,
    /// Tasks per status
    pub counts: StatusCounts,
    /// Total number of tasks
    pub total: usize,
    /// Number of done tasks
    pub done: usize,
    /// `done / total`, rounded to 4 decimals; 0.0 for an empty plan
    pub completion_ratio: f64,
    /// Tasks that `next_actions` could hand out right now
    pub actionable: usize,
    /// Blocked and failed tasks, ascending id
    pub problematic_tasks: Vec<Task>,
}

impl ProgressSummary {
    /// Build a summary given the number of currently actionable tasks.
    pub fn new(plan: &Plan, actionable: usize) -> Self {
        let counts: StatusCounts = plan.tasks.values().collect();
        let total = plan.tasks.len();
        let done = counts.done;
        let completion_ratio = if total == 0 {
            0.0
        } else {
            (done as f64 / total as f64 * 10_000.0).round() / 10_000.0
        };
        let problematic_tasks = plan
            .tasks
            .values()
            .filter(|task| matches!(task.status, TaskStatus::Blocked | TaskStatus::Failed))
            .cloned()
            .collect();

        Self {
            plan_id: plan.plan_id.clone(),
            goal: plan.goal.clone(),
            counts,
            total,
            done,
            completion_ratio,
            actionable,
            problematic_tasks,
        }
    }

    /// Whether every task in the plan is done.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}
