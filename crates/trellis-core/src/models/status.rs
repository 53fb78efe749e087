//! Task status enumeration and the transition table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been completed
    Done,

    /// Task cannot proceed for now
    Blocked,

    /// Task was attempted and failed
    Failed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "blocked" => Ok(TaskStatus::Blocked),
            "failed" => Ok(TaskStatus::Failed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Blocked,
        TaskStatus::Failed,
    ];

    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Failed => "failed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trellis_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Done => "✓ Done",
            TaskStatus::Blocked => "⏸ Blocked",
            TaskStatus::Failed => "✗ Failed",
        }
    }

    /// Whether an explicit status update may move a task from `self` to
    /// `next`.
    ///
    /// Re-applying the current status is always accepted so that retried
    /// calls succeed. Terminal statuses only reopen to `Pending`.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;

        if *self == next {
            return true;
        }
        match self {
            Pending => true,
            InProgress => matches!(next, Done | Failed | Blocked | Pending),
            Blocked => matches!(next, Pending | InProgress),
            Done | Failed => next == Pending,
        }
    }

    /// Comma separated list of accepted status names, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(TaskStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
