//! Task model definition and related functionality.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// A unit of work inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Identifier unique within the plan, assigned sequentially from 1
    pub task_id: u64,

    /// Brief title of the task
    pub title: String,

    /// Optional detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scheduling priority; higher runs first
    pub priority: f64,

    /// Tasks that must be done before this one becomes actionable
    #[serde(default)]
    pub depends_on: BTreeSet<u64>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Outcome recorded with the latest status update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

/// Compact view of a task returned by `next_actions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRef {
    pub task_id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: f64,
    #[serde(default)]
    pub depends_on: BTreeSet<u64>,
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.task_id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            depends_on: task.depends_on.clone(),
        }
    }
}
