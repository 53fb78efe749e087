//! Parameter structures for plan operations
//!
//! These structures are shared by every interface (MCP tools, script replay)
//! and stay free of framework derives except for the optional JSON schema,
//! enabled through the `schema` feature for the MCP server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Script steps   │    │   MCP Params    │    │  Core Params    │
//! │ (tagged serde)  │───▶│ (McpParams<T>)  │───▶│ (this module)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every operation runs against the plan of one session, so interface
//! layers wrap the operation parameters in [`Scoped`], which adds an
//! optional `session` key next to the flattened operation fields.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{models::TaskStatus, PlanError, Result};

/// Operation parameters paired with the session they apply to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Scoped<T> {
    /// Session whose plan the operation targets (defaults to "default")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Operation parameters
    #[serde(flatten)]
    pub params: T,
}

impl<T> Scoped<T> {
    /// Wrap parameters for the default session.
    pub fn new(params: T) -> Self {
        Self {
            session: None,
            params,
        }
    }

    /// Wrap parameters for a named session.
    pub fn in_session(session: impl Into<String>, params: T) -> Self {
        Self {
            session: Some(session.into()),
            params,
        }
    }
}

/// Parameters for operations that take nothing beyond the session.
///
/// Used by summarize_progress and reset_plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NoParams {}

/// Specification of a single task.
///
/// Used for the initial task list of `create_plan` and for `add_task`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskSpec {
    /// Title of the task (required, non-empty)
    #[serde(default)]
    pub title: String,
    /// Optional detailed description of the task
    #[serde(default)]
    pub description: Option<String>,
    /// Priority; higher values are scheduled first (default 0)
    #[serde(default)]
    pub priority: f64,
    /// IDs of earlier tasks that must be done before this one can start
    #[serde(default)]
    pub depends_on: Vec<u64>,
}

impl TaskSpec {
    /// Task spec with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the priority.
    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the dependencies.
    pub fn depends_on(mut self, depends_on: impl IntoIterator<Item = u64>) -> Self {
        self.depends_on = depends_on.into_iter().collect();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Parameters for adding a task to the active plan.
pub type AddTask = TaskSpec;

/// Parameters for creating a new plan.
///
/// Replaces any plan already active in the session once every task
/// validates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// High-level objective (required, non-empty)
    #[serde(default)]
    pub goal: String,
    /// Initial tasks, assigned IDs 1..n in list order
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
    /// Informational constraints (budgets, deadlines, etc.)
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Cap on the total number of tasks (defaults to the store setting)
    #[serde(default)]
    pub max_tasks: Option<usize>,
}

/// Parameters for updating a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTaskStatus {
    /// Task ID to update; 0 never names a task
    #[serde(default)]
    pub task_id: u64,
    /// New status: 'pending', 'in_progress', 'done', 'blocked' or 'failed'
    #[serde(default)]
    pub status: String,
    /// What was accomplished (for 'done') or what went wrong (for 'failed')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,
}

impl UpdateTaskStatus {
    /// Check the task id and parse the requested status.
    ///
    /// # Errors
    ///
    /// * `PlanError::Validation` - When the task id or status is missing, or
    ///   the status string is not one of the five task statuses
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trellis_core::{models::TaskStatus, params::UpdateTaskStatus};
    ///
    /// let params = UpdateTaskStatus {
    ///     task_id: 1,
    ///     status: "done".to_string(),
    ///     result_summary: Some("Shipped".to_string()),
    /// };
    /// assert_eq!(params.validate()?, TaskStatus::Done);
    ///
    /// let params = UpdateTaskStatus {
    ///     status: "finished".to_string(),
    ///     ..params
    /// };
    /// assert!(params.validate().is_err());
    /// # Ok::<(), trellis_core::PlanError>(())
    /// ```
    pub fn validate(&self) -> Result<TaskStatus> {
        if self.task_id == 0 {
            return Err(PlanError::invalid_input("task_id").with_reason("task_id is required"));
        }
        if self.status.trim().is_empty() {
            return Err(PlanError::invalid_input("status").with_reason("status is required"));
        }
        TaskStatus::from_str(&self.status).map_err(|_| {
            PlanError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be one of: {}",
                self.status,
                TaskStatus::valid_names()
            ))
        })
    }
}

fn default_max_actions() -> usize {
    1
}

fn default_mark_in_progress() -> bool {
    true
}

/// Parameters for selecting the next actionable tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NextActions {
    /// How many actionable tasks to return (default 1)
    #[serde(default = "default_max_actions")]
    pub max_actions: usize,
    /// Whether to mark the returned tasks in_progress (default true)
    #[serde(default = "default_mark_in_progress")]
    pub mark_in_progress: bool,
}

impl Default for NextActions {
    fn default() -> Self {
        Self {
            max_actions: default_max_actions(),
            mark_in_progress: default_mark_in_progress(),
        }
    }
}

/// One operation call, tagged by operation name.
///
/// This is the shape of each entry in a replay script:
///
/// ```json
/// { "op": "add_task", "session": "s1", "title": "Review", "depends_on": [1] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    CreatePlan(Scoped<CreatePlan>),
    AddTask(Scoped<AddTask>),
    UpdateTaskStatus(Scoped<UpdateTaskStatus>),
    NextActions(Scoped<NextActions>),
    SummarizeProgress(Scoped<NoParams>),
    ResetPlan(Scoped<NoParams>),
}
