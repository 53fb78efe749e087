//! Result envelope shared by every tool operation.
//!
//! Agent callers always receive an envelope instead of an error: a failed
//! call carries `result: null` and a short error message in its metadata.
//!
//! ```json
//! {
//!   "operation": "add_task",
//!   "result": null,
//!   "metadata": {
//!     "timestamp": "2025-01-01T00:00:00Z",
//!     "error": "Invalid input for field 'depends_on': task 999 does not exist",
//!     "error_kind": "validation"
//!   }
//! }
//! ```

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorKind, PlanError, Result},
    models::{Plan, ProgressSummary, Task, TaskRef},
};

/// Name of a plan operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreatePlan,
    AddTask,
    UpdateTaskStatus,
    NextActions,
    SummarizeProgress,
    ResetPlan,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreatePlan => "create_plan",
            Operation::AddTask => "add_task",
            Operation::UpdateTaskStatus => "update_task_status",
            Operation::NextActions => "next_actions",
            Operation::SummarizeProgress => "summarize_progress",
            Operation::ResetPlan => "reset_plan",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a successful operation.
///
/// Serialized without a tag, so each variant is a JSON object keyed by its
/// field name (`{"plan": ...}`, `{"task": ...}`, `{"actions": [...]}`), the
/// progress summary itself, or `{"active": false}` after a reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reply {
    Plan { plan: Plan },
    Task { task: Task },
    Actions { actions: Vec<TaskRef> },
    Progress(ProgressSummary),
    Reset { active: bool },
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// When the envelope was produced (UTC)
    pub timestamp: Timestamp,
    /// Session the operation ran against
    pub session: String,
    /// Plan the operation touched, when one was active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    /// Short description of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Category of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

/// Outcome of one operation: payload or null, plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub operation: Operation,
    pub result: Option<Reply>,
    pub metadata: Metadata,
}

impl Envelope {
    /// Envelope for a successful operation.
    pub fn success(
        operation: Operation,
        session: &str,
        reply: Reply,
        plan_id: Option<String>,
    ) -> Self {
        Self {
            operation,
            result: Some(reply),
            metadata: Metadata {
                timestamp: Timestamp::now(),
                session: session.to_string(),
                plan_id,
                error: None,
                error_kind: None,
            },
        }
    }

    /// Envelope for a failed operation. Only the error's own message is
    /// reported.
    pub fn failure(operation: Operation, session: &str, error: &PlanError) -> Self {
        Self {
            operation,
            result: None,
            metadata: Metadata {
                timestamp: Timestamp::now(),
                session: session.to_string(),
                plan_id: None,
                error: Some(error.to_string()),
                error_kind: Some(error.kind()),
            },
        }
    }

    /// Whether the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }

    /// Error message of a failed operation.
    pub fn error(&self) -> Option<&str> {
        self.metadata.error.as_deref()
    }

    /// Pretty-printed JSON form of the envelope.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
