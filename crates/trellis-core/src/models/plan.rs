//! Plan model definition and related functionality.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Task;

/// A goal together with the task graph that reaches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Opaque identifier generated at creation
    pub plan_id: String,

    /// High-level objective, immutable after creation
    pub goal: String,

    /// Informational constraints (budgets, deadlines, ...)
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Cap on the total number of tasks in the plan
    pub max_tasks: usize,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the latest mutation (UTC)
    pub updated_at: Timestamp,

    /// Tasks keyed by id, serialized as a list in ascending id order
    #[serde(default, with = "tasks_as_list")]
    pub tasks: BTreeMap<u64, Task>,
}

impl Plan {
    /// Returns the task with the given id, if present.
    pub fn task(&self, task_id: u64) -> Option<&Task> {
        self.tasks.get(&task_id)
    }

    /// Number of tasks in the plan.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the plan has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next added task will receive.
    ///
    /// Tasks are never removed from a plan, so the largest id plus one is
    /// never a previously issued id.
    pub fn next_task_id(&self) -> u64 {
        self.tasks.keys().next_back().map_or(1, |id| id + 1)
    }
}

mod tasks_as_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::models::Task;

    pub fn serialize<S>(tasks: &BTreeMap<u64, Task>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let list: Vec<&Task> = tasks.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u64, Task>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Task>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|task| (task.task_id, task)).collect())
    }
}
