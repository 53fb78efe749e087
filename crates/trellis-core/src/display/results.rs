//! Result wrapper types for displaying operation outcomes.
//!
//! These wrappers format the results of create and update operations with a
//! one-line confirmation followed by the affected resource.

use std::fmt;

use crate::models::{Plan, Task};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use jiff::Timestamp;
/// use trellis_core::{display::CreateResult, models::Plan};
///
/// let plan = Plan {
///     plan_id: "p-1".to_string(),
///     goal: "Ship docs".to_string(),
///     constraints: vec![],
///     max_tasks: 50,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     tasks: BTreeMap::new(),
/// };
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: p-1"));
/// assert!(output.contains("# Ship docs"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.plan_id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added task with ID: {}", self.resource.task_id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of the changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.task_id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::Timestamp;

    use super::*;
    use crate::models::TaskStatus;

    fn create_test_task() -> Task {
        Task {
            task_id: 3,
            title: "Publish".to_string(),
            description: None,
            priority: 1.0,
            depends_on: BTreeSet::from([1, 2]),
            status: TaskStatus::Done,
            result_summary: Some("Live on the site".to_string()),
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    #[test]
    fn test_create_result_task() {
        let output = CreateResult::new(create_test_task()).to_string();
        assert!(output.starts_with("Added task with ID: 3\n"));
        assert!(output.contains("### 3. Publish (✓ Done)"));
        assert!(output.contains("- Depends on: 1, 2"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            create_test_task(),
            vec!["Status: in_progress -> done".to_string()],
        );
        let output = result.to_string();

        assert!(output.contains("Updated task with ID: 3"));
        assert!(output.contains("Changes made:\n- Status: in_progress -> done"));
        assert!(output.contains("#### Result\n\nLive on the site"));

        let plain = UpdateResult::with_changes(create_test_task(), vec![]).to_string();
        assert!(!plain.contains("Changes made:"));
    }
}
