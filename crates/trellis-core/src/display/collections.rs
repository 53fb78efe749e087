//! Collection wrapper types for displaying groups of tasks.

use std::fmt;

use crate::models::TaskRef;

/// Newtype wrapper for displaying the tasks handed out by `next_actions`.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use trellis_core::{display::Actions, models::TaskRef};
///
/// let actions = Actions(vec![TaskRef {
///     task_id: 2,
///     title: "Review".to_string(),
///     description: None,
///     priority: 3.0,
///     depends_on: BTreeSet::from([1]),
/// }]);
///
/// let output = actions.to_string();
/// assert!(output.contains("### 2. Review"));
/// assert!(output.contains("- Depends on: 1"));
/// ```
pub struct Actions(pub Vec<TaskRef>);

impl Actions {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            writeln!(f, "No actionable tasks.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_display_empty() {
        let actions = Actions(vec![]);
        assert!(actions.is_empty());
        assert_eq!(actions.to_string(), "No actionable tasks.\n");
    }

    #[test]
    fn test_actions_display_keeps_order() {
        let make = |task_id: u64, title: &str| TaskRef {
            task_id,
            title: title.to_string(),
            description: Some(format!("about {title}")),
            priority: 0.0,
            depends_on: Default::default(),
        };
        let actions = Actions(vec![make(3, "C"), make(1, "A")]);
        let output = actions.to_string();

        let c = output.find("### 3. C").unwrap();
        let a = output.find("### 1. A").unwrap();
        assert!(c < a);
        assert!(output.contains("about C"));
        assert!(!output.contains("Depends on"));
    }
}
