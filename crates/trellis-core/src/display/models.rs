//! Display implementations for domain models.
//!
//! All output is markdown so the terminal renderer and MCP clients can show
//! it as-is.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Plan, ProgressSummary, Task, TaskRef, TaskStatus};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn fmt_dependencies<'a>(
    f: &mut fmt::Formatter<'_>,
    depends_on: impl ExactSizeIterator<Item = &'a u64>,
) -> fmt::Result {
    if depends_on.len() == 0 {
        return Ok(());
    }
    let ids: Vec<String> = depends_on.map(u64::to_string).collect();
    writeln!(f, "- Depends on: {}", ids.join(", "))
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.goal)?;
        writeln!(f)?;

        writeln!(f, "- Plan ID: {}", self.plan_id)?;
        writeln!(f, "- Tasks: {}/{}", self.tasks.len(), self.max_tasks)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.constraints.is_empty() {
            writeln!(f, "\n## Constraints")?;
            writeln!(f)?;
            for constraint in &self.constraints {
                writeln!(f, "- {constraint}")?;
            }
        }

        if !self.tasks.is_empty() {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in self.tasks.values() {
                write!(f, "{task}")?;
            }
        } else {
            writeln!(f, "\nNo tasks in this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.task_id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Priority: {}", self.priority)?;
        fmt_dependencies(f, self.depends_on.iter())?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if let Some(result) = &self.result_summary {
            writeln!(f, "#### Result")?;
            writeln!(f)?;
            writeln!(f, "{result}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.task_id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        fmt_dependencies(f, self.depends_on.iter())?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Progress: {}", self.goal)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completed: {}/{} ({:.1}%)",
            self.done,
            self.total,
            self.completion_ratio * 100.0
        )?;
        writeln!(f, "- Actionable now: {}", self.actionable)?;
        for status in TaskStatus::ALL {
            writeln!(f, "- {}: {}", status.with_icon(), self.counts.get(status))?;
        }

        if self.is_complete() {
            writeln!(f, "\nAll tasks are done.")?;
        }

        if !self.problematic_tasks.is_empty() {
            writeln!(f, "\n### Needs attention")?;
            writeln!(f)?;
            for task in &self.problematic_tasks {
                match &task.result_summary {
                    Some(summary) => writeln!(
                        f,
                        "- {}. {} ({}): {summary}",
                        task.task_id,
                        task.title,
                        task.status.with_icon()
                    )?,
                    None => writeln!(
                        f,
                        "- {}. {} ({})",
                        task.task_id,
                        task.title,
                        task.status.with_icon()
                    )?,
                }
            }
        }

        Ok(())
    }
}
