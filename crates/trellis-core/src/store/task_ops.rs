//! Task operations for the PlanStore.

use log::debug;

use super::{PlanStore, SessionId};
use crate::{
    error::{PlanError, Result},
    models::{Task, TaskRef},
    params::{AddTask, NextActions, UpdateTaskStatus},
};

impl PlanStore {
    /// Adds a task to the session's plan with the next sequential id.
    ///
    /// Dependencies must name tasks already in the plan.
    ///
    /// # Errors
    ///
    /// * `PlanError::NoActivePlan` - the session has no plan
    /// * `PlanError::Validation` - empty title, invalid dependency, or the
    ///   plan is at capacity
    pub fn add_task(&mut self, session: &SessionId, params: &AddTask) -> Result<&Task> {
        let plan = self.active_plan_mut(session)?;
        let task = plan.push_task(params)?;
        debug!("Session {session}: added task {} '{}'", task.task_id, task.title);
        Ok(task)
    }

    /// Sets a task's status and result summary.
    ///
    /// # Errors
    ///
    /// * `PlanError::NoActivePlan` - the session has no plan
    /// * `PlanError::Validation` - unknown status or disallowed transition
    /// * `PlanError::TaskNotFound` - no task with this id
    pub fn update_task_status(
        &mut self,
        session: &SessionId,
        params: &UpdateTaskStatus,
    ) -> Result<&Task> {
        let plan = self.active_plan_mut(session)?;
        let status = params.validate()?;
        let task = plan.set_status(params.task_id, status, params.result_summary.clone())?;
        debug!("Session {session}: task {} is now {}", task.task_id, status);
        Ok(task)
    }

    /// Returns up to `max_actions` actionable tasks, highest priority first,
    /// marking them in progress when requested.
    ///
    /// An empty list is not an error: the plan may be complete, stalled on
    /// unmet dependencies, or empty.
    ///
    /// # Errors
    ///
    /// * `PlanError::NoActivePlan` - the session has no plan
    /// * `PlanError::Validation` - `max_actions` is zero
    pub fn next_actions(
        &mut self,
        session: &SessionId,
        params: &NextActions,
    ) -> Result<Vec<TaskRef>> {
        let ceiling = self.limits.max_actions_ceiling;
        let plan = self.active_plan_mut(session)?;
        if params.max_actions == 0 {
            return Err(PlanError::invalid_input("max_actions")
                .with_reason("max_actions must be at least 1"));
        }

        let actions = plan.take_next(params.max_actions.min(ceiling), params.mark_in_progress);
        debug!(
            "Session {session}: {} next action(s) {:?}",
            actions.len(),
            actions.iter().map(|a| a.task_id).collect::<Vec<_>>()
        );
        Ok(actions)
    }
}
