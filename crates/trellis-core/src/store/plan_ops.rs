//! Plan operations for the PlanStore.

use log::debug;

use super::{PlanStore, SessionId};
use crate::{
    error::Result,
    models::{Plan, ProgressSummary},
    params::CreatePlan,
};

impl PlanStore {
    /// Creates a plan for the session, replacing any plan it already has.
    ///
    /// Task ids are assigned 1..n in the order given. A requested
    /// `max_tasks` above the store's ceiling is clamped to the ceiling.
    /// Nothing changes unless every task validates, so a failed call leaves
    /// the session's previous plan in place.
    ///
    /// # Errors
    ///
    /// * `PlanError::Validation` - empty goal, zero `max_tasks`, too many
    ///   tasks, or an invalid task or dependency
    pub fn create_plan(&mut self, session: &SessionId, params: &CreatePlan) -> Result<&Plan> {
        let requested = params.max_tasks.unwrap_or(self.limits.default_max_tasks);
        if requested > self.limits.max_tasks_ceiling {
            debug!(
                "Clamping max_tasks {requested} to {}",
                self.limits.max_tasks_ceiling
            );
        }
        let max_tasks = requested.min(self.limits.max_tasks_ceiling);

        let plan = Plan::build(&params.goal, &params.tasks, &params.constraints, max_tasks)?;
        debug!(
            "Session {session}: created plan {} ({} tasks)",
            plan.plan_id,
            plan.len()
        );

        self.plans.insert(session.clone(), plan);
        self.active_plan(session)
    }

    /// Summarizes the progress of the session's plan.
    ///
    /// # Errors
    ///
    /// * `PlanError::NoActivePlan` - the session has no plan
    pub fn summarize_progress(&self, session: &SessionId) -> Result<ProgressSummary> {
        let summary = self.active_plan(session)?.progress();
        debug!(
            "Session {session}: {} of {} tasks done",
            summary.done, summary.total
        );
        Ok(summary)
    }

    /// Discards the session's plan. Returns the discarded plan, if any.
    ///
    /// Resetting a session without a plan is a no-op.
    pub fn reset_plan(&mut self, session: &SessionId) -> Option<Plan> {
        let removed = self.plans.remove(session);
        if let Some(plan) = &removed {
            debug!("Session {session}: discarded plan {}", plan.plan_id);
        }
        removed
    }
}
