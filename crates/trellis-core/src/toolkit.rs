//! Agent-facing orchestration toolkit.
//!
//! [`OrchestrationTools`] wraps a [`PlanStore`] and exposes the six plan
//! operations the way agent tool calls consume them: every call returns an
//! [`Envelope`], and failures are reported inside it instead of being
//! propagated.
//!
//! ```rust
//! use trellis_core::{
//!     params::{CreatePlan, Scoped, TaskSpec},
//!     OrchestrationTools,
//! };
//!
//! let mut tools = OrchestrationTools::default();
//!
//! let envelope = tools.add_task(&Scoped::new(TaskSpec::titled("orphan")));
//! assert!(!envelope.is_ok());
//! assert!(envelope.error().unwrap().contains("No active plan"));
//!
//! let envelope = tools.create_plan(&Scoped::new(CreatePlan {
//!     goal: "ship docs".to_string(),
//!     ..Default::default()
//! }));
//! assert!(envelope.is_ok());
//! ```

use log::{debug, warn};

use crate::{
    envelope::{Envelope, Operation, Reply},
    error::Result,
    params::{AddTask, Call, CreatePlan, NextActions, NoParams, Scoped, UpdateTaskStatus},
    store::{PlanStore, SessionId},
};

/// Plan orchestration tools over a session-scoped store.
#[derive(Debug, Clone, Default)]
pub struct OrchestrationTools {
    store: PlanStore,
}

impl OrchestrationTools {
    pub fn new(store: PlanStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// Create (or replace) the session's plan.
    pub fn create_plan(&mut self, params: &Scoped<CreatePlan>) -> Envelope {
        self.run(Operation::CreatePlan, params.session.as_deref(), |store, session| {
            let plan = store.create_plan(session, &params.params)?;
            Ok((
                Reply::Plan { plan: plan.clone() },
                Some(plan.plan_id.clone()),
            ))
        })
    }

    /// Add a task to the session's plan.
    pub fn add_task(&mut self, params: &Scoped<AddTask>) -> Envelope {
        self.run(Operation::AddTask, params.session.as_deref(), |store, session| {
            let task = store.add_task(session, &params.params)?.clone();
            Ok((Reply::Task { task }, plan_id(store, session)))
        })
    }

    /// Update a task's status.
    pub fn update_task_status(&mut self, params: &Scoped<UpdateTaskStatus>) -> Envelope {
        self.run(
            Operation::UpdateTaskStatus,
            params.session.as_deref(),
            |store, session| {
                let task = store.update_task_status(session, &params.params)?.clone();
                Ok((Reply::Task { task }, plan_id(store, session)))
            },
        )
    }

    /// Pick the next actionable tasks.
    pub fn next_actions(&mut self, params: &Scoped<NextActions>) -> Envelope {
        self.run(Operation::NextActions, params.session.as_deref(), |store, session| {
            let actions = store.next_actions(session, &params.params)?;
            Ok((Reply::Actions { actions }, plan_id(store, session)))
        })
    }

    /// Summarize the session's progress.
    pub fn summarize_progress(&mut self, params: &Scoped<NoParams>) -> Envelope {
        self.run(
            Operation::SummarizeProgress,
            params.session.as_deref(),
            |store, session| {
                let summary = store.summarize_progress(session)?;
                let plan_id = Some(summary.plan_id.clone());
                Ok((Reply::Progress(summary), plan_id))
            },
        )
    }

    /// Discard the session's plan. Always succeeds.
    pub fn reset_plan(&mut self, params: &Scoped<NoParams>) -> Envelope {
        self.run(Operation::ResetPlan, params.session.as_deref(), |store, session| {
            let discarded = store.reset_plan(session).map(|plan| plan.plan_id);
            Ok((Reply::Reset { active: false }, discarded))
        })
    }

    /// Dispatch a tagged call to its operation.
    pub fn dispatch(&mut self, call: &Call) -> Envelope {
        match call {
            Call::CreatePlan(params) => self.create_plan(params),
            Call::AddTask(params) => self.add_task(params),
            Call::UpdateTaskStatus(params) => self.update_task_status(params),
            Call::NextActions(params) => self.next_actions(params),
            Call::SummarizeProgress(params) => self.summarize_progress(params),
            Call::ResetPlan(params) => self.reset_plan(params),
        }
    }

    fn run<F>(&mut self, operation: Operation, session: Option<&str>, op: F) -> Envelope
    where
        F: FnOnce(&mut PlanStore, &SessionId) -> Result<(Reply, Option<String>)>,
    {
        let session = SessionId::from_optional(session);
        debug!("{operation} (session {session})");

        match op(&mut self.store, &session) {
            Ok((reply, plan_id)) => Envelope::success(operation, session.as_str(), reply, plan_id),
            Err(e) => {
                warn!("{operation} failed for session {session}: {e}");
                Envelope::failure(operation, session.as_str(), &e)
            }
        }
    }
}

fn plan_id(store: &PlanStore, session: &SessionId) -> Option<String> {
    store
        .active_plan(session)
        .ok()
        .map(|plan| plan.plan_id.clone())
}
