//! Markdown rendering of operation envelopes.

use std::fmt;

use super::{Actions, CreateResult, OperationStatus, UpdateResult};
use crate::envelope::{Envelope, Operation, Reply};

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reply = match &self.result {
            Some(reply) => reply,
            None => return write!(f, "{}", OperationStatus::from(self)),
        };

        match (self.operation, reply) {
            (Operation::CreatePlan, Reply::Plan { plan }) => {
                write!(f, "{}", CreateResult::new(plan.clone()))
            }
            (Operation::AddTask, Reply::Task { task }) => {
                write!(f, "{}", CreateResult::new(task.clone()))
            }
            (_, Reply::Task { task }) => {
                let changes = vec![format!("Status: {}", task.status.with_icon())];
                write!(f, "{}", UpdateResult::with_changes(task.clone(), changes))
            }
            (_, Reply::Plan { plan }) => write!(f, "{plan}"),
            (_, Reply::Actions { actions }) => write!(f, "{}", Actions(actions.clone())),
            (_, Reply::Progress(summary)) => write!(f, "{summary}"),
            (_, Reply::Reset { .. }) => {
                let message = match &self.metadata.plan_id {
                    Some(plan_id) => format!("Plan {plan_id} discarded"),
                    None => "No active plan to discard".to_string(),
                };
                write!(f, "{}", OperationStatus::success(message))
            }
        }
    }
}
