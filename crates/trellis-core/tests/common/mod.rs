#![allow(dead_code)]

use trellis_core::{
    params::{CreatePlan, NextActions, Scoped, TaskSpec, UpdateTaskStatus},
    Envelope, OrchestrationTools, PlanStore, PlanStoreBuilder, Reply, TaskRef,
};

/// Helper function to create a store with default limits
pub fn create_test_store() -> PlanStore {
    PlanStoreBuilder::new()
        .build()
        .expect("Failed to create store")
}

/// Helper function to create a toolkit holding a single plan in the default
/// session
pub fn create_test_tools(goal: &str, tasks: Vec<TaskSpec>) -> OrchestrationTools {
    let mut tools = OrchestrationTools::new(create_test_store());
    let envelope = tools.create_plan(&Scoped::new(CreatePlan {
        goal: goal.to_string(),
        tasks,
        ..Default::default()
    }));
    assert!(envelope.is_ok(), "create_plan failed: {:?}", envelope.error());
    tools
}

pub fn next(
    tools: &mut OrchestrationTools,
    max_actions: usize,
    mark_in_progress: bool,
) -> Vec<TaskRef> {
    let envelope = tools.next_actions(&Scoped::new(NextActions {
        max_actions,
        mark_in_progress,
    }));
    match envelope.result {
        Some(Reply::Actions { actions }) => actions,
        other => panic!("Expected actions, got {other:?} ({:?})", envelope.metadata.error),
    }
}

pub fn set_status(tools: &mut OrchestrationTools, task_id: u64, status: &str) -> Envelope {
    tools.update_task_status(&Scoped::new(UpdateTaskStatus {
        task_id,
        status: status.to_string(),
        result_summary: None,
    }))
}
