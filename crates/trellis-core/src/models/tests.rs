#[cfg(test)]
mod model_tests {
    use std::{
        collections::{BTreeMap, BTreeSet},
        str::FromStr,
    };

    use jiff::Timestamp;

    use crate::models::{Plan, ProgressSummary, StatusCounts, Task, TaskStatus};

    fn create_test_task(task_id: u64, status: TaskStatus) -> Task {
        Task {
            task_id,
            title: format!("Task {task_id}"),
            description: Some("Detailed description".to_string()),
            priority: 2.5,
            depends_on: BTreeSet::new(),
            status,
            result_summary: None,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_plan(tasks: Vec<Task>) -> Plan {
        Plan {
            plan_id: "plan-1".to_string(),
            goal: "Ship docs".to_string(),
            constraints: vec!["No weekend work".to_string()],
            max_tasks: 10,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            tasks: tasks.into_iter().map(|t| (t.task_id, t)).collect(),
        }
    }

    #[test]
    fn test_task_status_parsing() {
        assert_eq!(TaskStatus::from_str("pending").unwrap(), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_str("todo").unwrap(), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_str("IN_PROGRESS").unwrap(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_str(" done ").unwrap(), TaskStatus::Done);
        assert!(TaskStatus::from_str("skipped").is_err());
        assert!(TaskStatus::from_str("").is_err());
    }

    #[test]
    fn test_task_status_round_trips_as_str() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_str(status.as_str()).unwrap(), status);
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::Value::String(status.as_str().to_string())
            );
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_task_status_transitions() {
        use TaskStatus::*;

        for status in TaskStatus::ALL {
            assert!(status.can_transition_to(status));
            assert!(Pending.can_transition_to(status));
        }
        assert!(InProgress.can_transition_to(Done));
        assert!(Blocked.can_transition_to(InProgress));
        assert!(!Blocked.can_transition_to(Done));
        assert!(Done.can_transition_to(Pending));
        assert!(!Done.can_transition_to(InProgress));
        assert!(!Failed.can_transition_to(Done));
    }

    #[test]
    fn test_plan_serializes_tasks_in_id_order() {
        let plan = create_test_plan(vec![
            create_test_task(3, TaskStatus::Pending),
            create_test_task(1, TaskStatus::Done),
            create_test_task(2, TaskStatus::Pending),
        ]);

        let value = serde_json::to_value(&plan).unwrap();
        let ids: Vec<u64> = value["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["task_id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(value["goal"], "Ship docs");

        let parsed: Plan = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_task_serialization_skips_empty_optionals() {
        let mut task = create_test_task(1, TaskStatus::Pending);
        task.description = None;

        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("result_summary").is_none());
        assert_eq!(value["status"], "pending");
        assert_eq!(value["depends_on"], serde_json::json!([]));
    }

    #[test]
    fn test_plan_next_task_id() {
        let empty = create_test_plan(vec![]);
        assert_eq!(empty.next_task_id(), 1);
        assert!(empty.is_empty());

        let plan = create_test_plan(vec![
            create_test_task(1, TaskStatus::Pending),
            create_test_task(4, TaskStatus::Pending),
        ]);
        assert_eq!(plan.next_task_id(), 5);
        assert_eq!(plan.len(), 2);
        assert!(plan.task(4).is_some());
        assert!(plan.task(2).is_none());
    }

    #[test]
    fn test_task_display() {
        let mut task = create_test_task(7, TaskStatus::Failed);
        task.depends_on = BTreeSet::from([2, 5]);
        task.result_summary = Some("Timed out".to_string());

        let output = task.to_string();
        assert!(output.starts_with("### 7. Task 7 (✗ Failed)\n"));
        assert!(output.contains("- Priority: 2.5"));
        assert!(output.contains("- Depends on: 2, 5"));
        assert!(output.contains("Detailed description"));
        assert!(output.contains("#### Result\n\nTimed out"));
    }

    #[test]
    fn test_plan_display() {
        let plan = create_test_plan(vec![
            create_test_task(1, TaskStatus::Done),
            create_test_task(2, TaskStatus::InProgress),
        ]);

        let output = plan.to_string();
        assert!(output.starts_with("# Ship docs\n"));
        assert!(output.contains("- Plan ID: plan-1"));
        assert!(output.contains("- Tasks: 2/10"));
        assert!(output.contains("## Constraints\n\n- No weekend work"));
        assert!(output.contains("### 1. Task 1 (✓ Done)"));
        assert!(output.contains("### 2. Task 2 (➤ In Progress)"));

        let empty = create_test_plan(vec![]);
        assert!(empty.to_string().contains("No tasks in this plan."));
    }

    #[test]
    fn test_progress_summary_counts_and_ratio() {
        let mut blocked = create_test_task(3, TaskStatus::Blocked);
        blocked.result_summary = Some("Waiting on legal".to_string());
        let plan = create_test_plan(vec![
            create_test_task(1, TaskStatus::Done),
            create_test_task(2, TaskStatus::Pending),
            blocked,
        ]);

        let summary = ProgressSummary::new(&plan, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.completion_ratio, 0.3333);
        assert_eq!(summary.counts.get(TaskStatus::Blocked), 1);
        assert_eq!(summary.problematic_tasks.len(), 1);
        assert!(!summary.is_complete());

        let output = summary.to_string();
        assert!(output.contains("- Completed: 1/3 (33.3%)"));
        assert!(output.contains("- Actionable now: 1"));
        assert!(output.contains("- 3. Task 3 (⏸ Blocked): Waiting on legal"));
        assert!(!output.contains("All tasks are done."));
    }

    #[test]
    fn test_progress_summary_empty_plan() {
        let summary = ProgressSummary::new(&create_test_plan(vec![]), 0);
        assert_eq!(summary.completion_ratio, 0.0);
        assert_eq!(summary.counts, StatusCounts::default());
        assert!(!summary.is_complete());
        assert!(!summary.to_string().contains("Needs attention"));
        assert!(!summary.to_string().contains("All tasks are done."));
    }

    #[test]
    fn test_progress_summary_complete_plan() {
        let plan = create_test_plan(vec![
            create_test_task(1, TaskStatus::Done),
            create_test_task(2, TaskStatus::Done),
        ]);

        let summary = ProgressSummary::new(&plan, 0);
        assert!(summary.is_complete());
        assert_eq!(summary.completion_ratio, 1.0);
        assert!(summary.to_string().contains("\nAll tasks are done.\n"));
    }

    #[test]
    fn test_status_counts_from_tasks() {
        let tasks: BTreeMap<u64, Task> = [
            create_test_task(1, TaskStatus::Done),
            create_test_task(2, TaskStatus::Done),
            create_test_task(3, TaskStatus::Failed),
        ]
        .into_iter()
        .map(|t| (t.task_id, t))
        .collect();

        let counts: StatusCounts = tasks.values().collect();
        assert_eq!(counts.done, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.pending, 0);
    }
}
