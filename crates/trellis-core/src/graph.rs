//! Plan graph: dependency validation, eligibility and task selection.
//!
//! A [`Plan`] owns its tasks as a map from id to [`Task`]; the edges of the
//! graph are the `depends_on` sets. Nothing here is cached: which tasks are
//! actionable is derived from the current statuses on every call.
//!
//! Dependencies may only point at tasks that already exist when the
//! dependent task is added, so every edge goes from a larger id to a smaller
//! one and the graph stays acyclic by construction. [`find_cycle`] still runs
//! after each insertion and rejects the insertion if it ever finds one.

use std::collections::{BTreeMap, BTreeSet};

use jiff::Timestamp;
use log::debug;

use crate::{
    error::{PlanError, Result},
    models::{Plan, ProgressSummary, Task, TaskRef, TaskStatus},
    params::TaskSpec,
};

impl Plan {
    /// Builds a plan and its initial tasks.
    ///
    /// Tasks receive ids 1..n in list order. The call is all-or-nothing:
    /// any invalid task fails the whole plan.
    ///
    /// # Errors
    ///
    /// * `PlanError::Validation` - empty goal, zero `max_tasks`, more tasks
    ///   than `max_tasks`, or any task rejected by [`Plan::push_task`]
    pub fn build(
        goal: &str,
        specs: &[TaskSpec],
        constraints: &[String],
        max_tasks: usize,
    ) -> Result<Plan> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(
                PlanError::invalid_input("goal").with_reason("goal must be a non-empty string")
            );
        }
        if max_tasks == 0 {
            return Err(
                PlanError::invalid_input("max_tasks").with_reason("max_tasks must be at least 1")
            );
        }
        if specs.len() > max_tasks {
            return Err(PlanError::invalid_input("tasks").with_reason(format!(
                "{} tasks supplied but max_tasks is {max_tasks}",
                specs.len()
            )));
        }

        let now = Timestamp::now();
        let mut plan = Plan {
            plan_id: uuid::Uuid::new_v4().to_string(),
            goal: goal.to_string(),
            constraints: constraints
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            max_tasks,
            created_at: now,
            updated_at: now,
            tasks: BTreeMap::new(),
        };

        for (index, spec) in specs.iter().enumerate() {
            plan.push_task(spec).map_err(|e| match e {
                PlanError::Validation { field, reason } => PlanError::Validation {
                    field: format!("tasks[{index}].{field}"),
                    reason,
                },
                other => other,
            })?;
        }

        debug!("Built plan {} with {} tasks", plan.plan_id, plan.len());
        Ok(plan)
    }

    /// Appends a task with the next sequential id.
    ///
    /// # Errors
    ///
    /// * `PlanError::Validation` - plan at capacity, empty title, non-finite
    ///   priority, or a dependency on itself, on a missing task, or that
    ///   would close a cycle
    pub fn push_task(&mut self, spec: &TaskSpec) -> Result<&Task> {
        if self.tasks.len() >= self.max_tasks {
            return Err(PlanError::invalid_input("tasks").with_reason(format!(
                "plan is at capacity ({} tasks)",
                self.max_tasks
            )));
        }

        let title = spec.title.trim();
        if title.is_empty() {
            return Err(
                PlanError::invalid_input("title").with_reason("title must be a non-empty string")
            );
        }
        if !spec.priority.is_finite() {
            return Err(PlanError::invalid_input("priority")
                .with_reason("priority must be a finite number"));
        }

        let task_id = self.next_task_id();
        let depends_on = self.check_dependencies(task_id, &spec.depends_on)?;

        let now = Timestamp::now();
        self.tasks.insert(
            task_id,
            Task {
                task_id,
                title: title.to_string(),
                description: spec.description.clone(),
                priority: spec.priority,
                depends_on,
                status: TaskStatus::Pending,
                result_summary: None,
                created_at: now,
                updated_at: now,
            },
        );

        if let Some(cycle) = find_cycle(&self.tasks) {
            self.tasks.remove(&task_id);
            return Err(PlanError::invalid_input("depends_on").with_reason(format!(
                "dependency cycle detected: {}",
                format_path(&cycle)
            )));
        }

        self.updated_at = now;
        self.tasks
            .get(&task_id)
            .ok_or(PlanError::TaskNotFound { id: task_id })
    }

    /// Checks that every dependency of a new task refers to an existing,
    /// earlier task and returns them as a set.
    fn check_dependencies(&self, task_id: u64, depends_on: &[u64]) -> Result<BTreeSet<u64>> {
        let mut deps = BTreeSet::new();
        for &dep in depends_on {
            if dep == task_id {
                return Err(PlanError::invalid_input("depends_on")
                    .with_reason(format!("task {task_id} cannot depend on itself")));
            }
            if !self.tasks.contains_key(&dep) {
                let reason = if dep > task_id {
                    format!(
                        "task {dep} does not exist yet; dependencies may only reference earlier tasks"
                    )
                } else {
                    format!("task {dep} does not exist")
                };
                return Err(PlanError::invalid_input("depends_on").with_reason(reason));
            }
            deps.insert(dep);
        }
        Ok(deps)
    }

    /// Applies an explicit status update.
    ///
    /// The summary replaces any earlier one.
    ///
    /// # Errors
    ///
    /// * `PlanError::TaskNotFound` - no task with this id
    /// * `PlanError::Validation` - the transition is not allowed from the
    ///   task's current status
    pub fn set_status(
        &mut self,
        task_id: u64,
        status: TaskStatus,
        result_summary: Option<String>,
    ) -> Result<&Task> {
        let task = self
            .tasks
            .get_mut(&task_id)
            .ok_or(PlanError::TaskNotFound { id: task_id })?;

        if !task.status.can_transition_to(status) {
            return Err(PlanError::invalid_input("status").with_reason(format!(
                "cannot move task {task_id} from {} to {}",
                task.status.as_str(),
                status.as_str()
            )));
        }

        let now = Timestamp::now();
        task.status = status;
        task.result_summary = result_summary;
        task.updated_at = now;
        self.updated_at = now;

        Ok(task)
    }

    /// Whether a task is pending with all of its dependencies done.
    pub fn is_actionable(&self, task: &Task) -> bool {
        task.status == TaskStatus::Pending
            && task.depends_on.iter().all(|dep| {
                self.tasks
                    .get(dep)
                    .is_some_and(|d| d.status == TaskStatus::Done)
            })
    }

    /// Actionable tasks, highest priority first and then lowest id.
    pub fn actionable(&self) -> Vec<&Task> {
        let mut ready: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| self.is_actionable(task))
            .collect();
        ready.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then(a.task_id.cmp(&b.task_id))
        });
        ready
    }

    /// Selects up to `max_actions` actionable tasks, optionally marking them
    /// in progress so that the next call does not hand them out again.
    pub fn take_next(&mut self, max_actions: usize, mark_in_progress: bool) -> Vec<TaskRef> {
        let selected: Vec<u64> = self
            .actionable()
            .into_iter()
            .take(max_actions)
            .map(|task| task.task_id)
            .collect();

        if mark_in_progress && !selected.is_empty() {
            let now = Timestamp::now();
            for id in &selected {
                if let Some(task) = self.tasks.get_mut(id) {
                    task.status = TaskStatus::InProgress;
                    task.updated_at = now;
                }
            }
            self.updated_at = now;
        }

        selected
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .map(TaskRef::from)
            .collect()
    }

    /// Counts per status, completion ratio and problem tasks.
    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::new(self, self.actionable().len())
    }
}

/// Finds a dependency cycle among `tasks`, returning the ids along it with
/// the first id repeated at the end.
///
/// Dependencies on ids missing from the map are ignored.
pub fn find_cycle(tasks: &BTreeMap<u64, Task>) -> Option<Vec<u64>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Visited,
    }

    fn visit(
        id: u64,
        tasks: &BTreeMap<u64, Task>,
        marks: &mut BTreeMap<u64, Mark>,
        path: &mut Vec<u64>,
    ) -> Option<Vec<u64>> {
        match marks.get(&id) {
            Some(Mark::Visited) => return None,
            Some(Mark::Visiting) => {
                let start = path.iter().position(|&p| p == id).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(id);
                return Some(cycle);
            }
            None => {}
        }

        marks.insert(id, Mark::Visiting);
        path.push(id);
        if let Some(task) = tasks.get(&id) {
            for &dep in &task.depends_on {
                if !tasks.contains_key(&dep) {
                    continue;
                }
                if let Some(cycle) = visit(dep, tasks, marks, path) {
                    return Some(cycle);
                }
            }
        }
        path.pop();
        marks.insert(id, Mark::Visited);
        None
    }

    let mut marks = BTreeMap::new();
    let mut path = Vec::new();
    tasks
        .keys()
        .find_map(|&id| visit(id, tasks, &mut marks, &mut path))
}

fn format_path(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
