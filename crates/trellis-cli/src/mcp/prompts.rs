//! Prompt templates for MCP server

use std::sync::LazyLock;

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

static PROMPT_TEMPLATES: LazyLock<Vec<PromptTemplate>> = LazyLock::new(build_prompt_templates);

/// Predefined prompt templates for planning and execution
pub fn prompt_templates() -> &'static [PromptTemplate] {
    &PROMPT_TEMPLATES
}

fn build_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan".to_string(),
            description: "Decompose a goal into a dependency-aware plan using Trellis tools"
                .to_string(),
            template: r#"You are **Trellis Planner**, expert at turning goals into executable task graphs.

# Goal
{goal}

# Constraints
{constraints}

# Your Task
Build a plan for this goal with Trellis's MCP tools.

## Step 1: Start Clean
Call `summarize_progress`. If a plan is already active for this session and it serves a different goal, call `reset_plan` first.

## Step 2: Create the Plan
Call `create_plan` with:
- **goal**: the objective in one sentence
- **constraints**: budgets, deadlines or rules the work must respect
- **tasks**: the initial task list, in order

Tasks are numbered 1, 2, 3... in the order you list them. A task may only depend on tasks listed before it.

## Task Structure
```
title: "[Action Verb] [Specific Target]"
description: "What to do, where, and how to tell it is finished"
priority: 10      # higher runs first among ready tasks
depends_on: [1]   # ids of earlier tasks that must be done first
```

## Guidelines
- Keep tasks small enough for one focused work session
- Put analysis before implementation and validation after it
- Only add a dependency when the later task truly needs the earlier result
- Use priority to order independent tasks, not to express dependencies
- Prefer 3-10 tasks; use `add_task` later for work discovered along the way

## Output
Finish by calling `next_actions` with `mark_in_progress=false` to confirm which tasks are ready to start."#
                .to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "goal".to_string(),
                    description: "The goal or outcome to plan for".to_string(),
                    required: true,
                },
                PromptTemplateArg {
                    name: "constraints".to_string(),
                    description: "Optional constraints such as budgets or deadlines".to_string(),
                    required: false,
                },
            ],
        },
        PromptTemplate {
            name: "execute".to_string(),
            description: "Work through the active plan until every task is done".to_string(),
            template: r#"You are executing the active Trellis plan for session `{session}`.

Pass `session: "{session}"` to every tool call (leave it out if the session above is empty).

# Execution Loop

1. Call `next_actions` with `max_actions` set to the number of tasks you can work on at once. The returned tasks are marked `in_progress` for you.
2. For each returned task:
   - Do the work described in its title and description
   - On success call `update_task_status` with `status: "done"` and a `result_summary` describing what was accomplished
   - On failure call `update_task_status` with `status: "failed"` and a `result_summary` explaining what went wrong
   - If the task cannot proceed for now, use `status: "blocked"` and say why
3. Repeat until `next_actions` returns no tasks.

# When Nothing Is Actionable

Call `summarize_progress`:
- If every task is done, report the outcome of the plan
- If tasks are blocked or failed, they appear under `problematic_tasks`. Resolve the cause and set them back to `pending`, or add replacement tasks with `add_task`
- Tasks that depend on a failed task never become actionable until it is done

# Rules
- Never mark a task done without evidence that it is finished
- Keep result summaries short and factual
- Do not start tasks that `next_actions` did not hand out"#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "session".to_string(),
                description: "Session whose plan to execute (defaults to the default session)"
                    .to_string(),
                required: false,
            }],
        },
    ]
}
