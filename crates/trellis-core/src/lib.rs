//! Core library for the Trellis plan orchestrator.
//!
//! Trellis keeps a session-scoped plan: a goal decomposed into prioritized
//! tasks with dependencies. Agents create a plan, ask for the next actionable
//! tasks, report outcomes and inspect progress.
//!
//! # Layers
//!
//! - **Domain Models** ([`models`]): plans, tasks, statuses and progress
//!   summaries, serializable with serde and formatted through
//!   [`std::fmt::Display`]
//! - **Plan Graph** ([`graph`]): validation, dependency checks and
//!   eligibility rules on a single plan
//! - **Store** ([`store`]): the map from session to its active plan
//! - **Toolkit** ([`toolkit`]): the six operations wrapped into
//!   [`Envelope`]s, never returning an error to the caller
//! - **Display Wrappers** ([`display`]): markdown output for terminals and
//!   MCP clients
//!
//! # Quick Start
//!
//! ```rust
//! use trellis_core::{
//!     params::{CreatePlan, NextActions, Scoped, TaskSpec, UpdateTaskStatus},
//!     OrchestrationTools, Reply,
//! };
//!
//! let mut tools = OrchestrationTools::default();
//!
//! tools.create_plan(&Scoped::new(CreatePlan {
//!     goal: "Ship docs".to_string(),
//!     tasks: vec![
//!         TaskSpec::titled("Write").priority(5.0),
//!         TaskSpec::titled("Review").depends_on([1]),
//!     ],
//!     ..Default::default()
//! }));
//!
//! let next = tools.next_actions(&Scoped::new(NextActions::default()));
//! let Some(Reply::Actions { actions }) = &next.result else {
//!     panic!("expected actions");
//! };
//! assert_eq!(actions[0].title, "Write");
//!
//! let done = tools.update_task_status(&Scoped::new(UpdateTaskStatus {
//!     task_id: 1,
//!     status: "done".to_string(),
//!     result_summary: Some("Drafted".to_string()),
//! }));
//! assert!(done.is_ok());
//! println!("{}", done.to_json()?);
//! # Ok::<(), trellis_core::PlanError>(())
//! ```

pub mod display;
pub mod envelope;
pub mod error;
pub mod graph;
pub mod models;
pub mod params;
pub mod store;
pub mod toolkit;

// Re-export commonly used types
pub use display::{Actions, CreateResult, LocalDateTime, OperationStatus, UpdateResult};
pub use envelope::{Envelope, Metadata, Operation, Reply};
pub use error::{ErrorKind, PlanError, Result};
pub use models::{Plan, ProgressSummary, StatusCounts, Task, TaskRef, TaskStatus};
pub use params::{
    AddTask, Call, CreatePlan, NextActions, NoParams, Scoped, TaskSpec, UpdateTaskStatus,
};
pub use store::{Limits, PlanStore, PlanStoreBuilder, SessionId};
pub use toolkit::OrchestrationTools;
