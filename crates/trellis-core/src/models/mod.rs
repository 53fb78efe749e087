//! Data models for plans and tasks.
//!
//! This module contains the core domain models of the plan graph. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep data structures apart from presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use trellis_core::models::{Task, TaskStatus};
//! use jiff::Timestamp;
//!
//! let task = Task {
//!     task_id: 1,
//!     title: "Write docs".to_string(),
//!     status: TaskStatus::InProgress,
//!     // ... other fields
//! #   description: None,
//! #   priority: 5.0,
//! #   depends_on: BTreeSet::new(),
//! #   result_summary: None,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! println!("{}", task); // Shows ➤ In Progress status icon
//! ```

pub mod plan;
pub mod status;
pub mod summary;
pub mod task;

#[cfg(test)]
mod tests;

pub use plan::Plan;
pub use status::TaskStatus;
pub use summary::{ProgressSummary, StatusCounts};
pub use task::{Task, TaskRef};
