//! Session-scoped storage of active plans.
//!
//! [`PlanStore`] maps a caller-supplied [`SessionId`] to at most one active
//! [`Plan`]. It holds no global state: every caller constructs (or is handed)
//! its own store, and two sessions never observe each other's plans.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Toolkit     │    │   PlanStore     │    │   Plan graph    │
//! │  (envelopes)    │───▶│ (plan_ops,      │───▶│ (validation,    │
//! │                 │    │  task_ops)      │    │  eligibility)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: limits configuration and construction of [`PlanStore`]
//! - [`plan_ops`]: create, summarize and reset the active plan
//! - [`task_ops`]: add tasks, update statuses and pick next actions
//!
//! All operations are synchronous and perform no locking; a multi-threaded
//! host wraps the whole store in a mutex.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{
//!     params::{CreatePlan, NextActions, TaskSpec},
//!     PlanStoreBuilder, SessionId,
//! };
//!
//! let mut store = PlanStoreBuilder::new().build()?;
//! let session = SessionId::default();
//!
//! store.create_plan(&session, &CreatePlan {
//!     goal: "ship docs".to_string(),
//!     tasks: vec![
//!         TaskSpec::titled("write").priority(5.0),
//!         TaskSpec::titled("review").priority(3.0).depends_on([1]),
//!     ],
//!     ..Default::default()
//! })?;
//!
//! let actions = store.next_actions(&session, &NextActions { max_actions: 5, mark_in_progress: true })?;
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].title, "write");
//! # Ok::<(), trellis_core::PlanError>(())
//! ```

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    models::Plan,
};

pub mod builder;
pub mod plan_ops;
pub mod task_ops;


pub use builder::{Limits, PlanStoreBuilder};

/// Opaque key naming the scope that owns one active plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Session used when a caller does not name one.
    pub const DEFAULT: &'static str = "default";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Session named by an optional caller-supplied key, falling back to the
    /// default session for a missing or blank key.
    pub fn from_optional(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::default(),
        }
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory map from session to its active plan.
#[derive(Debug, Clone)]
pub struct PlanStore {
    pub(crate) plans: HashMap<SessionId, Plan>,
    pub(crate) limits: Limits,
}

impl PlanStore {
    pub(crate) fn new(limits: Limits) -> Self {
        Self {
            plans: HashMap::new(),
            limits,
        }
    }

    /// Limits this store was built with.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The session's active plan.
    ///
    /// # Errors
    ///
    /// * `PlanError::NoActivePlan` - the session has no plan
    pub fn active_plan(&self, session: &SessionId) -> Result<&Plan> {
        self.plans.get(session).ok_or(PlanError::NoActivePlan)
    }

    pub(crate) fn active_plan_mut(&mut self, session: &SessionId) -> Result<&mut Plan> {
        self.plans.get_mut(session).ok_or(PlanError::NoActivePlan)
    }

    /// Whether the session has an active plan.
    pub fn has_plan(&self, session: &SessionId) -> bool {
        self.plans.contains_key(session)
    }
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}
