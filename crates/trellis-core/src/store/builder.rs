//! Builder for creating and configuring PlanStore instances.

use log::debug;

use super::PlanStore;
use crate::error::{PlanError, Result};

/// Size limits applied by a [`PlanStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// `max_tasks` used when `create_plan` does not supply one
    pub default_max_tasks: usize,
    /// Largest `max_tasks` a plan may request; larger values are clamped
    pub max_tasks_ceiling: usize,
    /// Largest `max_actions` a single `next_actions` call may request
    pub max_actions_ceiling: usize,
}

impl Limits {
    pub const DEFAULT_MAX_TASKS: usize = 50;
    pub const MAX_TASKS_CEILING: usize = 500;
    pub const MAX_ACTIONS_CEILING: usize = 50;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_max_tasks: Self::DEFAULT_MAX_TASKS,
            max_tasks_ceiling: Self::MAX_TASKS_CEILING,
            max_actions_ceiling: Self::MAX_ACTIONS_CEILING,
        }
    }
}

/// Builder for creating and configuring PlanStore instances.
#[derive(Debug, Clone, Default)]
pub struct PlanStoreBuilder {
    default_max_tasks: Option<usize>,
    max_tasks_ceiling: Option<usize>,
    max_actions_ceiling: Option<usize>,
}

impl PlanStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task cap used when a plan does not request one.
    pub fn with_default_max_tasks(mut self, value: Option<usize>) -> Self {
        if let Some(value) = value {
            self.default_max_tasks = Some(value);
        }
        self
    }

    /// Sets the largest task cap a plan may request.
    pub fn with_max_tasks_ceiling(mut self, value: Option<usize>) -> Self {
        if let Some(value) = value {
            self.max_tasks_ceiling = Some(value);
        }
        self
    }

    /// Sets the largest number of tasks one `next_actions` call returns.
    pub fn with_max_actions_ceiling(mut self, value: Option<usize>) -> Self {
        if let Some(value) = value {
            self.max_actions_ceiling = Some(value);
        }
        self
    }

    /// Builds the configured store.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Configuration` if a limit is zero or the default
    /// task cap exceeds the ceiling
    pub fn build(self) -> Result<PlanStore> {
        let defaults = Limits::default();
        let limits = Limits {
            default_max_tasks: self.default_max_tasks.unwrap_or(defaults.default_max_tasks),
            max_tasks_ceiling: self.max_tasks_ceiling.unwrap_or(defaults.max_tasks_ceiling),
            max_actions_ceiling: self
                .max_actions_ceiling
                .unwrap_or(defaults.max_actions_ceiling),
        };

        if limits.default_max_tasks == 0
            || limits.max_tasks_ceiling == 0
            || limits.max_actions_ceiling == 0
        {
            return Err(PlanError::configuration("limits must be at least 1"));
        }
        if limits.default_max_tasks > limits.max_tasks_ceiling {
            return Err(PlanError::configuration(format!(
                "default max tasks ({}) exceeds the ceiling ({})",
                limits.default_max_tasks, limits.max_tasks_ceiling
            )));
        }

        debug!("Plan store limits: {limits:?}");
        Ok(PlanStore::new(limits))
    }
}
