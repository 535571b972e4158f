//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::cost::Objective;

/// Configuration for [`ShortestPathSolver`](crate::ShortestPathSolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Minimize total cost or maximize total gain.
    pub objective: Objective,

    /// Fail with `Error::IncompleteAssignment` unless every column is assigned.
    pub require_complete: bool,

    /// Scan the matrix for NaNs, misplaced infinities and overflowing ranges
    /// before solving. Shape checks always run.
    pub validate: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            objective: Objective::Minimize,
            require_complete: false,
            validate: true,
        }
    }
}

impl SolverConfig {
    /// Create a configuration for the given objective.
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            ..Self::default()
        }
    }

    pub fn minimize() -> Self {
        Self::new(Objective::Minimize)
    }

    pub fn maximize() -> Self {
        Self::new(Objective::Maximize)
    }

    pub fn with_require_complete(mut self, require_complete: bool) -> Self {
        self.require_complete = require_complete;
        self
    }

    /// Skip value validation for matrices already known to be valid.
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}
