//! Shortest augmenting path assignment solver.

use log::{debug, trace, warn};
use nalgebra::DMatrix;

use crate::assignment::AssignmentState;
use crate::augment::{augment_row, RowOutcome};
use crate::config::SolverConfig;
use crate::cost::{validate_cost_matrix, validate_shape, CostTransform, Objective};
use crate::dual::DualVariables;
use crate::scratch::ScratchSpace;
use crate::solution::Assign2DSolution;
use crate::{Error, Result};

/// Solve a two-dimensional assignment problem.
///
/// # Arguments
/// * `cost` - `M x N` cost matrix with `M >= N`; forbidden pairs are `+inf`
///   when minimizing and `-inf` when maximizing
/// * `maximize` - Maximize the total gain instead of minimizing the total cost
///
/// # Returns
/// The assignment with the most pairs and, among those, the best total, with
/// its gain and dual variables. With more rows than columns the leftover rows
/// are unassigned.
///
/// # Errors
/// * `Error::InvalidShape` / `Error::InvalidInput` for matrices the solver
///   cannot accept
/// * `Error::Infeasible` when no pair at all can be assigned
pub fn assign2d(cost: &DMatrix<f64>, maximize: bool) -> Result<Assign2DSolution> {
    ShortestPathSolver::new(SolverConfig::new(Objective::from_maximize(maximize))).solve(cost)
}

/// Reusable assignment solver.
///
/// Keeps its scratch, dual and assignment buffers between solves so repeated
/// solves of similarly sized problems do not reallocate. Every solve starts
/// from a clean state.
///
/// Rows are processed in order. Each row runs one shortest augmenting path
/// search over the real columns plus an outlet column of unlimited capacity
/// that stands for "unassigned". The outlet costs more than any matching, so
/// a path ends there only when no free column can be reached, and a later row
/// takes a column away from an earlier one whenever that lowers the total.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathSolver {
    config: SolverConfig,
    scratch: ScratchSpace,
    duals: DualVariables,
    assignment: AssignmentState,
}

impl ShortestPathSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Solve `cost` under the configured objective.
    pub fn solve(&mut self, cost: &DMatrix<f64>) -> Result<Assign2DSolution> {
        let objective = self.config.objective;
        validate_shape(cost)?;
        if self.config.validate {
            validate_cost_matrix(cost, objective)?;
        }

        let (num_rows, num_cols) = cost.shape();
        let transform = CostTransform::new(cost, objective);
        if !transform.outlet_cost().is_finite() {
            return Err(Error::InvalidInput(format!(
                "finite cost range of the {}x{} matrix is too large to solve",
                num_rows, num_cols
            )));
        }

        debug!(
            "assign2d: solving {}x{} problem ({:?}, shift {})",
            num_rows,
            num_cols,
            objective,
            transform.shift()
        );

        // real columns plus the outlet
        self.scratch.reserve(num_cols + 1);
        self.duals.reset(num_cols + 1, num_rows);
        self.assignment.reset(num_rows, num_cols);

        for row in 0..num_rows {
            match augment_row(
                &transform,
                row,
                &mut self.duals,
                &mut self.assignment,
                &mut self.scratch,
            ) {
                RowOutcome::Assigned { sink, distance } => {
                    trace!(
                        "assign2d: row {} augmented to column {} (path length {})",
                        row,
                        sink,
                        distance
                    );
                }
                RowOutcome::Released { row: released, distance } if released == row => {
                    trace!(
                        "assign2d: row {} left unassigned (path length {})",
                        row,
                        distance
                    );
                }
                RowOutcome::Released { row: released, distance } => {
                    trace!(
                        "assign2d: row {} displaced row {} (path length {})",
                        row,
                        released,
                        distance
                    );
                }
                RowOutcome::Unassignable => {
                    warn!("assign2d: row {} has no allowed column, left unassigned", row);
                }
            }
        }

        let solution = Assign2DSolution::assemble(&transform, &self.assignment, &self.duals);
        let assigned = solution.num_assigned();

        if assigned == 0 {
            debug!("assign2d: infeasible {}x{} problem", num_rows, num_cols);
            return Err(Error::Infeasible {
                rows: num_rows,
                cols: num_cols,
            });
        }

        if self.config.require_complete && assigned < num_cols {
            return Err(Error::IncompleteAssignment {
                assigned,
                required: num_cols,
            });
        }

        debug!(
            "assign2d: assigned {} of {} columns, gain {}",
            assigned, num_cols, solution.gain
        );

        Ok(solution)
    }
}
