//! Helpers for callers that do not control matrix orientation or index base.
//!
//! The solver requires `rows >= cols` and never transposes on its own; these
//! helpers do it explicitly and swap the row/column outputs back, and convert
//! between `Option` indices and the 1-based, 0-as-unassigned convention used
//! by array languages.

use nalgebra::DMatrix;

use crate::config::SolverConfig;
use crate::cost::Objective;
use crate::solution::Assign2DSolution;
use crate::solver::ShortestPathSolver;
use crate::Result;

/// Solve a cost matrix of any orientation.
///
/// Matrices with fewer rows than columns are transposed before solving; the
/// returned solution is expressed in the caller's orientation (`col4row` has
/// one entry per original row, `u` one entry per original column).
pub fn assign2d_any(cost: &DMatrix<f64>, objective: Objective) -> Result<Assign2DSolution> {
    let mut solver = ShortestPathSolver::new(SolverConfig::new(objective));
    solve_any(&mut solver, cost)
}

/// [`assign2d_any`] with a caller-owned solver.
pub fn solve_any(solver: &mut ShortestPathSolver, cost: &DMatrix<f64>) -> Result<Assign2DSolution> {
    if cost.nrows() >= cost.ncols() {
        return solver.solve(cost);
    }

    let transposed = cost.transpose();
    let solution = solver.solve(&transposed)?;
    Ok(transpose_solution(solution))
}

/// Swap the roles of rows and columns in a solution.
pub fn transpose_solution(solution: Assign2DSolution) -> Assign2DSolution {
    Assign2DSolution {
        col4row: solution.row4col,
        row4col: solution.col4row,
        gain: solution.gain,
        u: solution.v,
        v: solution.u,
        objective: solution.objective,
    }
}

/// Convert to 1-based indices with 0 marking unassigned entries.
pub fn to_one_based(indices: &[Option<usize>]) -> Vec<usize> {
    indices.iter().map(|idx| idx.map_or(0, |i| i + 1)).collect()
}

/// Convert from 1-based indices with 0 marking unassigned entries.
pub fn from_one_based(indices: &[usize]) -> Vec<Option<usize>> {
    indices.iter().map(|&i| i.checked_sub(1)).collect()
}
