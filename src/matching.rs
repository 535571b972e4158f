//! Thresholded linear sum assignment.
//!
//! Same call shape as `scipy.optimize.linear_sum_assignment` followed by a
//! cost cut-off: solve optimally, then drop pairs whose cost exceeds
//! `max_cost`.

use nalgebra::DMatrix;

use crate::cost::Objective;
use crate::orientation::assign2d_any;
use crate::solution::unassigned;
use crate::{Error, Result};

/// A kept (row, column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub row_idx: usize,
    pub col_idx: usize,
}

/// Pairs that survived the threshold and the indices left without a partner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// Kept pairs in row order
    pub assignments: Vec<Assignment>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

impl AssignmentResult {
    fn from_col4row(col4row: &[Option<usize>], num_cols: usize) -> Self {
        let mut row4col = vec![None; num_cols];
        let assignments = col4row
            .iter()
            .enumerate()
            .filter_map(|(row_idx, col)| {
                col.map(|col_idx| {
                    row4col[col_idx] = Some(row_idx);
                    Assignment { row_idx, col_idx }
                })
            })
            .collect();

        Self {
            assignments,
            unmatched_rows: unassigned(col4row),
            unmatched_cols: unassigned(&row4col),
        }
    }
}

/// Minimum cost assignment of a matrix of any orientation, keeping only pairs
/// with cost `<= max_cost`.
///
/// `+inf` marks forbidden pairs. Empty matrices and matrices where nothing
/// can be assigned give a result with every index unmatched; NaN and `-inf`
/// entries are still rejected.
pub fn linear_sum_assignment(cost_matrix: &DMatrix<f64>, max_cost: f64) -> Result<AssignmentResult> {
    let (num_rows, num_cols) = cost_matrix.shape();
    let nothing = || AssignmentResult::from_col4row(&vec![None; num_rows], num_cols);

    if num_rows == 0 || num_cols == 0 {
        return Ok(nothing());
    }

    let mut col4row = match assign2d_any(cost_matrix, Objective::Minimize) {
        Ok(solution) => solution.col4row,
        Err(Error::Infeasible { .. }) => return Ok(nothing()),
        Err(err) => return Err(err),
    };

    for (row, col) in col4row.iter_mut().enumerate() {
        if col.is_some_and(|c| cost_matrix[(row, c)] > max_cost) {
            *col = None;
        }
    }

    Ok(AssignmentResult::from_col4row(&col4row, num_cols))
}
