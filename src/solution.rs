//! Final assignment, total gain and dual certificate.

use std::cmp::Ordering;

use nalgebra::DMatrix;
use serde::Serialize;

use crate::assignment::AssignmentState;
use crate::cost::{CostTransform, Objective};
use crate::dual::DualVariables;

/// Solution of a two-dimensional assignment problem.
///
/// The assignment has the largest possible number of pairs and, among those,
/// the lowest effective cost `sign * C` (that is `C` when minimizing, `-C`
/// when maximizing).
///
/// When every column is assigned the duals certify optimality:
/// - `sign * C(i, j) - u[j] - v[i] >= 0` for every allowed pair
/// - equality on every assigned pair
/// - `v[i] <= 0` for every row, and `v[i] == 0` for unassigned rows
/// - `sign * gain == sum(u) + sum(v)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assign2DSolution {
    /// Column assigned to each row, `None` for unassigned rows.
    pub col4row: Vec<Option<usize>>,
    /// Row assigned to each column, `None` for unassigned columns.
    pub row4col: Vec<Option<usize>>,
    /// Sum of the original costs of the assigned pairs.
    pub gain: f64,
    /// Column duals.
    pub u: Vec<f64>,
    /// Row duals.
    pub v: Vec<f64>,
    /// Direction the problem was solved in.
    pub objective: Objective,
}

impl Assign2DSolution {
    /// Package the solver state after the last row.
    pub(crate) fn assemble(
        cost: &CostTransform<'_>,
        assignment: &AssignmentState,
        duals: &DualVariables,
    ) -> Self {
        let col4row = assignment.col4row().to_vec();
        let row4col = assignment.row4col().to_vec();

        let gain = col4row
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| cost.raw(row, c)))
            .sum::<f64>();

        let (u, v) = duals.certificate(assignment, cost.shift(), cost.outlet_cost());

        Self {
            col4row,
            row4col,
            gain,
            u,
            v,
            objective: cost.objective(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.col4row.len()
    }

    pub fn num_cols(&self) -> usize {
        self.row4col.len()
    }

    /// Number of assigned pairs.
    pub fn num_assigned(&self) -> usize {
        self.col4row.iter().filter(|c| c.is_some()).count()
    }

    /// Assigned `(row, col)` pairs in row order.
    pub fn assignments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.col4row
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }

    pub fn unassigned_rows(&self) -> Vec<usize> {
        unassigned(&self.col4row)
    }

    pub fn unassigned_cols(&self) -> Vec<usize> {
        unassigned(&self.row4col)
    }

    /// Whether every index of the shorter side is assigned: every column for
    /// the solver's `rows >= cols` orientation.
    pub fn is_complete(&self) -> bool {
        self.num_assigned() == self.num_rows().min(self.num_cols())
    }

    /// `sum(u) + sum(v)`.
    pub fn dual_objective(&self) -> f64 {
        self.u.iter().sum::<f64>() + self.v.iter().sum::<f64>()
    }

    /// Difference between the effective primal objective and the dual objective.
    /// Zero (up to rounding) for an optimal complete solution.
    pub fn duality_gap(&self) -> f64 {
        self.objective.sign() * self.gain - self.dual_objective()
    }

    /// Reduced cost `sign * C(i, j) - u[j] - v[i]` of a pair.
    pub fn reduced_cost(&self, cost: &DMatrix<f64>, row: usize, col: usize) -> f64 {
        self.objective.sign() * cost[(row, col)] - self.u[col] - self.v[row]
    }

    /// Check the optimality certificate against `cost`.
    ///
    /// Verifies completeness, bijection, dual feasibility on every finite pair,
    /// the sign of the longer side's duals, complementary slackness on every
    /// assigned pair and strong duality, each within `tolerance`. Incomplete
    /// solutions carry no certificate and always fail.
    pub fn is_optimal(&self, cost: &DMatrix<f64>, tolerance: f64) -> bool {
        if cost.shape() != (self.num_rows(), self.num_cols()) || !self.is_complete() {
            return false;
        }

        let bijection = self
            .assignments()
            .all(|(row, col)| self.row4col.get(col) == Some(&Some(row)))
            && self.row4col.iter().enumerate().all(|(col, row)| match row {
                Some(r) => self.col4row.get(*r) == Some(&Some(col)),
                None => true,
            });
        if !bijection {
            return false;
        }

        for row in 0..self.num_rows() {
            for col in 0..self.num_cols() {
                if !cost[(row, col)].is_finite() {
                    continue;
                }
                if self.reduced_cost(cost, row, col) < -tolerance {
                    return false;
                }
            }
        }

        // only the longer side may keep indices out
        let side_ok = |indices: &[Option<usize>], duals: &[f64]| {
            indices.iter().zip(duals).all(|(idx, &dual)| match idx {
                Some(_) => dual <= tolerance,
                None => dual.abs() <= tolerance,
            })
        };
        let longer_side_ok = match self.num_rows().cmp(&self.num_cols()) {
            Ordering::Equal => true,
            Ordering::Greater => side_ok(&self.col4row, &self.v),
            Ordering::Less => side_ok(&self.row4col, &self.u),
        };

        let slack_ok = self
            .assignments()
            .all(|(row, col)| self.reduced_cost(cost, row, col).abs() <= tolerance);

        longer_side_ok && slack_ok && self.duality_gap().abs() <= tolerance
    }
}

/// Positions holding `None`.
pub(crate) fn unassigned(indices: &[Option<usize>]) -> Vec<usize> {
    indices
        .iter()
        .enumerate()
        .filter(|(_, idx)| idx.is_none())
        .map(|(i, _)| i)
        .collect()
}
