//! Dual variables (shadow prices) certifying optimality.

use crate::assignment::AssignmentState;
use crate::scratch::ScratchSpace;

/// Column duals `u` and row duals `v`.
///
/// After every processed row, `c(i, j) - u[j] - v[i] >= 0` for every pair and
/// equals 0 for every assigned pair, where `c` is the internal (shifted,
/// non-negative) cost. The last column dual belongs to the outlet; the outlet
/// only ever settles as a sink, so it stays 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DualVariables {
    /// Per-column duals.
    pub u: Vec<f64>,
    /// Per-row duals.
    pub v: Vec<f64>,
}

impl DualVariables {
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self {
            u: vec![0.0; num_cols],
            v: vec![0.0; num_rows],
        }
    }

    /// Zero every dual and resize for a new problem, keeping allocations.
    pub fn reset(&mut self, num_cols: usize, num_rows: usize) {
        self.u.clear();
        self.u.resize(num_cols, 0.0);
        self.v.clear();
        self.v.resize(num_rows, 0.0);
    }

    #[inline]
    pub fn reduced_cost(&self, cost: f64, row: usize, col: usize) -> f64 {
        cost - self.u[col] - self.v[row]
    }

    /// Update the duals after a search from `root_row` settled at the free
    /// column or outlet `sink`.
    ///
    /// Must run before the matching is flipped: settled columns other than the
    /// sink are still owned by the rows the search went through. With
    /// `d = shortest_dist[sink]`, every settled column `j` gets
    /// `u[j] -= d - shortest_dist[j]`, its owner row gets the opposite change,
    /// and the root row gets `v += d`. The new pairs along the path then have
    /// zero reduced cost and no reduced cost becomes negative.
    pub fn apply_search(
        &mut self,
        root_row: usize,
        sink: usize,
        scratch: &ScratchSpace,
        assignment: &AssignmentState,
    ) {
        let d_final = scratch.shortest_dist(sink);
        self.v[root_row] += d_final;

        for &col in scratch.settled_cols() {
            let delta = d_final - scratch.shortest_dist(col);
            if col != sink {
                if let Some(owner) = assignment.row_for_col(col) {
                    self.v[owner] += delta;
                }
            }
            self.u[col] -= delta;
        }
    }

    /// Duals for the caller's rectangular problem.
    ///
    /// Moves every dual by a common `level` so rows end with `v <= 0` and
    /// unassigned rows with `v = 0`, drops the outlet column and undoes the
    /// cost transform's `shift` on the column duals. Reduced costs of the real
    /// pairs are unchanged. When some row is unassigned the level is the
    /// outlet's reduced price, otherwise the largest row dual.
    pub fn certificate(
        &self,
        assignment: &AssignmentState,
        shift: f64,
        outlet_cost: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let num_cols = assignment.num_cols();
        let level = if assignment.num_assigned() < assignment.num_rows() {
            outlet_cost - self.u[num_cols]
        } else {
            self.v.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        };

        let u = self.u[..num_cols]
            .iter()
            .map(|&u| u + level + shift)
            .collect();
        let v = self
            .v
            .iter()
            .zip(assignment.col4row())
            .map(|(&v, col)| if col.is_some() { v - level } else { 0.0 })
            .collect();
        (u, v)
    }

    pub fn dual_objective(&self) -> f64 {
        self.u.iter().sum::<f64>() + self.v.iter().sum::<f64>()
    }
}
