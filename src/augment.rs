//! Shortest augmenting path search for a single row.
//!
//! Dijkstra-style label setting over reduced costs: starting from the root
//! row, repeatedly settle the unsettled column with the smallest tentative
//! distance. A settled free column or the outlet ends the search; a settled
//! owned column continues the search from its owner row. The duals are then
//! updated and the matching is flipped along the path.

use crate::assignment::AssignmentState;
use crate::cost::CostTransform;
use crate::dual::DualVariables;
use crate::scratch::ScratchSpace;

/// Outcome of processing one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowOutcome {
    /// The path ended at the free column `sink` with reduced-cost length
    /// `distance`: one more column is assigned.
    Assigned { sink: usize, distance: f64 },
    /// The path ended at the outlet and `row` lost its column. `row` is the
    /// root row itself when leaving it out is cheapest.
    Released { row: usize, distance: f64 },
    /// The row has no allowed column. Nothing was modified.
    Unassignable,
}

/// Search for the shortest augmenting path from `root_row` over every column
/// plus the outlet. Returns the free column or outlet ending the path, or
/// `None` if neither is reachable at a finite distance.
///
/// Ties between equal tentative distances go to the lowest column index, so a
/// real column beats the outlet.
pub fn shortest_augmenting_path(
    cost: &CostTransform<'_>,
    root_row: usize,
    duals: &DualVariables,
    assignment: &AssignmentState,
    scratch: &mut ScratchSpace,
) -> Option<usize> {
    let outlet = cost.outlet();
    let width = outlet + 1;
    scratch.reset(width);

    let mut row = root_row;
    let mut base = 0.0;

    loop {
        let mut lowest = f64::INFINITY;
        let mut next: Option<usize> = None;

        for col in 0..width {
            if scratch.settled[col] {
                continue;
            }

            let candidate = base + duals.reduced_cost(cost.internal(row, col), row, col);
            if candidate < scratch.shortest_dist[col] {
                scratch.shortest_dist[col] = candidate;
                scratch.predecessor_row[col] = row;
            }
            if scratch.shortest_dist[col] < lowest {
                lowest = scratch.shortest_dist[col];
                next = Some(col);
            }
        }

        let col = next?;
        scratch.settle(col);

        if col == outlet {
            return Some(col);
        }
        match assignment.row_for_col(col) {
            None => return Some(col),
            Some(owner) => {
                row = owner;
                base = lowest;
            }
        }
    }
}

/// Process `root_row`: search, update the duals, then flip the matching.
pub fn augment_row(
    cost: &CostTransform<'_>,
    root_row: usize,
    duals: &mut DualVariables,
    assignment: &mut AssignmentState,
    scratch: &mut ScratchSpace,
) -> RowOutcome {
    if !cost.has_finite_entry(root_row) {
        return RowOutcome::Unassignable;
    }
    let Some(sink) = shortest_augmenting_path(cost, root_row, duals, assignment, scratch) else {
        return RowOutcome::Unassignable;
    };

    let distance = scratch.shortest_dist(sink);
    duals.apply_search(root_row, sink, scratch, assignment);

    match assignment.augment(sink, &scratch.predecessor_row) {
        Some(row) => RowOutcome::Released { row, distance },
        None => RowOutcome::Assigned { sink, distance },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Objective;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    const INF: f64 = f64::INFINITY;

    fn run_rows(matrix: &DMatrix<f64>) -> (Vec<RowOutcome>, DualVariables, AssignmentState) {
        let cost = CostTransform::new(matrix, Objective::Minimize);
        let (rows, cols) = matrix.shape();
        let mut duals = DualVariables::new(cols + 1, rows);
        let mut assignment = AssignmentState::new(rows, cols);
        let mut scratch = ScratchSpace::new(cols + 1);

        let outcomes = (0..rows)
            .map(|row| augment_row(&cost, row, &mut duals, &mut assignment, &mut scratch))
            .collect();
        (outcomes, duals, assignment)
    }

    #[test]
    fn test_first_row_takes_cheapest_column() {
        let matrix = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 2.0, 5.0]);
        let cost = CostTransform::new(&matrix, Objective::Minimize);
        let duals = DualVariables::new(3, 2);
        let assignment = AssignmentState::new(2, 2);
        let mut scratch = ScratchSpace::new(3);

        let sink = shortest_augmenting_path(&cost, 0, &duals, &assignment, &mut scratch);

        assert_eq!(sink, Some(1));
        assert_relative_eq!(scratch.shortest_dist(1), 1.0);
        assert_eq!(scratch.settled_cols(), &[1]);
    }

    #[test]
    fn test_single_cell() {
        let matrix = DMatrix::from_row_slice(1, 1, &[2.0]);
        let (outcomes, duals, _) = run_rows(&matrix);

        assert_eq!(outcomes, vec![RowOutcome::Assigned { sink: 0, distance: 2.0 }]);
        assert_relative_eq!(duals.v[0], 2.0);
    }

    #[test]
    fn test_ties_go_to_lowest_column() {
        let matrix = DMatrix::from_element(3, 3, 1.0);
        let (outcomes, _, assignment) = run_rows(&matrix);

        assert!(outcomes.iter().all(|o| matches!(o, RowOutcome::Assigned { .. })));
        assert_eq!(assignment.col4row(), &[Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_second_row_displaces_first() {
        // row 0 prefers col 0 (1 vs 2); row 1 needs col 0 far more (1 vs 10)
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 1.0, 10.0]);
        let (outcomes, duals, assignment) = run_rows(&matrix);

        assert_eq!(outcomes[0], RowOutcome::Assigned { sink: 0, distance: 1.0 });
        assert!(matches!(outcomes[1], RowOutcome::Assigned { sink: 1, .. }));
        assert_eq!(assignment.col4row(), &[Some(1), Some(0)]);
        assert!(assignment.is_consistent());

        // complementary slackness on the final pairs
        assert_relative_eq!(duals.reduced_cost(2.0, 0, 1), 0.0);
        assert_relative_eq!(duals.reduced_cost(1.0, 1, 0), 0.0);
    }

    #[test]
    fn test_unassignable_row_leaves_state_untouched() {
        let matrix = DMatrix::from_row_slice(2, 2, &[INF, 9.0, INF, INF]);
        let cost = CostTransform::new(&matrix, Objective::Minimize);
        let mut duals = DualVariables::new(3, 2);
        let mut assignment = AssignmentState::new(2, 2);
        let mut scratch = ScratchSpace::new(3);

        let first = augment_row(&cost, 0, &mut duals, &mut assignment, &mut scratch);
        assert_eq!(first, RowOutcome::Assigned { sink: 1, distance: 9.0 });

        let duals_before = duals.clone();
        let assignment_before = assignment.clone();

        let second = augment_row(&cost, 1, &mut duals, &mut assignment, &mut scratch);

        assert_eq!(second, RowOutcome::Unassignable);
        assert_eq!(duals, duals_before);
        assert_eq!(assignment, assignment_before);
    }

    #[test]
    fn test_blocked_row_stays_out_without_displacing() {
        // both rows can only use col 0; row 1 is dearer so it stays out
        let matrix = DMatrix::from_row_slice(2, 2, &[9.0, INF, 11.0, INF]);
        let (outcomes, _, assignment) = run_rows(&matrix);

        assert!(matches!(outcomes[1], RowOutcome::Released { row: 1, .. }));
        assert_eq!(assignment.col4row(), &[Some(0), None]);
        assert_eq!(assignment.row4col(), &[Some(0), None]);
    }

    #[test]
    fn test_cheaper_row_displaces_into_outlet() {
        // a single allowed column: each cheaper row takes it from the holder
        let matrix = DMatrix::from_row_slice(3, 2, &[3.0, INF, 2.0, INF, 1.0, INF]);
        let (outcomes, duals, assignment) = run_rows(&matrix);

        assert!(matches!(outcomes[1], RowOutcome::Released { row: 0, .. }));
        assert!(matches!(outcomes[2], RowOutcome::Released { row: 1, .. }));
        assert_eq!(assignment.col4row(), &[None, None, Some(0)]);
        assert!(assignment.is_consistent());
        assert_eq!(duals.u[2], 0.0);
    }

    #[test]
    fn test_search_width_is_columns_plus_outlet() {
        let matrix = DMatrix::from_fn(50, 2, |i, j| ((i * 7 + j * 3) % 11) as f64);
        let cost = CostTransform::new(&matrix, Objective::Minimize);
        let mut duals = DualVariables::new(3, 50);
        let mut assignment = AssignmentState::new(50, 2);
        let mut scratch = ScratchSpace::new(3);

        for row in 0..50 {
            augment_row(&cost, row, &mut duals, &mut assignment, &mut scratch);
            assert!(scratch.settled_cols().len() <= 3);
        }
        assert_eq!(scratch.capacity(), 3);
        assert_eq!(assignment.num_assigned(), 2);
    }
}
