//! The partial row/column matching maintained during a solve.

/// Current partial bijection between rows and columns.
///
/// `col4row` and `row4col` are mutual inverses wherever both sides are
/// assigned. Unassigned entries are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentState {
    col4row: Vec<Option<usize>>,
    row4col: Vec<Option<usize>>,
}

impl AssignmentState {
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            col4row: vec![None; num_rows],
            row4col: vec![None; num_cols],
        }
    }

    /// Clear every assignment and resize for a new problem, keeping allocations.
    pub fn reset(&mut self, num_rows: usize, num_cols: usize) {
        self.col4row.clear();
        self.col4row.resize(num_rows, None);
        self.row4col.clear();
        self.row4col.resize(num_cols, None);
    }

    pub fn num_rows(&self) -> usize {
        self.col4row.len()
    }

    pub fn num_cols(&self) -> usize {
        self.row4col.len()
    }

    #[inline]
    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.col4row[row]
    }

    #[inline]
    pub fn row_for_col(&self, col: usize) -> Option<usize> {
        self.row4col[col]
    }

    #[inline]
    pub fn is_col_free(&self, col: usize) -> bool {
        self.row4col[col].is_none()
    }

    /// Number of assigned rows.
    pub fn num_assigned(&self) -> usize {
        self.col4row.iter().filter(|c| c.is_some()).count()
    }

    pub fn col4row(&self) -> &[Option<usize>] {
        &self.col4row
    }

    pub fn row4col(&self) -> &[Option<usize>] {
        &self.row4col
    }

    /// Flip the matching along an augmenting path and return the row left
    /// without a column, if any.
    ///
    /// `predecessor_row[j]` is the row the search reached column `j` from.
    /// Walking back from `sink`, each column is handed to that row, and the
    /// column the row held before is the next one on the path. The walk ends
    /// at the root row, which held no column. A `sink` equal to `num_cols()`
    /// is the outlet: the row reaching it is released instead.
    pub fn augment(&mut self, sink: usize, predecessor_row: &[usize]) -> Option<usize> {
        let mut released = None;
        let mut col = sink;

        loop {
            let row = predecessor_row[col];
            let previous = if col < self.row4col.len() {
                self.row4col[col] = Some(row);
                self.col4row[row].replace(col)
            } else {
                released = Some(row);
                self.col4row[row].take()
            };

            match previous {
                Some(prev_col) => col = prev_col,
                None => return released,
            }
        }
    }

    /// Check that `col4row` and `row4col` are mutual inverses.
    pub fn is_consistent(&self) -> bool {
        let rows_ok = self.col4row.iter().enumerate().all(|(row, col)| match col {
            Some(col) => self.row4col.get(*col) == Some(&Some(row)),
            None => true,
        });
        let cols_ok = self.row4col.iter().enumerate().all(|(col, row)| match row {
            Some(row) => self.col4row.get(*row) == Some(&Some(col)),
            None => true,
        });
        rows_ok && cols_ok
    }
}
