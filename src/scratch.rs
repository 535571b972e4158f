//! Per-search working buffers.

/// Buffers used by a single row's shortest path search.
///
/// Allocated once per problem size and reset, not reallocated, before each
/// row's search. A solver owns exactly one of these.
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    /// Tentative shortest reduced-cost distance from the root row to each column.
    pub(crate) shortest_dist: Vec<f64>,
    /// Row each column was last relaxed from. Only meaningful for columns
    /// with a finite distance.
    pub(crate) predecessor_row: Vec<usize>,
    /// Columns whose distance is final.
    pub(crate) settled: Vec<bool>,
    /// Settled columns in settle order.
    pub(crate) settled_cols: Vec<usize>,
}

impl ScratchSpace {
    /// Create scratch space for searches over up to `num_cols` columns,
    /// outlet included.
    pub fn new(num_cols: usize) -> Self {
        let mut scratch = Self::default();
        scratch.reserve(num_cols);
        scratch
    }

    /// Number of columns the buffers can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.shortest_dist.len()
    }

    /// Grow the buffers to hold `num_cols` columns. Never shrinks.
    pub fn reserve(&mut self, num_cols: usize) {
        if num_cols > self.shortest_dist.len() {
            self.shortest_dist.resize(num_cols, f64::INFINITY);
            self.predecessor_row.resize(num_cols, 0);
            self.settled.resize(num_cols, false);
            self.settled_cols.reserve(num_cols);
        }
    }

    /// Reset the first `width` columns for a new search.
    pub fn reset(&mut self, width: usize) {
        self.reserve(width);
        self.shortest_dist[..width].fill(f64::INFINITY);
        self.settled[..width].fill(false);
        self.settled_cols.clear();
    }

    pub(crate) fn settle(&mut self, col: usize) {
        self.settled[col] = true;
        self.settled_cols.push(col);
    }

    pub fn shortest_dist(&self, col: usize) -> f64 {
        self.shortest_dist[col]
    }

    pub fn predecessor_row(&self, col: usize) -> usize {
        self.predecessor_row[col]
    }

    pub fn is_settled(&self, col: usize) -> bool {
        self.settled[col]
    }

    /// Columns settled by the last search, in settle order.
    pub fn settled_cols(&self) -> &[usize] {
        &self.settled_cols
    }
}
