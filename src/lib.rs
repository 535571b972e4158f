//! # assign2d-rs - Rectangular Linear Assignment
//!
//! Shortest augmenting path solver for the two-dimensional assignment problem.
//!
//! Given an `M x N` cost matrix with `M >= N`, finds a minimum (or maximum)
//! cost one-to-one matching of rows to columns together with dual variables
//! that certify optimality.
//!
//! ## Features
//!
//! - Row-by-row shortest augmenting path (Jonker-Volgenant style) search
//! - Forbidden pairs encoded as `+inf` (minimize) or `-inf` (maximize); when
//!   not every column can be assigned, the most pairs at the best total
//! - Dual variables `u` (columns) and `v` (rows) returned with every solution
//! - Reusable solver buffers for repeated solves
//! - scipy-style thresholded `linear_sum_assignment`
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use assign2d_rs::assign2d;
//!
//! let cost = DMatrix::from_row_slice(3, 2, &[
//!     1.0, 4.0,
//!     2.0, 1.0,
//!     3.0, 2.0,
//! ]);
//! let solution = assign2d(&cost, false).unwrap();
//!
//! assert_eq!(solution.col4row, vec![Some(0), Some(1), None]);
//! assert_eq!(solution.gain, 2.0);
//! ```

pub mod assignment;
pub mod augment;
pub mod config;
pub mod cost;
pub mod dual;
pub mod matching;
pub mod orientation;
pub mod scratch;
pub mod solution;
pub mod solver;

// Re-exports for convenience
pub use config::SolverConfig;
pub use cost::{validate_cost_matrix, Objective};
pub use matching::{linear_sum_assignment, Assignment, AssignmentResult};
pub use orientation::{assign2d_any, from_one_based, to_one_based};
pub use solution::Assign2DSolution;
pub use solver::{assign2d, ShortestPathSolver};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while solving an assignment problem
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid cost matrix shape: expected {expected}, got {got}")]
        InvalidShape { expected: String, got: String },

        #[error("Invalid cost matrix: {0}")]
        InvalidInput(String),

        #[error("Infeasible assignment: no row of the {rows}x{cols} cost matrix can be assigned")]
        Infeasible { rows: usize, cols: usize },

        #[error("Incomplete assignment: {assigned} of {required} columns assigned")]
        IncompleteAssignment { assigned: usize, required: usize },
    }

    impl Error {
        /// Whether the error rejects the input before the solver runs.
        pub fn is_invalid_input(&self) -> bool {
            matches!(self, Error::InvalidShape { .. } | Error::InvalidInput(_))
        }
    }

    /// Result type for assignment operations
    pub type Result<T> = std::result::Result<T, Error>;
}
