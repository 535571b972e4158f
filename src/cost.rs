//! Cost matrix validation and the minimization transform.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Minimize the total cost. Forbidden pairs are `+inf`.
    #[default]
    Minimize,
    /// Maximize the total gain. Forbidden pairs are `-inf`.
    Maximize,
}

impl Objective {
    /// Objective from the conventional `maximize` flag.
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Objective::Maximize
        } else {
            Objective::Minimize
        }
    }

    pub fn is_maximize(self) -> bool {
        self == Objective::Maximize
    }

    /// Sign that turns a raw cost into a cost to be minimized.
    pub fn sign(self) -> f64 {
        match self {
            Objective::Minimize => 1.0,
            Objective::Maximize => -1.0,
        }
    }

    /// The raw cost value marking a forbidden pair.
    pub fn forbidden(self) -> f64 {
        match self {
            Objective::Minimize => f64::INFINITY,
            Objective::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Whether `value` is the forbidden marker for this objective.
    pub fn is_forbidden(self, value: f64) -> bool {
        value == self.forbidden()
    }
}

/// Check if a matrix contains NaN values.
pub fn has_nan(matrix: &DMatrix<f64>) -> bool {
    matrix.iter().any(|&x| x.is_nan())
}

/// Smallest and largest finite entries, or `None` if no entry is finite.
pub fn finite_range(matrix: &DMatrix<f64>) -> Option<(f64, f64)> {
    matrix
        .iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Validate a cost matrix before handing it to the solver.
///
/// Rejects:
/// - matrices with zero rows or columns, or fewer rows than columns
/// - NaN entries
/// - infinities of the wrong sign for the objective (`-inf` when minimizing,
///   `+inf` when maximizing)
/// - a finite range (`max - min`) that overflows
pub fn validate_cost_matrix(cost: &DMatrix<f64>, objective: Objective) -> Result<()> {
    validate_shape(cost)?;

    if has_nan(cost) {
        return Err(Error::InvalidInput("cost matrix contains NaN values".to_string()));
    }

    let allowed = objective.forbidden();
    if let Some(((row, col), value)) = cost
        .iter()
        .enumerate()
        .map(|(k, &x)| ((k % cost.nrows(), k / cost.nrows()), x))
        .find(|&(_, x)| x.is_infinite() && x != allowed)
    {
        return Err(Error::InvalidInput(format!(
            "entry ({}, {}) is {} which is not a valid forbidden marker when {}",
            row,
            col,
            value,
            match objective {
                Objective::Minimize => "minimizing",
                Objective::Maximize => "maximizing",
            }
        )));
    }

    if let Some((lo, hi)) = finite_range(cost) {
        if !(hi - lo).is_finite() {
            return Err(Error::InvalidInput(format!(
                "finite cost range [{}, {}] overflows",
                lo, hi
            )));
        }
    }

    Ok(())
}

/// Shape checks that hold even when value validation is skipped.
pub(crate) fn validate_shape(cost: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = cost.shape();
    if rows == 0 || cols == 0 || rows < cols {
        return Err(Error::InvalidShape {
            expected: "(rows, cols) with rows >= cols > 0".to_string(),
            got: format!("({}, {})", rows, cols),
        });
    }
    Ok(())
}

/// Non-negative minimization view of a borrowed cost matrix.
///
/// The effective cost is `sign * C(i, j)`; the internal cost additionally
/// subtracts `shift = min(0, min finite effective cost)` so every finite
/// entry is `>= 0`.
///
/// Column `ncols()` is the outlet: a column of unlimited capacity that a row
/// takes when it ends up unassigned. Its cost exceeds the internal total of
/// any matching, so the solver only leaves a row out when that does not cost
/// an assignment.
#[derive(Debug, Clone, Copy)]
pub struct CostTransform<'a> {
    cost: &'a DMatrix<f64>,
    objective: Objective,
    shift: f64,
    outlet_cost: f64,
}

impl<'a> CostTransform<'a> {
    pub fn new(cost: &'a DMatrix<f64>, objective: Objective) -> Self {
        let sign = objective.sign();
        let (shift, highest) = cost
            .iter()
            .map(|&x| sign * x)
            .filter(|x| x.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), x| (lo.min(x), hi.max(x)));

        // N pairs of internal cost at most `highest - shift` each
        let outlet_cost = (cost.ncols() as f64 + 1.0) * (highest - shift + 1.0);

        Self {
            cost,
            objective,
            shift,
            outlet_cost,
        }
    }

    pub fn nrows(&self) -> usize {
        self.cost.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.cost.ncols()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Amount subtracted from every effective cost.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Index of the outlet column.
    #[inline]
    pub fn outlet(&self) -> usize {
        self.cost.ncols()
    }

    /// Internal cost of leaving a row unassigned.
    pub fn outlet_cost(&self) -> f64 {
        self.outlet_cost
    }

    /// Original, untransformed cost.
    #[inline]
    pub fn raw(&self, row: usize, col: usize) -> f64 {
        self.cost[(row, col)]
    }

    /// Effective cost `sign * C(i, j)`, always minimized.
    #[inline]
    pub fn effective(&self, row: usize, col: usize) -> f64 {
        self.objective.sign() * self.cost[(row, col)]
    }

    /// Internal non-negative cost; the outlet cost for the outlet column.
    #[inline]
    pub fn internal(&self, row: usize, col: usize) -> f64 {
        if col < self.cost.ncols() {
            self.effective(row, col) - self.shift
        } else {
            self.outlet_cost
        }
    }

    /// Whether `row` has at least one allowed column.
    pub fn has_finite_entry(&self, row: usize) -> bool {
        self.cost.row(row).iter().any(|x| x.is_finite())
    }
}
