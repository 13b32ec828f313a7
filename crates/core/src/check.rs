//! Verification of analytic partials against central differences.
//!
//! A model's closed-form partials are checked by perturbing each input in turn
//! and comparing the analytic entries with
//!
//! ```text
//! (f(x + h e_j) - f(x - h e_j)) / 2h
//! ```
//!
//! Checks operate on flattened inputs and outputs so the same routine covers
//! any model that can be expressed as a vector function.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Configuration for a partials check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckConfig {
    step: f64,
    abs_tol: f64,
    rel_tol: f64,
}

/// Errors that can occur when validating a partials check config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckConfigError {
    #[error("step must be finite and positive")]
    Step,

    #[error("abs_tol must be finite and non-negative")]
    AbsTol,

    #[error("rel_tol must be finite and non-negative")]
    RelTol,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            step: 1e-6,
            abs_tol: 1e-6,
            rel_tol: 1e-6,
        }
    }
}

impl CheckConfig {
    /// Creates a new config with a validated step and tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is not positive or any tolerance is
    /// negative or non-finite.
    pub fn new(step: f64, abs_tol: f64, rel_tol: f64) -> Result<Self, CheckConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(CheckConfigError::Step);
        }
        if !abs_tol.is_finite() || abs_tol < 0.0 {
            return Err(CheckConfigError::AbsTol);
        }
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(CheckConfigError::RelTol);
        }

        Ok(Self {
            step,
            abs_tol,
            rel_tol,
        })
    }

    /// Returns the central-difference step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }
}

/// Errors that can occur when comparing two Jacobians.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckError {
    #[error("jacobian shapes differ: {analytic:?} vs {numeric:?}")]
    Shape {
        analytic: (usize, usize),
        numeric: (usize, usize),
    },

    #[error("row {row} has {len} entries, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// The outcome of comparing an analytic block against its numeric estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub max_abs_error: f64,
    pub max_rel_error: f64,
    pub passed: bool,
}

/// Approximates the dense Jacobian of `f` at `x` with central differences.
///
/// Rows of the result are outputs of `f` and columns are entries of `x`.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn central_difference<F, E>(f: F, x: &[f64], step: f64) -> Result<Vec<Vec<f64>>, E>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, E>,
{
    let mut columns = Vec::with_capacity(x.len());
    let mut probe = x.to_vec();

    for j in 0..x.len() {
        probe[j] = x[j] + step;
        let forward = f(&probe)?;
        probe[j] = x[j] - step;
        let backward = f(&probe)?;
        probe[j] = x[j];

        let column: Vec<f64> = forward
            .iter()
            .zip(&backward)
            .map(|(fwd, bwd)| (fwd - bwd) / (2.0 * step))
            .collect();
        columns.push(column);
    }

    let n_rows = columns.first().map_or(0, Vec::len);
    Ok((0..n_rows)
        .map(|i| columns.iter().map(|column| column[i]).collect())
        .collect())
}

/// Compares an analytic dense Jacobian against a numeric one.
///
/// An entry passes when its absolute error is within `abs_tol` or its error
/// relative to the numeric value is within `rel_tol`.
///
/// # Errors
///
/// Returns [`CheckError::Shape`] if the two matrices differ in shape.
pub fn compare(
    analytic: &[Vec<f64>],
    numeric: &[Vec<f64>],
    config: &CheckConfig,
) -> Result<Comparison, CheckError> {
    let analytic_shape = shape_of(analytic)?;
    let numeric_shape = shape_of(numeric)?;
    if analytic_shape != numeric_shape {
        return Err(CheckError::Shape {
            analytic: analytic_shape,
            numeric: numeric_shape,
        });
    }

    let mut comparison = Comparison {
        max_abs_error: 0.0,
        max_rel_error: 0.0,
        passed: true,
    };

    for (a, n) in analytic.iter().flatten().zip(numeric.iter().flatten()) {
        let abs_error = (a - n).abs();
        let rel_error = if *n == 0.0 {
            abs_error
        } else {
            abs_error / n.abs()
        };

        comparison.max_abs_error = comparison.max_abs_error.max(abs_error);
        comparison.max_rel_error = comparison.max_rel_error.max(rel_error);
        if abs_error > config.abs_tol && rel_error > config.rel_tol {
            comparison.passed = false;
        }
    }

    debug!(?comparison, "compared jacobians");
    Ok(comparison)
}

/// Returns `(rows, cols)`, rejecting ragged matrices.
fn shape_of(matrix: &[Vec<f64>]) -> Result<(usize, usize), CheckError> {
    let n_cols = matrix.first().map_or(0, Vec::len);
    match matrix.iter().position(|row| row.len() != n_cols) {
        Some(row) => Err(CheckError::Ragged {
            row,
            len: matrix[row].len(),
            expected: n_cols,
        }),
        None => Ok((matrix.len(), n_cols)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_abs_diff_eq;

    fn quadratic(x: &[f64]) -> Result<Vec<f64>, Infallible> {
        Ok(vec![x[0] * x[0] + x[1], x[0] * x[1]])
    }

    #[test]
    fn central_difference_of_quadratic() {
        let jac = central_difference(quadratic, &[2.0, 3.0], 1e-6).unwrap();

        assert_eq!(jac.len(), 2);
        assert_abs_diff_eq!(jac[0][0], 4.0, epsilon = 1e-8);
        assert_abs_diff_eq!(jac[0][1], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(jac[1][0], 3.0, epsilon = 1e-8);
        assert_abs_diff_eq!(jac[1][1], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn compare_passes_and_fails() {
        let config = CheckConfig::default();
        let analytic = vec![vec![4.0, 1.0], vec![3.0, 2.0]];
        let numeric = central_difference(quadratic, &[2.0, 3.0], config.step()).unwrap();

        let good = compare(&analytic, &numeric, &config).unwrap();
        assert!(good.passed);
        assert!(good.max_abs_error < 1e-6);

        let wrong = vec![vec![4.0, 1.0], vec![3.0, 2.5]];
        let bad = compare(&wrong, &numeric, &config).unwrap();
        assert!(!bad.passed);
        assert_abs_diff_eq!(bad.max_abs_error, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn compare_rejects_shape_mismatch() {
        let config = CheckConfig::default();
        let result = compare(&[vec![1.0, 2.0]], &[vec![1.0], vec![2.0]], &config);

        assert_eq!(
            result,
            Err(CheckError::Shape {
                analytic: (1, 2),
                numeric: (2, 1),
            })
        );
    }

    #[test]
    fn config_validation() {
        assert_eq!(CheckConfig::new(0.0, 1e-6, 1e-6), Err(CheckConfigError::Step));
        assert_eq!(CheckConfig::new(1e-6, -1.0, 1e-6), Err(CheckConfigError::AbsTol));
        assert_eq!(
            CheckConfig::new(1e-6, 1e-6, f64::INFINITY),
            Err(CheckConfigError::RelTol)
        );
        assert!(CheckConfig::new(1e-7, 0.0, 0.0).is_ok());
    }
}
