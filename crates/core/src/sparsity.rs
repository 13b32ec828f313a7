//! Explicitly indexed sparse partial-derivative blocks.
//!
//! A [`Sparsity`] pattern lists the `(row, col)` positions of the structurally
//! nonzero entries of one partial-derivative block. Patterns are built once
//! for a fixed problem size and shared; each evaluation pairs a pattern with
//! fresh values in a [`SparseBlock`].

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when pairing a sparsity pattern with values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SparsityError {
    #[error("expected {expected} values for the pattern, got {actual}")]
    ValueCount { expected: usize, actual: usize },
}

/// The structural nonzero positions of an `n_rows x n_cols` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sparsity {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Sparsity {
    /// An `n x n` pattern where output `i` depends only on input `i`.
    #[must_use]
    pub fn diagonal(n: usize) -> Self {
        let idx: Vec<usize> = (0..n).collect();
        Self {
            n_rows: n,
            n_cols: n,
            rows: idx.clone(),
            cols: idx,
        }
    }

    /// An `n x 1` pattern where every output depends on one shared input.
    #[must_use]
    pub fn column(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: 1,
            rows: (0..n).collect(),
            cols: vec![0; n],
        }
    }

    /// A fully populated pattern, in row-major order.
    #[must_use]
    pub fn dense(n_rows: usize, n_cols: usize) -> Self {
        let (rows, cols) = (0..n_rows)
            .flat_map(|row| (0..n_cols).map(move |col| (row, col)))
            .unzip();
        Self {
            n_rows,
            n_cols,
            rows,
            cols,
        }
    }

    /// Returns the block shape as `(n_rows, n_cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of structural nonzeros.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Iterates over the `(row, col)` positions in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().copied().zip(self.cols.iter().copied())
    }

    /// Returns the position of `(row, col)` within the value list, if declared.
    #[must_use]
    pub fn position(&self, row: usize, col: usize) -> Option<usize> {
        self.entries().position(|entry| entry == (row, col))
    }
}

/// A sparsity pattern paired with the values of its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseBlock {
    sparsity: Arc<Sparsity>,
    values: Vec<f64>,
}

impl SparseBlock {
    /// Pairs a shared pattern with one value per declared entry.
    ///
    /// # Errors
    ///
    /// Returns [`SparsityError::ValueCount`] if `values` does not have exactly
    /// one value per pattern entry.
    pub fn new(sparsity: Arc<Sparsity>, values: Vec<f64>) -> Result<Self, SparsityError> {
        if values.len() != sparsity.nnz() {
            return Err(SparsityError::ValueCount {
                expected: sparsity.nnz(),
                actual: values.len(),
            });
        }
        Ok(Self { sparsity, values })
    }

    #[must_use]
    pub fn sparsity(&self) -> &Sparsity {
        &self.sparsity
    }

    /// Returns the values in pattern order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the entry at `(row, col)`, or zero if it is not in the pattern.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.sparsity
            .position(row, col)
            .map_or(0.0, |pos| self.values[pos])
    }

    /// Expands the block into a dense row-major matrix.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let (n_rows, n_cols) = self.sparsity.shape();
        let mut dense = vec![vec![0.0; n_cols]; n_rows];
        for ((row, col), value) in self.sparsity.entries().zip(&self.values) {
            dense[row][col] = *value;
        }
        dense
    }
}
