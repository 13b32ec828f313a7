//! Core traits and types for defining differentiable models and problems.
//!
//! This crate defines the shared abstractions the model, phase, and front-end
//! crates build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Differentiable`] — a model that also returns exact partial derivatives
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Signature`] — named input/output metadata used to check wiring
//! - [`Sparsity`] and [`SparseBlock`] — explicitly indexed partial blocks
//! - [`ConstrainedProblem`] — adapts design variables to model inputs and
//!   extracts an objective and constraints from outputs
//! - [`check`] — central-difference verification of analytic partials

mod bounds;
mod evaluate;
mod model;
mod problems;
mod signature;
mod sparsity;

pub mod check;

pub use bounds::{Bounds, BoundsError};
pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
pub use model::{Differentiable, Model, Snapshot};
pub use problems::ConstrainedProblem;
pub use signature::{Shape, Signature, Variable};
pub use sparsity::{SparseBlock, Sparsity, SparsityError};
