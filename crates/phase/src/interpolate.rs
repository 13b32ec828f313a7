use ndarray::Array1;
use ninterp::{
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use thiserror::Error;

/// Errors that can occur when building or evaluating an [`Interpolant`].
#[derive(Debug, Error)]
pub enum InterpolateError {
    #[error("at least one value is required")]
    Empty,

    #[error("abscissae must be finite and strictly increasing")]
    NotIncreasing,

    #[error(transparent)]
    Validate(#[from] ninterp::error::ValidateError),

    #[error(transparent)]
    Interpolate(#[from] ninterp::error::InterpolateError),
}

/// A piecewise-linear interpolant over phase tau.
///
/// Values outside the abscissa range hold the nearest end value.
#[derive(Debug, Clone)]
pub struct Interpolant(Kind);

#[derive(Debug, Clone)]
enum Kind {
    Constant(f64),
    Linear(Interp1DOwned<f64, Linear>),
}

impl Interpolant {
    /// Creates an interpolant through `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are empty, differ in length, or `xs` is
    /// not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, InterpolateError> {
        if ys.is_empty() {
            return Err(InterpolateError::Empty);
        }
        if xs.iter().any(|x| !x.is_finite()) || xs.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(InterpolateError::NotIncreasing);
        }
        if let ([_], [y]) = (xs.as_slice(), ys.as_slice()) {
            return Ok(Self(Kind::Constant(*y)));
        }

        let linear = Interp1DOwned::new(
            Array1::from(xs),
            Array1::from(ys),
            Linear,
            Extrapolate::Clamp,
        )?;
        Ok(Self(Kind::Linear(linear)))
    }

    /// Spreads `ys` evenly over `[-1, 1]`.
    ///
    /// A single value is broadcast everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`InterpolateError::Empty`] if `ys` is empty.
    pub fn even(ys: &[f64]) -> Result<Self, InterpolateError> {
        let xs = match ys.len() {
            0 => return Err(InterpolateError::Empty),
            1 => vec![0.0],
            n => {
                let step = 2.0 / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { 1.0 } else { -1.0 + step * i as f64 })
                    .collect()
            }
        };
        Self::new(xs, ys.to_vec())
    }

    /// Evaluates the interpolant at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying interpolator rejects `x`.
    pub fn eval(&self, x: f64) -> Result<f64, InterpolateError> {
        match &self.0 {
            Kind::Constant(y) => Ok(*y),
            Kind::Linear(linear) => Ok(linear.interpolate(&[x])?),
        }
    }

    /// Evaluates the interpolant at each of `xs`.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Interpolant::eval`].
    pub fn eval_all(&self, xs: &[f64]) -> Result<Vec<f64>, InterpolateError> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}
