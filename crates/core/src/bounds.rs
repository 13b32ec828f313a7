use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bounds must not be NaN")]
    NaN,

    #[error("lower bound {lower} exceeds upper bound {upper}")]
    Inverted { lower: f64, upper: f64 },
}

/// Optional lower and upper limits on a design variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Bounds {
    /// Creates bounds from optional limits.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit is NaN or `lower > upper`.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Result<Self, BoundsError> {
        if lower.is_some_and(f64::is_nan) || upper.is_some_and(f64::is_nan) {
            return Err(BoundsError::NaN);
        }
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower > upper {
                return Err(BoundsError::Inverted { lower, upper });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Bounds with neither limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Creates bounds limited on both sides.
    ///
    /// # Errors
    ///
    /// Returns an error if either limit is NaN or `lower > upper`.
    pub fn between(lower: f64, upper: f64) -> Result<Self, BoundsError> {
        Self::new(Some(lower), Some(upper))
    }

    /// Creates bounds limited only from below.
    ///
    /// # Errors
    ///
    /// Returns an error if `lower` is NaN.
    pub fn at_least(lower: f64) -> Result<Self, BoundsError> {
        Self::new(Some(lower), None)
    }

    #[must_use]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Returns `true` if `value` satisfies both limits.
    ///
    /// `NaN` is never contained.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        !value.is_nan()
            && self.lower.is_none_or(|lower| value >= lower)
            && self.upper.is_none_or(|upper| value <= upper)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unbounded()
    }
}
