use crate::Bounds;

/// Defines a constrained minimization problem.
///
/// A constrained problem maps design variables to a model input, then computes
/// an objective and a set of constraint values from the model input and
/// output. An external optimizer searches for the design variables that
/// minimize the objective while keeping every design variable and constraint
/// within its bounds.
///
/// The const generic `N` is the number of design variables and `M` the number
/// of constraints.
pub trait ConstrainedProblem<const N: usize, const M: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps design variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes the objective value from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be computed.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;

    /// Computes the constraint values from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the constraints cannot be computed.
    fn constraints(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; M], Self::Error>;

    /// Returns the bounds on each design variable.
    fn design_bounds(&self) -> [Bounds; N];

    /// Returns the bounds on each constraint value.
    fn constraint_bounds(&self) -> [Bounds; M];

    /// Returns the point an optimizer should start from.
    fn initial_point(&self) -> [f64; N];
}
