/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic, always producing the same result for a given
/// input. Problem definitions, partials checks, and front ends all rely on a
/// model call being a pure function of its input.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A model that also provides the exact partial derivatives of its outputs.
///
/// Implementations return closed-form values, not finite-difference or
/// automatically differentiated approximations.
pub trait Differentiable: Model {
    type Partials;

    /// Computes the partial derivatives of the outputs at `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Model::Error`] under the same conditions as [`Model::call`].
    fn partials(&self, input: &Self::Input) -> Result<Self::Partials, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
