use thiserror::Error;
use tracing::trace;

use crate::{ConstrainedProblem, Model, Snapshot};

/// The result of evaluating a constrained problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize, const M: usize> {
    pub x: [f64; N],

    pub objective: f64,

    pub constraints: [f64; M],

    /// Whether `x` and every constraint value lie within their bounds.
    pub feasible: bool,

    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating a constrained problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to construct input or compute the objective or constraints.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize, const C: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N, C>,
    EvalError<<M as Model>::Error, <P as ConstrainedProblem<N, C>>::Error>,
>;

/// Evaluates the model in the context of a constrained problem.
///
/// This function maps `x` to model input, calls the model, then computes the
/// objective and constraints from the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, model call, objective, or constraint
/// computation fails.
pub fn evaluate<M, P, const N: usize, const C: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;
    let constraints = problem
        .constraints(&input, &output)
        .map_err(EvalError::Problem)?;

    let within_design = problem
        .design_bounds()
        .iter()
        .zip(&x)
        .all(|(bounds, value)| bounds.contains(*value));
    let within_constraints = problem
        .constraint_bounds()
        .iter()
        .zip(&constraints)
        .all(|(bounds, value)| bounds.contains(*value));

    trace!(?x, objective, ?constraints, "evaluated problem");

    Ok(Evaluation {
        x,
        objective,
        constraints,
        feasible: within_design && within_constraints,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use crate::Bounds;

    /// Squares its input.
    struct Square;

    impl Model for Square {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            Ok(input * input)
        }
    }

    /// Minimize `x^2` subject to `x >= 1`, with `x` in `[-2, 2]`.
    struct ShiftedSquare;

    impl ConstrainedProblem<1, 1> for ShiftedSquare {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
            Ok(*output)
        }

        fn constraints(&self, input: &f64, _output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([*input])
        }

        fn design_bounds(&self) -> [Bounds; 1] {
            [Bounds::between(-2.0, 2.0).unwrap()]
        }

        fn constraint_bounds(&self) -> [Bounds; 1] {
            [Bounds::at_least(1.0).unwrap()]
        }

        fn initial_point(&self) -> [f64; 1] {
            [0.0]
        }
    }

    /// Minimize `x^2` with no limits on `x` or on the echoed constraint.
    struct FreeSquare;

    impl ConstrainedProblem<1, 1> for FreeSquare {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
            Ok(*output)
        }

        fn constraints(&self, input: &f64, _output: &f64) -> Result<[f64; 1], Self::Error> {
            Ok([*input])
        }

        fn design_bounds(&self) -> [Bounds; 1] {
            [Bounds::unbounded()]
        }

        fn constraint_bounds(&self) -> [Bounds; 1] {
            [Bounds::unbounded()]
        }

        fn initial_point(&self) -> [f64; 1] {
            [0.0]
        }
    }

    #[test]
    fn evaluates_objective_and_constraints() {
        let eval = evaluate(&Square, &ShiftedSquare, [1.5]).unwrap();

        assert_relative_eq!(eval.objective, 2.25);
        assert_relative_eq!(eval.constraints[0], 1.5);
        assert!(eval.feasible);
        assert_relative_eq!(eval.snapshot.input, 1.5);
    }

    #[test]
    fn flags_constraint_violation() {
        let eval = evaluate(&Square, &ShiftedSquare, [0.5]).unwrap();

        assert!(!eval.feasible);
    }

    #[test]
    fn flags_design_bound_violation() {
        let eval = evaluate(&Square, &ShiftedSquare, [3.0]).unwrap();

        assert!(!eval.feasible);
    }

    #[test]
    fn nan_point_is_never_feasible() {
        assert!(evaluate(&Square, &FreeSquare, [4.0]).unwrap().feasible);

        let eval = evaluate(&Square, &FreeSquare, [f64::NAN]).unwrap();
        assert!(eval.objective.is_nan());
        assert!(!eval.feasible);
    }
}
