//! A paraboloid with one linear inequality constraint.
//!
//! ```text
//! minimize    f(x, y) = (x - 3)^2 + x y + (y + 4)^2 - 3
//! subject to  c(x, y) = x + y >= 0
//!             -50 <= x, y <= 50
//! ```
//!
//! The constrained minimum is `f = -27` at `(7, -7)`.

use std::convert::Infallible;

use descent_core::{Bounds, ConstrainedProblem, Differentiable, Model, Signature, Variable};
use serde::Serialize;

const INPUTS: [Variable; 2] = [
    Variable::scalar("x", "", "first design variable"),
    Variable::scalar("y", "", "second design variable"),
];

const OUTPUTS: [Variable; 2] = [
    Variable::scalar("f", "", "paraboloid objective"),
    Variable::scalar("c", "", "sum constraint"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Input {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Output {
    /// Objective value.
    pub f: f64,

    /// Constraint value.
    pub c: f64,
}

/// Gradients of the objective and constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Partials {
    pub df_dx: f64,
    pub df_dy: f64,
    pub dc_dx: f64,
    pub dc_dy: f64,
}

/// Evaluates the objective and constraint together.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paraboloid;

impl Model for Paraboloid {
    type Input = Input;
    type Output = Output;
    type Error = Infallible;

    fn call(&self, input: &Input) -> Result<Output, Self::Error> {
        let Input { x, y } = *input;
        Ok(Output {
            f: (x - 3.0).powi(2) + x * y + (y + 4.0).powi(2) - 3.0,
            c: x + y,
        })
    }
}

impl Differentiable for Paraboloid {
    type Partials = Partials;

    fn partials(&self, input: &Input) -> Result<Partials, Self::Error> {
        let Input { x, y } = *input;
        Ok(Partials {
            df_dx: 2.0 * (x - 3.0) + y,
            df_dy: x + 2.0 * (y + 4.0),
            dc_dx: 1.0,
            dc_dy: 1.0,
        })
    }
}

impl Signature for Paraboloid {
    fn inputs(&self) -> &[Variable] {
        &INPUTS
    }

    fn outputs(&self) -> &[Variable] {
        &OUTPUTS
    }
}

/// Minimize `f` over the box `[-50, 50]^2` subject to `c >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParaboloidProblem {
    design_bounds: Bounds,
    start: [f64; 2],
}

impl ParaboloidProblem {
    /// Creates the problem with a custom start point.
    #[must_use]
    pub fn starting_at(start: [f64; 2]) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }
}

impl Default for ParaboloidProblem {
    fn default() -> Self {
        Self {
            // Known-good values, unwrap is safe
            design_bounds: Bounds::between(-50.0, 50.0).unwrap(),
            start: [3.0, -4.0],
        }
    }
}

impl ConstrainedProblem<2, 1> for ParaboloidProblem {
    type Input = Input;
    type Output = Output;
    type Error = Infallible;

    fn input(&self, x: &[f64; 2]) -> Result<Input, Self::Error> {
        Ok(Input { x: x[0], y: x[1] })
    }

    fn objective(&self, _input: &Input, output: &Output) -> Result<f64, Self::Error> {
        Ok(output.f)
    }

    fn constraints(&self, _input: &Input, output: &Output) -> Result<[f64; 1], Self::Error> {
        Ok([output.c])
    }

    fn design_bounds(&self) -> [Bounds; 2] {
        [self.design_bounds; 2]
    }

    fn constraint_bounds(&self) -> [Bounds; 1] {
        // Known-good value, unwrap is safe
        [Bounds::at_least(0.0).unwrap()]
    }

    fn initial_point(&self) -> [f64; 2] {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use descent_core::{
        check::{CheckConfig, central_difference, compare},
        evaluate,
    };

    #[test]
    fn start_point_violates_constraint() {
        let problem = ParaboloidProblem::default();
        let eval = evaluate(&Paraboloid, &problem, problem.initial_point()).unwrap();

        assert_relative_eq!(eval.objective, -15.0);
        assert_relative_eq!(eval.constraints[0], -1.0);
        assert!(!eval.feasible);
    }

    #[test]
    fn constrained_minimum() {
        let eval = evaluate(&Paraboloid, &ParaboloidProblem::default(), [7.0, -7.0]).unwrap();

        assert_relative_eq!(eval.objective, -27.0);
        assert_abs_diff_eq!(eval.constraints[0], 0.0);
        assert!(eval.feasible);

        // Gradients of f and c are parallel at the optimum (KKT).
        let grad = Paraboloid.partials(&eval.snapshot.input).unwrap();
        assert_relative_eq!(grad.df_dx, 1.0);
        assert_relative_eq!(grad.df_dy, 1.0);
    }

    #[test]
    fn outside_box_is_infeasible() {
        let eval = evaluate(&Paraboloid, &ParaboloidProblem::default(), [60.0, 0.0]).unwrap();

        assert!(eval.constraints[0] >= 0.0);
        assert!(!eval.feasible);
    }

    #[test]
    fn gradients_match_central_differences() {
        let config = CheckConfig::default();
        let f = |p: &[f64]| {
            Paraboloid
                .call(&Input { x: p[0], y: p[1] })
                .map(|out| vec![out.f, out.c])
        };

        for point in [[3.0, -4.0], [7.0, -7.0], [-2.5, 4.0]] {
            let numeric = central_difference(f, &point, config.step()).unwrap();
            let grad = Paraboloid
                .partials(&Input {
                    x: point[0],
                    y: point[1],
                })
                .unwrap();
            let analytic = vec![vec![grad.df_dx, grad.df_dy], vec![grad.dc_dx, grad.dc_dy]];

            assert!(compare(&analytic, &numeric, &config).unwrap().passed);
        }
    }

    #[test]
    fn custom_start_point() {
        let problem = ParaboloidProblem::starting_at([1.0, 2.0]);

        assert_eq!(problem.initial_point(), [1.0, 2.0]);
        assert!(problem.design_bounds()[0].contains(-50.0));
    }
}
