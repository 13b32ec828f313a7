use descent_core::{
    Differentiable, Model, Shape,
    check::{self, CheckConfig, Comparison},
};
use serde::Serialize;
use tracing::debug;

use super::{BrachistochroneOde, Error, Gravity, Input};

const OUTPUT_NAMES: [&str; 3] = ["xdot", "ydot", "vdot"];

/// The outcome of checking one `∂of/∂wrt` block against central differences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartialCheck {
    pub of: &'static str,
    pub wrt: &'static str,
    pub comparison: Comparison,
}

impl BrachistochroneOde {
    /// Checks every output/input block of the analytic partials at `input`.
    ///
    /// All nine `(of, wrt)` pairs are checked, including those with no
    /// declared block, whose analytic value is zero. This also verifies that
    /// no output depends on an input at another node.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` does not match the ODE's layout.
    pub fn check_partials(
        &self,
        input: &Input,
        config: &CheckConfig,
    ) -> Result<Vec<PartialCheck>, Error> {
        self.validate(input)?;

        let n = self.num_nodes;
        let g_values = input.g.values();
        let flat: Vec<f64> = [input.v.as_slice(), &input.theta, g_values].concat();

        let rates_at = |x: &[f64]| -> Result<Vec<f64>, Error> {
            let (v, rest) = x.split_at(n);
            let (theta, g) = rest.split_at(n);
            let g = match self.gravity {
                Shape::Scalar => Gravity::Scalar(g[0]),
                Shape::PerNode => Gravity::PerNode(g.to_vec()),
            };
            let rates = self.call(&Input {
                v: v.to_vec(),
                theta: theta.to_vec(),
                g,
            })?;
            Ok([rates.xdot, rates.ydot, rates.vdot].concat())
        };

        let numeric = check::central_difference(rates_at, &flat, config.step())?;
        let partials = self.partials(input)?;

        let columns = [("v", 0, n), ("theta", n, n), ("g", 2 * n, g_values.len())];
        let mut checks = Vec::with_capacity(OUTPUT_NAMES.len() * columns.len());

        for (k, of) in OUTPUT_NAMES.into_iter().enumerate() {
            let rows = &numeric[k * n..(k + 1) * n];
            for (wrt, start, width) in columns {
                let numeric_block: Vec<Vec<f64>> = rows
                    .iter()
                    .map(|row| row[start..start + width].to_vec())
                    .collect();
                let analytic_block = partials
                    .get(of, wrt)
                    .map_or_else(|| vec![vec![0.0; width]; n], |block| block.to_dense());

                let comparison = check::compare(&analytic_block, &numeric_block, config)?;
                debug!(of, wrt, passed = comparison.passed, "checked partials");
                checks.push(PartialCheck {
                    of,
                    wrt,
                    comparison,
                });
            }
        }

        Ok(checks)
    }
}
