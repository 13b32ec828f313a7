use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::Algorithm;

/// The optimizer name that selects SLSQP instead of ParOpt.
const SLSQP: &str = "SLSQP";

/// A single driver option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Str(String),
    Int(i64),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// The external driver the options are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// ParOpt used directly as the driver.
    ParOpt,

    /// pyOptSparse wrapping a named optimizer.
    PyOptSparse,
}

/// Driver-level options plus optimizer-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverOptions {
    pub driver: Driver,
    pub options: BTreeMap<String, OptionValue>,
    pub opt_settings: BTreeMap<String, OptionValue>,
}

impl DriverOptions {
    fn new(driver: Driver) -> Self {
        Self {
            driver,
            options: BTreeMap::new(),
            opt_settings: BTreeMap::new(),
        }
    }

    fn option(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.to_owned(), value.into());
        self
    }

    fn setting(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.opt_settings.insert(key.to_owned(), value.into());
        self
    }

    /// Options for the paraboloid problem: ParOpt running `algorithm`.
    #[must_use]
    pub fn paraboloid(algorithm: Algorithm) -> Self {
        Self::new(Driver::ParOpt).option("algorithm", algorithm.as_str())
    }

    /// Options for the trajectory problem.
    ///
    /// `optimizer` and `algorithm` are passed through unvalidated. Any
    /// optimizer other than `SLSQP` runs ParOpt; any algorithm other than
    /// `tr` selects ParOpt's interior-point method with Mehrotra barrier
    /// updates and a BFGS Hessian approximation.
    #[must_use]
    pub fn trajectory(optimizer: &str, algorithm: &str) -> Self {
        let options = Self::new(Driver::PyOptSparse);

        let options = if optimizer == SLSQP {
            options.option("optimizer", SLSQP)
        } else if algorithm == Algorithm::Tr.as_str() {
            options
                .option("optimizer", "ParOpt")
                .setting("algorithm", Algorithm::Tr.as_str())
        } else {
            options
                .option("optimizer", "ParOpt")
                .setting("algorithm", Algorithm::Ip.as_str())
                .setting("norm_type", "infinity")
                .setting("max_major_iters", 1000_i64)
                .setting("barrier_strategy", "mehrotra")
                .setting("starting_point_strategy", "affine_step")
                .setting("qn_type", "bfgs")
        };

        debug!(optimizer, algorithm, ?options, "built trajectory driver options");
        options
    }
}
