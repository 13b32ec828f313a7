//! Option dictionaries for external NLP drivers.
//!
//! The problems in this workspace are solved by an external optimizer. This
//! crate builds the options each front end hands to that optimizer:
//!
//! - [`DriverOptions::paraboloid`] — a ParOpt driver with a chosen
//!   [`Algorithm`]
//! - [`DriverOptions::trajectory`] — a pyOptSparse driver running SLSQP or
//!   ParOpt, with interior-point settings unless the trust-region algorithm
//!   is requested
//!
//! Options serialize with `serde` so they can be written out verbatim.

mod algorithm;
mod options;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use options::{Driver, DriverOptions, OptionValue};
