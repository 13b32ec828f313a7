//! Trajectory phase setup.
//!
//! - [`GaussLobatto`] and [`Grid`] — segment and node layout on phase tau
//! - [`Interpolant`] — piecewise-linear initial guesses on node subsets
//! - [`Phase`] — time, state, control, and objective declarations with a
//!   setup check against the ODE signature
//! - [`brachistochrone`] — the concrete bead-on-a-wire phase and its guess

mod interpolate;
mod phase;
mod transcription;

pub mod brachistochrone;

pub use interpolate::{InterpolateError, Interpolant};
pub use phase::{ControlOptions, Loc, Objective, Phase, SetupError, StateOptions, TimeOptions};
pub use transcription::{GaussLobatto, Grid, NodeSubset, TranscriptionError};
