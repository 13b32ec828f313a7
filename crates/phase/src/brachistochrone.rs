//! The brachistochrone phase: the minimum-time path for a bead from `(0, 10)`
//! to `(10, 5)`.

use std::f64::consts::PI;

use descent_core::{Bounds, Model};
use descent_models::brachistochrone::{self, BrachistochroneOde, Input, Rates};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Time},
    time::second,
};

use crate::{
    ControlOptions, GaussLobatto, InterpolateError, Interpolant, Loc, NodeSubset, Phase,
    StateOptions, TimeOptions,
};

/// Errors that can occur when building or evaluating the initial guess.
#[derive(Debug, Error)]
pub enum GuessError {
    #[error("could not interpolate the guess")]
    Interpolate(#[from] InterpolateError),

    #[error("could not evaluate the ODE")]
    Ode(#[from] brachistochrone::Error),
}

/// Declares the brachistochrone phase on `transcription`.
///
/// Time starts fixed at zero with a duration bounded to `[0.5, 10]` s. The
/// position states are fixed at both ends, speed only at the start. The wire
/// angle is a control bounded to `[0, π]`, and final time is minimized.
#[must_use]
pub fn phase(transcription: GaussLobatto) -> Phase {
    let lower = Time::new::<second>(0.5);
    let upper = Time::new::<second>(10.0);

    // Known-good values, unwrap is safe
    let theta_bounds = Bounds::between(0.0, PI).unwrap();

    Phase::new(transcription)
        .set_time_options(TimeOptions {
            fix_initial: true,
            duration_bounds: Some((lower, upper)),
            ..TimeOptions::default()
        })
        .add_state(
            StateOptions::new("x", "m")
                .fix_initial(true)
                .fix_final(true)
                .rate_source("xdot"),
        )
        .add_state(
            StateOptions::new("y", "m")
                .fix_initial(true)
                .fix_final(true)
                .rate_source("ydot"),
        )
        .add_state(
            StateOptions::new("v", "m/s")
                .fix_initial(true)
                .fix_final(false)
                .rate_source("vdot")
                .targets(["v"]),
        )
        .add_control(
            ControlOptions::new("theta", "rad")
                .bounds(theta_bounds)
                .targets(["theta"]),
        )
        .add_objective("time", Loc::Final)
}

/// Starting values for the phase's design variables, in SI units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialGuess {
    /// Horizontal position at the state input nodes.
    pub x: Vec<f64>,

    /// Vertical position at the state input nodes.
    pub y: Vec<f64>,

    /// Speed at the state input nodes.
    pub v: Vec<f64>,

    /// Wire angle at the control input nodes, in radians.
    pub theta: Vec<f64>,
}

/// Builds the guess: straight lines from `(0, 10)` to `(10, 5)`, speed
/// rising from 0 to 5 m/s, and a constant 90° wire.
///
/// # Errors
///
/// Never fails for a phase built by [`phase`]; the error is kept for
/// consistency with [`Phase::interpolate`].
pub fn initial_guess(phase: &Phase) -> Result<InitialGuess, InterpolateError> {
    let theta = [90.0, 90.0].map(|deg| Angle::new::<degree>(deg).get::<radian>());

    Ok(InitialGuess {
        x: phase.interpolate(&[0.0, 10.0], NodeSubset::StateInput)?,
        y: phase.interpolate(&[10.0, 5.0], NodeSubset::StateInput)?,
        v: phase.interpolate(&[0.0, 5.0], NodeSubset::StateInput)?,
        theta: phase.interpolate(&theta, NodeSubset::ControlInput)?,
    })
}

/// The guess expanded onto every node, with the ODE rates there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeValues {
    pub ptau: Vec<f64>,

    /// Node times, in seconds.
    pub time: Vec<f64>,

    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub v: Vec<f64>,
    pub theta: Vec<f64>,
    pub xdot: Vec<f64>,
    pub ydot: Vec<f64>,
    pub vdot: Vec<f64>,
}

impl NodeValues {
    /// Returns the ODE input these node values were evaluated with.
    #[must_use]
    pub fn ode_input(&self) -> Input {
        Input::new(self.v.clone(), self.theta.clone())
    }
}

/// Interpolates `guess` onto all nodes of `phase` and evaluates `ode` there.
///
/// # Errors
///
/// Returns an error if the guess does not match the phase's input nodes, or
/// if `ode` was built for a different node count.
pub fn evaluate_guess(
    phase: &Phase,
    ode: &BrachistochroneOde,
    guess: &InitialGuess,
) -> Result<NodeValues, GuessError> {
    let grid = phase.grid();
    let ptau = grid.ptau(NodeSubset::All);
    let state_tau = grid.ptau(NodeSubset::StateInput);
    let control_tau = grid.ptau(NodeSubset::ControlInput);

    let expand = |tau: &[f64], values: &[f64]| -> Result<Vec<f64>, InterpolateError> {
        Interpolant::new(tau.to_vec(), values.to_vec())?.eval_all(&ptau)
    };

    let x = expand(&state_tau, &guess.x)?;
    let y = expand(&state_tau, &guess.y)?;
    let v = expand(&state_tau, &guess.v)?;
    let theta = expand(&control_tau, &guess.theta)?;

    let Rates { xdot, ydot, vdot } = ode.call(&Input::new(v.clone(), theta.clone()))?;
    let time_options = phase.time_options();
    let time = ptau
        .iter()
        .map(|&tau| time_options.time_at(tau).get::<second>())
        .collect();

    debug!(nodes = ptau.len(), "evaluated guess on all nodes");

    Ok(NodeValues {
        ptau,
        time,
        x,
        y,
        v,
        theta,
        xdot,
        ydot,
        vdot,
    })
}
