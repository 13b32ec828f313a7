//! Declarative description of a trajectory phase.
//!
//! A [`Phase`] records the time options, states, controls, and objective of a
//! trajectory segment, plus the transcription used to discretize it. Nothing
//! is solved here; [`Phase::check`] validates the declarations against an
//! ODE's [`Signature`] so wiring mistakes surface before an optimizer runs.

use std::collections::HashSet;

use descent_core::{Bounds, Signature};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uom::si::{f64::Time, time::second};

use crate::{GaussLobatto, Grid, InterpolateError, Interpolant, NodeSubset};

/// Errors found while checking a phase against its ODE.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetupError {
    #[error("`{0}` is declared more than once")]
    DuplicateName(String),

    #[error("state `{0}` has no rate source")]
    MissingRateSource(String),

    #[error("state `{state}` uses rate source `{rate_source}`, which the ODE does not output")]
    UnknownRateSource { state: String, rate_source: String },

    #[error("`{variable}` targets `{target}`, which is not an ODE input")]
    UnknownTarget { variable: String, target: String },

    #[error("`{variable}` is in {units}, but target `{target}` expects {expected}")]
    TargetUnits {
        variable: String,
        target: String,
        units: String,
        expected: String,
    },

    #[error("duration bounds ({lower} s, {upper} s) must be finite, positive, and ordered")]
    DurationBounds { lower: f64, upper: f64 },

    #[error("the phase has no objective")]
    NoObjective,

    #[error("objective `{0}` is not time, a state, or a control")]
    UnknownObjective(String),
}

/// Where along the phase an objective is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Loc {
    Initial,
    Final,
}

/// Options for the phase's time variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeOptions {
    /// Whether the initial time is fixed rather than a design variable.
    pub fix_initial: bool,

    pub initial: Time,

    /// Initial guess for the phase duration.
    pub duration: Time,

    /// Bounds on the duration, if it is free.
    pub duration_bounds: Option<(Time, Time)>,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            fix_initial: false,
            initial: Time::new::<second>(0.0),
            duration: Time::new::<second>(1.0),
            duration_bounds: None,
        }
    }
}

impl TimeOptions {
    /// Returns the time at a phase tau, using the initial time and duration.
    #[must_use]
    pub fn time_at(&self, ptau: f64) -> Time {
        self.initial + self.duration * ((ptau + 1.0) / 2.0)
    }
}

/// A state integrated along the phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateOptions {
    pub name: String,
    pub units: String,
    pub fix_initial: bool,
    pub fix_final: bool,

    /// The ODE output that is this state's time derivative.
    pub rate_source: Option<String>,

    /// The ODE inputs this state is connected to.
    pub targets: Vec<String>,
}

impl StateOptions {
    /// Declares a free state with no rate source or targets.
    #[must_use]
    pub fn new(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            fix_initial: false,
            fix_final: false,
            rate_source: None,
            targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn fix_initial(mut self, fix: bool) -> Self {
        self.fix_initial = fix;
        self
    }

    #[must_use]
    pub fn fix_final(mut self, fix: bool) -> Self {
        self.fix_final = fix;
        self
    }

    #[must_use]
    pub fn rate_source(mut self, output: impl Into<String>) -> Self {
        self.rate_source = Some(output.into());
        self
    }

    #[must_use]
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }
}

/// A control varied along the phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOptions {
    pub name: String,
    pub units: String,
    pub bounds: Bounds,
    pub targets: Vec<String>,
}

impl ControlOptions {
    /// Declares an unbounded control with no targets.
    #[must_use]
    pub fn new(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            bounds: Bounds::unbounded(),
            targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }
}

/// The quantity an optimizer should minimize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objective {
    pub name: String,
    pub loc: Loc,
}

/// A trajectory phase declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    transcription: GaussLobatto,
    time: TimeOptions,
    states: Vec<StateOptions>,
    controls: Vec<ControlOptions>,
    objective: Option<Objective>,
}

impl Phase {
    /// Creates an empty phase using `transcription`.
    #[must_use]
    pub fn new(transcription: GaussLobatto) -> Self {
        Self {
            transcription,
            time: TimeOptions::default(),
            states: Vec::new(),
            controls: Vec::new(),
            objective: None,
        }
    }

    #[must_use]
    pub fn set_time_options(mut self, time: TimeOptions) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn add_state(mut self, state: StateOptions) -> Self {
        self.states.push(state);
        self
    }

    #[must_use]
    pub fn add_control(mut self, control: ControlOptions) -> Self {
        self.controls.push(control);
        self
    }

    #[must_use]
    pub fn add_objective(mut self, name: impl Into<String>, loc: Loc) -> Self {
        self.objective = Some(Objective {
            name: name.into(),
            loc,
        });
        self
    }

    #[must_use]
    pub fn transcription(&self) -> &GaussLobatto {
        &self.transcription
    }

    #[must_use]
    pub fn time_options(&self) -> &TimeOptions {
        &self.time
    }

    #[must_use]
    pub fn states(&self) -> &[StateOptions] {
        &self.states
    }

    #[must_use]
    pub fn controls(&self) -> &[ControlOptions] {
        &self.controls
    }

    #[must_use]
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.transcription.grid()
    }

    /// Linearly interpolates `ys`, spread evenly over the phase, onto `nodes`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpolateError::Empty`] if `ys` is empty.
    pub fn interpolate(&self, ys: &[f64], nodes: NodeSubset) -> Result<Vec<f64>, InterpolateError> {
        Interpolant::even(ys)?.eval_all(&self.grid().ptau(nodes))
    }

    /// Checks the declarations against the ODE that will be evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a repeated name, a missing or unknown
    /// rate source, an unknown or unit-mismatched target, invalid duration
    /// bounds, or a missing or unknown objective.
    pub fn check<S>(&self, ode: &S) -> Result<(), SetupError>
    where
        S: Signature + ?Sized,
    {
        let mut names = HashSet::from(["time"]);
        let declared = self
            .states
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.controls.iter().map(|c| c.name.as_str()));
        for name in declared {
            if !names.insert(name) {
                return Err(SetupError::DuplicateName(name.to_owned()));
            }
        }

        for state in &self.states {
            let rate_source = state
                .rate_source
                .as_deref()
                .ok_or_else(|| SetupError::MissingRateSource(state.name.clone()))?;
            if ode.output(rate_source).is_none() {
                return Err(SetupError::UnknownRateSource {
                    state: state.name.clone(),
                    rate_source: rate_source.to_owned(),
                });
            }
            check_targets(ode, &state.name, &state.units, &state.targets)?;
        }

        for control in &self.controls {
            check_targets(ode, &control.name, &control.units, &control.targets)?;
        }

        if let Some((lower, upper)) = self.time.duration_bounds {
            let (lower, upper) = (lower.get::<second>(), upper.get::<second>());
            if !lower.is_finite() || !upper.is_finite() || lower <= 0.0 || lower > upper {
                return Err(SetupError::DurationBounds { lower, upper });
            }
        }

        let objective = self.objective.as_ref().ok_or(SetupError::NoObjective)?;
        if !names.contains(objective.name.as_str()) {
            return Err(SetupError::UnknownObjective(objective.name.clone()));
        }

        debug!(
            states = self.states.len(),
            controls = self.controls.len(),
            nodes = self.transcription.num_segments() * self.transcription.order(),
            "phase setup checked"
        );
        Ok(())
    }
}

fn check_targets<S>(
    ode: &S,
    variable: &str,
    units: &str,
    targets: &[String],
) -> Result<(), SetupError>
where
    S: Signature + ?Sized,
{
    for target in targets {
        let input = ode.input(target).ok_or_else(|| SetupError::UnknownTarget {
            variable: variable.to_owned(),
            target: target.clone(),
        })?;
        if input.units != units {
            return Err(SetupError::TargetUnits {
                variable: variable.to_owned(),
                target: target.clone(),
                units: units.to_owned(),
                expected: input.units.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use descent_models::brachistochrone::BrachistochroneOde;

    fn bead_phase() -> Phase {
        Phase::new(GaussLobatto::default())
            .add_state(StateOptions::new("x", "m").rate_source("xdot"))
            .add_state(StateOptions::new("v", "m/s").rate_source("vdot").targets(["v"]))
            .add_control(ControlOptions::new("theta", "rad").targets(["theta"]))
            .add_objective("time", Loc::Final)
    }

    #[test]
    fn accepts_valid_wiring() {
        assert_eq!(bead_phase().check(&BrachistochroneOde::new(30)), Ok(()));
    }

    #[test]
    fn rejects_unknown_rate_source() {
        let phase = bead_phase().add_state(StateOptions::new("y", "m").rate_source("zdot"));

        assert_eq!(
            phase.check(&BrachistochroneOde::new(30)),
            Err(SetupError::UnknownRateSource {
                state: "y".into(),
                rate_source: "zdot".into(),
            })
        );
    }

    #[test]
    fn rejects_missing_rate_source() {
        let phase = bead_phase().add_state(StateOptions::new("y", "m"));

        assert_eq!(
            phase.check(&BrachistochroneOde::new(30)),
            Err(SetupError::MissingRateSource("y".into()))
        );
    }

    #[test]
    fn rejects_unknown_target_and_unit_mismatch() {
        let ode = BrachistochroneOde::new(30);

        let unknown = bead_phase().add_control(ControlOptions::new("phi", "rad").targets(["phi"]));
        assert_eq!(
            unknown.check(&ode),
            Err(SetupError::UnknownTarget {
                variable: "phi".into(),
                target: "phi".into(),
            })
        );

        let degrees = Phase::new(GaussLobatto::default())
            .add_control(ControlOptions::new("theta", "deg").targets(["theta"]))
            .add_objective("time", Loc::Final);
        assert!(matches!(
            degrees.check(&ode),
            Err(SetupError::TargetUnits { .. })
        ));
    }

    #[test]
    fn rejects_duplicates_and_objectives() {
        let ode = BrachistochroneOde::new(30);

        let duplicate = bead_phase().add_control(ControlOptions::new("x", "m"));
        assert_eq!(duplicate.check(&ode), Err(SetupError::DuplicateName("x".into())));

        let unknown = bead_phase().add_objective("energy", Loc::Final);
        assert_eq!(unknown.check(&ode), Err(SetupError::UnknownObjective("energy".into())));

        let none = Phase::new(GaussLobatto::default());
        assert_eq!(none.check(&ode), Err(SetupError::NoObjective));
    }

    #[test]
    fn rejects_bad_duration_bounds() {
        let phase = bead_phase().set_time_options(TimeOptions {
            duration_bounds: Some((Time::new::<second>(5.0), Time::new::<second>(1.0))),
            ..TimeOptions::default()
        });

        assert_eq!(
            phase.check(&BrachistochroneOde::new(30)),
            Err(SetupError::DurationBounds {
                lower: 5.0,
                upper: 1.0
            })
        );
    }

    #[test]
    fn interpolates_onto_node_subsets() {
        let phase = bead_phase();

        let x = phase.interpolate(&[0.0, 10.0], NodeSubset::StateInput).unwrap();
        assert_eq!(x.len(), 11);
        assert_relative_eq!(x[0], 0.0);
        assert_relative_eq!(x[5], 5.0, epsilon = 1e-12);
        assert_relative_eq!(x[10], 10.0);

        assert!(matches!(
            phase.interpolate(&[], NodeSubset::All),
            Err(InterpolateError::Empty)
        ));
    }

    #[test]
    fn node_times_follow_duration() {
        let time = TimeOptions {
            initial: Time::new::<second>(2.0),
            duration: Time::new::<second>(4.0),
            ..TimeOptions::default()
        };

        assert_relative_eq!(time.time_at(-1.0).get::<second>(), 2.0);
        assert_relative_eq!(time.time_at(0.0).get::<second>(), 4.0);
        assert_relative_eq!(time.time_at(1.0).get::<second>(), 6.0);
    }
}
