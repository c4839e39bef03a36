// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-step simulation driver
//!
//! A [`Simulation`] ties one body's state to an integrator, a force law, a
//! set of boundaries and a sample history. Each call to
//! [`Simulation::step`] runs one cycle:
//!
//! 1. integrate the state under the force law
//! 2. apply boundaries in order (bounce, clamp, stop)
//! 3. reject non-finite state
//! 4. record a sample
//!
//! The run status mirrors the start/pause/reset controls of an interactive
//! demo: stepping is a no-op unless the simulation is running.

use crate::boundary::{Boundary, BoundaryOutcome, BoundarySet, StopReason};
use crate::error::SimulationError;
use crate::forces::ForceLaw;
use crate::history::{History, HistoryConfig, Sample};
use crate::integration::Integrator;
use crate::report::InfoStyle;
use crate::state::KinematicState;
use serde::Serialize;
use tracing::{info, warn};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Initial state loaded, not started
    Ready,
    /// Stepping
    Running,
    /// Stopped by the user, can resume
    Paused,
    /// Ended by a boundary or a failure; needs a reset
    Finished(StopReason),
}

/// What a call to [`Simulation::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The simulation was not running
    Idle,
    /// One step was taken
    Advanced(BoundaryOutcome),
}

/// Result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Demo name
    pub demo: String,
    /// Steps taken
    pub steps: u64,
    /// Simulated time in seconds
    pub elapsed: f64,
    /// State after the last step
    pub final_state: KinematicState,
    /// Floor bounces
    pub bounces: u32,
    /// Why the run ended, if it did
    pub stop_reason: Option<StopReason>,
    /// Highest y reached, including the start
    pub peak_height: f64,
    /// Highest speed reached, including the start
    pub peak_speed: f64,
    /// Human-readable readout of the final state
    pub info: String,
}

/// One body, one force law, one set of boundaries
pub struct Simulation {
    name: String,
    initial: KinematicState,
    state: KinematicState,
    integrator: Box<dyn Integrator>,
    force: Box<dyn ForceLaw>,
    boundaries: BoundarySet,
    history: History,
    info_style: InfoStyle,
    status: RunStatus,
    steps: u64,
    peak_height: f64,
    peak_speed: f64,
}

impl Simulation {
    /// Create a simulation in the `Ready` state
    pub fn new(
        name: impl Into<String>,
        initial: KinematicState,
        integrator: Box<dyn Integrator>,
        force: Box<dyn ForceLaw>,
    ) -> Self {
        Simulation {
            name: name.into(),
            initial,
            state: initial,
            integrator,
            force,
            boundaries: BoundarySet::new(),
            history: History::new(HistoryConfig::default(), initial.position),
            info_style: InfoStyle::default(),
            status: RunStatus::Ready,
            steps: 0,
            peak_height: initial.position.y(),
            peak_speed: initial.speed(),
        }
    }

    /// Append a boundary; boundaries run in insertion order
    pub fn with_boundary(mut self, boundary: impl Boundary + 'static) -> Self {
        self.boundaries.push(Box::new(boundary));
        self
    }

    /// Replace the history buffers with ones of the given capacities
    pub fn with_history(mut self, config: HistoryConfig) -> Self {
        self.history = History::new(config, self.initial.position);
        self
    }

    /// Choose how [`Simulation::info_line`] formats the state
    pub fn with_info_style(mut self, style: InfoStyle) -> Self {
        self.info_style = style;
        self
    }

    /// Demo name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// State the run starts from and returns to on reset
    pub fn initial_state(&self) -> &KinematicState {
        &self.initial
    }

    /// Current status
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Recorded samples and trail
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Steps taken since the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The integrator's timestep
    pub fn timestep(&self) -> f64 {
        self.integrator.timestep()
    }

    /// Names of the configured boundaries in evaluation order
    pub fn boundary_names(&self) -> Vec<&str> {
        self.boundaries.names()
    }

    /// Name of the force law
    pub fn force_name(&self) -> &str {
        self.force.name()
    }

    /// Bounces since the last reset
    pub fn bounces(&self) -> u32 {
        self.boundaries.bounces()
    }

    /// Whether a boundary or failure ended the run
    pub fn is_finished(&self) -> bool {
        matches!(self.status, RunStatus::Finished(_))
    }

    /// Start or resume stepping; a finished run stays finished until reset
    pub fn start(&mut self) {
        if matches!(self.status, RunStatus::Ready | RunStatus::Paused) {
            self.status = RunStatus::Running;
        }
    }

    /// Pause a running simulation or resume a paused one
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            RunStatus::Running => RunStatus::Paused,
            RunStatus::Paused => RunStatus::Running,
            other => other,
        };
    }

    /// Restore the initial state, clear history and counters
    pub fn reset(&mut self) {
        self.state = self.initial;
        self.history.clear(self.initial.position);
        self.boundaries.reset();
        self.status = RunStatus::Ready;
        self.steps = 0;
        self.peak_height = self.initial.position.y();
        self.peak_speed = self.initial.speed();
    }

    /// Advance one timestep if running
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::NonFinite`] and finishes the run if the
    /// state stops being finite.
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        if self.status != RunStatus::Running {
            return Ok(StepOutcome::Idle);
        }

        let previous = self.state;
        self.integrator.step(&mut self.state, self.force.as_ref());
        let outcome = self.boundaries.apply(&previous, &mut self.state);

        if !self.state.is_valid() {
            warn!(demo = %self.name, time = previous.time, steps = self.steps, "state became non-finite");
            self.status = RunStatus::Finished(StopReason::NonFinite);
            return Err(SimulationError::NonFinite {
                time: previous.time,
                steps: self.steps,
            });
        }

        self.steps += 1;
        self.history.push(Sample::for_law(&self.state, self.force.as_ref()));
        self.peak_height = self.peak_height.max(self.state.position.y());
        self.peak_speed = self.peak_speed.max(self.state.speed());

        if let BoundaryOutcome::Stopped(reason) = outcome {
            info!(
                demo = %self.name,
                steps = self.steps,
                time = self.state.time,
                reason = %reason,
                "run finished"
            );
            self.status = RunStatus::Finished(reason);
        }

        Ok(StepOutcome::Advanced(outcome))
    }

    /// Take up to `count` steps, stopping early if the run finishes
    ///
    /// Returns the number of steps actually taken.
    pub fn run_steps(&mut self, count: u64) -> Result<u64, SimulationError> {
        self.start();
        let mut taken = 0;
        while taken < count && self.status == RunStatus::Running {
            self.step()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Step until a boundary ends the run
    ///
    /// # Errors
    ///
    /// [`SimulationError::BudgetExhausted`] if the run is still going after
    /// `max_steps` steps; [`SimulationError::NonFinite`] if the state blows up.
    pub fn run_to_completion(&mut self, max_steps: u64) -> Result<RunSummary, SimulationError> {
        self.run_steps(max_steps)?;
        if !self.is_finished() {
            return Err(SimulationError::BudgetExhausted { steps: max_steps });
        }
        Ok(self.summary())
    }

    /// Readout of the current state in the demo's format
    pub fn info_line(&self) -> String {
        let sample = Sample::for_law(&self.state, self.force.as_ref());
        self.info_style.format(&sample, &self.history.origin())
    }

    /// Summary of the run so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            demo: self.name.clone(),
            steps: self.steps,
            elapsed: self.state.time,
            final_state: self.state,
            bounces: self.bounces(),
            stop_reason: match self.status {
                RunStatus::Finished(reason) => Some(reason),
                _ => None,
            },
            peak_height: self.peak_height,
            peak_speed: self.peak_speed,
            info: self.info_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{FloorStop, TimeLimit};
    use crate::components::{Acceleration, Position, Velocity};
    use crate::forces::UniformGravity;
    use crate::integration::ExplicitEulerIntegrator;

    struct Exploding;

    impl ForceLaw for Exploding {
        fn acceleration(&self, _state: &KinematicState) -> Acceleration {
            Acceleration::new(f64::INFINITY, 0.0, 0.0)
        }

        fn name(&self) -> &str {
            "exploding"
        }
    }

    fn drop_from(height: f64) -> Simulation {
        Simulation::new(
            "drop",
            KinematicState::new(Position::new(0.0, height, 0.0), Velocity::zero()),
            Box::new(ExplicitEulerIntegrator::new(0.01)),
            Box::new(UniformGravity::new(9.8)),
        )
        .with_boundary(FloorStop::new(0.0, 0.0))
    }

    #[test]
    fn test_step_is_idle_until_started() {
        let mut sim = drop_from(10.0);
        assert_eq!(sim.status(), RunStatus::Ready);
        assert_eq!(sim.step(), Ok(StepOutcome::Idle));
        assert_eq!(sim.steps(), 0);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut sim = drop_from(10.0);
        sim.start();
        sim.step().unwrap();
        sim.toggle_pause();
        assert_eq!(sim.status(), RunStatus::Paused);
        assert_eq!(sim.step(), Ok(StepOutcome::Idle));
        sim.toggle_pause();
        assert_eq!(sim.status(), RunStatus::Running);
        sim.step().unwrap();
        assert_eq!(sim.steps(), 2);
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn test_run_to_completion_and_reset() {
        let mut sim = drop_from(10.0);
        let summary = sim.run_to_completion(10_000).unwrap();
        assert_eq!(summary.stop_reason, Some(StopReason::FloorContact));
        assert_eq!(summary.final_state.position.y(), 0.0);
        assert_eq!(summary.peak_height, 10.0);
        assert!(summary.steps > 100);
        assert!(sim.is_finished());

        // A finished run ignores start until reset
        sim.start();
        assert!(sim.is_finished());

        sim.reset();
        assert_eq!(sim.status(), RunStatus::Ready);
        assert_eq!(sim.state(), sim.initial_state());
        assert!(sim.history().is_empty());
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn test_budget_exhausted() {
        let mut sim = drop_from(1e6);
        assert_eq!(
            sim.run_to_completion(10),
            Err(SimulationError::BudgetExhausted { steps: 10 })
        );
        assert_eq!(sim.steps(), 10);
        assert_eq!(sim.status(), RunStatus::Running);
    }

    #[test]
    fn test_non_finite_state_finishes_run() {
        let mut sim = Simulation::new(
            "broken",
            KinematicState::default(),
            Box::new(ExplicitEulerIntegrator::new(0.01)),
            Box::new(Exploding),
        )
        .with_boundary(TimeLimit::new(1.0));
        sim.start();
        assert!(matches!(sim.step(), Err(SimulationError::NonFinite { steps: 0, .. })));
        assert_eq!(sim.status(), RunStatus::Finished(StopReason::NonFinite));
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_run_steps_stops_at_boundary() {
        let mut sim = Simulation::new(
            "timed",
            KinematicState::default(),
            Box::new(ExplicitEulerIntegrator::new(0.1)),
            Box::new(UniformGravity::new(0.0)),
        )
        .with_boundary(TimeLimit::new(0.5));
        let taken = sim.run_steps(100).unwrap();
        assert_eq!(taken, 5);
        assert_eq!(sim.status(), RunStatus::Finished(StopReason::TimeLimit));
        assert_eq!(sim.boundary_names(), vec!["time-limit"]);
        assert_eq!(sim.force_name(), "gravity");
    }
}
