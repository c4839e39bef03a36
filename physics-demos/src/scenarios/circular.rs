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
//! Uniform circular motion in the horizontal plane

use super::{check_dt, check_finite, check_non_negative, check_positive, unknown, Scenario};
use crate::components::{Position, Velocity};
use crate::error::ScenarioError;
use crate::forces::CentripetalPull;
use crate::history::{HistoryConfig, Quantity};
use crate::integration::ExplicitEulerIntegrator;
use crate::report::InfoStyle;
use crate::simulation::Simulation;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

const NAME: &str = "circular";
const SAMPLE_CAPACITY: usize = 300;
const TRAIL_CAPACITY: usize = 2000;
const DEFAULT_DURATION: f64 = 10.0;

/// Ball resting on the floor, circling the vertical axis
///
/// The orbit lies in the plane `y = ball_radius`. The ball starts at
/// `(radius, ball_radius, 0)` moving along `-z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularParams {
    /// Orbit radius (m)
    pub radius: f64,
    /// Orbital speed (m/s)
    pub speed: f64,
    /// Ball radius (m)
    pub ball_radius: f64,
    /// Timestep (s)
    pub dt: f64,
}

impl Default for CircularParams {
    fn default() -> Self {
        CircularParams {
            radius: 5.0,
            speed: 10.0,
            ball_radius: 0.5,
            dt: 0.001,
        }
    }
}

impl CircularParams {
    /// Time for one revolution, `2πR / v`
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius / self.speed.abs()
    }

    /// Centripetal acceleration, `v² / R`
    pub fn centripetal_acceleration(&self) -> f64 {
        self.speed * self.speed / self.radius
    }
}

impl Scenario for CircularParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::Speed, Quantity::A]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius", self.radius),
            ("speed", self.speed),
            ("ball_radius", self.ball_radius),
            ("dt", self.dt),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "radius" => self.radius = value,
            "speed" => self.speed = value,
            "ball_radius" => self.ball_radius = value,
            "dt" => self.dt = value,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("radius", self.radius)?;
        check_finite("speed", self.speed)?;
        check_non_negative("ball_radius", self.ball_radius)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        self.validate()?;

        let center = Position::new(0.0, self.ball_radius, 0.0);
        let initial = KinematicState::new(
            Position::new(self.radius, self.ball_radius, 0.0),
            Velocity::new(0.0, 0.0, -self.speed),
        );

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(CentripetalPull::new(center, self.radius)),
        )
        .with_history(HistoryConfig::new(Some(SAMPLE_CAPACITY), Some(TRAIL_CAPACITY)))
        .with_info_style(InfoStyle::Circular))
    }

    fn default_duration(&self) -> Option<f64> {
        Some(DEFAULT_DURATION)
    }
}
