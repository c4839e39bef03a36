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
//! Ball on a string swung around a vertical circle

use super::{check_dt, check_non_negative, check_positive, unknown, Scenario};
use crate::boundary::RevolutionLimit;
use crate::components::{Position, Velocity};
use crate::error::ScenarioError;
use crate::forces::{VerticalCircleGravity, DEFAULT_GRAVITY};
use crate::history::Quantity;
use crate::integration::ExplicitEulerIntegrator;
use crate::report::InfoStyle;
use crate::simulation::Simulation;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

const NAME: &str = "vertical-circle";
const REVOLUTIONS: u32 = 5;

/// Start at the top of a circle of `radius` about the origin, moving left
///
/// The launch speed is `speed_factor · √(gR)`; a factor of 1 is the
/// slowest speed that keeps the string taut at the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalCircleParams {
    /// Circle radius (m)
    pub radius: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Launch speed in units of `√(gR)`
    pub speed_factor: f64,
    /// Ball radius (m); only affects display
    pub ball_radius: f64,
    /// Timestep (s)
    pub dt: f64,
}

impl Default for VerticalCircleParams {
    fn default() -> Self {
        VerticalCircleParams {
            radius: 5.0,
            gravity: DEFAULT_GRAVITY,
            speed_factor: 1.0,
            ball_radius: 0.5,
            dt: 0.01,
        }
    }
}

impl VerticalCircleParams {
    /// Speed at the top of the circle
    pub fn launch_speed(&self) -> f64 {
        self.speed_factor * (self.gravity * self.radius).sqrt()
    }

    /// Speed at the bottom from energy conservation, `√(v₀² + 4gR)`
    pub fn ideal_bottom_speed(&self) -> f64 {
        let v0 = self.launch_speed();
        (v0 * v0 + 4.0 * self.gravity * self.radius).sqrt()
    }
}

impl Scenario for VerticalCircleParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::Speed, Quantity::At, Quantity::An]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius", self.radius),
            ("gravity", self.gravity),
            ("speed_factor", self.speed_factor),
            ("ball_radius", self.ball_radius),
            ("dt", self.dt),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "radius" => self.radius = value,
            "gravity" => self.gravity = value,
            "speed_factor" => self.speed_factor = value,
            "ball_radius" => self.ball_radius = value,
            "dt" => self.dt = value,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("radius", self.radius)?;
        check_positive("gravity", self.gravity)?;
        check_positive("speed_factor", self.speed_factor)?;
        check_non_negative("ball_radius", self.ball_radius)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        self.validate()?;

        let initial = KinematicState::new(
            Position::new(0.0, self.radius, 0.0),
            Velocity::new(-self.launch_speed(), 0.0, 0.0),
        );

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(VerticalCircleGravity::new(self.gravity, self.radius)),
        )
        .with_boundary(RevolutionLimit::new(REVOLUTIONS))
        .with_info_style(InfoStyle::VerticalCircle))
    }
}
