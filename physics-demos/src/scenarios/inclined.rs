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
//! Projectile launched from ground level, tracked until it lands

use super::{check_dt, check_finite, check_non_negative, check_positive, unknown, Scenario};
use crate::boundary::FloorStop;
use crate::components::{Position, Velocity};
use crate::error::ScenarioError;
use crate::forces::{UniformGravity, DEFAULT_GRAVITY};
use crate::history::Quantity;
use crate::integration::ExplicitEulerIntegrator;
use crate::report::InfoStyle;
use crate::simulation::Simulation;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

const NAME: &str = "inclined";

/// Launch from `(-length/2, 0)`; the run ends when the ball drops to
/// `y <= -ball_radius`
///
/// Chart with [`Quantity::Range`] and
/// [`Quantity::Rise`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclinedParams {
    /// Launch speed (m/s)
    pub speed: f64,
    /// Launch angle in degrees
    pub angle: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Ball radius (m)
    pub ball_radius: f64,
    /// Length of the floor (m)
    pub length: f64,
    /// Timestep (s)
    pub dt: f64,
}

impl Default for InclinedParams {
    fn default() -> Self {
        InclinedParams {
            speed: 30.0,
            angle: 30.0,
            gravity: DEFAULT_GRAVITY,
            ball_radius: 1.0,
            length: 100.0,
            dt: 0.02,
        }
    }
}

impl InclinedParams {
    /// Flat-ground range `v² sin 2θ / g`, ignoring the ball radius
    pub fn ideal_range(&self) -> f64 {
        self.speed * self.speed * (2.0 * self.angle.to_radians()).sin() / self.gravity
    }

    /// Apex height above the launch point, `(v sin θ)² / 2g`
    pub fn ideal_apex(&self) -> f64 {
        let vy = self.speed * self.angle.to_radians().sin();
        vy * vy / (2.0 * self.gravity)
    }
}

impl Scenario for InclinedParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::Range, Quantity::Rise]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("speed", self.speed),
            ("angle", self.angle),
            ("gravity", self.gravity),
            ("ball_radius", self.ball_radius),
            ("length", self.length),
            ("dt", self.dt),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "speed" => self.speed = value,
            "angle" => self.angle = value,
            "gravity" => self.gravity = value,
            "ball_radius" => self.ball_radius = value,
            "length" => self.length = value,
            "dt" => self.dt = value,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("speed", self.speed)?;
        check_finite("angle", self.angle)?;
        check_positive("gravity", self.gravity)?;
        check_non_negative("ball_radius", self.ball_radius)?;
        check_positive("length", self.length)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        self.validate()?;

        let initial = KinematicState::new(
            Position::new(-self.length / 2.0, 0.0, 0.0),
            Velocity::from_polar(self.speed, self.angle.to_radians()),
        );

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(UniformGravity::new(self.gravity)),
        )
        .with_boundary(FloorStop::new(-self.ball_radius, 0.0))
        .with_info_style(InfoStyle::Inclined))
    }
}
