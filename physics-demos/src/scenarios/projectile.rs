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
//! Projectile launched from a height, bouncing along the floor

use super::{
    check_count, check_dt, check_finite, check_non_negative, check_positive, check_unit_interval, invalid, unknown,
    Scenario,
};
use crate::boundary::{FloorBounce, TravelLimit};
use crate::components::{Position, Velocity};
use crate::error::ScenarioError;
use crate::forces::{UniformGravity, DEFAULT_GRAVITY};
use crate::history::{HistoryConfig, Quantity, DEFAULT_CAPACITY};
use crate::integration::ExplicitEulerIntegrator;
use crate::report::InfoStyle;
use crate::simulation::Simulation;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

const NAME: &str = "projectile";
const TRAIL_CAPACITY: usize = 1000;

/// Launch from `(-length/2, height)` at `angle` degrees above horizontal
///
/// The ball bounces off the floor with `restitution` and the run ends once
/// it travels past `x = length/2`, or after `max_bounces` bounces when that
/// is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    /// Launch speed (m/s)
    pub speed: f64,
    /// Launch height (m)
    pub height: f64,
    /// Length of the floor (m)
    pub length: f64,
    /// Launch angle in degrees
    pub angle: f64,
    /// Coefficient of restitution of the floor
    pub restitution: f64,
    /// Ball radius (m)
    pub ball_radius: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Timestep (s)
    pub dt: f64,
    /// Stop after this many bounces; 0 for no limit
    pub max_bounces: u32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        ProjectileParams {
            speed: 5.0,
            height: 15.0,
            length: 50.0,
            angle: 45.0,
            restitution: 0.8,
            ball_radius: 1.0,
            gravity: DEFAULT_GRAVITY,
            dt: 0.01,
            max_bounces: 0,
        }
    }
}

impl Scenario for ProjectileParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::X, Quantity::Y]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("speed", self.speed),
            ("height", self.height),
            ("length", self.length),
            ("angle", self.angle),
            ("restitution", self.restitution),
            ("ball_radius", self.ball_radius),
            ("gravity", self.gravity),
            ("dt", self.dt),
            ("max_bounces", f64::from(self.max_bounces)),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "speed" => self.speed = value,
            "height" => self.height = value,
            "length" => self.length = value,
            "angle" => self.angle = value,
            "restitution" => self.restitution = value,
            "ball_radius" => self.ball_radius = value,
            "gravity" => self.gravity = value,
            "dt" => self.dt = value,
            "max_bounces" => self.max_bounces = check_count("max_bounces", value)?,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("speed", self.speed)?;
        check_non_negative("height", self.height)?;
        check_positive("length", self.length)?;
        check_finite("angle", self.angle)?;
        // The run only ends once the ball crosses the far edge
        if self.angle.to_radians().cos() <= 1e-9 {
            return Err(invalid("angle", self.angle, "must launch the ball forward"));
        }
        check_unit_interval("restitution", self.restitution)?;
        check_non_negative("ball_radius", self.ball_radius)?;
        check_non_negative("gravity", self.gravity)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        self.validate()?;

        let half = self.length / 2.0;
        let initial = KinematicState::new(
            Position::new(-half, self.height, 0.0),
            Velocity::from_polar(self.speed, self.angle.to_radians()),
        );

        let mut floor = FloorBounce::new(-self.ball_radius, self.ball_radius, self.restitution);
        if self.max_bounces > 0 {
            floor = floor.with_max_bounces(self.max_bounces);
        }

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(UniformGravity::new(self.gravity)),
        )
        .with_boundary(floor)
        .with_boundary(TravelLimit::new(half))
        .with_history(HistoryConfig::new(Some(DEFAULT_CAPACITY), Some(TRAIL_CAPACITY)))
        .with_info_style(InfoStyle::Projectile))
    }
}
