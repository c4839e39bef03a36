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
//! Ball dropped from rest

use super::{check_dt, check_non_negative, check_positive, unknown, Scenario};
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

const NAME: &str = "free-fall";

/// Gap left between the ball and the floor when it comes to rest
pub const CONTACT_MARGIN: f64 = 0.005;

/// Drop from `(0, height)` until the ball touches the floor at `y = 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFallParams {
    /// Drop height of the ball center (m)
    pub height: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Ball radius (m)
    pub ball_radius: f64,
    /// Timestep (s)
    pub dt: f64,
}

impl Default for FreeFallParams {
    fn default() -> Self {
        FreeFallParams {
            height: 15.0,
            gravity: DEFAULT_GRAVITY,
            ball_radius: 1.0,
            dt: 0.01,
        }
    }
}

impl FreeFallParams {
    /// Closed-form time to fall until contact, `√(2 (h - r - margin) / g)`
    /// with `margin` = [`CONTACT_MARGIN`]; zero if the ball starts in contact
    pub fn ideal_fall_time(&self) -> f64 {
        let drop = (self.height - self.ball_radius - CONTACT_MARGIN).max(0.0);
        (2.0 * drop / self.gravity).sqrt()
    }
}

impl Scenario for FreeFallParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::Y, Quantity::Vy]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("gravity", self.gravity),
            ("ball_radius", self.ball_radius),
            ("dt", self.dt),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "height" => self.height = value,
            "gravity" => self.gravity = value,
            "ball_radius" => self.ball_radius = value,
            "dt" => self.dt = value,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("height", self.height)?;
        check_positive("gravity", self.gravity)?;
        check_non_negative("ball_radius", self.ball_radius)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        self.validate()?;

        let initial = KinematicState::new(Position::new(0.0, self.height, 0.0), Velocity::zero());

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(UniformGravity::new(self.gravity)),
        )
        .with_boundary(FloorStop::new(0.0, self.ball_radius + CONTACT_MARGIN))
        .with_info_style(InfoStyle::FreeFall))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::StopReason;

    #[test]
    fn test_default_drop() {
        let params = FreeFallParams::default();
        let mut sim = params.build().unwrap();
        let summary = sim.run_to_completion(10_000).unwrap();

        assert_eq!(summary.stop_reason, Some(StopReason::FloorContact));
        assert_eq!(summary.steps, 169);
        assert!((summary.final_state.position.y() - 1.005).abs() < 1e-12);
        assert!((summary.elapsed - params.ideal_fall_time()).abs() < 0.02);
        assert_eq!(summary.info, "t = 1.690 s, y = 1.005 m, v = -16.562 m/s");
    }

    #[test]
    fn test_ideal_fall_time_includes_contact_margin() {
        let params = FreeFallParams::default();
        assert!((params.ideal_fall_time() - (2.0 * 13.995 / 9.8f64).sqrt()).abs() < 1e-12);

        let touching = FreeFallParams {
            height: 1.002,
            ..Default::default()
        };
        assert_eq!(touching.ideal_fall_time(), 0.0);
    }

    #[test]
    fn test_height_and_gravity_must_be_positive() {
        for (name, value) in [("height", 0.0), ("gravity", 0.0), ("height", -3.0)] {
            let mut params = FreeFallParams::default();
            params.set_param(name, value).unwrap();
            assert!(params.build().is_err(), "{} = {} should be rejected", name, value);
        }
    }

    #[test]
    fn test_started_below_contact_stops_immediately() {
        let params = FreeFallParams {
            height: 0.5,
            ..Default::default()
        };
        let mut sim = params.build().unwrap();
        let summary = sim.run_to_completion(10).unwrap();
        assert_eq!(summary.steps, 1);
        assert!((summary.final_state.position.y() - 1.005).abs() < 1e-12);
    }
}
