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
//! Damped harmonic oscillator along x

use super::{check_dt, check_finite, check_non_negative, check_positive, invalid, unknown, Scenario};
use crate::components::{Mass, Position, Velocity};
use crate::error::ScenarioError;
use crate::forces::SpringDamper;
use crate::history::Quantity;
use crate::integration::ExplicitEulerIntegrator;
use crate::report::InfoStyle;
use crate::simulation::Simulation;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

const NAME: &str = "oscillator";
const DEFAULT_DURATION: f64 = 60.0;

/// Mass on a spring with linear damping, released from rest at `x = amplitude`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorParams {
    /// Mass (kg)
    pub mass: f64,
    /// Initial displacement (m)
    pub amplitude: f64,
    /// Spring constant (N/m)
    pub stiffness: f64,
    /// Damping coefficient (kg/s)
    pub damping: f64,
    /// Timestep (s)
    pub dt: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        OscillatorParams {
            mass: 4.0,
            amplitude: 5.0,
            stiffness: 1.0,
            damping: 0.3,
            dt: 0.02,
        }
    }
}

impl OscillatorParams {
    /// The force law for these parameters, if they are valid
    pub fn spring(&self) -> Result<SpringDamper, ScenarioError> {
        self.validate()?;
        Ok(SpringDamper::new(Mass::new(self.mass), self.stiffness, self.damping))
    }
}

impl Scenario for OscillatorParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn chart_series(&self) -> &'static [Quantity] {
        &[Quantity::X, Quantity::Vx, Quantity::Ax]
    }

    fn params(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("mass", self.mass),
            ("amplitude", self.amplitude),
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("dt", self.dt),
        ]
    }

    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        match name {
            "mass" => self.mass = value,
            "amplitude" => self.amplitude = value,
            "stiffness" => self.stiffness = value,
            "damping" => self.damping = value,
            "dt" => self.dt = value,
            _ => return Err(unknown(NAME, name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        check_positive("mass", self.mass)?;
        if Mass::try_new(self.mass).map_or(true, |mass| mass.is_immovable()) {
            return Err(invalid("mass", self.mass, "is too small to move"));
        }
        check_finite("amplitude", self.amplitude)?;
        check_non_negative("stiffness", self.stiffness)?;
        check_non_negative("damping", self.damping)?;
        check_dt(self.dt)
    }

    fn build(&self) -> Result<Simulation, ScenarioError> {
        let spring = self.spring()?;
        let initial = KinematicState::new(Position::new(self.amplitude, 0.0, 0.0), Velocity::zero());

        Ok(Simulation::new(
            NAME,
            initial,
            Box::new(ExplicitEulerIntegrator::new(self.dt)),
            Box::new(spring),
        )
        .with_info_style(InfoStyle::Oscillator))
    }

    fn default_duration(&self) -> Option<f64> {
        Some(DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_decays() {
        let params = OscillatorParams::default();
        let spring = params.spring().unwrap();
        let mut sim = params.build().unwrap();
        sim.run_steps(3000).unwrap();

        let initial = spring.mechanical_energy(sim.initial_state());
        assert!((initial - 12.5).abs() < 1e-12);

        let mut last = initial;
        for sample in sim.history().samples().iter() {
            let mut state = KinematicState::new(sample.position, sample.velocity);
            state.time = sample.time;
            let energy = spring.mechanical_energy(&state);
            assert!(energy <= last + 1e-9, "energy rose at t = {}", sample.time);
            last = energy;
        }
        assert!(last < 0.2);
    }

    #[test]
    fn test_peaks_follow_damped_envelope() {
        let params = OscillatorParams::default();
        let mut sim = params.build().unwrap();
        sim.run_steps(3000).unwrap();

        let xs: Vec<f64> = sim.history().series(Quantity::X).into_iter().map(|p| p.1).collect();
        let peaks: Vec<f64> = xs
            .windows(3)
            .filter(|w| w[1] > w[0] && w[1] > w[2])
            .map(|w| w[1])
            .collect();
        assert!(peaks.len() >= 3);

        // Amplitude ratio per period: exp(-γ T), γ = b / 2m
        let gamma: f64 = 0.3 / 8.0;
        let omega = (0.25 - gamma * gamma).sqrt();
        let expected = (-gamma * 2.0 * std::f64::consts::PI / omega).exp();
        assert!((peaks[1] / peaks[0] - expected).abs() < 0.01);
    }

    #[test]
    fn test_undamped_spring_without_stiffness_coasts() {
        let params = OscillatorParams {
            stiffness: 0.0,
            damping: 0.0,
            ..Default::default()
        };
        let mut sim = params.build().unwrap();
        sim.run_steps(100).unwrap();
        assert_eq!(sim.state().position.x(), 5.0);
    }

    #[test]
    fn test_mass_must_be_positive() {
        for mass in [0.0, -4.0, 1e-12] {
            let mut params = OscillatorParams::default();
            params.set_param("mass", mass).unwrap();
            assert!(matches!(
                params.build(),
                Err(ScenarioError::InvalidParameter { name: "mass", .. })
            ));
        }
    }
}
