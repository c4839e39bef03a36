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
//! The six demos
//!
//! Each demo is a plain parameter struct with the gallery's defaults. A
//! scenario validates its parameters, then wires the matching force law,
//! boundaries and history capacities into a [`Simulation`].
//!
//! [`ScenarioConfig`] wraps the six structs in one serde-tagged enum so a
//! TOML file can pick a demo by name:
//!
//! ```toml
//! [scenario]
//! demo = "projectile"
//! angle = 60.0
//! restitution = 0.5
//! ```

use crate::error::ScenarioError;
use crate::history::Quantity;
use crate::integration::check_timestep;
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};

mod circular;
mod free_fall;
mod inclined;
mod oscillator;
mod projectile;
mod vertical_circle;

pub use circular::CircularParams;
pub use free_fall::FreeFallParams;
pub use inclined::InclinedParams;
pub use oscillator::OscillatorParams;
pub use projectile::ProjectileParams;
pub use vertical_circle::VerticalCircleParams;

/// A configurable demo
pub trait Scenario {
    /// Demo name as used on the command line
    fn name(&self) -> &'static str;

    /// Quantities the demo charts by default
    fn chart_series(&self) -> &'static [Quantity];

    /// Current parameter values, in a stable order
    fn params(&self) -> Vec<(&'static str, f64)>;

    /// Set one parameter by name
    ///
    /// The value is not validated until [`Scenario::validate`] or
    /// [`Scenario::build`] runs.
    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError>;

    /// Reject parameter combinations the demo cannot run
    fn validate(&self) -> Result<(), ScenarioError>;

    /// Validate and assemble a ready-to-start simulation
    fn build(&self) -> Result<Simulation, ScenarioError>;

    /// How long to simulate when the demo has no natural end
    fn default_duration(&self) -> Option<f64> {
        None
    }
}

/// Any one of the demos, tagged by `demo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "demo", rename_all = "kebab-case")]
pub enum ScenarioConfig {
    /// Ball launched from a height, bouncing along the floor
    Projectile(ProjectileParams),
    /// Launch from ground level until it lands
    Inclined(InclinedParams),
    /// Drop from rest until floor contact
    FreeFall(FreeFallParams),
    /// Uniform circular motion
    Circular(CircularParams),
    /// Damped harmonic oscillator
    Oscillator(OscillatorParams),
    /// Motion around a vertical circle under gravity
    VerticalCircle(VerticalCircleParams),
}

impl ScenarioConfig {
    /// Every demo name, in display order
    pub const NAMES: [&'static str; 6] = [
        "projectile",
        "inclined",
        "free-fall",
        "circular",
        "oscillator",
        "vertical-circle",
    ];

    /// Default parameters for the named demo
    pub fn from_name(name: &str) -> Result<Self, ScenarioError> {
        let config = match name {
            "projectile" => ScenarioConfig::Projectile(ProjectileParams::default()),
            "inclined" => ScenarioConfig::Inclined(InclinedParams::default()),
            "free-fall" => ScenarioConfig::FreeFall(FreeFallParams::default()),
            "circular" => ScenarioConfig::Circular(CircularParams::default()),
            "oscillator" => ScenarioConfig::Oscillator(OscillatorParams::default()),
            "vertical-circle" => ScenarioConfig::VerticalCircle(VerticalCircleParams::default()),
            other => return Err(ScenarioError::UnknownDemo(other.to_string())),
        };
        Ok(config)
    }

    /// Borrow the wrapped demo
    pub fn scenario(&self) -> &dyn Scenario {
        match self {
            ScenarioConfig::Projectile(p) => p,
            ScenarioConfig::Inclined(p) => p,
            ScenarioConfig::FreeFall(p) => p,
            ScenarioConfig::Circular(p) => p,
            ScenarioConfig::Oscillator(p) => p,
            ScenarioConfig::VerticalCircle(p) => p,
        }
    }

    /// Mutably borrow the wrapped demo
    pub fn scenario_mut(&mut self) -> &mut dyn Scenario {
        match self {
            ScenarioConfig::Projectile(p) => p,
            ScenarioConfig::Inclined(p) => p,
            ScenarioConfig::FreeFall(p) => p,
            ScenarioConfig::Circular(p) => p,
            ScenarioConfig::Oscillator(p) => p,
            ScenarioConfig::VerticalCircle(p) => p,
        }
    }

    /// Demo name
    pub fn name(&self) -> &'static str {
        self.scenario().name()
    }

    /// See [`Scenario::chart_series`]
    pub fn chart_series(&self) -> &'static [Quantity] {
        self.scenario().chart_series()
    }

    /// See [`Scenario::params`]
    pub fn params(&self) -> Vec<(&'static str, f64)> {
        self.scenario().params()
    }

    /// See [`Scenario::set_param`]
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<(), ScenarioError> {
        self.scenario_mut().set_param(name, value)
    }

    /// See [`Scenario::validate`]
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.scenario().validate()
    }

    /// See [`Scenario::build`]
    pub fn build(&self) -> Result<Simulation, ScenarioError> {
        self.scenario().build()
    }

    /// See [`Scenario::default_duration`]
    pub fn default_duration(&self) -> Option<f64> {
        self.scenario().default_duration()
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> ScenarioError {
    ScenarioError::InvalidParameter { name, value, reason }
}

fn unknown(demo: &'static str, name: &str) -> ScenarioError {
    ScenarioError::UnknownParameter {
        demo,
        name: name.to_string(),
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite"))
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be positive"))
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must not be negative"))
    }
}

pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    check_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, value, "must be between 0 and 1"))
    }
}

/// Whole, non-negative count that fits in a `u32`
pub(crate) fn check_count(name: &'static str, value: f64) -> Result<u32, ScenarioError> {
    check_non_negative(name, value)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(invalid(name, value, "must be a whole number"));
    }
    Ok(value as u32)
}

pub(crate) fn check_dt(dt: f64) -> Result<(), ScenarioError> {
    check_timestep(dt)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in ScenarioConfig::NAMES {
            let config = ScenarioConfig::from_name(name).unwrap();
            assert_eq!(config.name(), name);
            assert!(config.validate().is_ok(), "{} defaults should validate", name);
        }
    }

    #[test]
    fn test_unknown_demo() {
        assert_eq!(
            ScenarioConfig::from_name("pendulum"),
            Err(ScenarioError::UnknownDemo("pendulum".to_string()))
        );
    }

    #[test]
    fn test_set_param_round_trips_through_params() {
        let mut config = ScenarioConfig::from_name("free-fall").unwrap();
        config.set_param("height", 20.0).unwrap();
        assert!(config.params().contains(&("height", 20.0)));
        assert!(matches!(
            config.set_param("angle", 1.0),
            Err(ScenarioError::UnknownParameter { demo: "free-fall", .. })
        ));
    }

    #[test]
    fn test_timestep_is_validated() {
        let mut config = ScenarioConfig::from_name("circular").unwrap();
        config.set_param("dt", 0.0).unwrap();
        assert!(matches!(config.validate(), Err(ScenarioError::Timestep(_))));
        config.set_param("dt", 2.0).unwrap();
        assert!(matches!(config.build(), Err(ScenarioError::Timestep(_))));
    }

    #[test]
    fn test_helpers() {
        assert!(check_positive("x", 1.0).is_ok());
        assert!(check_positive("x", 0.0).is_err());
        assert!(check_non_negative("x", 0.0).is_ok());
        assert!(check_non_negative("x", f64::NAN).is_err());
        assert!(check_unit_interval("e", 1.0).is_ok());
        assert!(check_unit_interval("e", 1.01).is_err());
        assert_eq!(
            check_finite("angle", f64::INFINITY),
            Err(invalid("angle", f64::INFINITY, "must be finite"))
        );
    }
}
