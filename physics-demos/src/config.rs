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
//! Run configuration loaded from TOML
//!
//! ```toml
//! [run]
//! max_steps = 200000
//! duration = 30.0
//!
//! [scenario]
//! demo = "oscillator"
//! damping = 0.5
//! ```
//!
//! Both tables are optional; a missing `[scenario]` falls back to the
//! projectile demo with its defaults.

use crate::boundary::TimeLimit;
use crate::error::{ConfigError, ScenarioError};
use crate::scenarios::{ProjectileParams, ScenarioConfig};
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable naming a default config file
pub const CONFIG_ENV_VAR: &str = "PHYSICS_DEMOS_CONFIG";

/// Step budget when none is configured
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Limits applied to a headless run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Give up after this many steps
    pub max_steps: Option<u64>,
    /// Stop after this much simulated time
    pub duration: Option<f64>,
}

impl RunConfig {
    /// Configured step budget or [`DEFAULT_MAX_STEPS`]
    pub fn max_steps(&self) -> u64 {
        self.max_steps.unwrap_or(DEFAULT_MAX_STEPS)
    }

    /// Time limit for `scenario`: the configured duration, else the demo's own
    pub fn duration_for(&self, scenario: &ScenarioConfig) -> Option<f64> {
        self.duration.or_else(|| scenario.default_duration())
    }

    /// Reject a zero budget or a non-positive duration
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.max_steps == Some(0) {
            return Err(ScenarioError::InvalidParameter {
                name: "max_steps",
                value: 0.0,
                reason: "must be positive",
            });
        }
        if let Some(duration) = self.duration {
            if !(duration > 0.0 && duration.is_finite()) {
                return Err(ScenarioError::InvalidParameter {
                    name: "duration",
                    value: duration,
                    reason: "must be positive and finite",
                });
            }
        }
        Ok(())
    }

    /// Build `scenario`, adding a time limit when one applies
    pub fn build(&self, scenario: &ScenarioConfig) -> Result<Simulation, ScenarioError> {
        self.validate()?;
        let simulation = scenario.build()?;
        Ok(match self.duration_for(scenario) {
            Some(duration) => simulation.with_boundary(TimeLimit::new(duration)),
            None => simulation,
        })
    }
}

/// Contents of a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Limits for the run
    #[serde(default)]
    pub run: RunConfig,
    /// Which demo to run and its parameters
    #[serde(default = "default_scenario")]
    pub scenario: ScenarioConfig,
}

fn default_scenario() -> ScenarioConfig {
    ScenarioConfig::Projectile(ProjectileParams::default())
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            run: RunConfig::default(),
            scenario: default_scenario(),
        }
    }
}

impl DemoConfig {
    /// Defaults for the named demo
    pub fn for_demo(name: &str) -> Result<Self, ScenarioError> {
        Ok(DemoConfig {
            run: RunConfig::default(),
            scenario: ScenarioConfig::from_name(name)?,
        })
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(text)?;
        config.run.validate()?;
        config.scenario.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Build the configured simulation
    pub fn build(&self) -> Result<Simulation, ScenarioError> {
        self.run.build(&self.scenario)
    }
}
