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
//! Error types for the demos

use std::path::PathBuf;
use thiserror::Error;

/// Problems with an integrator timestep
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestepError {
    /// Timestep is zero, negative, NaN or infinite
    #[error("Invalid timestep: {0}. Must be positive and finite.")]
    Invalid(f64),

    /// Timestep is small enough to lose precision with f64
    #[error("Timestep {0} is extremely small and may cause precision loss with f64")]
    TooSmall(f64),

    /// Timestep is large enough to make the integration unstable
    #[error("Timestep {0} is large and may cause instability")]
    TooLarge(f64),
}

/// Rejected demo parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// A parameter failed validation
    #[error("invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// What the value must satisfy
        reason: &'static str,
    },

    /// The demo has no parameter with this name
    #[error("demo '{demo}' has no parameter '{name}'")]
    UnknownParameter {
        /// Demo name
        demo: &'static str,
        /// Requested parameter name
        name: String,
    },

    /// No demo with this name exists
    #[error("unknown demo '{0}'")]
    UnknownDemo(String),

    /// The configured timestep is unusable
    #[error(transparent)]
    Timestep(#[from] TimestepError),
}

/// Failures while stepping a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Position or velocity became NaN or infinite
    #[error("state became non-finite at t = {time:.3} s after {steps} steps")]
    NonFinite {
        /// Simulated time of the failing step
        time: f64,
        /// Steps completed before the failure
        steps: u64,
    },

    /// The run did not finish within the step budget
    #[error("run did not finish within {steps} steps")]
    BudgetExhausted {
        /// Step budget that was used up
        steps: u64,
    },
}

/// Failures while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a demo configuration
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured scenario is invalid
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}
