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
//! Parameter sweeps
//!
//! A sweep runs one demo once per value of a single parameter. Every
//! simulation is built before any run starts, so a bad value fails the
//! whole sweep up front. Runs are independent and execute on the rayon
//! pool when the `parallel` feature is enabled.

use crate::config::RunConfig;
use crate::error::{ScenarioError, SimulationError};
use crate::scenarios::ScenarioConfig;
use crate::simulation::{RunSummary, Simulation};
use serde::Serialize;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one run in a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Parameter value used for this run
    pub value: f64,
    /// Summary of the run, or why it failed
    #[serde(with = "outcome")]
    pub outcome: Result<RunSummary, SimulationError>,
}

/// One demo, one varied parameter
pub struct Sweep {
    parameter: String,
    max_steps: u64,
    runs: Vec<(f64, Simulation)>,
}

impl Sweep {
    /// Prepare a sweep of `parameter` over `values`
    ///
    /// # Errors
    ///
    /// Fails if the parameter does not exist or any value is invalid.
    pub fn new(base: &ScenarioConfig, parameter: &str, values: &[f64], run: RunConfig) -> Result<Self, ScenarioError> {
        let runs = values
            .iter()
            .map(|&value| {
                let mut config = base.clone();
                config.set_param(parameter, value)?;
                Ok((value, run.build(&config)?))
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?;

        Ok(Sweep {
            parameter: parameter.to_string(),
            max_steps: run.max_steps(),
            runs,
        })
    }

    /// Name of the varied parameter
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the sweep has no values
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Execute every run; results are in the order the values were given
    pub fn run(self) -> Vec<SweepPoint> {
        info!(parameter = %self.parameter, runs = self.runs.len(), "starting sweep");
        let max_steps = self.max_steps;

        #[cfg(feature = "parallel")]
        {
            self.runs
                .into_par_iter()
                .map(|(value, simulation)| run_one(value, simulation, max_steps))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.runs
                .into_iter()
                .map(|(value, simulation)| run_one(value, simulation, max_steps))
                .collect()
        }
    }
}

fn run_one(value: f64, mut simulation: Simulation, max_steps: u64) -> SweepPoint {
    SweepPoint {
        value,
        outcome: simulation.run_to_completion(max_steps),
    }
}

mod outcome {
    use super::{RunSummary, SimulationError};
    use serde::ser::SerializeMap;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        outcome: &Result<RunSummary, SimulationError>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match outcome {
            Ok(summary) => map.serialize_entry("summary", summary)?,
            Err(err) => map.serialize_entry("error", &err.to_string())?,
        }
        map.end()
    }
}
