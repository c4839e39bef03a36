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
//! Readouts and exports
//!
//! Info lines reproduce the one-line status text each demo shows next to
//! its scene. Chart series are exported as CSV (one column per quantity)
//! or as a JSON document holding the run summary and the series.

use crate::components::Position;
use crate::history::{History, Quantity, Sample};
use crate::simulation::{RunSummary, Simulation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Which fields an info line shows, and at what precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoStyle {
    /// Time, position and speed to three decimals
    #[default]
    Projectile,
    /// Time, horizontal range and height to two decimals
    Inclined,
    /// Time, height and signed vertical velocity to three decimals
    FreeFall,
    /// Time, speed and acceleration magnitude
    Circular,
    /// Time, displacement, velocity and acceleration along x
    Oscillator,
    /// Time, speed, tangential and normal acceleration
    VerticalCircle,
}

impl InfoStyle {
    /// Format `sample` for display; `origin` is the launch point of the run
    pub fn format(&self, sample: &Sample, origin: &Position) -> String {
        let t = sample.time;
        let position = &sample.position;
        match self {
            InfoStyle::Projectile => format!(
                "t = {:.3} s, x = {:.3} m, y = {:.3} m, v = {:.3} m/s",
                t,
                position.x(),
                position.y(),
                sample.speed
            ),
            InfoStyle::Inclined => format!(
                "t = {:.2} s, x = {:.2} m, y = {:.2} m",
                t,
                position.x() - origin.x(),
                position.y()
            ),
            InfoStyle::FreeFall => format!(
                "t = {:.3} s, y = {:.3} m, v = {:.3} m/s",
                t,
                position.y(),
                sample.velocity.dy()
            ),
            InfoStyle::Circular => format!(
                "t = {:.2} s, v = {:.2} m/s, a = {:.2} m/s²",
                t,
                sample.speed,
                sample.acceleration.magnitude()
            ),
            InfoStyle::Oscillator => format!(
                "t = {:.2} s, x = {:.2} m, v = {:.2} m/s, a = {:.2} m/s²",
                t,
                position.x(),
                sample.velocity.dx(),
                sample.acceleration.ax()
            ),
            InfoStyle::VerticalCircle => format!(
                "t = {:.2} s, v = {:.2} m/s, at = {:.2} m/s², an = {:.2} m/s²",
                t,
                sample.speed,
                sample.tangential_acceleration.abs(),
                sample.normal_acceleration
            ),
        }
    }
}

/// Write the recorded samples as CSV: a `t` column then one per quantity
pub fn write_csv<W: Write>(writer: &mut W, history: &History, quantities: &[Quantity]) -> io::Result<()> {
    write!(writer, "t")?;
    for quantity in quantities {
        write!(writer, ",{}", quantity)?;
    }
    writeln!(writer)?;

    let origin = history.origin();
    for sample in history.samples().iter() {
        write!(writer, "{}", sample.time)?;
        for quantity in quantities {
            write!(writer, ",{}", quantity.value(sample, &origin))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Summary plus selected series, ready for `serde_json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Outcome of the run
    pub summary: RunSummary,
    /// `[t, value]` pairs keyed by quantity name
    pub series: BTreeMap<String, Vec<[f64; 2]>>,
}

impl RunReport {
    /// Collect the summary and the requested series of a simulation
    pub fn new(simulation: &Simulation, quantities: &[Quantity]) -> Self {
        let series = quantities
            .iter()
            .map(|q| {
                let points = simulation
                    .history()
                    .series(*q)
                    .into_iter()
                    .map(|(t, v)| [t, v])
                    .collect();
                (q.as_str().to_string(), points)
            })
            .collect();

        RunReport {
            summary: simulation.summary(),
            series,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
