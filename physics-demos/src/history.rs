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
//! Bounded sample history
//!
//! Every step appends a [`Sample`] of derived quantities and the current
//! position to capped ring buffers. Chart consumers pull `(t, value)`
//! series out of the history with [`History::series`].

use crate::components::{self, Acceleration, Position, Velocity};
use crate::forces::ForceLaw;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// FIFO buffer that drops its oldest entry once full
///
/// A capacity of `None` means the buffer grows without bound.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
    evicted: usize,
}

impl<T> RingBuffer<T> {
    /// Create a buffer holding at most `capacity` entries
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is `Some(0)`
    pub fn new(capacity: Option<usize>) -> Self {
        assert!(capacity != Some(0), "Ring buffer capacity must be positive");
        RingBuffer {
            items: VecDeque::with_capacity(capacity.unwrap_or(0).min(4096)),
            capacity,
            evicted: 0,
        }
    }

    /// Append an entry, evicting the oldest one if the buffer is full
    pub fn push(&mut self, item: T) {
        if let Some(capacity) = self.capacity {
            while self.items.len() >= capacity {
                self.items.pop_front();
                self.evicted += 1;
            }
        }
        self.items.push_back(item);
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer holds no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of entries, if bounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Entries dropped to make room since the last clear
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Remove every entry and reset the eviction count
    pub fn clear(&mut self) {
        self.items.clear();
        self.evicted = 0;
    }
}

/// Derived quantities recorded after one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulated time in seconds
    pub time: f64,
    /// Position after the step
    pub position: Position,
    /// Velocity after the step
    pub velocity: Velocity,
    /// Acceleration applied during the step
    pub acceleration: Acceleration,
    /// `|v|`
    pub speed: f64,
    /// Acceleration component along the path; signed when decomposed
    /// against the velocity, a magnitude when the force law splits it
    pub tangential_acceleration: f64,
    /// Magnitude of the acceleration component across the path
    pub normal_acceleration: f64,
}

impl Sample {
    /// Derive a sample from a state
    ///
    /// With the body at rest the whole acceleration counts as tangential.
    pub fn from_state(state: &KinematicState) -> Self {
        let acc = state.acceleration.as_array();
        let magnitude = state.acceleration.magnitude();
        let (tangential, normal) = match components::unit(state.velocity.as_array()) {
            Some(direction) => {
                let tangential = components::dot(acc, direction);
                let normal = (magnitude * magnitude - tangential * tangential).max(0.0).sqrt();
                (tangential, normal)
            }
            None => (magnitude, 0.0),
        };

        Sample {
            time: state.time,
            position: state.position,
            velocity: state.velocity,
            acceleration: state.acceleration,
            speed: state.speed(),
            tangential_acceleration: tangential,
            normal_acceleration: normal,
        }
    }

    /// Derive a sample, taking the tangential and normal parts from the
    /// force law when it defines its own split
    pub fn for_law(state: &KinematicState, law: &dyn ForceLaw) -> Self {
        let mut sample = Sample::from_state(state);
        if let Some(split) = law.decompose(state) {
            sample.tangential_acceleration = split.tangential;
            sample.normal_acceleration = split.normal;
        }
        sample
    }
}

/// A chartable quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// x coordinate
    X,
    /// y coordinate
    Y,
    /// z coordinate
    Z,
    /// x velocity
    Vx,
    /// y velocity
    Vy,
    /// z velocity
    Vz,
    /// Speed `|v|`
    Speed,
    /// x acceleration
    Ax,
    /// y acceleration
    Ay,
    /// Acceleration magnitude `|a|`
    A,
    /// Magnitude of the tangential acceleration
    At,
    /// Magnitude of the normal acceleration
    An,
    /// Horizontal distance from the launch point
    Range,
    /// Height above the launch point, never below zero
    Rise,
}

impl Quantity {
    /// Every quantity, in display order
    pub const ALL: [Quantity; 14] = [
        Quantity::X,
        Quantity::Y,
        Quantity::Z,
        Quantity::Vx,
        Quantity::Vy,
        Quantity::Vz,
        Quantity::Speed,
        Quantity::Ax,
        Quantity::Ay,
        Quantity::A,
        Quantity::At,
        Quantity::An,
        Quantity::Range,
        Quantity::Rise,
    ];

    /// Short name used on the command line and as a column header
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::X => "x",
            Quantity::Y => "y",
            Quantity::Z => "z",
            Quantity::Vx => "vx",
            Quantity::Vy => "vy",
            Quantity::Vz => "vz",
            Quantity::Speed => "speed",
            Quantity::Ax => "ax",
            Quantity::Ay => "ay",
            Quantity::A => "a",
            Quantity::At => "at",
            Quantity::An => "an",
            Quantity::Range => "range",
            Quantity::Rise => "rise",
        }
    }

    /// Unit of the quantity
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::X | Quantity::Y | Quantity::Z | Quantity::Range | Quantity::Rise => "m",
            Quantity::Vx | Quantity::Vy | Quantity::Vz | Quantity::Speed => "m/s",
            _ => "m/s²",
        }
    }

    /// Value of the quantity for `sample`, relative to the run's `origin`
    pub fn value(&self, sample: &Sample, origin: &Position) -> f64 {
        match self {
            Quantity::X => sample.position.x(),
            Quantity::Y => sample.position.y(),
            Quantity::Z => sample.position.z(),
            Quantity::Vx => sample.velocity.dx(),
            Quantity::Vy => sample.velocity.dy(),
            Quantity::Vz => sample.velocity.dz(),
            Quantity::Speed => sample.speed,
            Quantity::Ax => sample.acceleration.ax(),
            Quantity::Ay => sample.acceleration.ay(),
            Quantity::A => sample.acceleration.magnitude(),
            Quantity::At => sample.tangential_acceleration.abs(),
            Quantity::An => sample.normal_acceleration,
            Quantity::Range => sample.position.x() - origin.x(),
            Quantity::Rise => (sample.position.y() - origin.y()).max(0.0),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised quantity name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown quantity '{0}'")]
pub struct ParseQuantityError(pub String);

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::ALL
            .iter()
            .copied()
            .find(|q| q.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseQuantityError(s.to_string()))
    }
}

/// Samples and trail points kept when a demo does not set its own caps
///
/// Large enough to hold every default-length run whole.
pub const DEFAULT_CAPACITY: usize = 5_000;

/// Capacities for the sample and trail buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of samples kept, `None` for unbounded
    pub sample_capacity: Option<usize>,
    /// Maximum number of trail points kept, `None` for unbounded
    pub trail_capacity: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig::new(Some(DEFAULT_CAPACITY), Some(DEFAULT_CAPACITY))
    }
}

impl HistoryConfig {
    /// Sample and trail buffers with the given capacities
    pub fn new(sample_capacity: Option<usize>, trail_capacity: Option<usize>) -> Self {
        HistoryConfig {
            sample_capacity,
            trail_capacity,
        }
    }
}

/// Samples and trail of one run
#[derive(Debug, Clone)]
pub struct History {
    samples: RingBuffer<Sample>,
    trail: RingBuffer<Position>,
    origin: Position,
}

impl History {
    /// Empty history for a run starting at `origin`
    pub fn new(config: HistoryConfig, origin: Position) -> Self {
        History {
            samples: RingBuffer::new(config.sample_capacity),
            trail: RingBuffer::new(config.trail_capacity),
            origin,
        }
    }

    /// Record the state after a step
    pub fn record(&mut self, state: &KinematicState) {
        self.push(Sample::from_state(state));
    }

    /// Record an already derived sample
    pub fn push(&mut self, sample: Sample) {
        self.trail.push(sample.position);
        self.samples.push(sample);
    }

    /// Drop everything and restart from `origin`
    pub fn clear(&mut self, origin: Position) {
        self.samples.clear();
        self.trail.clear();
        self.origin = origin;
    }

    /// Recorded samples, oldest first
    pub fn samples(&self) -> &RingBuffer<Sample> {
        &self.samples
    }

    /// Recorded trail points, oldest first
    pub fn trail(&self) -> &RingBuffer<Position> {
        &self.trail
    }

    /// Initial position of the run
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(time, value)` pairs for one quantity
    pub fn series(&self, quantity: Quantity) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time, quantity.value(s, &self.origin)))
            .collect()
    }
}
