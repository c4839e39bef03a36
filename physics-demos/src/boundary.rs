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
//! Boundary and termination predicates
//!
//! After every integration step the simulation hands the previous and the
//! new state to its boundaries. A boundary may leave the state alone,
//! clamp it back onto a surface and reflect the normal velocity, or end
//! the run.

use crate::state::KinematicState;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Slack used when comparing accumulated time against a limit
const TIME_EPSILON: f64 = 1e-9;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The body came to rest on the floor
    FloorContact,
    /// The body bounced the configured number of times
    BounceLimit,
    /// The body travelled past the horizontal limit
    TravelLimit,
    /// The body completed the configured number of revolutions
    RevolutionLimit,
    /// The configured duration elapsed
    TimeLimit,
    /// Position or velocity became NaN or infinite
    NonFinite,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::FloorContact => "floor contact",
            StopReason::BounceLimit => "bounce limit",
            StopReason::TravelLimit => "travel limit",
            StopReason::RevolutionLimit => "revolution limit",
            StopReason::TimeLimit => "time limit",
            StopReason::NonFinite => "non-finite state",
        };
        f.write_str(text)
    }
}

/// Result of applying a boundary to one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// Nothing happened
    Continue,
    /// The body was clamped to a surface and reflected
    Bounced {
        /// Bounces so far, including this one
        count: u32,
    },
    /// The run is over
    Stopped(StopReason),
}

/// Per-step boundary check
pub trait Boundary: Send + Sync {
    /// Get a descriptive name for this boundary
    fn name(&self) -> &str;

    /// Inspect the step from `previous` to `state`, possibly correcting `state`
    fn apply(&mut self, previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome;

    /// Forget any counters accumulated during a run
    fn reset(&mut self) {}

    /// Bounces recorded since the last reset
    fn bounces(&self) -> u32 {
        0
    }
}

/// Floor that reflects the body with a restitution coefficient
///
/// Contact happens when the bottom of a ball of `radius` reaches `floor_y`
/// while moving down. The ball is clamped onto the floor surface and
/// `v_y' = -e v_y`; the other velocity components are untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorBounce {
    floor_y: f64,
    radius: f64,
    restitution: f64,
    max_bounces: Option<u32>,
    bounces: u32,
}

impl FloorBounce {
    /// Create a bouncing floor
    ///
    /// # Panics
    ///
    /// Panics if `restitution` is outside `[0, 1]` or `radius` is negative
    pub fn new(floor_y: f64, radius: f64, restitution: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&restitution),
            "Restitution must be between 0 and 1"
        );
        assert!(radius >= 0.0 && radius.is_finite(), "Radius must be non-negative and finite");
        FloorBounce {
            floor_y,
            radius,
            restitution,
            max_bounces: None,
            bounces: 0,
        }
    }

    /// Stop the run once `max` bounces have happened
    pub fn with_max_bounces(mut self, max: u32) -> Self {
        self.max_bounces = Some(max);
        self
    }
}

impl Boundary for FloorBounce {
    fn name(&self) -> &str {
        "floor-bounce"
    }

    fn apply(&mut self, _previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        let gap = state.position.y() - self.floor_y;
        if gap > self.radius || state.velocity.dy() >= 0.0 {
            return BoundaryOutcome::Continue;
        }

        self.bounces += 1;
        state.position.set_y(self.floor_y + self.radius);
        state.velocity.set_dy(-self.restitution * state.velocity.dy());
        debug!(bounce = self.bounces, x = state.position.x(), time = state.time, "bounce");

        match self.max_bounces {
            Some(max) if self.bounces >= max => BoundaryOutcome::Stopped(StopReason::BounceLimit),
            _ => BoundaryOutcome::Bounced { count: self.bounces },
        }
    }

    fn reset(&mut self) {
        self.bounces = 0;
    }

    fn bounces(&self) -> u32 {
        self.bounces
    }
}

/// Floor that ends the run on contact
///
/// The body stops once `y - floor_y <= contact_height` and is clamped to
/// exactly `floor_y + contact_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorStop {
    floor_y: f64,
    contact_height: f64,
}

impl FloorStop {
    /// Create a stopping floor
    pub fn new(floor_y: f64, contact_height: f64) -> Self {
        FloorStop {
            floor_y,
            contact_height,
        }
    }

    /// Height at which the body rests after contact
    pub fn rest_height(&self) -> f64 {
        self.floor_y + self.contact_height
    }
}

impl Boundary for FloorStop {
    fn name(&self) -> &str {
        "floor-stop"
    }

    fn apply(&mut self, _previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        if state.position.y() - self.floor_y > self.contact_height {
            return BoundaryOutcome::Continue;
        }
        state.position.set_y(self.rest_height());
        BoundaryOutcome::Stopped(StopReason::FloorContact)
    }
}

/// Ends the run once the body passes `x > limit`
#[derive(Debug, Clone, PartialEq)]
pub struct TravelLimit {
    limit: f64,
}

impl TravelLimit {
    /// Stop when x exceeds `limit`
    pub fn new(limit: f64) -> Self {
        TravelLimit { limit }
    }
}

impl Boundary for TravelLimit {
    fn name(&self) -> &str {
        "travel-limit"
    }

    fn apply(&mut self, _previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        if state.position.x() > self.limit {
            BoundaryOutcome::Stopped(StopReason::TravelLimit)
        } else {
            BoundaryOutcome::Continue
        }
    }
}

/// Counts revolutions about the origin and ends the run after `max`
///
/// A revolution is counted each time the body crosses from `x > 0` to
/// `x < 0` between two consecutive states.
#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionLimit {
    max: u32,
    revolutions: u32,
}

impl RevolutionLimit {
    /// Stop after `max` revolutions
    pub fn new(max: u32) -> Self {
        RevolutionLimit { max, revolutions: 0 }
    }

    /// Revolutions completed since the last reset
    pub fn revolutions(&self) -> u32 {
        self.revolutions
    }
}

impl Boundary for RevolutionLimit {
    fn name(&self) -> &str {
        "revolution-limit"
    }

    fn apply(&mut self, previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        if previous.position.x() > 0.0 && state.position.x() < 0.0 {
            self.revolutions += 1;
            debug!(revolution = self.revolutions, time = state.time, "revolution");
        }
        if self.revolutions >= self.max {
            BoundaryOutcome::Stopped(StopReason::RevolutionLimit)
        } else {
            BoundaryOutcome::Continue
        }
    }

    fn reset(&mut self) {
        self.revolutions = 0;
    }
}

/// Ends the run once `duration` seconds have been simulated
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLimit {
    duration: f64,
}

impl TimeLimit {
    /// Stop at `t >= duration`
    pub fn new(duration: f64) -> Self {
        TimeLimit { duration }
    }
}

impl Boundary for TimeLimit {
    fn name(&self) -> &str {
        "time-limit"
    }

    fn apply(&mut self, _previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        if state.time + TIME_EPSILON >= self.duration {
            BoundaryOutcome::Stopped(StopReason::TimeLimit)
        } else {
            BoundaryOutcome::Continue
        }
    }
}

/// Ordered collection of boundaries
///
/// Every boundary sees every step, in insertion order, so a bounce is
/// applied before a later travel check reads the state. The first stop
/// reported wins.
#[derive(Default)]
pub struct BoundarySet {
    boundaries: Vec<Box<dyn Boundary>>,
}

impl BoundarySet {
    /// Create an empty set (the run never ends on its own)
    pub fn new() -> Self {
        BoundarySet {
            boundaries: Vec::new(),
        }
    }

    /// Append a boundary
    pub fn push(&mut self, boundary: Box<dyn Boundary>) {
        self.boundaries.push(boundary);
    }

    /// Number of boundaries in the set
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether the set has no boundaries
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Names of the boundaries in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.boundaries.iter().map(|b| b.name()).collect()
    }

    /// Apply every boundary to the step
    pub fn apply(&mut self, previous: &KinematicState, state: &mut KinematicState) -> BoundaryOutcome {
        let mut outcome = BoundaryOutcome::Continue;

        for boundary in &mut self.boundaries {
            match boundary.apply(previous, state) {
                BoundaryOutcome::Stopped(reason) => {
                    if !matches!(outcome, BoundaryOutcome::Stopped(_)) {
                        outcome = BoundaryOutcome::Stopped(reason);
                    }
                }
                BoundaryOutcome::Bounced { count } => {
                    if outcome == BoundaryOutcome::Continue {
                        outcome = BoundaryOutcome::Bounced { count };
                    }
                }
                BoundaryOutcome::Continue => {}
            }
        }

        outcome
    }

    /// Reset every boundary
    pub fn reset(&mut self) {
        for boundary in &mut self.boundaries {
            boundary.reset();
        }
    }

    /// Total bounces across all boundaries
    pub fn bounces(&self) -> u32 {
        self.boundaries.iter().map(|b| b.bounces()).sum()
    }
}
