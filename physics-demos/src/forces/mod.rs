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
//! Force laws
//!
//! A force law maps the current kinematic state to the instantaneous
//! acceleration of the body. Each demo plugs one law into the stepper:
//!
//! - [`UniformGravity`]: constant downward pull for projectiles and free fall
//! - [`SpringDamper`]: Hooke spring with linear damping along x
//! - [`CentripetalPull`]: `|v|²/R` toward a fixed center
//! - [`VerticalCircleGravity`]: centripetal term plus the tangential share of gravity

use crate::components::Acceleration;
use crate::state::KinematicState;
use serde::{Deserialize, Serialize};

mod circular;
mod gravity;
mod spring;

pub use circular::{CentripetalPull, VerticalCircleGravity};
pub use gravity::{UniformGravity, DEFAULT_GRAVITY};
pub use spring::SpringDamper;

/// Maps kinematic state to acceleration
///
/// Implementations must be pure: the integrator may evaluate a law more than
/// once for the same state.
pub trait ForceLaw: Send + Sync {
    /// Acceleration acting on the body in `state`
    fn acceleration(&self, state: &KinematicState) -> Acceleration;

    /// Get a descriptive name for this force law
    fn name(&self) -> &str;

    /// The law's own split of the acceleration into along-path and
    /// across-path magnitudes, if it has one
    ///
    /// Laws that return `None` are decomposed against the velocity
    /// direction when sampled.
    fn decompose(&self, _state: &KinematicState) -> Option<AccelerationSplit> {
        None
    }
}

/// Tangential and normal acceleration magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSplit {
    /// Magnitude along the path
    pub tangential: f64,
    /// Magnitude toward the center of curvature
    pub normal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Velocity};

    #[test]
    fn test_default_law_has_no_split() {
        let gravity = UniformGravity::new(9.8);
        let state = KinematicState::new(Position::zero(), Velocity::new(1.0, 0.0, 0.0));
        assert_eq!(gravity.decompose(&state), None);
    }
}
