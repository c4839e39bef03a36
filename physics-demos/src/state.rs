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
//! Kinematic state of the moving body

use crate::components::{Acceleration, Position, Velocity};
use serde::{Deserialize, Serialize};

/// Position, velocity and elapsed time of the single body in a demo
///
/// `acceleration` holds the value the integrator used on the most recent
/// step so that samples and info lines can report it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    /// Current position
    pub position: Position,
    /// Current velocity
    pub velocity: Velocity,
    /// Acceleration applied on the last step
    pub acceleration: Acceleration,
    /// Elapsed simulated time in seconds
    pub time: f64,
}

impl KinematicState {
    /// State at `t = 0` with no acceleration recorded yet
    pub fn new(position: Position, velocity: Velocity) -> Self {
        KinematicState {
            position,
            velocity,
            acceleration: Acceleration::zero(),
            time: 0.0,
        }
    }

    /// Current speed, `|v|`
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Check that every component and the clock are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid()
            && self.velocity.is_valid()
            && self.acceleration.is_valid()
            && self.time.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_zero_time() {
        let state = KinematicState::new(Position::new(0.0, 15.0, 0.0), Velocity::new(3.0, 4.0, 0.0));
        assert_eq!(state.time, 0.0);
        assert_eq!(state.acceleration, Acceleration::zero());
        assert_eq!(state.speed(), 5.0);
        assert!(state.is_valid());
    }

    #[test]
    fn test_invalid_state_detected() {
        let mut state = KinematicState::default();
        state.velocity.set_dy(f64::NAN);
        assert!(!state.is_valid());

        let mut state = KinematicState::default();
        state.time = f64::INFINITY;
        assert!(!state.is_valid());
    }
}
