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
//! Uniform gravitational field
//!
//! Near the ground gravity is a constant acceleration `(0, -g, 0)`
//! independent of position and velocity. The demos default to
//! `g = 9.8 m/s²`.

use super::ForceLaw;
use crate::components::Acceleration;
use crate::state::KinematicState;

/// Gravitational acceleration used by every demo unless overridden, in m/s²
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Constant downward acceleration
///
/// # Example
///
/// ```
/// use physics_demos::forces::{ForceLaw, UniformGravity};
/// use physics_demos::state::KinematicState;
///
/// let gravity = UniformGravity::new(9.8);
/// let acc = gravity.acceleration(&KinematicState::default());
/// assert_eq!(acc.ay(), -9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    g: f64,
}

impl UniformGravity {
    /// Create a field with strength `g` (m/s², pointing down)
    ///
    /// # Panics
    ///
    /// Panics if `g` is negative, NaN or infinite
    pub fn new(g: f64) -> Self {
        assert!(
            g >= 0.0 && g.is_finite(),
            "Gravitational acceleration must be non-negative and finite"
        );
        UniformGravity { g }
    }

    /// Field strength in m/s²
    pub fn strength(&self) -> f64 {
        self.g
    }
}

impl Default for UniformGravity {
    fn default() -> Self {
        UniformGravity::new(DEFAULT_GRAVITY)
    }
}

impl ForceLaw for UniformGravity {
    fn acceleration(&self, _state: &KinematicState) -> Acceleration {
        Acceleration::new(0.0, -self.g, 0.0)
    }

    fn name(&self) -> &str {
        "gravity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Velocity};

    #[test]
    fn test_default_strength() {
        let gravity = UniformGravity::default();
        assert_eq!(gravity.strength(), DEFAULT_GRAVITY);
        assert_eq!(gravity.name(), "gravity");
    }

    #[test]
    fn test_independent_of_state() {
        let gravity = UniformGravity::new(1.62);
        let resting = KinematicState::default();
        let moving = KinematicState::new(Position::new(10.0, 300.0, -2.0), Velocity::new(5.0, 5.0, 5.0));
        assert_eq!(gravity.acceleration(&resting), gravity.acceleration(&moving));
        assert_eq!(gravity.acceleration(&moving), Acceleration::new(0.0, -1.62, 0.0));
    }

    #[test]
    #[should_panic(expected = "Gravitational acceleration must be non-negative and finite")]
    fn test_negative_g_panics() {
        UniformGravity::new(-9.8);
    }

    #[test]
    #[should_panic(expected = "Gravitational acceleration must be non-negative and finite")]
    fn test_nan_g_panics() {
        UniformGravity::new(f64::NAN);
    }
}
