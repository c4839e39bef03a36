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
//! Spring with linear damping
//!
//! A block on a frictionless floor is attached to a wall by a spring and a
//! dashpot. Along the spring axis (x):
//!
//! ```text
//! F = -k (x - x₀) - b v
//! a = F / m
//! ```
//!
//! With `b² < 4mk` the motion is an underdamped oscillation whose amplitude
//! decays as `exp(-b t / 2m)`.

use super::ForceLaw;
use crate::components::{Acceleration, Force, Mass};
use crate::state::KinematicState;

/// Damped harmonic oscillator along the x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringDamper {
    mass: Mass,
    stiffness: f64,
    damping: f64,
    anchor: f64,
}

impl SpringDamper {
    /// Spring of stiffness `k` (N/m) and damping `b` (N·s/m) with equilibrium at x = 0
    ///
    /// # Panics
    ///
    /// Panics if the mass is immovable or if `k` or `b` is negative or non-finite
    pub fn new(mass: Mass, stiffness: f64, damping: f64) -> Self {
        assert!(!mass.is_immovable(), "Oscillator mass must be positive");
        assert!(
            stiffness >= 0.0 && stiffness.is_finite(),
            "Spring stiffness must be non-negative and finite"
        );
        assert!(
            damping >= 0.0 && damping.is_finite(),
            "Damping coefficient must be non-negative and finite"
        );
        SpringDamper {
            mass,
            stiffness,
            damping,
            anchor: 0.0,
        }
    }

    /// Move the equilibrium position to `anchor`
    pub fn with_anchor(mut self, anchor: f64) -> Self {
        self.anchor = anchor;
        self
    }

    /// Spring stiffness `k`
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping coefficient `b`
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Oscillator mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Undamped angular frequency, `√(k/m)`
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass.value()).sqrt()
    }

    /// Damping ratio `ζ = b / (2√(mk))`; below 1 the motion oscillates
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.mass.value() * self.stiffness).sqrt())
    }

    /// Restoring plus damping force on the block
    pub fn force(&self, state: &KinematicState) -> Force {
        let displacement = state.position.x() - self.anchor;
        Force::new(
            -self.stiffness * displacement - self.damping * state.velocity.dx(),
            0.0,
            0.0,
        )
    }

    /// Kinetic plus elastic energy, `½mv² + ½k(x - x₀)²`
    pub fn mechanical_energy(&self, state: &KinematicState) -> f64 {
        let displacement = state.position.x() - self.anchor;
        crate::integration::kinetic_energy(&state.velocity, &self.mass)
            + crate::integration::spring_potential_energy(displacement, self.stiffness)
    }
}

impl ForceLaw for SpringDamper {
    fn acceleration(&self, state: &KinematicState) -> Acceleration {
        self.force(state).to_acceleration(&self.mass)
    }

    fn name(&self) -> &str {
        "spring-damper"
    }
}
