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
//! Fixed-step numerical integration
//!
//! An integrator advances a [`KinematicState`] by one timestep under a
//! [`ForceLaw`]. The demos use [`ExplicitEulerIntegrator`]: the
//! acceleration is evaluated once at the start of the step, applied to the
//! velocity, and the updated velocity moves the position.
//!
//! # Timestep Guidelines
//!
//! - Too small: wasted steps and precision loss
//! - Too large: overshoot at boundaries and energy drift
//! - The demos use 0.001 s to 0.02 s

use crate::components::{Acceleration, Mass, Velocity};
use crate::error::TimestepError;
use crate::forces::ForceLaw;
use crate::state::KinematicState;

mod euler;

pub use euler::ExplicitEulerIntegrator;

/// Smallest timestep accepted without a precision warning
pub const MIN_TIMESTEP: f64 = 1e-9;

/// Largest timestep accepted without a stability warning
pub const MAX_TIMESTEP: f64 = 1.0;

/// Calculate kinetic energy, `KE = ½ m v²`
///
/// Immovable bodies carry no kinetic energy.
pub fn kinetic_energy(velocity: &Velocity, mass: &Mass) -> f64 {
    if mass.is_immovable() {
        return 0.0;
    }
    0.5 * mass.value() * velocity.magnitude_squared()
}

/// Elastic energy stored in a spring, `½ k x²`
pub fn spring_potential_energy(displacement: f64, stiffness: f64) -> f64 {
    0.5 * stiffness * displacement * displacement
}

/// Check a timestep for validity and numerical sanity
pub fn check_timestep(dt: f64) -> Result<(), TimestepError> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(TimestepError::Invalid(dt));
    }
    if dt < MIN_TIMESTEP {
        return Err(TimestepError::TooSmall(dt));
    }
    if dt > MAX_TIMESTEP {
        return Err(TimestepError::TooLarge(dt));
    }
    Ok(())
}

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the timestep used by this integrator
    fn timestep(&self) -> f64;

    /// Set the timestep for this integrator
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    fn set_timestep(&mut self, dt: f64);

    /// Validate the timestep for stability
    ///
    /// Extremely small timesteps lose precision, large ones overshoot.
    fn validate_timestep(&self) -> Result<(), TimestepError> {
        check_timestep(self.timestep())
    }

    /// Advance `state` by one timestep under `law`
    ///
    /// Returns the acceleration that was applied, which is also stored in
    /// `state.acceleration`.
    fn step(&self, state: &mut KinematicState, law: &dyn ForceLaw) -> Acceleration;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinetic_energy() {
        let velocity = Velocity::new(3.0, 4.0, 0.0);
        assert_eq!(kinetic_energy(&velocity, &Mass::new(2.0)), 25.0);
        assert_eq!(kinetic_energy(&velocity, &Mass::immovable()), 0.0);
    }

    #[test]
    fn test_spring_potential_energy() {
        assert_eq!(spring_potential_energy(5.0, 1.0), 12.5);
        assert_eq!(spring_potential_energy(-2.0, 3.0), 6.0);
    }

    #[test]
    fn test_check_timestep() {
        assert!(check_timestep(0.01).is_ok());
        assert_eq!(check_timestep(0.0), Err(TimestepError::Invalid(0.0)));
        assert!(matches!(check_timestep(f64::NAN), Err(TimestepError::Invalid(_))));
        assert_eq!(check_timestep(1e-10), Err(TimestepError::TooSmall(1e-10)));
        assert_eq!(check_timestep(2.0), Err(TimestepError::TooLarge(2.0)));
    }
}
