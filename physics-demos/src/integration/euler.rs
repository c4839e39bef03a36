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
//! Explicit Euler integrator
//!
//! Each step evaluates the force law once at the start of the step and
//! then updates velocity before position:
//!
//! ```text
//! a  = f(x, v, t)
//! v' = v + a*dt
//! x' = x + v'*dt
//! t' = t + dt
//! ```
//!
//! Using the updated velocity for the position update makes the scheme
//! symplectic for position-only forces, so an undamped oscillator keeps a
//! bounded energy error instead of spiralling outward.
//!
//! # Properties
//!
//! - **First-order accurate**: Local error O(dt²), global error O(dt)
//! - **One force evaluation per step**
//! - **Bounded energy error** for springs and uniform gravity

use super::Integrator;
use crate::components::Acceleration;
use crate::forces::ForceLaw;
use crate::state::KinematicState;

/// Fixed-step Euler integrator
///
/// # Example
///
/// ```
/// use physics_demos::integration::{ExplicitEulerIntegrator, Integrator};
///
/// let integrator = ExplicitEulerIntegrator::new(0.01);
/// assert_eq!(integrator.timestep(), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplicitEulerIntegrator {
    timestep: f64,
}

impl ExplicitEulerIntegrator {
    /// Create a new Euler integrator with the given timestep
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f64) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        ExplicitEulerIntegrator { timestep }
    }
}

impl Integrator for ExplicitEulerIntegrator {
    fn name(&self) -> &str {
        "Explicit Euler"
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn set_timestep(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "Timestep must be positive and finite"
        );
        self.timestep = dt;
    }

    fn step(&self, state: &mut KinematicState, law: &dyn ForceLaw) -> Acceleration {
        let dt = self.timestep;
        let acceleration = law.acceleration(state);

        state.velocity.accelerate(&acceleration, dt);
        state.position.advance(&state.velocity, dt);
        state.acceleration = acceleration;
        state.time += dt;

        acceleration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Velocity};
    use crate::forces::UniformGravity;

    struct NoForce;

    impl ForceLaw for NoForce {
        fn acceleration(&self, _state: &KinematicState) -> Acceleration {
            Acceleration::zero()
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    #[test]
    fn test_euler_creation() {
        let integrator = ExplicitEulerIntegrator::new(0.01);
        assert_eq!(integrator.timestep(), 0.01);
        assert_eq!(integrator.name(), "Explicit Euler");
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_euler_zero_timestep() {
        ExplicitEulerIntegrator::new(0.0);
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_euler_nan_timestep() {
        ExplicitEulerIntegrator::new(f64::NAN);
    }

    #[test]
    #[should_panic(expected = "Timestep must be positive and finite")]
    fn test_euler_set_negative_timestep() {
        let mut integrator = ExplicitEulerIntegrator::new(0.01);
        integrator.set_timestep(-0.01);
    }

    #[test]
    fn test_euler_timestep_validation() {
        assert!(ExplicitEulerIntegrator::new(0.01).validate_timestep().is_ok());
        assert!(ExplicitEulerIntegrator::new(1e-10).validate_timestep().is_err());
        assert!(ExplicitEulerIntegrator::new(2.0).validate_timestep().is_err());
    }

    #[test]
    fn test_euler_free_motion() {
        let integrator = ExplicitEulerIntegrator::new(0.1);
        let mut state = KinematicState::new(Position::zero(), Velocity::new(1.0, 2.0, 3.0));

        integrator.step(&mut state, &NoForce);

        assert!((state.position.x() - 0.1).abs() < 1e-12);
        assert!((state.position.y() - 0.2).abs() < 1e-12);
        assert!((state.position.z() - 0.3).abs() < 1e-12);
        assert_eq!(state.velocity, Velocity::new(1.0, 2.0, 3.0));
        assert!((state.time - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_euler_uses_updated_velocity() {
        let integrator = ExplicitEulerIntegrator::new(0.1);
        let mut state = KinematicState::new(Position::new(0.0, 10.0, 0.0), Velocity::zero());

        let applied = integrator.step(&mut state, &UniformGravity::new(10.0));

        assert_eq!(applied, Acceleration::new(0.0, -10.0, 0.0));
        assert_eq!(state.acceleration, applied);
        // v' = 0 - 10*0.1 = -1, y' = 10 + (-1)*0.1 = 9.9
        assert!((state.velocity.dy() + 1.0).abs() < 1e-12);
        assert!((state.position.y() - 9.9).abs() < 1e-12);
    }

    #[test]
    fn test_euler_closed_form_after_n_steps() {
        // y_n = y0 - g dt² n(n+1)/2 for constant acceleration
        let dt = 0.01;
        let g = 9.8;
        let integrator = ExplicitEulerIntegrator::new(dt);
        let mut state = KinematicState::new(Position::new(0.0, 15.0, 0.0), Velocity::zero());

        let n = 50;
        for _ in 0..n {
            integrator.step(&mut state, &UniformGravity::new(g));
        }

        let n = n as f64;
        let expected_y = 15.0 - g * dt * dt * n * (n + 1.0) / 2.0;
        assert!((state.position.y() - expected_y).abs() < 1e-9);
        assert!((state.velocity.dy() + g * dt * n).abs() < 1e-9);
    }
}
