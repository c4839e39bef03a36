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
//! Stepper accuracy against closed-form motion

use physics_demos::components::{Mass, Position, Velocity};
use physics_demos::forces::{CentripetalPull, SpringDamper, UniformGravity};
use physics_demos::integration::{ExplicitEulerIntegrator, Integrator};
use physics_demos::KinematicState;

#[test]
fn test_uniform_gravity_matches_discrete_closed_form() {
    let g = 9.8;
    let dt = 0.01;
    let integrator = ExplicitEulerIntegrator::new(dt);
    let gravity = UniformGravity::new(g);
    let mut state = KinematicState::new(Position::new(-25.0, 15.0, 0.0), Velocity::new(3.0, 4.0, 0.0));

    for n in 1..=500u32 {
        integrator.step(&mut state, &gravity);
        let n = n as f64;

        // Velocity is updated first, so the position sums v_1..v_n
        let expected_y = 15.0 + 4.0 * dt * n - g * dt * dt * n * (n + 1.0) / 2.0;
        let expected_x = -25.0 + 3.0 * dt * n;
        assert!((state.position.y() - expected_y).abs() < 1e-9, "y off at step {}", n);
        assert!((state.position.x() - expected_x).abs() < 1e-9, "x off at step {}", n);
        assert!((state.velocity.dy() - (4.0 - g * dt * n)).abs() < 1e-9);
        assert_eq!(state.velocity.dx(), 3.0);
    }

    assert!((state.time - 5.0).abs() < 1e-9);
}

#[test]
fn test_euler_error_shrinks_with_timestep() {
    // Compare against the continuous solution y = h - g t² / 2 at t = 1
    let error_at = |dt: f64| {
        let integrator = ExplicitEulerIntegrator::new(dt);
        let gravity = UniformGravity::new(9.8);
        let mut state = KinematicState::new(Position::new(0.0, 10.0, 0.0), Velocity::zero());
        let steps = (1.0 / dt).round() as usize;
        for _ in 0..steps {
            integrator.step(&mut state, &gravity);
        }
        (state.position.y() - (10.0 - 4.9)).abs()
    };

    let coarse = error_at(0.01);
    let fine = error_at(0.001);
    assert!(fine < coarse);
    // First order: error scales with dt
    assert!((coarse / fine - 10.0).abs() < 0.5);
}

#[test]
fn test_damped_spring_energy_never_grows() {
    let spring = SpringDamper::new(Mass::new(4.0), 1.0, 0.3);
    let integrator = ExplicitEulerIntegrator::new(0.02);
    let mut state = KinematicState::new(Position::new(5.0, 0.0, 0.0), Velocity::zero());

    let mut energy = spring.mechanical_energy(&state);
    for _ in 0..3000 {
        integrator.step(&mut state, &spring);
        let next = spring.mechanical_energy(&state);
        assert!(next <= energy + 1e-9);
        energy = next;
    }
    assert!(energy < 0.02 * 12.5);
}

#[test]
fn test_centripetal_orbit_stays_on_circle_for_one_period() {
    let center = Position::new(0.0, 0.5, 0.0);
    let pull = CentripetalPull::new(center, 5.0);
    let integrator = ExplicitEulerIntegrator::new(0.001);
    let mut state = KinematicState::new(Position::new(5.0, 0.5, 0.0), Velocity::new(0.0, 0.0, -10.0));

    let steps = (std::f64::consts::PI / 0.001).round() as usize;
    for _ in 0..steps {
        integrator.step(&mut state, &pull);
        assert!((state.position.distance_to(&center) - 5.0).abs() < 0.005);
    }

    // Back near the start after one period
    assert!(state.position.distance_to(&Position::new(5.0, 0.5, 0.0)) < 0.1);
}
