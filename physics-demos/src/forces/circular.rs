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
//! Force laws for motion on a circle
//!
//! Neither law models a string or a rail. The body is kept on its circle
//! only because the inward acceleration always equals `|v|²/R` for the
//! nominal radius `R`, so the path curvature matches the circle.

use super::{AccelerationSplit, ForceLaw};
use crate::components::{self, Acceleration, Position};
use crate::state::KinematicState;

/// Inward acceleration of magnitude `|v|²/R` toward a fixed center
///
/// Used for uniform circular motion in a horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentripetalPull {
    center: Position,
    radius: f64,
}

impl CentripetalPull {
    /// Pull toward `center` for a circle of radius `radius`
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite
    pub fn new(center: Position, radius: f64) -> Self {
        assert!(radius > 0.0 && radius.is_finite(), "Radius must be positive and finite");
        CentripetalPull { center, radius }
    }

    /// Center of the circle
    pub fn center(&self) -> Position {
        self.center
    }

    /// Nominal radius
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ForceLaw for CentripetalPull {
    fn acceleration(&self, state: &KinematicState) -> Acceleration {
        // At the center the inward direction is undefined
        let Some(inward) = components::unit(state.position.offset_to(&self.center)) else {
            return Acceleration::zero();
        };
        let magnitude = state.velocity.magnitude_squared() / self.radius;
        Acceleration::from_array(inward).scaled(magnitude)
    }

    fn name(&self) -> &str {
        "centripetal"
    }
}

/// Motion on a vertical circle centered at the origin under gravity
///
/// The acceleration is the sum of two parts:
///
/// - normal: `-r̂ |v|²/R`, keeping the body on the circle
/// - tangential: gravity `(0, -g, 0)` minus its radial projection,
///   which works out to `(g·xy/r², -g·x²/r², 0)`
///
/// At the top and bottom of the circle the tangential part vanishes; at
/// the sides it equals the full `g`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalCircleGravity {
    g: f64,
    radius: f64,
}

impl VerticalCircleGravity {
    /// Circle of radius `radius` in the xy-plane under gravity `g`
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive and finite or `g` is negative or non-finite
    pub fn new(g: f64, radius: f64) -> Self {
        assert!(radius > 0.0 && radius.is_finite(), "Radius must be positive and finite");
        assert!(
            g >= 0.0 && g.is_finite(),
            "Gravitational acceleration must be non-negative and finite"
        );
        VerticalCircleGravity { g, radius }
    }

    /// Nominal radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Gravitational acceleration
    pub fn gravity(&self) -> f64 {
        self.g
    }

    /// Centripetal part, `-r̂ |v|²/R`
    pub fn normal_component(&self, state: &KinematicState) -> Acceleration {
        let Some(outward) = components::unit(state.position.as_array()) else {
            return Acceleration::zero();
        };
        let magnitude = state.velocity.magnitude_squared() / self.radius;
        Acceleration::from_array(outward).scaled(-magnitude)
    }

    /// Component of gravity along the circle
    pub fn tangential_component(&self, state: &KinematicState) -> Acceleration {
        let x = state.position.x();
        let y = state.position.y();
        let r_squared = x * x + y * y;
        if r_squared < components::DIRECTION_EPSILON {
            return Acceleration::zero();
        }
        Acceleration::new(self.g * x * y / r_squared, -self.g * x * x / r_squared, 0.0)
    }
}

impl ForceLaw for VerticalCircleGravity {
    fn acceleration(&self, state: &KinematicState) -> Acceleration {
        let mut total = self.normal_component(state);
        total.add(&self.tangential_component(state));
        total
    }

    fn name(&self) -> &str {
        "vertical-circle"
    }

    /// `|at| = g|x|/r` at the current position and `|an| = |v|²/R`
    fn decompose(&self, state: &KinematicState) -> Option<AccelerationSplit> {
        Some(AccelerationSplit {
            tangential: self.tangential_component(state).magnitude(),
            normal: state.velocity.magnitude_squared() / self.radius,
        })
    }
}
