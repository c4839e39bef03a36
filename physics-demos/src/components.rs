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
//! Kinematic components
//!
//! Position, velocity, acceleration, mass and force for the single moving
//! body of a demo. All quantities are double precision and expressed in SI
//! units (metres, seconds, kilograms, newtons).

use serde::{Deserialize, Serialize};

/// Vector length below which a direction is treated as undefined
pub const DIRECTION_EPSILON: f64 = 1e-12;

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector along `a`, or `None` when `a` has no usable direction
pub(crate) fn unit(a: [f64; 3]) -> Option<[f64; 3]> {
    let len = norm(a);
    if len < DIRECTION_EPSILON || !len.is_finite() {
        return None;
    }
    Some([a[0] / len, a[1] / len, a[2] / len])
}

/// 3D position in metres
///
/// # Examples
///
/// ```
/// use physics_demos::components::Position;
///
/// let pos = Position::new(1.0, 2.0, 3.0);
/// assert_eq!(pos.x(), 1.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Create a position at the origin (0, 0, 0)
    pub fn zero() -> Self {
        Position::new(0.0, 0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the z coordinate
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Move the point vertically, leaving x and z alone
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Check if all coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Get the position as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Create a position from an array
    pub fn from_array(arr: [f64; 3]) -> Self {
        Position::new(arr[0], arr[1], arr[2])
    }

    /// Distance from the origin
    pub fn magnitude(&self) -> f64 {
        norm(self.as_array())
    }

    /// Distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        norm(self.offset_to(other))
    }

    /// Vector pointing from this position to `other`
    pub fn offset_to(&self, other: &Position) -> [f64; 3] {
        [other.x - self.x, other.y - self.y, other.z - self.z]
    }

    /// Move along `velocity` for `dt` seconds: `x += v * dt`
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.dx() * dt;
        self.y += velocity.dy() * dt;
        self.z += velocity.dz() * dt;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::zero()
    }
}

/// 3D velocity in metres per second
///
/// # Examples
///
/// ```
/// use physics_demos::components::Velocity;
///
/// let vel = Velocity::new(3.0, 4.0, 0.0);
/// assert_eq!(vel.magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Velocity { dx, dy, dz }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0, 0.0)
    }

    /// Velocity of magnitude `speed` in the xy-plane, `angle` radians above +x
    pub fn from_polar(speed: f64, angle: f64) -> Self {
        Velocity::new(speed * angle.cos(), speed * angle.sin(), 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Get the z component
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Replace the vertical component (used when reflecting off a floor)
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dz.is_finite()
    }

    /// Get the velocity as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Create a velocity from an array
    pub fn from_array(arr: [f64; 3]) -> Self {
        Velocity::new(arr[0], arr[1], arr[2])
    }

    /// Calculate the magnitude (speed) of the velocity vector
    pub fn magnitude(&self) -> f64 {
        norm(self.as_array())
    }

    /// Squared speed, `|v|²`
    pub fn magnitude_squared(&self) -> f64 {
        dot(self.as_array(), self.as_array())
    }

    /// Apply `acceleration` for `dt` seconds: `v += a * dt`
    pub fn accelerate(&mut self, acceleration: &Acceleration, dt: f64) {
        self.dx += acceleration.ax() * dt;
        self.dy += acceleration.ay() * dt;
        self.dz += acceleration.az() * dt;
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::zero()
    }
}

/// 3D acceleration in metres per second squared
///
/// # Examples
///
/// ```
/// use physics_demos::components::Acceleration;
///
/// let acc = Acceleration::new(0.0, -9.8, 0.0);
/// assert!(acc.is_valid());
/// assert_eq!(acc.magnitude(), 9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Acceleration {
    ax: f64,
    ay: f64,
    az: f64,
}

impl Acceleration {
    /// Create a new acceleration with the given components
    pub fn new(ax: f64, ay: f64, az: f64) -> Self {
        Acceleration { ax, ay, az }
    }

    /// Create a zero acceleration
    pub fn zero() -> Self {
        Acceleration::new(0.0, 0.0, 0.0)
    }

    /// Get the x component
    pub fn ax(&self) -> f64 {
        self.ax
    }

    /// Get the y component
    pub fn ay(&self) -> f64 {
        self.ay
    }

    /// Get the z component
    pub fn az(&self) -> f64 {
        self.az
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite() && self.az.is_finite()
    }

    /// Get the acceleration as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.ax, self.ay, self.az]
    }

    /// Create an acceleration from an array
    pub fn from_array(arr: [f64; 3]) -> Self {
        Acceleration::new(arr[0], arr[1], arr[2])
    }

    /// Magnitude of the acceleration vector
    pub fn magnitude(&self) -> f64 {
        norm(self.as_array())
    }

    /// Add another acceleration to this one
    pub fn add(&mut self, other: &Acceleration) {
        self.ax += other.ax;
        self.ay += other.ay;
        self.az += other.az;
    }

    /// Return this acceleration multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Acceleration {
        Acceleration::new(self.ax * factor, self.ay * factor, self.az * factor)
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Acceleration::zero()
    }
}

/// Mass in kilograms
///
/// Zero or near-zero masses are treated as immovable: their inverse is 0, so
/// any force on them produces no acceleration.
///
/// # Examples
///
/// ```
/// use physics_demos::components::Mass;
///
/// let mass = Mass::new(4.0);
/// assert_eq!(mass.inverse(), 0.25);
/// assert!(Mass::immovable().is_immovable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Threshold below which mass is considered effectively zero (immovable)
    pub const IMMOVABLE_THRESHOLD: f64 = 1e-10;

    /// Create a new mass with the given value in kilograms
    ///
    /// # Panics
    ///
    /// Panics if the mass is negative, NaN or infinite. Use `try_new` for
    /// values that come from user input.
    pub fn new(value: f64) -> Self {
        assert!(value >= 0.0 && value.is_finite(), "Mass must be non-negative and finite");
        Mass { value }
    }

    /// Try to create a new mass, returning `None` for negative or non-finite values
    pub fn try_new(value: f64) -> Option<Self> {
        if value >= 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Create an immovable mass (treated as infinite mass)
    pub fn immovable() -> Self {
        Mass { value: 0.0 }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Check if this is an immovable body (zero or near-zero mass)
    pub fn is_immovable(&self) -> bool {
        self.value < Self::IMMOVABLE_THRESHOLD
    }

    /// Inverse mass (1/m), 0.0 for immovable bodies
    pub fn inverse(&self) -> f64 {
        if self.is_immovable() {
            0.0
        } else {
            1.0 / self.value
        }
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::new(1.0)
    }
}

/// 3D force vector in newtons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// X component of the force in Newtons
    pub fx: f64,
    /// Y component of the force in Newtons
    pub fy: f64,
    /// Z component of the force in Newtons
    pub fz: f64,
}

impl Force {
    /// Create a new force vector
    pub fn new(fx: f64, fy: f64, fz: f64) -> Self {
        Force { fx, fy, fz }
    }

    /// Create a zero force
    pub fn zero() -> Self {
        Force::new(0.0, 0.0, 0.0)
    }

    /// Check if the force is valid (all components finite)
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fy.is_finite() && self.fz.is_finite()
    }

    /// Add another force to this one
    pub fn add(&mut self, other: &Force) {
        self.fx += other.fx;
        self.fy += other.fy;
        self.fz += other.fz;
    }

    /// Get the magnitude of the force
    pub fn magnitude(&self) -> f64 {
        norm([self.fx, self.fy, self.fz])
    }

    /// Newton's second law, `a = F / m`
    ///
    /// Immovable masses receive zero acceleration.
    pub fn to_acceleration(&self, mass: &Mass) -> Acceleration {
        let inv_mass = mass.inverse();
        Acceleration::new(self.fx * inv_mass, self.fy * inv_mass, self.fz * inv_mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(1.0, 2.0, 3.0);
        assert_eq!(pos.x(), 1.0);
        assert_eq!(pos.y(), 2.0);
        assert_eq!(pos.z(), 3.0);
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Position::new(f64::NAN, 2.0, 3.0).is_valid());
        assert!(!Position::new(f64::INFINITY, 2.0, 3.0).is_valid());
    }

    #[test]
    fn test_position_advance() {
        let mut pos = Position::new(-25.0, 15.0, 0.0);
        pos.advance(&Velocity::new(2.0, -4.0, 1.0), 0.5);
        assert_eq!(pos, Position::new(-24.0, 13.0, 0.5));
    }

    #[test]
    fn test_position_offsets() {
        let a = Position::new(1.0, 1.0, 0.0);
        let b = Position::new(4.0, 5.0, 0.0);
        assert_eq!(a.offset_to(&b), [3.0, 4.0, 0.0]);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(Position::new(0.0, 3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_velocity_from_polar() {
        let vel = Velocity::from_polar(2.0, std::f64::consts::FRAC_PI_2);
        assert!(vel.dx().abs() < 1e-12);
        assert!((vel.dy() - 2.0).abs() < 1e-12);
        assert_eq!(vel.dz(), 0.0);
    }

    #[test]
    fn test_velocity_magnitude() {
        let vel = Velocity::new(3.0, 4.0, 0.0);
        assert_eq!(vel.magnitude(), 5.0);
        assert_eq!(vel.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_velocity_accelerate() {
        let mut vel = Velocity::zero();
        vel.accelerate(&Acceleration::new(0.0, -9.8, 0.0), 0.01);
        assert!((vel.dy() + 0.098).abs() < 1e-12);
    }

    #[test]
    fn test_acceleration_arithmetic() {
        let mut acc = Acceleration::new(1.0, 2.0, 0.0);
        acc.add(&Acceleration::new(0.5, -2.0, 1.0));
        assert_eq!(acc, Acceleration::new(1.5, 0.0, 1.0));
        assert_eq!(acc.scaled(2.0), Acceleration::new(3.0, 0.0, 2.0));
        assert!(!Acceleration::new(f64::INFINITY, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_unit_vector() {
        let u = unit([0.0, 3.0, 4.0]).unwrap();
        assert!((u[1] - 0.6).abs() < 1e-12);
        assert!((u[2] - 0.8).abs() < 1e-12);
        assert!(unit([0.0, 0.0, 0.0]).is_none());
        assert!(unit([f64::NAN, 0.0, 0.0]).is_none());
    }

    #[test]
    fn test_mass_try_new() {
        assert_eq!(Mass::try_new(10.5).map(|m| m.value()), Some(10.5));
        assert!(Mass::try_new(-1.0).is_none());
        assert!(Mass::try_new(f64::NAN).is_none());
        assert!(Mass::try_new(f64::INFINITY).is_none());
    }

    #[test]
    #[should_panic(expected = "Mass must be non-negative and finite")]
    fn test_mass_negative_panics() {
        Mass::new(-1.0);
    }

    #[test]
    fn test_mass_immovable() {
        let immovable = Mass::immovable();
        assert!(immovable.is_immovable());
        assert_eq!(immovable.inverse(), 0.0);
        assert!(Mass::new(1e-15).is_immovable());
    }

    #[test]
    fn test_force_to_acceleration() {
        let force = Force::new(-4.0, 8.0, 0.0);
        assert_eq!(force.to_acceleration(&Mass::new(4.0)), Acceleration::new(-1.0, 2.0, 0.0));
        assert_eq!(force.to_acceleration(&Mass::immovable()), Acceleration::zero());
    }

    #[test]
    fn test_force_accumulation() {
        let mut total = Force::zero();
        total.add(&Force::new(3.0, 0.0, 0.0));
        total.add(&Force::new(0.0, 4.0, 0.0));
        assert_eq!(total.magnitude(), 5.0);
        assert!(total.is_valid());
    }

    #[test]
    fn test_component_defaults() {
        assert_eq!(Position::default(), Position::zero());
        assert_eq!(Velocity::default(), Velocity::zero());
        assert_eq!(Acceleration::default(), Acceleration::zero());
        assert_eq!(Mass::default().value(), 1.0);
    }
}
