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
//! # Physics Demos
//!
//! Headless versions of six classroom physics demos: a bouncing
//! projectile, a launch from ground level, free fall, uniform circular
//! motion, a damped oscillator and motion around a vertical circle.
//!
//! Every demo runs the same fixed-step explicit Euler stepper. They differ
//! only in the force law that produces the acceleration and the boundaries
//! that bounce, clamp or stop the body after each step.
//!
//! ## Example
//!
//! ```rust
//! use physics_demos::scenarios::{FreeFallParams, Scenario};
//! use physics_demos::boundary::StopReason;
//!
//! let mut sim = FreeFallParams::default().build().unwrap();
//! let summary = sim.run_to_completion(10_000).unwrap();
//! assert_eq!(summary.stop_reason, Some(StopReason::FloorContact));
//! ```

#![warn(missing_docs)]

/// Boundaries evaluated after each step
pub mod boundary;

/// Vector and scalar components of the moving body
pub mod components;

/// TOML configuration
pub mod config;

/// Error types
pub mod error;

/// Force laws
pub mod forces;

/// Sample history and chart series
pub mod history;

/// Numerical integration methods
pub mod integration;

/// Info lines and exports
pub mod report;

/// The six demos
pub mod scenarios;

/// Run loop and lifecycle
pub mod simulation;

/// Kinematic state
pub mod state;

/// Parameter sweeps
pub mod sweep;

pub use error::{ConfigError, ScenarioError, SimulationError};
pub use scenarios::{Scenario, ScenarioConfig};
pub use simulation::{RunSummary, Simulation};
pub use state::KinematicState;
