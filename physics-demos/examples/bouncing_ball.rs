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
//! Step the projectile demo by hand
//!
//! Starts the simulation, prints the info line every half second of
//! simulated time and reports each bounce as it happens.

use physics_demos::boundary::BoundaryOutcome;
use physics_demos::scenarios::{ProjectileParams, Scenario};
use physics_demos::simulation::StepOutcome;

fn main() {
    println!("Physics Demos - Bouncing Ball");
    println!("=============================\n");

    let params = ProjectileParams {
        angle: 60.0,
        restitution: 0.7,
        ..Default::default()
    };
    let mut sim = match params.build() {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid parameters: {}", err);
            return;
        }
    };

    println!("force law: {}", sim.force_name());
    println!("boundaries: {}\n", sim.boundary_names().join(", "));

    let report_every = (0.5 / sim.timestep()).round() as u64;
    sim.start();
    while !sim.is_finished() {
        match sim.step() {
            Ok(StepOutcome::Advanced(BoundaryOutcome::Bounced { count })) => {
                println!("  bounce #{} at {}", count, sim.info_line());
            }
            Ok(_) => {
                if sim.steps() % report_every == 0 {
                    println!("{}", sim.info_line());
                }
            }
            Err(err) => {
                eprintln!("simulation failed: {}", err);
                return;
            }
        }
    }

    let summary = sim.summary();
    println!("\nStopped by {:?} after {} steps", summary.stop_reason, summary.steps);
    println!("Peak height: {:.3} m", summary.peak_height);
}
