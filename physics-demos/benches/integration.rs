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
//! Benchmarks for the stepper and full demo runs
//!
//! These benchmarks measure:
//! - Raw cost of one Euler step under each force law
//! - Wall time of each demo run to completion with default parameters
//! - A parameter sweep, parallel when the `parallel` feature is on

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use physics_demos::components::{Mass, Position, Velocity};
use physics_demos::config::{DemoConfig, RunConfig};
use physics_demos::forces::{CentripetalPull, ForceLaw, SpringDamper, UniformGravity, VerticalCircleGravity};
use physics_demos::integration::{ExplicitEulerIntegrator, Integrator};
use physics_demos::sweep::Sweep;
use physics_demos::{KinematicState, ScenarioConfig};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler_step");
    let steps = 1000u64;
    group.throughput(Throughput::Elements(steps));

    let laws: Vec<(&str, Box<dyn ForceLaw>)> = vec![
        ("gravity", Box::new(UniformGravity::new(9.8))),
        ("spring", Box::new(SpringDamper::new(Mass::new(4.0), 1.0, 0.3))),
        ("centripetal", Box::new(CentripetalPull::new(Position::zero(), 5.0))),
        ("vertical_circle", Box::new(VerticalCircleGravity::new(9.8, 5.0))),
    ];

    for (name, law) in &laws {
        group.bench_with_input(BenchmarkId::new("law", name), law, |b, law| {
            let integrator = ExplicitEulerIntegrator::new(0.001);
            b.iter(|| {
                let mut state = KinematicState::new(Position::new(5.0, 0.0, 0.0), Velocity::new(0.0, 7.0, 0.0));
                for _ in 0..steps {
                    integrator.step(&mut state, law.as_ref());
                }
                black_box(state.position.x())
            });
        });
    }

    group.finish();
}

fn bench_demo_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("demo_run");
    group.sample_size(20);

    for name in ScenarioConfig::NAMES {
        group.bench_function(name, |b| {
            let config = DemoConfig::for_demo(name).unwrap();
            b.iter(|| {
                let mut sim = config.build().unwrap();
                black_box(sim.run_to_completion(config.run.max_steps()).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);

    let base = ScenarioConfig::from_name("projectile").unwrap();
    let angles: Vec<f64> = (1..=16).map(|i| i as f64 * 5.0).collect();

    group.bench_function("projectile_angles", |b| {
        b.iter(|| {
            let sweep = Sweep::new(&base, "angle", &angles, RunConfig::default()).unwrap();
            black_box(sweep.run())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_step, bench_demo_runs, bench_sweep);
criterion_main!(benches);
