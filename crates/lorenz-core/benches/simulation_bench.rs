//! Benchmarks for the per-frame simulation update.
//!
//! Performance budgets:
//! - update_frame (7 steps, 400-segment trail): < 5us
//! - colormap sample: < 50ns
//!
//! Run with: cargo bench -p lorenz-core --bench simulation_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lorenz_core::{Colormap, LorenzParams, Simulation, SimulationConfig, State, euler_step};
use std::hint::black_box;

// =============================================================================
// Integrator
// =============================================================================

fn bench_euler_step(c: &mut Criterion) {
    let params = LorenzParams::CLASSIC;
    c.bench_function("integrator/euler_step", |b| {
        let mut s = State::CLASSIC_START;
        b.iter(|| {
            s = euler_step(black_box(s), &params, 0.01);
            black_box(s)
        })
    });
}

// =============================================================================
// Frame update at several trail lengths
// =============================================================================

fn bench_update_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation/update_frame");

    for fade_length in [100usize, 400, 2000] {
        group.throughput(Throughput::Elements(fade_length as u64));
        let config = SimulationConfig {
            fade_length,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config);
        // Warm up past the cap so every iteration trims.
        for frame in 0..(fade_length as u32 / 7 + 2) {
            sim.update_frame(frame);
        }
        group.bench_with_input(
            BenchmarkId::new("steady", fade_length),
            &fade_length,
            |b, _| {
                let mut frame = 0u32;
                b.iter(|| {
                    frame = frame.wrapping_add(1);
                    black_box(sim.update_frame(frame).segments.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_colormap(c: &mut Criterion) {
    let mut group = c.benchmark_group("colormap/sample");
    for map in Colormap::ALL {
        group.bench_function(map.name(), |b| {
            let mut t = 0.0f64;
            b.iter(|| {
                t = (t + 0.002) % 1.0;
                black_box(map.sample(black_box(t)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_euler_step, bench_update_frame, bench_colormap);
criterion_main!(benches);
