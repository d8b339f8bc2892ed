//! Property-based invariant tests for the integrator, trail, and hue cursor.
//!
//! 1. One Euler step equals the closed-form update for any finite input.
//! 2. Segments and colors stay the same length and within the cap.
//! 3. Eviction is FIFO: the oldest retained segment is exactly `fade_length`
//!    steps behind the newest.
//! 4. A full trail fades strictly upward from `1/n` to `1.0`.
//! 5. The wrapped hue stays inside `[0, 1)` for any number of steps.

use lorenz_core::hue::HueCursor;
use lorenz_core::{LorenzParams, Simulation, SimulationConfig, State, euler_step};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn state_strategy() -> impl Strategy<Value = State> {
    (-50.0f64..50.0, -50.0f64..50.0, -10.0f64..80.0).prop_map(|(x, y, z)| State::new(x, y, z))
}

fn params_strategy() -> impl Strategy<Value = LorenzParams> {
    (0.1f64..20.0, 0.1f64..50.0, 0.1f64..5.0)
        .prop_map(|(sigma, rho, beta)| LorenzParams::new(sigma, rho, beta))
}

fn small_config(fade_length: usize, steps_per_frame: usize) -> SimulationConfig {
    SimulationConfig {
        fade_length,
        steps_per_frame,
        ..SimulationConfig::default()
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Euler step matches the closed form
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn euler_matches_closed_form(
        s in state_strategy(),
        p in params_strategy(),
        dt in 1e-5f64..0.05,
    ) {
        let next = euler_step(s, &p, dt);
        let ex = s.x + p.sigma * (s.y - s.x) * dt;
        let ey = s.y + (s.x * (p.rho - s.z) - s.y) * dt;
        let ez = s.z + (s.x * s.y - p.beta * s.z) * dt;
        let tol = 1e-9 * (1.0 + ex.abs().max(ey.abs()).max(ez.abs()));
        prop_assert!((next.x - ex).abs() <= tol, "x: {} vs {}", next.x, ex);
        prop_assert!((next.y - ey).abs() <= tol, "y: {} vs {}", next.y, ey);
        prop_assert!((next.z - ez).abs() <= tol, "z: {} vs {}", next.z, ez);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Length invariant
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lengths_stay_aligned_and_capped(
        fade_length in 1usize..64,
        steps_per_frame in 1usize..12,
        frames in 0u32..80,
    ) {
        let mut sim = Simulation::new(small_config(fade_length, steps_per_frame));
        for frame in 0..frames {
            let view = sim.update_frame(frame);
            prop_assert_eq!(view.segments.len(), view.colors.len());
            prop_assert!(view.segments.len() <= fade_length);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. FIFO eviction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn oldest_is_fade_length_behind_newest(
        fade_length in 2usize..48,
        steps_per_frame in 1usize..9,
    ) {
        let config = SimulationConfig {
            seed_color: None,
            ..small_config(fade_length, steps_per_frame)
        };
        // Replay the integrator independently to know every segment start.
        let mut starts = Vec::new();
        let mut s = config.initial_state;
        let total = fade_length * 3 + steps_per_frame;
        for _ in 0..total {
            starts.push(s);
            s = euler_step(s, &config.params, config.dt);
        }

        let mut sim = Simulation::new(config);
        let mut frame = 0;
        while (sim.total_steps() as usize) < fade_length * 2 {
            sim.update_frame(frame);
            frame += 1;
        }
        let steps = sim.total_steps() as usize;
        let trail = sim.trail();
        prop_assert_eq!(trail.len(), fade_length);
        prop_assert_eq!(trail.newest().map(|seg| seg.start), Some(starts[steps - 1]));
        prop_assert_eq!(trail.oldest().map(|seg| seg.start), Some(starts[steps - fade_length]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Alpha ramp on a full trail
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_trail_alpha_is_strictly_increasing(fade_length in 1usize..200) {
        let mut sim = Simulation::new(small_config(fade_length, 7));
        let mut frame = 0;
        while sim.trail().len() < fade_length {
            sim.update_frame(frame);
            frame += 1;
        }
        let colors = sim.trail().colors();
        let n = colors.len();
        prop_assert_eq!(colors[0].a, 1.0 / n as f32);
        prop_assert_eq!(colors[n - 1].a, 1.0);
        prop_assert!(colors.windows(2).all(|w| w[0].a < w[1].a));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Hue wrap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hue_sample_in_unit_interval(increment in 0.0f64..3.0, steps in 0usize..5000) {
        let mut hue = HueCursor::new(increment);
        for _ in 0..steps {
            hue.advance();
        }
        let s = hue.sample();
        prop_assert!((0.0..1.0).contains(&s), "sample {} out of range", s);
    }
}
