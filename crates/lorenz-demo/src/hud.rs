#![forbid(unsafe_code)]

//! One-line status overlay.

use std::fmt::Write as _;

use lorenz_core::Simulation;

/// Where the animation is, for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    pub frame: u32,
    pub frame_count: u32,
    /// Completed passes over the frame schedule.
    pub passes: u64,
    pub paused: bool,
    /// The schedule ended and the last frame is being held.
    pub finished: bool,
}

/// Render the status line for `sim` at `hud.frame`.
pub fn status_line(sim: &Simulation, hud: HudState) -> String {
    let s = sim.state();
    let camera = sim.config().camera.orientation(hud.frame);
    let mut line = format!(
        " frame {}/{}  steps {}  x {:.2} y {:.2} z {:.2}  hue {:.3}  el {:.1} az {:.1}",
        hud.frame,
        hud.frame_count,
        sim.total_steps(),
        s.x,
        s.y,
        s.z,
        sim.hue().sample(),
        camera.elevation_deg,
        camera.azimuth_wrapped(),
    );
    if hud.passes > 0 {
        let _ = write!(line, "  pass {}", hud.passes + 1);
    }
    if hud.paused {
        line.push_str("  [paused]");
    }
    if hud.finished {
        line.push_str("  [done]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorenz_core::SimulationConfig;

    fn hud(frame: u32) -> HudState {
        HudState {
            frame,
            frame_count: 1500,
            passes: 0,
            paused: false,
            finished: false,
        }
    }

    #[test]
    fn shows_frame_steps_and_camera() {
        let mut sim = Simulation::new(SimulationConfig::default());
        sim.update_frame(0);
        sim.update_frame(1);
        let line = status_line(&sim, hud(1));
        assert!(line.contains("frame 1/1500"), "{line}");
        assert!(line.contains("steps 14"), "{line}");
        assert!(line.contains("hue 0.028"), "{line}");
        assert!(line.contains("el 30.0 az 0.5"), "{line}");
        assert!(!line.contains("paused"));
    }

    #[test]
    fn fresh_simulation_shows_start_state() {
        let sim = Simulation::new(SimulationConfig::default());
        let line = status_line(&sim, hud(0));
        assert!(line.contains("x 0.00 y 1.00 z 1.05"), "{line}");
    }

    #[test]
    fn marks_pause_and_later_passes() {
        let sim = Simulation::default();
        let line = status_line(
            &sim,
            HudState {
                passes: 2,
                paused: true,
                ..hud(3)
            },
        );
        assert!(line.ends_with("pass 3  [paused]"), "{line}");
    }

    #[test]
    fn marks_held_final_frame() {
        let sim = Simulation::default();
        let line = status_line(
            &sim,
            HudState {
                finished: true,
                ..hud(1499)
            },
        );
        assert!(line.ends_with("[done]"), "{line}");
        assert!(!line.contains("paused"), "{line}");
    }
}
