#![forbid(unsafe_code)]

//! Per-frame simulation driver.
//!
//! [`Simulation::update_frame`] is the whole per-frame contract:
//!
//! 1. Run `steps_per_frame` integrator sub-steps. Each appends the segment
//!    `(previous, next)` and the colormap sample at the current hue, then
//!    advances the hue and moves the state forward.
//! 2. Trim the trail to the newest `fade_length` entries.
//! 3. Rewrite alpha into the `1/n ..= 1` ramp.
//! 4. Return a [`FrameView`] with the camera orientation for the frame index.
//!
//! The simulation exclusively owns its state, hue cursor, and trail; a single
//! caller drives it sequentially.

use crate::camera::Camera;
use crate::color::Rgba;
use crate::config::SimulationConfig;
use crate::hue::HueCursor;
use crate::integrator::{State, euler_step};
use crate::trail::{Segment, TrailBuffer};

/// Borrowed view of what a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u32,
    pub segments: &'a [Segment],
    pub colors: &'a [Rgba],
    pub camera: Camera,
}

/// Lorenz state, hue cursor, and trail, advanced one frame at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    state: State,
    hue: HueCursor,
    trail: TrailBuffer,
    total_steps: u64,
    frames: u64,
}

impl Simulation {
    /// Build a simulation at the configured initial state.
    ///
    /// The config is used as given; call [`SimulationConfig::validate`]
    /// first when it comes from user input.
    pub fn new(config: SimulationConfig) -> Self {
        let mut trail = TrailBuffer::new(config.fade_length);
        if let Some(color) = config.seed_color {
            trail.push(Segment::point(config.initial_state), color);
        }
        crate::debug!(
            fade_length = config.fade_length,
            steps_per_frame = config.steps_per_frame,
            dt = config.dt,
            "simulation initialized"
        );
        Self {
            state: config.initial_state,
            hue: HueCursor::new(config.hue_increment),
            trail,
            total_steps: 0,
            frames: 0,
            config,
        }
    }

    /// Run one integrator sub-step and append its segment and color.
    ///
    /// Does not trim or fade; [`update_frame`](Self::update_frame) does that
    /// once per frame.
    pub fn step(&mut self) {
        let next = euler_step(self.state, &self.config.params, self.config.dt);
        let color = self.config.colormap.sample(self.hue.sample());
        self.trail.push(Segment::new(self.state, next), color);
        self.hue.advance();
        if self.state.is_finite() && !next.is_finite() {
            crate::warn!(step = self.total_steps, "integration diverged to a non-finite state");
        }
        self.state = next;
        self.total_steps += 1;
    }

    /// Advance one frame and return the data to render it.
    pub fn update_frame(&mut self, frame: u32) -> FrameView<'_> {
        let span = crate::debug_span!("update_frame", frame);
        let _guard = span.enter();
        for _ in 0..self.config.steps_per_frame {
            self.step();
        }
        let _evicted = self.trail.trim();
        self.trail.apply_fade();
        self.frames += 1;
        crate::trace!(
            frame,
            evicted = _evicted,
            len = self.trail.len(),
            "frame updated"
        );
        self.view(frame)
    }

    /// View of the current trail without advancing.
    pub fn view(&self, frame: u32) -> FrameView<'_> {
        FrameView {
            frame,
            segments: self.trail.segments(),
            colors: self.trail.colors(),
            camera: self.config.camera.orientation(frame),
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub const fn hue(&self) -> &HueCursor {
        &self.hue
    }

    pub const fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Integrator steps taken so far (the seed segment is not a step).
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Frames advanced so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
