#![forbid(unsafe_code)]

//! Simulation tunables and their validation.
//!
//! Defaults reproduce the classic demo: sigma = 10, rho = 28, beta = 8/3,
//! dt = 0.01, 7 sub-steps per frame, a 400-segment fade, a hue step of
//! 0.002, 1500 frames on repeat, and a camera at 30° elevation orbiting
//! 0.5° per frame.

use std::fmt;

use crate::camera::CameraRig;
use crate::color::Rgba;
use crate::colormap::Colormap;
use crate::integrator::{LorenzParams, State};

/// Everything the [`Simulation`](crate::simulation::Simulation) needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub params: LorenzParams,
    /// Integration step size.
    pub dt: f64,
    /// Integrator sub-steps per rendered frame.
    pub steps_per_frame: usize,
    /// Maximum number of segments kept after each frame.
    pub fade_length: usize,
    /// Hue cursor advance per sub-step.
    pub hue_increment: f64,
    pub colormap: Colormap,
    pub initial_state: State,
    /// Color of the degenerate starting segment, if one is seeded.
    pub seed_color: Option<Rgba>,
    /// Frames per pass of the schedule.
    pub frame_count: u32,
    /// Restart frame indices after `frame_count` frames.
    pub repeat: bool,
    pub camera: CameraRig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: LorenzParams::CLASSIC,
            dt: 0.01,
            steps_per_frame: 7,
            fade_length: 400,
            hue_increment: 0.002,
            colormap: Colormap::NipySpectral,
            initial_state: State::CLASSIC_START,
            seed_color: Some(Rgba::SEED),
            frame_count: 1500,
            repeat: true,
            camera: CameraRig::default(),
        }
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SimulationConfig {
    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_finite("sigma", self.params.sigma, &mut errors);
        validate_finite("rho", self.params.rho, &mut errors);
        validate_finite("beta", self.params.beta, &mut errors);
        if !(self.dt.is_finite() && self.dt > 0.0) {
            errors.push(ConfigError::new(
                "dt",
                self.dt.to_string(),
                "must be finite and > 0",
            ));
        }
        validate_positive("steps_per_frame", self.steps_per_frame, &mut errors);
        validate_positive("fade_length", self.fade_length, &mut errors);
        validate_positive("frame_count", self.frame_count as usize, &mut errors);
        if !(self.hue_increment.is_finite() && self.hue_increment >= 0.0) {
            errors.push(ConfigError::new(
                "hue_increment",
                self.hue_increment.to_string(),
                "must be finite and >= 0",
            ));
        }
        if !self.initial_state.is_finite() {
            errors.push(ConfigError::new(
                "initial_state",
                format!("{:?}", self.initial_state),
                "must be finite",
            ));
        }
        validate_finite("elevation", self.camera.elevation_deg, &mut errors);
        validate_finite("azimuth_rate", self.camera.azimuth_rate_deg, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Integration steps in one pass of the frame schedule.
    pub fn steps_per_pass(&self) -> u64 {
        self.frame_count as u64 * self.steps_per_frame as u64
    }
}

fn validate_finite(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !value.is_finite() {
        errors.push(ConfigError::new(field, value.to_string(), "must be finite"));
    }
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<ConfigError>) {
    if value == 0 {
        errors.push(ConfigError::new(field, value.to_string(), "must be >= 1"));
    }
}
