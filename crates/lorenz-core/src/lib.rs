#![forbid(unsafe_code)]

//! Core: Lorenz integration, the fading trail buffer, and the per-frame driver.
//!
//! Nothing in this crate performs I/O. The [`simulation::Simulation`] owns the
//! phase-space state, the hue cursor, and the trail, and produces a
//! [`simulation::FrameView`] per frame for whatever renderer is attached.

pub mod camera;
pub mod color;
pub mod colormap;
pub mod config;
pub mod hue;
pub mod integrator;
pub mod logging;
pub mod schedule;
pub mod simulation;
pub mod trail;

pub use camera::{Camera, CameraRig};
pub use color::Rgba;
pub use colormap::Colormap;
pub use config::{ConfigError, SimulationConfig};
pub use integrator::{LorenzParams, State, euler_step};
pub use simulation::{FrameView, Simulation};
pub use trail::{Segment, TrailBuffer};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
