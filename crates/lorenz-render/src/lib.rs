#![forbid(unsafe_code)]

//! Render kernel: turns trail segments into colored Braille cells and
//! presents them to a terminal.
//!
//! Pipeline per frame: [`projection::Projection`] maps 3D points to
//! sub-pixel coordinates, [`canvas::Painter`] rasterizes and blends the
//! segments, the painter is folded into a [`buffer::Buffer`] of cells, and
//! [`presenter::Presenter`] writes only the cells that changed.

pub mod asciicast;
pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod presenter;
pub mod projection;
pub mod renderer;

pub use renderer::{Renderer, Scene, TerminalRenderer};
