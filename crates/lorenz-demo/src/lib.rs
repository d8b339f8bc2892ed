#![forbid(unsafe_code)]

//! Terminal driver for the Lorenz trail animation.
//!
//! The binary parses options ([`cli`]), installs file logging
//! ([`logging`]), takes over the terminal ([`terminal_session`]), and runs
//! the frame loop ([`app`]).

pub mod app;
pub mod cli;
pub mod hud;
pub mod logging;
pub mod terminal_session;
