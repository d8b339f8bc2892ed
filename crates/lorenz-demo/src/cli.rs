#![forbid(unsafe_code)]

//! Command-line argument parsing for the trail demo.
//!
//! Args are parsed by hand. Every option can also be set through a
//! `LORENZ_*` environment variable; explicit flags win over the
//! environment, which wins over the defaults. Unparseable environment
//! values are ignored, unparseable flags are an error.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use lorenz_core::{CameraRig, Colormap, LorenzParams, SimulationConfig};
use lorenz_render::canvas::Mode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Lorenz Trail - the Lorenz attractor as a fading color trail

USAGE:
    lorenz-trail [OPTIONS]

SYSTEM:
    --sigma=X             Lorenz sigma (default: 10)
    --rho=X               Lorenz rho (default: 28)
    --beta=X              Lorenz beta (default: 2.6667)
    --dt=X                Euler step size (default: 0.01)

TRAIL:
    --steps-per-frame=N   Integration steps per frame (default: 7)
    --fade-length=N       Segments kept on screen (default: 400)
    --hue-step=X          Colormap advance per step (default: 0.002)
    --colormap=NAME       'nipy' (default) or 'hsv'

ANIMATION:
    --frames=N            Frames per pass (default: 1500)
    --no-repeat           Play one pass, then hold the last frame
    --elevation=DEG       Camera elevation (default: 30)
    --azimuth-rate=DEG    Camera rotation per frame (default: 0.5)
    --fps=N               Frame cap, 0 for uncapped (default: 60)

DISPLAY:
    --glyphs=KIND         'braille' (default) or 'half'
    --thick               Draw two-dot-wide lines
    --no-hud              Start with the status line hidden

OUTPUT:
    --record=PATH         Write an asciicast v2 recording to PATH
    --log-file=PATH       Write logs to PATH (filter with LORENZ_LOG)
    --exit-after-ms=N     Quit after N milliseconds (0 = never)
    --help, -h            Show this help message
    --version, -V         Show version

KEYBINDINGS:
    Space                 Pause / resume
    h                     Toggle status line
    q / Esc / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    LORENZ_SIGMA  LORENZ_RHO  LORENZ_BETA  LORENZ_DT
    LORENZ_STEPS_PER_FRAME  LORENZ_FADE_LENGTH  LORENZ_HUE_STEP
    LORENZ_COLORMAP  LORENZ_FRAMES  LORENZ_REPEAT  LORENZ_ELEVATION
    LORENZ_AZIMUTH_RATE  LORENZ_FPS  LORENZ_GLYPHS  LORENZ_THICK
    LORENZ_HUD  LORENZ_RECORD  LORENZ_LOG_FILE  LORENZ_EXIT_AFTER_MS
    LORENZ_LOG            Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub dt: f64,
    pub steps_per_frame: usize,
    pub fade_length: usize,
    pub hue_step: f64,
    pub colormap: Colormap,
    pub frames: u32,
    pub repeat: bool,
    pub elevation: f64,
    pub azimuth_rate: f64,
    /// Frame cap; 0 disables the cap.
    pub fps: u32,
    pub glyphs: Mode,
    pub thick: bool,
    pub hud: bool,
    pub record: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        let sim = SimulationConfig::default();
        Self {
            sigma: sim.params.sigma,
            rho: sim.params.rho,
            beta: sim.params.beta,
            dt: sim.dt,
            steps_per_frame: sim.steps_per_frame,
            fade_length: sim.fade_length,
            hue_step: sim.hue_increment,
            colormap: sim.colormap,
            frames: sim.frame_count,
            repeat: sim.repeat,
            elevation: sim.camera.elevation_deg,
            azimuth_rate: sim.camera.azimuth_rate_deg,
            fps: 60,
            glyphs: Mode::Braille,
            thick: false,
            hud: true,
            record: None,
            log_file: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A rejected command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub message: String,
}

impl CliError {
    fn invalid(flag: &str, value: &str) -> Self {
        Self {
            message: format!("Invalid {flag} value: {value}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::invalid(flag, value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_path(flag: &str, value: &str) -> Result<PathBuf, CliError> {
    if value.is_empty() {
        return Err(CliError::invalid(flag, value));
    }
    Ok(PathBuf::from(value))
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits when asked to; prints the error and
    /// exits with status 1 on a bad argument.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("lorenz-trail {VERSION}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{e}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) on top of the environment
    /// seen through `var`.
    pub fn parse_from<I, S, F>(args: I, var: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        opts.apply_env(&var);

        for arg in args {
            let arg = arg.as_ref();
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };
            match (name, value) {
                ("--help" | "-h", None) => return Ok(Command::Help),
                ("--version" | "-V", None) => return Ok(Command::Version),
                ("--no-repeat", None) => opts.repeat = false,
                ("--thick", None) => opts.thick = true,
                ("--no-hud", None) => opts.hud = false,
                ("--sigma", Some(v)) => opts.sigma = parse_value(name, v)?,
                ("--rho", Some(v)) => opts.rho = parse_value(name, v)?,
                ("--beta", Some(v)) => opts.beta = parse_value(name, v)?,
                ("--dt", Some(v)) => opts.dt = parse_value(name, v)?,
                ("--steps-per-frame", Some(v)) => opts.steps_per_frame = parse_value(name, v)?,
                ("--fade-length", Some(v)) => opts.fade_length = parse_value(name, v)?,
                ("--hue-step", Some(v)) => opts.hue_step = parse_value(name, v)?,
                ("--colormap", Some(v)) => {
                    opts.colormap =
                        Colormap::from_name(v).ok_or_else(|| CliError::invalid(name, v))?;
                }
                ("--frames", Some(v)) => opts.frames = parse_value(name, v)?,
                ("--elevation", Some(v)) => opts.elevation = parse_value(name, v)?,
                ("--azimuth-rate", Some(v)) => opts.azimuth_rate = parse_value(name, v)?,
                ("--fps", Some(v)) => opts.fps = parse_value(name, v)?,
                ("--glyphs", Some(v)) => {
                    opts.glyphs = Mode::from_name(v).ok_or_else(|| CliError::invalid(name, v))?;
                }
                ("--record", Some(v)) => opts.record = Some(parse_path(name, v)?),
                ("--log-file", Some(v)) => opts.log_file = Some(parse_path(name, v)?),
                ("--exit-after-ms", Some(v)) => opts.exit_after_ms = parse_value(name, v)?,
                _ => {
                    return Err(CliError {
                        message: format!("Unknown argument: {arg}"),
                    });
                }
            }
        }

        Ok(Command::Run(opts))
    }

    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, var: &F) {
        fn set<T: FromStr>(slot: &mut T, raw: Option<String>) {
            if let Some(raw) = raw
                && let Ok(v) = raw.trim().parse()
            {
                *slot = v;
            }
        }

        set(&mut self.sigma, var("LORENZ_SIGMA"));
        set(&mut self.rho, var("LORENZ_RHO"));
        set(&mut self.beta, var("LORENZ_BETA"));
        set(&mut self.dt, var("LORENZ_DT"));
        set(&mut self.steps_per_frame, var("LORENZ_STEPS_PER_FRAME"));
        set(&mut self.fade_length, var("LORENZ_FADE_LENGTH"));
        set(&mut self.hue_step, var("LORENZ_HUE_STEP"));
        set(&mut self.frames, var("LORENZ_FRAMES"));
        set(&mut self.elevation, var("LORENZ_ELEVATION"));
        set(&mut self.azimuth_rate, var("LORENZ_AZIMUTH_RATE"));
        set(&mut self.fps, var("LORENZ_FPS"));
        set(&mut self.exit_after_ms, var("LORENZ_EXIT_AFTER_MS"));

        if let Some(cmap) = var("LORENZ_COLORMAP").and_then(|v| Colormap::from_name(&v)) {
            self.colormap = cmap;
        }
        if let Some(mode) = var("LORENZ_GLYPHS").and_then(|v| Mode::from_name(&v)) {
            self.glyphs = mode;
        }
        if let Some(b) = var("LORENZ_REPEAT").and_then(|v| parse_bool(&v)) {
            self.repeat = b;
        }
        if let Some(b) = var("LORENZ_THICK").and_then(|v| parse_bool(&v)) {
            self.thick = b;
        }
        if let Some(b) = var("LORENZ_HUD").and_then(|v| parse_bool(&v)) {
            self.hud = b;
        }
        if let Some(path) = var("LORENZ_RECORD").filter(|v| !v.is_empty()) {
            self.record = Some(PathBuf::from(path));
        }
        if let Some(path) = var("LORENZ_LOG_FILE").filter(|v| !v.is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
    }

    /// The simulation tunables these options describe.
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            params: LorenzParams::new(self.sigma, self.rho, self.beta),
            dt: self.dt,
            steps_per_frame: self.steps_per_frame,
            fade_length: self.fade_length,
            hue_increment: self.hue_step,
            colormap: self.colormap,
            frame_count: self.frames,
            repeat: self.repeat,
            camera: CameraRig::new(self.elevation, self.azimuth_rate),
            ..SimulationConfig::default()
        }
    }
}
