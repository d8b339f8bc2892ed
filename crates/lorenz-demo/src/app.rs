#![forbid(unsafe_code)]

//! Animation driver.
//!
//! [`App`] holds the simulation, the frame schedule, and the interactive
//! toggles; it knows nothing about terminals. [`run`] owns the terminal
//! session and the renderer and pumps frames through the app until the
//! user quits, a termination signal arrives, or the exit deadline passes.
//! When a non-repeating schedule ends, the last frame stays on screen.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lorenz_core::schedule::FrameSchedule;
use lorenz_core::{Simulation, SimulationConfig};
use lorenz_render::asciicast::{AsciicastRecorder, AsciicastWriter, Timing};
use lorenz_render::canvas::Mode;
use lorenz_render::{Renderer, Scene, TerminalRenderer};

use crate::cli::Opts;
use crate::hud::{HudState, status_line};
use crate::terminal_session::{SessionOptions, TerminalSession};

/// Driver settings beyond the simulation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    /// Frame cap; 0 runs uncapped.
    pub fps: u32,
    pub glyphs: Mode,
    pub thick: bool,
    pub hud: bool,
    pub record: Option<PathBuf>,
    pub exit_after: Option<Duration>,
}

impl AppConfig {
    pub fn from_opts(opts: &Opts) -> Self {
        Self {
            simulation: opts.simulation_config(),
            fps: opts.fps,
            glyphs: opts.glyphs,
            thick: opts.thick,
            hud: opts.hud,
            record: opts.record.clone(),
            exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
        }
    }

    /// Target time per frame, if capped.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.fps)))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_opts(&Opts::default())
    }
}

/// Simulation plus interactive state.
#[derive(Debug)]
pub struct App {
    sim: Simulation,
    schedule: FrameSchedule,
    frame: u32,
    paused: bool,
    show_hud: bool,
    quit: bool,
    finished: bool,
    signal: Option<i32>,
}

impl App {
    pub fn new(config: SimulationConfig, show_hud: bool) -> Self {
        let schedule = FrameSchedule::new(config.frame_count, config.repeat);
        Self {
            sim: Simulation::new(config),
            schedule,
            frame: 0,
            paused: false,
            show_hud,
            quit: false,
            finished: false,
            signal: None,
        }
    }

    /// React to a key press.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, frame = self.frame, "pause toggled");
            }
            KeyCode::Char('h') => self.show_hud = !self.show_hud,
            _ => {}
        }
    }

    /// Stop at the next loop check because of a termination signal.
    pub fn on_signal(&mut self, signal: i32) {
        if self.signal.is_none() {
            tracing::info!(signal, frame = self.frame, "stopping on signal");
        }
        self.signal = Some(signal);
        self.quit = true;
    }

    /// Run the next scheduled frame. Returns `false` when paused or when the
    /// schedule is exhausted; a finished app keeps showing its last frame.
    pub fn advance(&mut self) -> bool {
        if self.paused || self.finished {
            return false;
        }
        match self.schedule.next() {
            Some(frame) => {
                if frame == 0 && self.schedule.passes() > 0 {
                    tracing::debug!(pass = self.schedule.passes(), "frame schedule restarted");
                }
                self.sim.update_frame(frame);
                self.frame = frame;
                true
            }
            None => {
                self.finished = true;
                tracing::info!(frames = self.schedule.emitted(), "frame schedule finished");
                false
            }
        }
    }

    /// Segments, colors, and camera of the current frame.
    pub fn scene(&self) -> Scene<'_> {
        Scene::from(self.sim.view(self.frame))
    }

    /// Status line, if the HUD is showing.
    pub fn hud_line(&self) -> Option<String> {
        self.show_hud.then(|| {
            status_line(
                &self.sim,
                HudState {
                    frame: self.frame,
                    frame_count: self.schedule.frame_count(),
                    passes: self.schedule.passes().saturating_sub(u64::from(self.frame_is_last())),
                    paused: self.paused,
                    finished: self.finished,
                },
            )
        })
    }

    fn frame_is_last(&self) -> bool {
        self.frame + 1 == self.schedule.frame_count()
    }

    pub const fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub const fn frame(&self) -> u32 {
        self.frame
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub const fn hud_visible(&self) -> bool {
        self.show_hud
    }

    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Nothing advances on its own; the loop only waits for input.
    pub const fn is_idle(&self) -> bool {
        self.paused || self.finished
    }

    pub const fn signal(&self) -> Option<i32> {
        self.signal
    }
}

/// Totals reported when the loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    pub elapsed: Duration,
    /// Termination signal that ended the run, if any.
    pub signal: Option<i32>,
}

/// Terminal output, optionally mirrored into a recording.
enum Output {
    Plain(io::Stdout),
    Recording(AsciicastWriter<io::Stdout, BufWriter<File>>),
}

impl Output {
    fn end_frame(&mut self) {
        if let Self::Recording(w) = self {
            w.end_frame();
        }
    }

    fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut out) => out.flush(),
            Self::Recording(w) => w.finish().map(|_| ()),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(out) => out.write(buf),
            Self::Recording(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(out) => out.flush(),
            Self::Recording(w) => w.flush(),
        }
    }
}

/// Draw the app's current frame with its HUD.
pub fn draw<R: Renderer>(app: &App, renderer: &mut R) -> io::Result<()> {
    let hud = app.hud_line();
    let mut scene = app.scene();
    if let Some(text) = hud.as_deref() {
        scene = scene.with_overlay(text);
    }
    renderer.draw(&scene)
}

/// Take over the terminal and animate until done.
pub fn run(config: AppConfig) -> io::Result<RunSummary> {
    let session = TerminalSession::new(SessionOptions::fullscreen())?;
    let (cols, rows) = session.size()?;
    tracing::info!(cols, rows, fps = config.fps, glyphs = ?config.glyphs, "animation starting");

    let output = match &config.record {
        Some(path) => {
            let recorder = AsciicastRecorder::create(path, cols, rows, Timing::fixed(config.fps))?;
            Output::Recording(AsciicastWriter::new(io::stdout(), recorder))
        }
        None => Output::Plain(io::stdout()),
    };
    let mut renderer =
        TerminalRenderer::new(output, cols, rows, config.glyphs).with_thick(config.thick);
    let frame_interval = config.frame_interval();
    let exit_after = config.exit_after;
    let mut app = App::new(config.simulation, config.hud);

    let started = Instant::now();
    let mut frames = 0u64;
    loop {
        let frame_start = Instant::now();

        let mut dirty = false;
        while session.poll_event(Duration::ZERO)? {
            match session.read_event()? {
                Event::Key(key) => {
                    app.on_key(key);
                    dirty = true;
                }
                Event::Resize(cols, rows) => {
                    renderer.resize(cols, rows);
                    dirty = true;
                }
                _ => {}
            }
        }
        if let Some(signal) = session.pending_signal() {
            app.on_signal(signal);
        }
        if app.should_quit() {
            tracing::info!("quit requested");
            break;
        }
        if let Some(limit) = exit_after
            && started.elapsed() >= limit
        {
            tracing::info!(limit_ms = limit.as_millis() as u64, "exit deadline reached");
            break;
        }

        let advanced = app.advance();
        if advanced || dirty {
            draw(&app, &mut renderer)?;
        }
        if advanced {
            renderer.writer_mut().end_frame();
            frames += 1;
        }

        let budget = if app.is_idle() {
            Some(frame_interval.unwrap_or(Duration::from_millis(50)))
        } else {
            frame_interval
        };
        if let Some(budget) = budget {
            let spent = frame_start.elapsed();
            if spent < budget {
                if app.is_idle() {
                    session.poll_event(budget - spent)?;
                } else {
                    thread::sleep(budget - spent);
                }
            }
        }
    }

    let summary = RunSummary {
        frames,
        steps: app.simulation().total_steps(),
        elapsed: started.elapsed(),
        signal: app.signal(),
    };
    renderer.into_inner().finish()?;
    drop(session);
    tracing::info!(
        frames = summary.frames,
        steps = summary.steps,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "animation finished"
    );
    Ok(summary)
}
