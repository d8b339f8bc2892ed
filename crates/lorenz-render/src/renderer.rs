#![forbid(unsafe_code)]

//! The renderer seam between the simulation and a display.
//!
//! A [`Scene`] is what the simulation hands over each frame: segments,
//! index-aligned faded colors, a camera orientation, and an optional status
//! line. [`TerminalRenderer`] projects, rasterizes, and presents it.

use std::io::{self, Write};

use lorenz_core::{Camera, FrameView, Rgba, Segment};

use crate::buffer::Buffer;
use crate::canvas::{Mode, Painter};
use crate::cell::PackedRgba;
use crate::presenter::{PresentStats, Presenter};
use crate::projection::Projection;

/// One frame's worth of drawing input.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub segments: &'a [Segment],
    /// Same length as `segments`.
    pub colors: &'a [Rgba],
    pub camera: Camera,
    /// Status text drawn on the bottom row.
    pub overlay: Option<&'a str>,
}

impl<'a> Scene<'a> {
    pub const fn new(segments: &'a [Segment], colors: &'a [Rgba], camera: Camera) -> Self {
        Self {
            segments,
            colors,
            camera,
            overlay: None,
        }
    }

    #[must_use]
    pub const fn with_overlay(mut self, overlay: &'a str) -> Self {
        self.overlay = Some(overlay);
        self
    }
}

impl<'a> From<FrameView<'a>> for Scene<'a> {
    fn from(view: FrameView<'a>) -> Self {
        Self::new(view.segments, view.colors, view.camera)
    }
}

/// Anything that can display a [`Scene`].
pub trait Renderer {
    /// Draw one frame.
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()>;

    /// The display area changed to `cols` x `rows` cells.
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

/// Counters for the most recent draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub segments_drawn: usize,
    /// Segments with a non-finite or behind-the-eye endpoint.
    pub segments_skipped: usize,
    pub present: PresentStats,
}

/// Renders scenes as colored Braille (or half-block) cells.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    presenter: Presenter<W>,
    painter: Painter,
    buffer: Buffer,
    thick: bool,
    overlay_fg: PackedRgba,
    stats: DrawStats,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer over `out` for a `cols` x `rows` cell area.
    pub fn new(out: W, cols: u16, rows: u16, mode: Mode) -> Self {
        Self {
            presenter: Presenter::new(out),
            painter: Painter::for_cells(cols, rows, mode),
            buffer: Buffer::new(cols, rows),
            thick: false,
            overlay_fg: PackedRgba::rgb(200, 200, 200),
            stats: DrawStats::default(),
        }
    }

    /// Draw two-dot-wide strokes.
    #[must_use]
    pub fn with_thick(mut self, thick: bool) -> Self {
        self.thick = thick;
        self
    }

    pub const fn thick(&self) -> bool {
        self.thick
    }

    pub const fn mode(&self) -> Mode {
        self.painter.mode()
    }

    /// Cells presented by the last draw.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub const fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Bytes of the last presented frame.
    pub fn last_frame_bytes(&self) -> &[u8] {
        self.presenter.last_frame_bytes()
    }

    /// Repaint everything on the next draw.
    pub fn invalidate(&mut self) {
        self.presenter.invalidate();
    }

    pub fn writer_mut(&mut self) -> &mut W {
        self.presenter.writer_mut()
    }

    pub fn into_inner(self) -> W {
        self.presenter.into_inner()
    }

    fn rasterize(&mut self, scene: &Scene<'_>) {
        debug_assert_eq!(scene.segments.len(), scene.colors.len());
        self.painter.clear();
        let (w, h) = self.painter.size();
        let projection = Projection::new(scene.camera, u32::from(w), u32::from(h));

        let mut drawn = 0;
        let mut skipped = 0;
        for (segment, color) in scene.segments.iter().zip(scene.colors) {
            let (Some(from), Some(to)) = (
                projection.project(segment.start),
                projection.project(segment.end),
            ) else {
                skipped += 1;
                continue;
            };
            self.painter
                .stroke(from, to, PackedRgba::from(*color), self.thick);
            drawn += 1;
        }
        self.stats.segments_drawn = drawn;
        self.stats.segments_skipped = skipped;

        self.buffer.clear();
        self.painter.render_to_buffer(0, 0, &mut self.buffer);
        if let Some(text) = scene.overlay
            && self.buffer.height() > 0
        {
            let y = self.buffer.height() - 1;
            self.buffer.put_str(0, y, text, self.overlay_fg);
        }
    }
}

impl TerminalRenderer<io::Sink> {
    /// Renderer that rasterizes but writes nowhere.
    pub fn headless(cols: u16, rows: u16, mode: Mode) -> Self {
        Self::new(io::sink(), cols, rows, mode)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        self.rasterize(scene);
        self.stats.present = self.presenter.present(&self.buffer)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            drawn = self.stats.segments_drawn,
            skipped = self.stats.segments_skipped,
            "scene drawn"
        );
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) == (self.buffer.width(), self.buffer.height()) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(cols, rows, "renderer resized");
        self.painter = Painter::for_cells(cols, rows, self.painter.mode());
        self.buffer.resize(cols, rows);
        self.presenter.invalidate();
    }
}
