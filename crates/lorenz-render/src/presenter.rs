#![forbid(unsafe_code)]

//! ANSI presenter: writes the difference between consecutive buffers.
//!
//! Each frame is encoded into an internal byte buffer first and handed to
//! the output in a single `write_all`, wrapped in a synchronized-update
//! bracket so terminals that support it swap the frame atomically. The
//! encoded bytes of the last frame stay available for recording.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use crossterm::queue;

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba};

/// Counters for the most recent present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    /// Cells whose glyph or color was emitted.
    pub cells_changed: usize,
    /// Bytes handed to the output.
    pub bytes: usize,
    /// Whether the frame was a full repaint.
    pub full_repaint: bool,
}

/// Diffing presenter over any byte sink.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    out: W,
    previous: Option<Buffer>,
    background: PackedRgba,
    scratch: Vec<u8>,
    stats: PresentStats,
}

fn to_color(c: PackedRgba) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            background: PackedRgba::BLACK,
            scratch: Vec::with_capacity(16 * 1024),
            stats: PresentStats::default(),
        }
    }

    /// Background painted on full repaints and behind blank cells.
    #[must_use]
    pub fn with_background(mut self, background: PackedRgba) -> Self {
        self.background = background;
        self
    }

    /// Force the next present to repaint everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Emit `buf`, diffed against the last presented buffer.
    ///
    /// A size change or [`invalidate`](Self::invalidate) triggers a full
    /// repaint. An unchanged buffer writes nothing.
    pub fn present(&mut self, buf: &Buffer) -> io::Result<PresentStats> {
        self.scratch.clear();
        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != buf.width() || prev.height() != buf.height());

        let changed = if full {
            self.encode_full(buf)?
        } else {
            self.encode_diff(buf)?
        };

        if changed > 0 || full {
            let mut framed = Vec::with_capacity(self.scratch.len() + 32);
            queue!(framed, BeginSynchronizedUpdate)?;
            framed.extend_from_slice(&self.scratch);
            queue!(framed, EndSynchronizedUpdate)?;
            self.scratch = framed;
            self.out.write_all(&self.scratch)?;
            self.out.flush()?;
        } else {
            self.scratch.clear();
        }

        if full {
            self.previous = Some(buf.clone());
        } else if let Some(prev) = self.previous.as_mut() {
            prev.clone_from(buf);
        }

        self.stats = PresentStats {
            cells_changed: changed,
            bytes: self.scratch.len(),
            full_repaint: full,
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(
            cells = changed,
            bytes = self.stats.bytes,
            full,
            "frame presented"
        );
        Ok(self.stats)
    }

    fn encode_full(&mut self, buf: &Buffer) -> io::Result<usize> {
        let bg = to_color(self.background);
        queue!(self.scratch, SetBackgroundColor(bg), Clear(ClearType::All))?;
        let mut fg = None;
        let mut changed = 0;
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let Some(cell) = buf.get(x, y) else { continue };
                if cell.is_empty() {
                    continue;
                }
                Self::emit_cell(&mut self.scratch, x, y, cell, &mut fg)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn encode_diff(&mut self, buf: &Buffer) -> io::Result<usize> {
        let Some(prev) = self.previous.as_ref() else {
            return Ok(0);
        };
        let bg = to_color(self.background);
        let mut bg_set = false;
        let mut fg = None;
        let mut cursor: Option<(u16, u16)> = None;
        let mut changed = 0;
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let (Some(cell), Some(old)) = (buf.get(x, y), prev.get(x, y)) else {
                    continue;
                };
                if cell == old {
                    continue;
                }
                if !bg_set {
                    queue!(self.scratch, SetBackgroundColor(bg))?;
                    bg_set = true;
                }
                if cursor != Some((x, y)) {
                    queue!(self.scratch, MoveTo(x, y))?;
                }
                if fg != Some(cell.fg) {
                    queue!(self.scratch, SetForegroundColor(to_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                queue!(self.scratch, Print(cell.ch))?;
                cursor = Some((x.saturating_add(1), y));
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn emit_cell(
        out: &mut Vec<u8>,
        x: u16,
        y: u16,
        cell: &Cell,
        fg: &mut Option<PackedRgba>,
    ) -> io::Result<()> {
        queue!(out, MoveTo(x, y))?;
        if *fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_color(cell.fg)))?;
            *fg = Some(cell.fg);
        }
        queue!(out, Print(cell.ch))
    }

    /// Bytes written by the last present (empty if nothing changed).
    pub fn last_frame_bytes(&self) -> &[u8] {
        &self.scratch
    }

    pub const fn stats(&self) -> PresentStats {
        self.stats
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn first_present_is_full_repaint() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 0, Cell::new('⠿', PackedRgba::rgb(10, 20, 30)));
        let stats = p.present(&buf).unwrap();
        assert!(stats.full_repaint);
        assert_eq!(stats.cells_changed, 1);
        let out = text(p.writer_mut());
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("38;2;10;20;30"));
        assert!(out.contains('⠿'));
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut p = Presenter::new(Vec::new());
        let buf = Buffer::new(3, 3);
        p.present(&buf).unwrap();
        let before = p.writer_mut().len();
        let stats = p.present(&buf).unwrap();
        assert_eq!(stats.cells_changed, 0);
        assert_eq!(stats.bytes, 0);
        assert_eq!(p.writer_mut().len(), before);
        assert!(p.last_frame_bytes().is_empty());
    }

    #[test]
    fn diff_emits_only_changed_cells() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(5, 1);
        p.present(&buf).unwrap();
        p.writer_mut().clear();

        buf.set(2, 0, Cell::new('⠁', PackedRgba::WHITE));
        let stats = p.present(&buf).unwrap();
        assert!(!stats.full_repaint);
        assert_eq!(stats.cells_changed, 1);
        let out = text(p.writer_mut());
        // MoveTo is 1-based: column 3, row 1.
        assert!(out.contains("\x1b[1;3H"));
        assert!(!out.contains("\x1b[2J"));
    }

    #[test]
    fn cleared_cell_is_blanked() {
        let mut p = Presenter::new(Vec::new());
        let mut buf = Buffer::new(2, 1);
        buf.set(0, 0, Cell::new('⠁', PackedRgba::WHITE));
        p.present(&buf).unwrap();
        p.writer_mut().clear();

        buf.clear();
        let stats = p.present(&buf).unwrap();
        assert_eq!(stats.cells_changed, 1);
        assert!(text(p.writer_mut()).contains(' '));
    }

    #[test]
    fn resize_forces_full_repaint() {
        let mut p = Presenter::new(Vec::new());
        p.present(&Buffer::new(2, 2)).unwrap();
        let stats = p.present(&Buffer::new(3, 2)).unwrap();
        assert!(stats.full_repaint);
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut p = Presenter::new(Vec::new());
        let buf = Buffer::new(2, 2);
        p.present(&buf).unwrap();
        p.invalidate();
        assert!(p.present(&buf).unwrap().full_repaint);
    }

    #[test]
    fn frames_are_synchronized() {
        let mut p = Presenter::new(Vec::new());
        p.present(&Buffer::new(1, 1)).unwrap();
        let out = text(p.last_frame_bytes());
        assert!(out.starts_with("\x1b[?2026h"));
        assert!(out.ends_with("\x1b[?2026l"));
    }
}
