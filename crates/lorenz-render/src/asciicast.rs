#![forbid(unsafe_code)]

//! Asciicast v2 recorder for capturing the animation.
//!
//! Output is newline-delimited JSON compatible with asciinema-player: a
//! header object followed by `[time, "o", "text"]` event arrays.
//!
//! Event times come from a [`Timing`]. Wall-clock timing stamps each event
//! with the time since recording started. Fixed-rate timing stamps every
//! event of frame `n` with `n / fps` seconds, so a recording plays back at a
//! steady rate no matter how fast frames were produced.
//!
//! # Example
//! ```no_run
//! use lorenz_render::asciicast::{AsciicastRecorder, AsciicastWriter, Timing};
//! use std::io::{Cursor, Write};
//!
//! let recorder =
//!     AsciicastRecorder::with_writer(Cursor::new(Vec::new()), 80, 24, 0, Timing::fixed(60)).unwrap();
//! let mut out = AsciicastWriter::new(Vec::new(), recorder);
//! out.write_all(b"\x1b[2J").unwrap();
//! out.end_frame();
//! ```

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Default playback rate for fixed-rate recordings.
pub const DEFAULT_FPS: u32 = 60;

/// Source of event timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Seconds since the recorder was created.
    WallClock,
    /// `frame / fps` seconds, advanced by [`AsciicastRecorder::end_frame`].
    FixedRate { fps: u32 },
}

impl Timing {
    /// Fixed-rate timing; `fps` of zero falls back to [`DEFAULT_FPS`].
    pub const fn fixed(fps: u32) -> Self {
        Self::FixedRate {
            fps: if fps == 0 { DEFAULT_FPS } else { fps },
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::fixed(DEFAULT_FPS)
    }
}

/// Records terminal output in asciicast v2 format.
#[derive(Debug)]
pub struct AsciicastRecorder<W: Write> {
    output: W,
    start: Instant,
    timing: Timing,
    frame: u64,
    width: u16,
    height: u16,
    event_count: u64,
    path: Option<PathBuf>,
}

impl AsciicastRecorder<BufWriter<File>> {
    /// Create a recorder that writes to a file at `path`.
    pub fn create(path: &Path, width: u16, height: u16, timing: Timing) -> io::Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let timestamp = unix_timestamp()?;
        let recorder = AsciicastRecorder::build(
            writer,
            width,
            height,
            timestamp,
            timing,
            Some(path.to_path_buf()),
        )?;
        #[cfg(feature = "tracing")]
        tracing::info!(path = ?path, width, height, "asciicast recording started");
        Ok(recorder)
    }
}

impl<W: Write> AsciicastRecorder<W> {
    /// Create a recorder that writes to the provided writer.
    ///
    /// `timestamp` is seconds since UNIX epoch used in the asciicast header.
    pub fn with_writer(
        output: W,
        width: u16,
        height: u16,
        timestamp: i64,
        timing: Timing,
    ) -> io::Result<Self> {
        Self::build(output, width, height, timestamp, timing, None)
    }

    /// Record terminal output bytes at the current time.
    pub fn record_output(&mut self, data: &[u8]) -> io::Result<()> {
        let time = self.now();
        let text = String::from_utf8_lossy(data);
        writeln!(self.output, "[{:.6},\"o\",\"{}\"]", time, escape_json(&text))?;
        self.event_count += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(bytes = data.len(), time, "output recorded");
        Ok(())
    }

    /// Close the current frame. Under fixed-rate timing later events are
    /// stamped one frame interval later.
    pub fn end_frame(&mut self) {
        self.frame += 1;
    }

    /// Timestamp the next event would carry, in seconds.
    pub fn now(&self) -> f64 {
        match self.timing {
            Timing::WallClock => self.start.elapsed().as_secs_f64(),
            Timing::FixedRate { fps } => self.frame as f64 / f64::from(fps.max(1)),
        }
    }

    #[must_use]
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Frames closed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frame
    }

    /// Number of events recorded so far.
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Recorded duration under the active timing.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.now().max(0.0))
    }

    /// File path for recorders created with [`AsciicastRecorder::create`].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Flush output and return the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.output.flush()?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            path = ?self.path,
            duration_secs = self.now(),
            events = self.event_count,
            frames = self.frame,
            "asciicast recording complete"
        );
        Ok(self.output)
    }

    fn build(
        mut output: W,
        width: u16,
        height: u16,
        timestamp: i64,
        timing: Timing,
        path: Option<PathBuf>,
    ) -> io::Result<Self> {
        write_header(&mut output, width, height, timestamp)?;
        Ok(Self {
            output,
            start: Instant::now(),
            timing,
            frame: 0,
            width,
            height,
            event_count: 0,
            path,
        })
    }
}

/// Writer that mirrors terminal output into an asciicast recorder.
#[derive(Debug)]
pub struct AsciicastWriter<W: Write, R: Write> {
    inner: W,
    recorder: AsciicastRecorder<R>,
}

impl<W: Write, R: Write> AsciicastWriter<W, R> {
    pub const fn new(inner: W, recorder: AsciicastRecorder<R>) -> Self {
        Self { inner, recorder }
    }

    pub fn recorder(&self) -> &AsciicastRecorder<R> {
        &self.recorder
    }

    /// Close the current frame on the recorder.
    pub fn end_frame(&mut self) {
        self.recorder.end_frame();
    }

    /// Flush and finish recording, returning the inner writer and recorder output.
    pub fn finish(mut self) -> io::Result<(W, R)> {
        self.inner.flush()?;
        let recorder_output = self.recorder.finish()?;
        Ok((self.inner, recorder_output))
    }
}

impl<W: Write, R: Write> Write for AsciicastWriter<W, R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        if written > 0 {
            self.recorder.record_output(&buf[..written])?;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        self.recorder.output.flush()
    }
}

fn write_header<W: Write>(
    output: &mut W,
    width: u16,
    height: u16,
    timestamp: i64,
) -> io::Result<()> {
    writeln!(
        output,
        "{{\"version\":2,\"width\":{},\"height\":{},\"timestamp\":{}}}",
        width, height, timestamp
    )
}

fn unix_timestamp() -> io::Result<i64> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| io::Error::other("system time before unix epoch"))?;
    i64::try_from(since_epoch.as_secs()).map_err(io::Error::other)
}

fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' || c == '\u{7f}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
