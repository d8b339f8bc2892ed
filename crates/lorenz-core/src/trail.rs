#![forbid(unsafe_code)]

//! Bounded, time-ordered trail of line segments with index-aligned colors.
//!
//! Entries are appended at the tail and evicted from the head (FIFO). The
//! buffer may grow past `fade_length` while a frame is being simulated; it is
//! brought back under the cap by [`TrailBuffer::trim`], which the simulation
//! calls once per frame. After a trim, [`TrailBuffer::apply_fade`] rewrites the
//! alpha channel into a linear ramp from `1/n` (oldest) to `1.0` (newest).

use crate::color::Rgba;
use crate::integrator::State;

/// One integration step's worth of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: State,
    pub end: State,
}

impl Segment {
    #[inline]
    pub const fn new(start: State, end: State) -> Self {
        Self { start, end }
    }

    /// A zero-length segment anchored at `at`.
    #[inline]
    pub const fn point(at: State) -> Self {
        Self::new(at, at)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Alpha for entry `index` of a trail holding `len` entries.
///
/// Returns `(index + 1) / len`, so the newest entry is fully opaque.
#[inline]
pub fn fade_alpha(index: usize, len: usize) -> f32 {
    debug_assert!(index < len);
    (index + 1) as f32 / len as f32
}

/// Segments plus parallel colors, capped at `fade_length` after each trim.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    segments: Vec<Segment>,
    colors: Vec<Rgba>,
    fade_length: usize,
}

/// Upper bound on the entries reserved up front by [`TrailBuffer::new`].
pub const MAX_PREALLOC: usize = 4096;

impl TrailBuffer {
    /// Create an empty buffer. A `fade_length` of zero is treated as one.
    ///
    /// Pre-allocation is capped at [`MAX_PREALLOC`] entries; longer trails
    /// grow on demand.
    pub fn new(fade_length: usize) -> Self {
        let fade_length = fade_length.max(1);
        let capacity = fade_length.saturating_add(16).min(MAX_PREALLOC);
        Self {
            segments: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            fade_length,
        }
    }

    /// Append a segment and its color at the tail.
    #[inline]
    pub fn push(&mut self, segment: Segment, color: Rgba) {
        self.segments.push(segment);
        self.colors.push(color);
    }

    /// Drop the oldest entries until at most `fade_length` remain.
    ///
    /// Returns the number of evicted entries.
    pub fn trim(&mut self) -> usize {
        let excess = self.segments.len().saturating_sub(self.fade_length);
        if excess > 0 {
            self.segments.drain(..excess);
            self.colors.drain(..excess);
        }
        excess
    }

    /// Overwrite every alpha with the linear fade ramp; RGB is untouched.
    pub fn apply_fade(&mut self) {
        let n = self.colors.len();
        for (i, color) in self.colors.iter_mut().enumerate() {
            color.a = fade_alpha(i, n);
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Oldest retained segment.
    pub fn oldest(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Most recently appended segment.
    pub fn newest(&self) -> Option<&Segment> {
        self.segments.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub const fn fade_length(&self) -> usize {
        self.fade_length
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.colors.clear();
    }
}
