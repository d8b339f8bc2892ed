#![forbid(unsafe_code)]

//! Frame index schedule for the animation driver.
//!
//! Yields `0..frame_count`. With `repeat` enabled the indices start over at
//! zero once exhausted; the simulation itself is never reset, so only the
//! camera orbit (which is a function of the index) restarts.

/// Iterator over frame indices.
#[derive(Debug, Clone)]
pub struct FrameSchedule {
    frame_count: u32,
    repeat: bool,
    next: u32,
    emitted: u64,
}

impl FrameSchedule {
    /// A `frame_count` of zero yields nothing.
    pub const fn new(frame_count: u32, repeat: bool) -> Self {
        Self {
            frame_count,
            repeat,
            next: 0,
            emitted: 0,
        }
    }

    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub const fn repeats(&self) -> bool {
        self.repeat
    }

    /// Total frame indices yielded so far, across repeats.
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Number of completed passes over `0..frame_count`.
    pub const fn passes(&self) -> u64 {
        if self.frame_count == 0 {
            0
        } else {
            self.emitted / self.frame_count as u64
        }
    }
}

impl Iterator for FrameSchedule {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.frame_count == 0 {
            return None;
        }
        if self.next >= self.frame_count {
            if !self.repeat {
                return None;
            }
            self.next = 0;
        }
        let frame = self.next;
        self.next += 1;
        self.emitted += 1;
        Some(frame)
    }
}
