#![forbid(unsafe_code)]

//! Monotonic hue cursor used to walk a colormap.

/// Hue accumulator. The raw value only grows; [`HueCursor::sample`] wraps it
/// into `[0, 1)` for colormap lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueCursor {
    value: f64,
    increment: f64,
}

impl HueCursor {
    pub const fn new(increment: f64) -> Self {
        Self {
            value: 0.0,
            increment,
        }
    }

    /// Raw accumulated value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub const fn increment(&self) -> f64 {
        self.increment
    }

    /// The cursor wrapped into `[0, 1)`.
    #[inline]
    pub fn sample(&self) -> f64 {
        wrap_unit(self.value)
    }

    /// Move the cursor forward by one increment.
    #[inline]
    pub fn advance(&mut self) {
        self.value += self.increment;
    }
}

/// Wrap any finite value into `[0, 1)`. Non-finite input maps to `0.0`.
#[inline]
pub fn wrap_unit(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}
