#![forbid(unsafe_code)]

//! 3D → sub-pixel projection through an orbiting camera.
//!
//! Data coordinates are first normalized into a box centred on the origin
//! whose sides follow a 4:4:3 aspect, so the default limits
//! (`x, y ∈ [-30, 30]`, `z ∈ [0, 50]`) look like the usual attractor plot.
//! The box is then viewed from `(elevation, azimuth)` at a fixed eye
//! distance with a perspective divide, and fit into the viewport so that it
//! stays inside for every orientation.

use lorenz_core::{Camera, State};

/// Eye distance in normalized box units.
pub const EYE_DISTANCE: f64 = 10.0;

/// Radius (normalized units) mapped to the viewport's half-extent: the box
/// corner radius (~0.80) times the worst-case perspective gain (~1.09).
const FIT_RADIUS: f64 = 0.875;

/// Axis limits of the plotted region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl DataBounds {
    /// Limits used by the classic plot.
    pub const LORENZ: Self = Self {
        x: (-30.0, 30.0),
        y: (-30.0, 30.0),
        z: (0.0, 50.0),
    };

    /// Centre of the bounded region.
    pub fn center(&self) -> State {
        State::new(
            (self.x.0 + self.x.1) * 0.5,
            (self.y.0 + self.y.1) * 0.5,
            (self.z.0 + self.z.1) * 0.5,
        )
    }
}

impl Default for DataBounds {
    fn default() -> Self {
        Self::LORENZ
    }
}

/// Box side lengths, largest side = 1.
const BOX_ASPECT: [f64; 3] = [1.0, 1.0, 0.75];

/// Precomputed view transform for one camera and viewport.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    bounds: DataBounds,
    right: [f64; 3],
    up: [f64; 3],
    toward_eye: [f64; 3],
    center_x: f64,
    center_y: f64,
    scale: f64,
}

impl Projection {
    /// Projection for a viewport of `width` x `height` sub-pixels.
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self::with_bounds(camera, width, height, DataBounds::LORENZ)
    }

    pub fn with_bounds(camera: Camera, width: u32, height: u32, bounds: DataBounds) -> Self {
        let el = camera.elevation_deg.to_radians();
        let az = camera.azimuth_deg.to_radians();
        let (sin_el, cos_el) = el.sin_cos();
        let (sin_az, cos_az) = az.sin_cos();

        let w = width as f64;
        let h = height as f64;
        Self {
            bounds,
            right: [-sin_az, cos_az, 0.0],
            up: [-sin_el * cos_az, -sin_el * sin_az, cos_el],
            toward_eye: [cos_el * cos_az, cos_el * sin_az, sin_el],
            // Pixel centres run from 0.5 to w - 0.5; keep the origin on one.
            center_x: (w - 1.0) * 0.5,
            center_y: (h - 1.0) * 0.5,
            scale: (w.min(h) - 1.0).max(0.0) * 0.5 / FIT_RADIUS,
        }
    }

    fn normalize(&self, p: State) -> [f64; 3] {
        let axis = |v: f64, (lo, hi): (f64, f64), aspect: f64| {
            let span = hi - lo;
            if span == 0.0 {
                0.0
            } else {
                ((v - lo) / span - 0.5) * aspect
            }
        };
        [
            axis(p.x, self.bounds.x, BOX_ASPECT[0]),
            axis(p.y, self.bounds.y, BOX_ASPECT[1]),
            axis(p.z, self.bounds.z, BOX_ASPECT[2]),
        ]
    }

    /// Project a data point to sub-pixel coordinates.
    ///
    /// Returns `None` for non-finite input or points behind the eye. The
    /// result may lie outside the viewport; callers clip.
    pub fn project(&self, p: State) -> Option<(f64, f64)> {
        if !p.is_finite() {
            return None;
        }
        let n = self.normalize(p);
        let dot = |a: [f64; 3]| a[0] * n[0] + a[1] * n[1] + a[2] * n[2];
        let depth = dot(self.toward_eye);
        let denom = EYE_DISTANCE - depth;
        if denom <= f64::EPSILON {
            return None;
        }
        let persp = EYE_DISTANCE / denom;
        let sx = self.center_x + dot(self.right) * persp * self.scale;
        let sy = self.center_y - dot(self.up) * persp * self.scale;
        (sx.is_finite() && sy.is_finite()).then_some((sx, sy))
    }

    pub const fn bounds(&self) -> DataBounds {
        self.bounds
    }
}
