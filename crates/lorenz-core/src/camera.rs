#![forbid(unsafe_code)]

//! Camera orientation and the slow orbit applied per frame.

/// Viewing angles in degrees. Elevation tilts above the x-y plane, azimuth
/// rotates about the z axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl Camera {
    pub const fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }

    /// Azimuth wrapped into `[0, 360)`, for display.
    pub fn azimuth_wrapped(&self) -> f64 {
        let a = self.azimuth_deg.rem_euclid(360.0);
        if a >= 360.0 { 0.0 } else { a }
    }
}

/// Fixed elevation plus an azimuth that grows linearly with the frame index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub elevation_deg: f64,
    pub azimuth_rate_deg: f64,
}

impl CameraRig {
    pub const fn new(elevation_deg: f64, azimuth_rate_deg: f64) -> Self {
        Self {
            elevation_deg,
            azimuth_rate_deg,
        }
    }

    /// Orientation for a frame: `azimuth = frame * azimuth_rate_deg`.
    #[inline]
    pub fn orientation(&self, frame: u32) -> Camera {
        Camera::new(self.elevation_deg, frame as f64 * self.azimuth_rate_deg)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(30.0, 0.5)
    }
}
