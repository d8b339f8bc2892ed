#![forbid(unsafe_code)]

//! Colormaps sampled by the hue cursor.
//!
//! [`Colormap::NipySpectral`] is the 21-stop spectral map (black through
//! purple, blue, green, yellow, red to light gray). Lookups are quantized to a
//! 256-entry table the same way a listed colormap is sampled: the input picks
//! bin `floor(t * 256)` and the bin's color is the piecewise-linear map
//! evaluated at `bin / 255`.

use crate::color::Rgba;

/// Number of entries in the quantized lookup.
pub const LUT_SIZE: usize = 256;

/// Stop positions shared by all three channels of the spectral map.
const SPECTRAL_POS: [f64; 21] = [
    0.00, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70,
    0.75, 0.80, 0.85, 0.90, 0.95, 1.00,
];

const SPECTRAL_RED: [f64; 21] = [
    0.0, 0.4667, 0.5333, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7333, 0.9333, 1.0,
    1.0, 1.0, 0.8667, 0.80, 0.80,
];

const SPECTRAL_GREEN: [f64; 21] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.4667, 0.6000, 0.6667, 0.6667, 0.6000, 0.7333, 0.8667, 1.0, 1.0,
    0.9333, 0.8000, 0.6000, 0.0, 0.0, 0.0, 0.80,
];

const SPECTRAL_BLUE: [f64; 21] = [
    0.0, 0.5333, 0.6000, 0.6667, 0.8667, 0.8667, 0.8667, 0.6667, 0.5333, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.80,
];

/// Available colormaps. All return opaque colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colormap {
    /// Spectral map: black -> purple -> blue -> green -> yellow -> red -> gray.
    #[default]
    NipySpectral,
    /// Full hue circle at full saturation; truly cyclic.
    Hsv,
}

impl Colormap {
    /// All colormaps, in CLI listing order.
    pub const ALL: [Self; 2] = [Self::NipySpectral, Self::Hsv];

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NipySpectral => "nipy",
            Self::Hsv => "hsv",
        }
    }

    /// Parse a short name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nipy" | "nipy_spectral" | "spectral" => Some(Self::NipySpectral),
            "hsv" | "rainbow" => Some(Self::Hsv),
            _ => None,
        }
    }

    /// Sample the map at `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn sample(self, t: f64) -> Rgba {
        let x = quantize(t);
        match self {
            Self::NipySpectral => Rgba::rgb(
                interp(&SPECTRAL_RED, x) as f32,
                interp(&SPECTRAL_GREEN, x) as f32,
                interp(&SPECTRAL_BLUE, x) as f32,
            ),
            Self::Hsv => hsv_to_rgb(x * 360.0, 1.0, 1.0),
        }
    }
}

/// Snap `t` to the center of its lookup bin, expressed in `[0, 1]`.
#[inline]
fn quantize(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let bin = ((t * LUT_SIZE as f64) as usize).min(LUT_SIZE - 1);
    bin as f64 / (LUT_SIZE - 1) as f64
}

fn interp(values: &[f64; 21], x: f64) -> f64 {
    let upper = SPECTRAL_POS
        .iter()
        .position(|&p| p >= x)
        .unwrap_or(SPECTRAL_POS.len() - 1);
    if upper == 0 {
        return values[0];
    }
    let lower = upper - 1;
    let span = SPECTRAL_POS[upper] - SPECTRAL_POS[lower];
    let s = (x - SPECTRAL_POS[lower]) / span;
    values[lower] + (values[upper] - values[lower]) * s
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgba {
    let h = h % 360.0;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgba::rgb((r + m) as f32, (g + m) as f32, (b + m) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-3 && (a.g - b.g).abs() < 1e-3 && (a.b - b.b).abs() < 1e-3
    }

    #[test]
    fn spectral_endpoints() {
        assert_eq!(Colormap::NipySpectral.sample(0.0), Rgba::BLACK);
        assert!(close(
            Colormap::NipySpectral.sample(1.0),
            Rgba::rgb(0.8, 0.8, 0.8)
        ));
        // Just under one lands in the last bin as well.
        assert!(close(
            Colormap::NipySpectral.sample(0.9999),
            Rgba::rgb(0.8, 0.8, 0.8)
        ));
    }

    #[test]
    fn spectral_passes_through_green() {
        // Bin 153 evaluates at 0.6, which is the pure-green stop.
        let c = Colormap::NipySpectral.sample(153.5 / 256.0);
        assert!(close(c, Rgba::rgb(0.0, 1.0, 0.0)), "{c:?}");
    }

    #[test]
    fn samples_are_opaque_and_in_range() {
        for map in Colormap::ALL {
            for i in 0..=1000 {
                let c = map.sample(i as f64 / 1000.0);
                assert_eq!(c.a, 1.0);
                for ch in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&ch), "{map:?} {i} {c:?}");
                }
            }
        }
    }

    #[test]
    fn quantization_groups_nearby_inputs() {
        let a = Colormap::NipySpectral.sample(0.5000);
        let b = Colormap::NipySpectral.sample(0.5015);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Colormap::NipySpectral.sample(-3.0), Rgba::BLACK);
        assert_eq!(Colormap::NipySpectral.sample(f64::NAN), Rgba::BLACK);
        assert_eq!(
            Colormap::NipySpectral.sample(7.0),
            Colormap::NipySpectral.sample(1.0)
        );
    }

    #[test]
    fn hsv_starts_red() {
        assert!(close(Colormap::Hsv.sample(0.0), Rgba::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn names_roundtrip() {
        for map in Colormap::ALL {
            assert_eq!(Colormap::from_name(map.name()), Some(map));
        }
        assert_eq!(Colormap::from_name("NIPY_SPECTRAL"), Some(Colormap::NipySpectral));
        assert_eq!(Colormap::from_name("viridis"), None);
    }
}
