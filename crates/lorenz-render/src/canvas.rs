#![forbid(unsafe_code)]

//! Sub-pixel painter with per-dot color blending.
//!
//! Each terminal cell maps to a grid of dots whose resolution depends on the
//! chosen [`Mode`]:
//!
//! | Mode        | Dots per cell | Chars used       |
//! |-------------|--------------:|------------------|
//! | `Braille`   | 2 × 4 = 8     | U+2800..U+28FF   |
//! | `HalfBlock` | 1 × 2 = 2     | Upper/lower half |
//!
//! Every dot holds a color. Drawing composites the stroke color over the dot
//! (or over the background for an untouched dot) with source-over, so
//! translucent old trail segments darken toward the background and newer
//! segments drawn later sit on top. A cell's glyph is built from the dots
//! that are bright enough to see, and the cell takes the brightest dot's
//! color.

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba};

/// Dots dimmer than this (sum of RGB) are left dark.
pub const MIN_VISIBLE_INTENSITY: u16 = 24;

/// Resolution mode for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 2×4 dots per cell using Unicode Braille patterns (U+2800..U+28FF).
    #[default]
    Braille,
    /// 1×2 vertical halves per cell using half-block characters.
    HalfBlock,
}

impl Mode {
    /// Dot columns per terminal cell.
    #[inline]
    pub const fn cols_per_cell(self) -> u16 {
        match self {
            Mode::Braille => 2,
            Mode::HalfBlock => 1,
        }
    }

    /// Dot rows per terminal cell.
    #[inline]
    pub const fn rows_per_cell(self) -> u16 {
        match self {
            Mode::Braille => 4,
            Mode::HalfBlock => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "braille" => Some(Self::Braille),
            "half" | "halfblock" | "block" => Some(Self::HalfBlock),
            _ => None,
        }
    }
}

/// Accumulates blended strokes on a dot grid.
#[derive(Debug, Clone)]
pub struct Painter {
    width: u16,
    height: u16,
    mode: Mode,
    background: PackedRgba,
    /// Row-major; `TRANSPARENT` means never drawn.
    dots: Vec<PackedRgba>,
}

impl Painter {
    /// Create a painter with the given dot dimensions and mode.
    pub fn new(width: u16, height: u16, mode: Mode) -> Self {
        Self {
            width,
            height,
            mode,
            background: PackedRgba::BLACK,
            dots: vec![PackedRgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Create a painter covering `cols` x `rows` terminal cells.
    pub fn for_cells(cols: u16, rows: u16, mode: Mode) -> Self {
        Self::new(
            cols.saturating_mul(mode.cols_per_cell()),
            rows.saturating_mul(mode.rows_per_cell()),
            mode,
        )
    }

    /// Background that strokes are composited onto.
    #[must_use]
    pub fn with_background(mut self, background: PackedRgba) -> Self {
        self.background = background;
        self
    }

    /// Dot dimensions.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Terminal cells needed to show every dot.
    pub fn cell_size(&self) -> (u16, u16) {
        (
            self.width.div_ceil(self.mode.cols_per_cell()),
            self.height.div_ceil(self.mode.rows_per_cell()),
        )
    }

    /// Forget every stroke.
    pub fn clear(&mut self) {
        self.dots.fill(PackedRgba::TRANSPARENT);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Composited color of a dot, `None` if never drawn or out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<PackedRgba> {
        self.index(x, y)
            .map(|i| self.dots[i])
            .filter(|c| *c != PackedRgba::TRANSPARENT)
    }

    /// True when the dot has been drawn and is bright enough to show.
    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.get(x, y)
            .is_some_and(|c| c.intensity() >= MIN_VISIBLE_INTENSITY)
    }

    /// Composite `color` onto one dot.
    pub fn blend(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(idx) = self.index(x, y) {
            let dst = self.dots[idx];
            let base = if dst == PackedRgba::TRANSPARENT {
                self.background
            } else {
                dst
            };
            self.dots[idx] = color.over(base);
        }
    }

    /// Draw a line between two dot-space points, clipped to the grid.
    ///
    /// Non-finite endpoints draw nothing. With `thick` set each dot is
    /// doubled to the right and below.
    pub fn stroke(&mut self, from: (f64, f64), to: (f64, f64), color: PackedRgba, thick: bool) {
        let Some((a, b)) = self.clip(from, to) else {
            return;
        };
        let (x0, y0) = (a.0.round() as i32, a.1.round() as i32);
        let (x1, y1) = (b.0.round() as i32, b.1.round() as i32);
        self.line(x0, y0, x1, y1, color, thick);
    }

    /// Bresenham line between integer dot coordinates.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: PackedRgba, thick: bool) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cx = x0;
        let mut cy = y0;

        loop {
            self.blend(cx, cy, color);
            if thick {
                self.blend(cx + 1, cy, color);
                self.blend(cx, cy + 1, color);
            }

            if cx == x1 && cy == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                if cx == x1 {
                    break;
                }
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                if cy == y1 {
                    break;
                }
                err += dx;
                cy += sy;
            }
        }
    }

    /// Liang-Barsky clip of a segment to `[0, w-1] x [0, h-1]`.
    fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let (xmax, ymax) = ((self.width - 1) as f64, (self.height - 1) as f64);
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (p, q) in [
            (-dx, from.0),
            (dx, xmax - from.0),
            (-dy, from.1),
            (dy, ymax - from.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return None;
                    }
                    t0 = t0.max(r);
                } else {
                    if r < t0 {
                        return None;
                    }
                    t1 = t1.min(r);
                }
            }
        }
        Some((
            (from.0 + t0 * dx, from.1 + t0 * dy),
            (from.0 + t1 * dx, from.1 + t1 * dy),
        ))
    }

    /// Fold the dots into cells of `buf`, starting at cell `(x, y)`.
    ///
    /// Cells without a visible dot are left untouched.
    pub fn render_to_buffer(&self, x: u16, y: u16, buf: &mut Buffer) {
        let cols = self.mode.cols_per_cell() as i32;
        let rows = self.mode.rows_per_cell() as i32;
        let (cell_cols, cell_rows) = self.cell_size();

        for cy in 0..cell_rows {
            for cx in 0..cell_cols {
                let px_x = cx as i32 * cols;
                let px_y = cy as i32 * rows;

                let cell = match self.mode {
                    Mode::Braille => self.braille_cell(px_x, px_y),
                    Mode::HalfBlock => self.halfblock_cell(px_x, px_y),
                };

                if let Some(cell) = cell {
                    buf.set(x.saturating_add(cx), y.saturating_add(cy), cell);
                }
            }
        }
    }

    /// Compute the Braille cell for a 2×4 dot block.
    fn braille_cell(&self, px_x: i32, px_y: i32) -> Option<Cell> {
        // Braille dot numbering to bit mapping:
        // dot 1 (0,0) = bit 0    dot 4 (1,0) = bit 3
        // dot 2 (0,1) = bit 1    dot 5 (1,1) = bit 4
        // dot 3 (0,2) = bit 2    dot 6 (1,2) = bit 5
        // dot 7 (0,3) = bit 6    dot 8 (1,3) = bit 7
        const DOT_BITS: [[u8; 4]; 2] = [
            [0, 1, 2, 6], // column 0: dots 1,2,3,7
            [3, 4, 5, 7], // column 1: dots 4,5,6,8
        ];

        let mut bits: u8 = 0;
        let mut brightest: Option<PackedRgba> = None;

        for col in 0..2 {
            for row in 0..4 {
                let (x, y) = (px_x + col, px_y + row);
                if !self.is_lit(x, y) {
                    continue;
                }
                bits |= 1 << DOT_BITS[col as usize][row as usize];
                if let Some(c) = self.get(x, y)
                    && brightest.is_none_or(|b| c.intensity() > b.intensity())
                {
                    brightest = Some(c);
                }
            }
        }

        let fg = brightest?;
        let ch = char::from_u32(0x2800 + bits as u32)?;
        Some(Cell::new(ch, fg))
    }

    /// Compute the half-block cell for a 1×2 dot block.
    fn halfblock_cell(&self, px_x: i32, px_y: i32) -> Option<Cell> {
        let top = self.is_lit(px_x, px_y);
        let bot = self.is_lit(px_x, px_y + 1);

        let ch = match (top, bot) {
            (false, false) => return None,
            (true, false) => '▀',
            (false, true) => '▄',
            (true, true) => '█',
        };
        let fg = [(px_x, px_y), (px_x, px_y + 1)]
            .into_iter()
            .filter(|&(x, y)| self.is_lit(x, y))
            .filter_map(|(x, y)| self.get(x, y))
            .max_by_key(|c| c.intensity())?;
        Some(Cell::new(ch, fg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: PackedRgba = PackedRgba::rgb(255, 0, 0);
    const BLUE: PackedRgba = PackedRgba::rgb(0, 0, 255);

    #[test]
    fn mode_dimensions() {
        assert_eq!(Mode::Braille.cols_per_cell(), 2);
        assert_eq!(Mode::Braille.rows_per_cell(), 4);
        assert_eq!(Mode::HalfBlock.cols_per_cell(), 1);
        assert_eq!(Mode::HalfBlock.rows_per_cell(), 2);
    }

    #[test]
    fn painter_for_cells() {
        let p = Painter::for_cells(10, 5, Mode::Braille);
        assert_eq!(p.size(), (20, 20));
        assert_eq!(p.cell_size(), (10, 5));
    }

    #[test]
    fn cell_size_rounds_up() {
        let p = Painter::new(3, 5, Mode::Braille);
        assert_eq!(p.cell_size(), (2, 2));
    }

    #[test]
    fn out_of_bounds_blend_is_ignored() {
        let mut p = Painter::new(4, 4, Mode::Braille);
        p.blend(-1, 0, RED);
        p.blend(4, 0, RED);
        assert!(p.get(-1, 0).is_none());
        assert!(p.get(4, 0).is_none());
    }

    #[test]
    fn bresenham_diagonal_and_reversed() {
        let mut p = Painter::new(10, 10, Mode::Braille);
        p.line(9, 9, 0, 0, RED, false);
        for i in 0..10 {
            assert!(p.is_lit(i, i), "dot ({i}, {i}) should be lit");
        }
    }

    #[test]
    fn thick_line_doubles_dots() {
        let mut p = Painter::new(10, 10, Mode::Braille);
        p.line(2, 2, 2, 2, RED, true);
        assert!(p.is_lit(2, 2));
        assert!(p.is_lit(3, 2));
        assert!(p.is_lit(2, 3));
    }

    #[test]
    fn translucent_stroke_dims_toward_background() {
        let mut p = Painter::new(4, 4, Mode::Braille);
        p.blend(1, 1, PackedRgba::rgba(200, 0, 0, 128));
        assert_eq!(p.get(1, 1), Some(PackedRgba::rgb(100, 0, 0)));
    }

    #[test]
    fn faint_dots_stay_dark() {
        let mut p = Painter::new(2, 4, Mode::Braille);
        p.blend(0, 0, PackedRgba::rgba(255, 255, 255, 1));
        assert!(p.get(0, 0).is_some());
        assert!(!p.is_lit(0, 0));
        let mut buf = Buffer::new(1, 1);
        p.render_to_buffer(0, 0, &mut buf);
        assert_eq!(buf.lit_cells(), 0);
    }

    #[test]
    fn later_strokes_sit_on_top() {
        let mut p = Painter::new(4, 4, Mode::Braille);
        p.blend(0, 0, RED);
        p.blend(0, 0, BLUE);
        assert_eq!(p.get(0, 0), Some(BLUE));
    }

    #[test]
    fn stroke_clips_to_grid() {
        let mut p = Painter::new(10, 10, Mode::Braille);
        p.stroke((-50.0, 5.0), (50.0, 5.0), RED, false);
        for x in 0..10 {
            assert!(p.is_lit(x, 5));
        }
    }

    #[test]
    fn stroke_fully_outside_draws_nothing() {
        let mut p = Painter::new(10, 10, Mode::Braille);
        p.stroke((-50.0, -5.0), (50.0, -1.0), RED, false);
        p.stroke((1e300, 3.0), (2e300, 4.0), RED, false);
        assert!((0..10).all(|x| (0..10).all(|y| p.get(x, y).is_none())));
    }

    #[test]
    fn stroke_with_nan_draws_nothing() {
        let mut p = Painter::new(10, 10, Mode::Braille);
        p.stroke((f64::NAN, 1.0), (3.0, 3.0), RED, false);
        assert!((0..10).all(|x| (0..10).all(|y| p.get(x, y).is_none())));
    }

    #[test]
    fn braille_single_dot() {
        let mut p = Painter::new(2, 4, Mode::Braille);
        p.blend(0, 0, RED);
        assert_eq!(p.braille_cell(0, 0), Some(Cell::new('\u{2801}', RED)));
    }

    #[test]
    fn braille_all_dots_brightest_color() {
        let mut p = Painter::new(2, 4, Mode::Braille);
        for y in 0..4 {
            for x in 0..2 {
                p.blend(x, y, PackedRgba::rgb(60, 0, 0));
            }
        }
        p.blend(1, 3, PackedRgba::rgb(0, 200, 0));
        let cell = p.braille_cell(0, 0).unwrap();
        assert_eq!(cell.ch, '\u{28FF}');
        assert_eq!(cell.fg, PackedRgba::rgb(0, 200, 0));
    }

    #[test]
    fn braille_empty_cell() {
        let p = Painter::new(2, 4, Mode::Braille);
        assert_eq!(p.braille_cell(0, 0), None);
    }

    #[test]
    fn halfblock_combinations() {
        let mut p = Painter::new(1, 2, Mode::HalfBlock);
        assert!(p.halfblock_cell(0, 0).is_none());

        p.blend(0, 0, RED);
        assert_eq!(p.halfblock_cell(0, 0).map(|c| c.ch), Some('▀'));

        p.clear();
        p.blend(0, 1, RED);
        assert_eq!(p.halfblock_cell(0, 0).map(|c| c.ch), Some('▄'));

        p.blend(0, 0, RED);
        assert_eq!(p.halfblock_cell(0, 0).map(|c| c.ch), Some('█'));
    }

    #[test]
    fn renders_into_buffer_at_offset() {
        let mut painter = Painter::new(4, 8, Mode::Braille);
        for y in 0..4 {
            for x in 0..2 {
                painter.blend(x, y, RED);
            }
        }
        let mut buf = Buffer::new(4, 4);
        painter.render_to_buffer(1, 1, &mut buf);
        assert_eq!(buf.get(1, 1).map(|c| c.ch), Some('\u{28FF}'));
        assert_eq!(buf.lit_cells(), 1);
    }

    #[test]
    fn mode_names() {
        assert_eq!(Mode::from_name("braille"), Some(Mode::Braille));
        assert_eq!(Mode::from_name("HALF"), Some(Mode::HalfBlock));
        assert_eq!(Mode::from_name("sixel"), None);
    }
}
