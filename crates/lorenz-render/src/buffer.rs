#![forbid(unsafe_code)]

//! Fixed-size grid of cells, row-major.

use crate::cell::{Cell, PackedRgba};

/// A `width` x `height` grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn is_empty_area(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::EMPTY);
    }

    /// Write `text` starting at `(x, y)`, one cell per char, clipped at the
    /// right edge. Returns the number of cells written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: PackedRgba) -> u16 {
        let mut written = 0u16;
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            let cx = x.saturating_add(offset);
            if cx >= self.width || y >= self.height {
                break;
            }
            let ch = if ch.is_control() { ' ' } else { ch };
            self.set(cx, y, Cell::new(ch, fg));
            written += 1;
        }
        written
    }

    /// Number of non-blank cells.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Row `y` as a string, for tests and snapshots.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
