//! Character grid the figure is drawn on
//!
//! Coordinates are signed so callers can compute positions freely; anything
//! outside the grid is clipped.

use std::fmt;
use std::ops::Range;
use tplot_core::TplotError;

/// Largest number of cells a canvas may hold
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// A blank canvas filled with spaces
    ///
    /// # Errors
    ///
    /// Returns `TplotError::FigureTooLarge` above [`MAX_CELLS`] cells
    pub fn new(width: usize, height: usize) -> Result<Self, TplotError> {
        let cells = width
            .checked_mul(height)
            .filter(|cells| *cells <= MAX_CELLS)
            .ok_or(TplotError::FigureTooLarge {
                width,
                height,
                max_cells: MAX_CELLS,
            })?;
        Ok(Self {
            width,
            height,
            cells: vec![' '; cells],
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|r| *r < self.height)?;
        let col = usize::try_from(col).ok().filter(|c| *c < self.width)?;
        Some(row * self.width + col)
    }

    #[must_use]
    pub fn get(&self, row: i64, col: i64) -> Option<char> {
        self.offset(row, col).map(|i| self.cells[i])
    }

    pub fn put(&mut self, row: i64, col: i64, ch: char) {
        if let Some(i) = self.offset(row, col) {
            self.cells[i] = ch;
        }
    }

    /// Fill `cols` of one row
    pub fn hline(&mut self, row: i64, cols: Range<i64>, ch: char) {
        for col in cols {
            self.put(row, col, ch);
        }
    }

    /// Fill `rows` of one column
    pub fn vline(&mut self, col: i64, rows: Range<i64>, ch: char) {
        for row in rows {
            self.put(row, col, ch);
        }
    }

    /// Write `text` left to right starting at `cols.start`, stopping at
    /// `cols.end`
    pub fn write_text(&mut self, row: i64, cols: Range<i64>, text: &str) {
        for (col, ch) in cols.zip(text.chars()) {
            self.put(row, col, ch);
        }
    }

    /// Write `text` top to bottom starting at `rows.start`, stopping at
    /// `rows.end`
    pub fn write_text_vertical(&mut self, col: i64, rows: Range<i64>, text: &str) {
        for (row, ch) in rows.zip(text.chars()) {
            self.put(row, col, ch);
        }
    }

    /// Rows as strings, top first
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

/// Integer points on the segment from `(x0, y0)` to `(x1, y1)`, both ends
/// included (Bresenham)
#[must_use]
pub fn line_segment(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<(i64, i64)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let mut points = Vec::with_capacity(usize::try_from(dx.max(-dy)).unwrap_or(0) + 1);

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
