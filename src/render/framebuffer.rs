//! Character images and borrowed row views.
//!
//! An [`Image`] is a grid of pixels where each pixel is either transparent
//! (`None`) or a visible [`Cell`]. Transparency is what lets several images be
//! overlaid onto one another before a frame is shown.
//!
//! Rows are handed out as [`ScanlineMut`] views. The views come from
//! `chunks_mut`, so two views can never alias the same row; this is what lets
//! render workers write into one image without locking.

use std::fmt;

use crate::colors::Cell;

/// A rectangular grid of optionally visible cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pixels: Vec<Option<Cell>>,
    width: usize,
    height: usize,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            pixels: vec![None; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// The visible cell at (row, col), or `None` if transparent or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).and_then(|i| self.pixels[i])
    }

    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Makes (row, col) visible with `cell`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.pixels[i] = Some(cell);
        }
    }

    /// Makes (row, col) transparent. Out-of-bounds writes are ignored.
    pub fn erase(&mut self, row: usize, col: usize) {
        if let Some(i) = self.index(row, col) {
            self.pixels[i] = None;
        }
    }

    /// Makes every pixel transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    /// Pixels of one row, left to right.
    ///
    /// # Panics
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Option<Cell>] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn visible_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Copies every visible pixel of `other` over this image.
    ///
    /// Only the overlapping extent is touched; size mismatches are not an
    /// error. Later overlays win, regardless of what depth produced them.
    pub fn overlay(&mut self, other: &Image) -> &mut Self {
        let height = self.height.min(other.height);
        let width = self.width.min(other.width);
        for row in 0..height {
            let dst = &mut self.pixels[row * self.width..row * self.width + width];
            let src = &other.pixels[row * other.width..row * other.width + width];
            for (d, s) in dst.iter_mut().zip(src) {
                if s.is_some() {
                    *d = *s;
                }
            }
        }
        self
    }

    /// Mutable views over every row, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = ScanlineMut<'_>> {
        // chunks_mut rejects a zero chunk size; a zero-width image has no pixels anyway.
        self.pixels
            .chunks_mut(self.width.max(1))
            .enumerate()
            .map(|(index, pixels)| ScanlineMut { index, pixels })
    }
}

/// Prints visible glyphs and spaces elsewhere, one line per row.
impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = self
                .row(row)
                .iter()
                .map(|p| p.map_or(' ', |cell| cell.glyph))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Exclusive access to one row of an [`Image`].
pub struct ScanlineMut<'a> {
    index: usize,
    pixels: &'a mut [Option<Cell>],
}

impl<'a> ScanlineMut<'a> {
    /// Row number within the parent image.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn set(&mut self, col: usize, cell: Cell) {
        if let Some(p) = self.pixels.get_mut(col) {
            *p = Some(cell);
        }
    }

    pub fn get(&self, col: usize) -> Option<Cell> {
        self.pixels.get(col).copied().flatten()
    }
}
