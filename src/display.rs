//! The device a [`Screen`](crate::screen::Screen) draws onto.
//!
//! A display is a grid of character cells addressed by (row, col). The
//! screen only ever tells it about cells that changed, so implementations can
//! write straight through to slow outputs such as a terminal.

use crate::colors::Cell;
use crate::error::Result;

/// A character-cell output device.
pub trait DisplayDevice {
    /// Size in cells as `(height, width)`.
    fn size(&self) -> Result<(usize, usize)>;

    /// Shows `cell` at (row, col).
    fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()>;

    /// Blanks (row, col) back to the device background.
    fn clear_cell(&mut self, row: usize, col: usize) -> Result<()>;

    /// Makes all queued changes visible.
    fn flush(&mut self) -> Result<()>;
}

/// One update produced by diffing two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Set { row: usize, col: usize, cell: Cell },
    Clear { row: usize, col: usize },
}

impl DrawCommand {
    /// Sends this command to `display`.
    pub fn apply<D: DisplayDevice + ?Sized>(self, display: &mut D) -> Result<()> {
        match self {
            DrawCommand::Set { row, col, cell } => display.set_cell(row, col, cell),
            DrawCommand::Clear { row, col } => display.clear_cell(row, col),
        }
    }
}

impl<D: DisplayDevice + ?Sized> DisplayDevice for &mut D {
    fn size(&self) -> Result<(usize, usize)> {
        (**self).size()
    }

    fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        (**self).set_cell(row, col, cell)
    }

    fn clear_cell(&mut self, row: usize, col: usize) -> Result<()> {
        (**self).clear_cell(row, col)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
