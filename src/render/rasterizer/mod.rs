//! Row rasterization.
//!
//! The only algorithm is [`ScanlineRasterizer`], which cuts the scene with
//! one view plane per image row. Rows are independent of each other, which
//! is what the scheduler relies on to split a frame across threads.

mod scanline;

pub use scanline::{RowScratch, ScanlineRasterizer, Span};
