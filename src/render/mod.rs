//! Frame production: images, row rasterization and row scheduling.

pub mod framebuffer;
pub mod rasterizer;
pub mod scheduler;

pub use framebuffer::{Image, ScanlineMut};
pub use rasterizer::{RowScratch, ScanlineRasterizer, Span};
pub use scheduler::{partition_rows, Scheduler};
