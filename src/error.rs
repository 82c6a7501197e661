//! Errors surfaced at the edges of the renderer.
//!
//! Rendering itself never fails: degenerate geometry simply contributes no
//! pixels. Errors come from building resources (worker pools, textures) and
//! from the display device.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a display session is already active")]
    SessionActive,

    #[error("display I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load texture image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("texture table has no cells")]
    EmptyTextureTable,

    #[error("texture table row {row} has {found} cells, expected {expected}")]
    RaggedTextureTable {
        row: usize,
        expected: usize,
        found: usize,
    },
}
