//! A CPU software renderer for character-cell displays.
//!
//! Scenes are textured triangle meshes. Each frame is rasterized row by row
//! into an [`Image`] of colored glyphs, spread across worker threads, then
//! composited onto a [`Screen`] which sends only changed cells to the display.
//!
//! # Quick Start
//!
//! ```ignore
//! use cellraster::prelude::*;
//!
//! let engine = Engine::new(RenderConfig::default())?;
//! let mut screen = Screen::new(TerminalDisplay::open()?)?;
//! let cube = make_cuboid(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));
//! let camera = Camera::new(Vec3::new(0.0, 0.0, -2.0), Vec3::FORWARD);
//!
//! let image = engine.render(&camera, &[cube], screen.height(), screen.width());
//! screen.draw(&image).render()?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod screen;
pub mod terminal;
pub mod texture;
pub mod transform;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use colors::{Cell, Color};
pub use config::RenderConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use mesh::{make_cuboid, Polygon};
pub use render::Image;
pub use screen::{fit_aspect, Screen, SessionGuard};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use cellraster::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::Camera;

    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::Engine;
    pub use crate::error::{Error, Result};

    // Scene
    pub use crate::colors::{Cell, Color};
    pub use crate::mesh::{make_cuboid, Polygon};
    pub use crate::texture::{PlaneMapping, Placement, Sampler, Texture};
    pub use crate::transform::{apply_transform, Transformable};

    // Math
    pub use crate::math::geometry::{Line, Plane, Triangle};
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;

    // Output
    pub use crate::display::{DisplayDevice, DrawCommand};
    pub use crate::render::Image;
    pub use crate::screen::{fit_aspect, Screen, SessionGuard};
    pub use crate::terminal::TerminalDisplay;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::camera::View;
    pub use crate::render::{
        partition_rows, RowScratch, ScanlineMut, ScanlineRasterizer, Scheduler, Span,
    };
}
