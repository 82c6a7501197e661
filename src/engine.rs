//! Core rendering engine.
//!
//! The [`Engine`] is the entry point for turning a scene into an [`Image`].
//! It owns the render settings, the row rasterizer and the worker threads,
//! all created once and reused for every frame:
//!
//! ```text
//!   Camera ──view()──┐
//!                    ├─> Scheduler ──lane per worker──> ScanlineRasterizer ──> Image rows
//!   &[Polygon] ──────┘
//! ```
//!
//! Rendering never fails. Geometry that cannot be drawn contributes no pixels.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::mesh::Polygon;
use crate::render::{Image, RowScratch, ScanlineRasterizer, Scheduler};

pub struct Engine {
    config: RenderConfig,
    rasterizer: ScanlineRasterizer,
    scheduler: Scheduler,
}

impl Engine {
    /// Builds an engine, starting `config.workers` threads if more than one.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let scheduler = Scheduler::new(config.workers)?;
        log::debug!(
            "render engine ready with {} worker(s), edge epsilon {:e}",
            scheduler.lanes(),
            config.edge_epsilon
        );
        Ok(Self {
            rasterizer: ScanlineRasterizer::new(&config),
            config,
            scheduler,
        })
    }

    /// An engine with default settings, one worker per hardware thread.
    pub fn with_defaults() -> Result<Self> {
        Self::new(RenderConfig::default())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.scheduler.lanes()
    }

    /// Renders `polygons` seen from `camera` into a new `height` x `width` image.
    pub fn render(
        &self,
        camera: &Camera,
        polygons: &[Polygon],
        height: usize,
        width: usize,
    ) -> Image {
        let mut image = Image::new(height, width);
        self.render_into(&mut image, camera, polygons);
        image
    }

    /// Renders over an existing image. Pixels no triangle covers keep their content.
    pub fn render_into(&self, image: &mut Image, camera: &Camera, polygons: &[Polygon]) {
        let view = camera.view();
        let height = image.height();
        let rasterizer = &self.rasterizer;

        self.scheduler.run(image, |rows| {
            let mut scratch = RowScratch::new();
            for row in rows.iter_mut() {
                rasterizer.render_row(&view, height, polygons, row, &mut scratch);
            }
        });
    }
}
