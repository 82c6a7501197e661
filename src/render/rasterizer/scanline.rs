//! Per-row plane-intersection rasterization.
//!
//! Instead of projecting triangles to the screen and walking their edges,
//! this rasterizer slices the scene with one plane per image row.
//!
//! # Algorithm Overview
//!
//! For image row `i` of `H`:
//!
//! 1. **Row plane**: the plane through the eye and the left and right edges of
//!    the view at `y = i/H - 0.5` (see [`View::row_plane`]).
//! 2. **Edge crossings**: every triangle edge is intersected with the plane.
//!    A crossing counts only if it lies on the segment, tested with
//!    `|a-b| + eps >= |p-a| + |p-b|`.
//! 3. **Projection**: crossings are projected to `(x, depth)`; anything at or
//!    behind the eye is dropped.
//! 4. **Span**: a triangle that leaves exactly two crossings covers the
//!    horizontal span between them. Tangent, vertex-touching and coplanar
//!    cases produce a different count and are skipped.
//! 5. **Fill**: columns inside the span, widened by the edge epsilon on both
//!    sides, interpolate depth linearly in `x` and win against the row's depth
//!    buffer if nearer. Winners sample the polygon's texture at the
//!    reconstructed world point. The slack closes the gap two triangles
//!    sharing an edge would otherwise leave when their crossings round apart.
//!
//! ```text
//!            row plane
//!   eye  ----------------->   *----------*   <- triangle cut by the plane
//!                            x_a        x_b     gives one span per row
//! ```
//!
//! Depth is the parametric distance along the view axis and is interpolated
//! linearly in screen space, not perspective-correctly.
//!
//! Parallel edges produce non-finite crossings which fail the segment test,
//! so no explicit guard is needed.

use crate::camera::View;
use crate::config::RenderConfig;
use crate::math::geometry::{Plane, Triangle};
use crate::mesh::Polygon;
use crate::render::framebuffer::ScanlineMut;
use crate::texture::Texture;

/// The part of one row covered by one triangle, `x0 <= x1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub x0: f64,
    pub depth0: f64,
    pub x1: f64,
    pub depth1: f64,
}

impl Span {
    /// Depth at `x`, linear between the endpoints and held constant beyond them.
    #[inline]
    pub fn depth_at(&self, x: f64) -> f64 {
        let width = self.x1 - self.x0;
        let t = if width > 0.0 {
            ((x - self.x0) / width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.depth0 + (self.depth1 - self.depth0) * t
    }
}

/// Per-worker scratch space, reused from row to row.
#[derive(Debug, Default)]
pub struct RowScratch {
    depth: Vec<f64>,
    crossings: Vec<(f64, f64)>,
}

impl RowScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rasterizes one image row at a time.
///
/// The rasterizer holds only read-only settings; all mutable state lives in
/// the [`RowScratch`] passed by the caller, so one instance can be shared by
/// every worker.
#[derive(Debug, Clone, Copy)]
pub struct ScanlineRasterizer {
    edge_epsilon: f64,
    depth_clear: f64,
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl ScanlineRasterizer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            edge_epsilon: config.edge_epsilon,
            depth_clear: config.depth_clear,
        }
    }

    /// Renders every polygon into `row`, an image row of an image `height` rows tall.
    ///
    /// Pixels no triangle covers are left untouched.
    pub fn render_row(
        &self,
        view: &View,
        height: usize,
        polygons: &[Polygon],
        row: &mut ScanlineMut<'_>,
        scratch: &mut RowScratch,
    ) {
        let width = row.width();
        let y = View::row_coord(row.index(), height);
        let plane = view.row_plane(y);

        scratch.depth.clear();
        scratch.depth.resize(width, self.depth_clear);

        for polygon in polygons {
            for triangle in polygon.triangles() {
                if let Some(span) = self.span(view, &plane, triangle, &mut scratch.crossings) {
                    self.fill_span(
                        view,
                        y,
                        &span,
                        polygon.texture(),
                        row,
                        &mut scratch.depth,
                    );
                }
            }
        }
    }

    /// Cuts `triangle` with the row plane.
    ///
    /// Returns a span only when exactly two edge crossings survive the
    /// segment and in-front tests.
    pub fn span(
        &self,
        view: &View,
        plane: &Plane,
        triangle: &Triangle,
        crossings: &mut Vec<(f64, f64)>,
    ) -> Option<Span> {
        crossings.clear();
        for edge in triangle.edges() {
            let p = plane.intersect(&edge);
            if !edge.contains(p, self.edge_epsilon) {
                continue;
            }
            if let Some(projected) = view.project(p) {
                crossings.push(projected);
            }
        }

        if crossings.len() != 2 {
            return None;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (x0, depth0) = crossings[0];
        let (x1, depth1) = crossings[1];
        Some(Span {
            x0,
            depth0,
            x1,
            depth1,
        })
    }

    /// Writes the columns of `row` whose normalized x lies in `span`, give or
    /// take the edge epsilon.
    fn fill_span(
        &self,
        view: &View,
        y: f64,
        span: &Span,
        texture: &Texture,
        row: &mut ScanlineMut<'_>,
        depth: &mut [f64],
    ) {
        let width = row.width();
        let lo = span.x0 - self.edge_epsilon;
        let hi = span.x1 + self.edge_epsilon;
        // Start one column early at most; the range check below decides.
        let first = ((lo + 0.5) * width as f64).floor().max(0.0) as usize;

        for col in first..width {
            let x = View::col_coord(col, width);
            if x > hi {
                break;
            }
            if x < lo {
                continue;
            }

            let z = span.depth_at(x);
            if z < depth[col] {
                depth[col] = z;
                row.set(col, texture.sample(view.unproject(x, y, z)));
            }
        }
    }
}
