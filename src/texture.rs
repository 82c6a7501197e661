//! Surface textures: pure functions from a world-space point to a display cell.
//!
//! The rasterizer samples a texture once per visible pixel, from whichever
//! worker thread owns the row, so every texture is `Send + Sync` and must not
//! mutate state while sampling.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::colors::{Cell, Color};
use crate::error::{Error, Result};
use crate::math::geometry::orthonormal_basis;
use crate::math::vec3::Vec3;

/// Cell used by polygons that never had a texture assigned.
pub const DEFAULT_CELL: Cell = Cell::glyph('#', Color::White);

/// Anything that can color a surface point.
///
/// Implemented for plain closures, so `Texture::custom(|p: Vec3| ...)` works.
pub trait Sampler: Send + Sync {
    fn sample(&self, point: Vec3) -> Cell;
}

impl<F> Sampler for F
where
    F: Fn(Vec3) -> Cell + Send + Sync,
{
    fn sample(&self, point: Vec3) -> Cell {
        self(point)
    }
}

/// A polygon's surface appearance. Cheap to clone: table data is shared.
#[derive(Clone)]
pub enum Texture {
    /// Every point gets the same cell.
    Fill(Cell),
    /// Points are projected onto a plane and looked up in a cell table.
    PlaneMapped(Arc<PlaneMapping>),
    /// A caller-supplied sampler.
    Custom(Arc<dyn Sampler>),
}

impl Texture {
    pub fn fill(cell: Cell) -> Self {
        Texture::Fill(cell)
    }

    pub fn plane_mapped(mapping: PlaneMapping) -> Self {
        Texture::PlaneMapped(Arc::new(mapping))
    }

    pub fn custom(sampler: impl Sampler + 'static) -> Self {
        Texture::Custom(Arc::new(sampler))
    }

    #[inline]
    pub fn sample(&self, point: Vec3) -> Cell {
        match self {
            Texture::Fill(cell) => *cell,
            Texture::PlaneMapped(mapping) => mapping.sample(point),
            Texture::Custom(sampler) => sampler.sample(point),
        }
    }
}

impl Default for Texture {
    fn default() -> Self {
        Texture::Fill(DEFAULT_CELL)
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Texture::Fill(cell) => f.debug_tuple("Fill").field(cell).finish(),
            Texture::PlaneMapped(mapping) => f.debug_tuple("PlaneMapped").field(mapping).finish(),
            Texture::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Cell> for Texture {
    fn from(cell: Cell) -> Self {
        Texture::Fill(cell)
    }
}

/// Where a [`PlaneMapping`] sits in world space.
///
/// The plane normal is given by spherical angles: `theta` is the azimuth in
/// the xz-plane measured from +X toward +Z, `phi` the elevation toward +Y.
/// `rot` spins the table within the plane. `width` and `height` are the world
/// extent covered by one copy of the table; the table tiles beyond it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Vec3,
    pub theta: f64,
    pub phi: f64,
    pub rot: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Placement {
    /// The xy-plane through the origin, table spanning one unit square.
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            theta: std::f64::consts::FRAC_PI_2,
            phi: 0.0,
            rot: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Placement {
    pub fn normal(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(cos_phi * cos_theta, sin_phi, cos_phi * sin_theta)
    }

    /// In-plane axes `(u, v)`: columns advance along `u`, rows along `v`.
    fn axes(&self) -> (Vec3, Vec3) {
        let [bx, by, _] = orthonormal_basis(self.normal());
        let (s, c) = self.rot.sin_cos();
        (bx * c + by * s, by * c - bx * s)
    }
}

/// A 2D cell table projected onto a plane, tiled in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMapping {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    origin: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    width: f64,
    height: f64,
}

impl PlaneMapping {
    /// Builds a mapping from a rectangular table of cells.
    pub fn new(table: Vec<Vec<Cell>>, placement: Placement) -> Result<Self> {
        let cols = table.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(Error::EmptyTextureTable);
        }
        for (row, cells) in table.iter().enumerate() {
            if cells.len() != cols {
                return Err(Error::RaggedTextureTable {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }

        let rows = table.len();
        let (u_axis, v_axis) = placement.axes();
        Ok(Self {
            cells: table.into_iter().flatten().collect(),
            rows,
            cols,
            origin: placement.origin,
            u_axis,
            v_axis,
            width: placement.width,
            height: placement.height,
        })
    }

    /// Builds a mapping from lines of text drawn in one color pair.
    pub fn from_glyphs(lines: &[&str], fg: Color, bg: Color, placement: Placement) -> Result<Self> {
        let table = lines
            .iter()
            .map(|line| line.chars().map(|glyph| Cell::new(glyph, fg, bg)).collect())
            .collect();
        Self::new(table, placement)
    }

    /// Loads an image and quantizes each pixel to a solid palette cell.
    pub fn from_image<P: AsRef<Path>>(path: P, placement: Placement) -> Result<Self> {
        let img = image::open(path)?.to_rgb8();
        let table = img
            .rows()
            .map(|row| {
                row.map(|p| {
                    let [r, g, b] = p.0;
                    Cell::solid(Color::nearest_rgb(r, g, b))
                })
                .collect()
            })
            .collect();
        Self::new(table, placement)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Projects `point` onto the plane and returns the covering table cell.
    ///
    /// Coordinates wrap with `rem_euclid`, so negative offsets tile the same
    /// way positive ones do.
    pub fn sample(&self, point: Vec3) -> Cell {
        let local = point - self.origin;
        let u = local.dot(self.u_axis) / self.width * self.cols as f64;
        let v = local.dot(self.v_axis) / self.height * self.rows as f64;

        let col = (u.floor() as i64).rem_euclid(self.cols as i64) as usize;
        let row = (v.floor() as i64).rem_euclid(self.rows as i64) as usize;
        self.cells[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> PlaneMapping {
        PlaneMapping::from_glyphs(&["#.", ".#"], Color::Green, Color::Black, Placement::default())
            .unwrap()
    }

    #[test]
    fn fill_ignores_the_point() {
        let cell = Cell::new('x', Color::Red, Color::Blue);
        let texture = Texture::fill(cell);
        assert_eq!(texture.sample(Vec3::ZERO), cell);
        assert_eq!(texture.sample(Vec3::new(9.0, -3.0, 1e6)), cell);
    }

    #[test]
    fn default_texture_uses_default_cell() {
        assert_eq!(Texture::default().sample(Vec3::ONE), DEFAULT_CELL);
    }

    #[test]
    fn closures_are_samplers() {
        let texture = Texture::custom(|p: Vec3| {
            if p.x < 0.0 {
                Cell::glyph('<', Color::Cyan)
            } else {
                Cell::glyph('>', Color::Cyan)
            }
        });
        assert_eq!(texture.sample(Vec3::new(-1.0, 0.0, 0.0)).glyph, '<');
        assert_eq!(texture.sample(Vec3::new(1.0, 0.0, 0.0)).glyph, '>');
    }

    #[test]
    fn plane_mapping_looks_up_quadrants() {
        let mapping = checker();
        assert_eq!(mapping.sample(Vec3::new(0.25, 0.25, 0.0)).glyph, '#');
        assert_eq!(mapping.sample(Vec3::new(0.75, 0.25, 0.0)).glyph, '.');
        assert_eq!(mapping.sample(Vec3::new(0.25, 0.75, 0.0)).glyph, '.');
        assert_eq!(mapping.sample(Vec3::new(0.75, 0.75, 0.0)).glyph, '#');
    }

    #[test]
    fn plane_mapping_ignores_distance_along_normal() {
        let mapping = checker();
        assert_eq!(
            mapping.sample(Vec3::new(0.75, 0.25, 0.0)),
            mapping.sample(Vec3::new(0.75, 0.25, 5.0))
        );
    }

    #[test]
    fn plane_mapping_tiles_negative_coordinates() {
        let mapping = checker();
        assert_eq!(mapping.sample(Vec3::new(-0.25, -0.25, 0.0)).glyph, '#');
        assert_eq!(mapping.sample(Vec3::new(-0.75, 0.25, 0.0)).glyph, '#');
        assert_eq!(mapping.sample(Vec3::new(1.25, 0.25, 0.0)).glyph, '#');
    }

    #[test]
    fn rotated_placement_swaps_axes() {
        let placement = Placement {
            rot: std::f64::consts::FRAC_PI_2,
            ..Placement::default()
        };
        let mapping = PlaneMapping::from_glyphs(&["ab"], Color::White, Color::Black, placement)
            .unwrap();
        // A quarter turn moves the column axis onto +Y.
        assert_eq!(mapping.sample(Vec3::new(0.0, 0.25, 0.0)).glyph, 'a');
        assert_eq!(mapping.sample(Vec3::new(0.0, 0.75, 0.0)).glyph, 'b');
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert!(matches!(
            PlaneMapping::new(vec![], Placement::default()),
            Err(Error::EmptyTextureTable)
        ));
        assert!(matches!(
            PlaneMapping::new(vec![vec![]], Placement::default()),
            Err(Error::EmptyTextureTable)
        ));
    }

    #[test]
    fn ragged_tables_are_rejected() {
        let result = PlaneMapping::from_glyphs(&["abc", "de"], Color::White, Color::Black, Placement::default());
        assert!(matches!(
            result,
            Err(Error::RaggedTextureTable {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn default_placement_faces_forward() {
        let normal = Placement::default().normal();
        approx::assert_abs_diff_eq!(normal, Vec3::FORWARD, epsilon = 1e-12);
    }
}
