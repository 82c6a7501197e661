//! Camera pose and the per-frame view derived from it.
//!
//! # Screen mapping
//!
//! The camera looks along `direction` from `position`. Only the facing of
//! `direction` matters; the view uses its unit vector `d`. The horizontal
//! screen axis is `bx` and the vertical axis `by`, both from
//! [`orthonormal_basis`]. Normalized screen coordinates run from `-0.5` to
//! `0.5` across the view, so one unit in front of the eye the view is one unit
//! wide and one unit tall:
//!
//! ```text
//!   point = position + z*d + z*x*bx + z*y*by
//! ```
//!
//! `z` is the distance along the view axis, not Euclidean range. Image row
//! `i` of `H` sits at `y = i/H - 0.5`, so row 0 looks toward `-by`.

use crate::math::geometry::{orthonormal_basis, Plane, Triangle};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::transform::Transformable;

/// Position and facing. The direction need not be unit length but must be non-zero.
///
/// A non-unit direction renders exactly like its unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Default for Camera {
    /// One unit behind the origin, looking along +Z.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -1.0), Vec3::FORWARD)
    }
}

impl Camera {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.direction = target - self.position;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Screen axes `[bx, by, bz]` for the current direction.
    pub fn basis(&self) -> [Vec3; 3] {
        orthonormal_basis(self.direction)
    }

    /// Precomputes what the rasterizer needs for one frame.
    pub fn view(&self) -> View {
        let [bx, by, _] = self.basis();
        View {
            origin: self.position,
            axis: self.direction.normalize(),
            bx,
            by,
        }
    }
}

/// Moves the position as a point and turns the direction as a vector, so a
/// rotation about the origin orbits the camera while it keeps facing the
/// same relative way.
impl Transformable for Camera {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        Self::new(
            *transform * self.position,
            transform.transform_vector(self.direction),
        )
    }
}

/// A camera frozen for one frame, with its basis already computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    origin: Vec3,
    axis: Vec3,
    bx: Vec3,
    by: Vec3,
}

impl View {
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Normalized vertical coordinate of image row `row` out of `height`.
    #[inline]
    pub fn row_coord(row: usize, height: usize) -> f64 {
        row as f64 / height as f64 - 0.5
    }

    /// Normalized horizontal coordinate of column `col` out of `width`.
    #[inline]
    pub fn col_coord(col: usize, width: usize) -> f64 {
        col as f64 / width as f64 - 0.5
    }

    /// The plane through the eye and the left and right edges of the view at
    /// vertical coordinate `y`.
    pub fn row_plane(&self, y: f64) -> Plane {
        let center = self.origin + self.axis + self.by * y;
        Triangle::new(
            self.origin,
            center - self.bx * 0.5,
            center + self.bx * 0.5,
        )
        .plane()
    }

    /// Projects a world point to `(x, z)`: horizontal screen coordinate and
    /// depth along the view axis. Points at or behind the eye give `None`.
    pub fn project(&self, point: Vec3) -> Option<(f64, f64)> {
        let rel = point - self.origin;
        let depth = rel.dot(self.axis);
        if depth > 0.0 {
            Some((rel.dot(self.bx) / depth, depth))
        } else {
            None
        }
    }

    /// Inverse of [`View::project`] for a point on row coordinate `y`.
    pub fn unproject(&self, x: f64, y: f64, depth: f64) -> Vec3 {
        self.origin + self.axis * depth + self.bx * (depth * x) + self.by * (depth * y)
    }
}
