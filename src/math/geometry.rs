//! Lines, planes and triangles, plus the plane/line intersection primitives
//! the scanline rasterizer is built on.
//!
//! None of these routines guard against degenerate input. A line parallel to
//! a plane divides by zero and yields non-finite points; a zero-area triangle
//! yields a NaN normal. Downstream tolerance checks reject such points because
//! every comparison against NaN is false.

use super::vec3::Vec3;

/// Tolerance below which an edge cross product counts as "on the edge".
const EDGE_TOLERANCE: f64 = 1e-8;

/// A segment between two points. Also used for camera view rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: Vec3,
    pub b: Vec3,
}

impl Line {
    pub const fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Point at parameter `t` along the line: `a + t(b - a)`.
    pub fn at(&self, t: f64) -> Vec3 {
        self.a + (self.b - self.a) * t
    }

    /// Whether `p` lies within the segment `[a, b]`.
    ///
    /// Uses the triangle inequality `|a-b| + epsilon >= |p-a| + |p-b|`, which
    /// rejects points beyond either endpoint while tolerating round-off when
    /// `p` sits exactly on a shared vertex. Non-finite points never pass.
    pub fn contains(&self, p: Vec3, epsilon: f64) -> bool {
        self.length() + epsilon >= p.distance(self.a) + p.distance(self.b)
    }
}

/// An infinite plane through `offset` with the given `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: Vec3,
}

impl Plane {
    pub const fn new(normal: Vec3, offset: Vec3) -> Self {
        Self { normal, offset }
    }

    /// Solves for `t` such that `line.at(t)` lies on the plane.
    ///
    /// Infinite or NaN when the line is parallel to the plane.
    pub fn intersect_param(&self, line: &Line) -> f64 {
        (self.offset - line.a).dot(self.normal) / (line.b - line.a).dot(self.normal)
    }

    /// The point where the (infinite) line crosses the plane.
    pub fn intersect(&self, line: &Line) -> Vec3 {
        line.at(self.intersect_param(line))
    }
}

impl From<&Triangle> for Plane {
    fn from(tri: &Triangle) -> Self {
        Plane::new(tri.normal(), tri.vertices[0])
    }
}

/// Three vertices. Winding is not significant to any test in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit normal `normalize((v1 - v0) x (v2 - v0))`.
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0).normalize()
    }

    pub fn plane(&self) -> Plane {
        Plane::from(self)
    }

    /// The three edges `v0-v1`, `v1-v2`, `v2-v0`.
    pub fn edges(&self) -> [Line; 3] {
        let [v0, v1, v2] = self.vertices;
        [Line::new(v0, v1), Line::new(v1, v2), Line::new(v2, v0)]
    }

    /// Strict inside test for a point assumed to lie on the triangle's plane.
    ///
    /// Each edge's cross product with the vertex-to-point vector must point the
    /// same way relative to the normal. Points within [`EDGE_TOLERANCE`] of an
    /// edge line are rejected.
    pub fn contains(&self, p: Vec3) -> bool {
        let normal = self.normal();
        let mut positive = 0;
        for i in 0..3 {
            let start = self.vertices[i];
            let edge = self.vertices[(i + 1) % 3] - start;
            let side = edge.cross(p - start).dot(normal);
            if side.is_nan() || side.abs() < EDGE_TOLERANCE {
                return false;
            }
            if side > 0.0 {
                positive += 1;
            }
        }
        positive == 0 || positive == 3
    }

    /// Where `line` pierces this triangle, if it does.
    pub fn intersect_line(&self, line: &Line) -> Option<Vec3> {
        let p = self.plane().intersect(line);
        self.contains(p).then_some(p)
    }
}

/// Builds the camera basis `[bx, by, bz]` for a viewing direction.
///
/// `bz` is the normalized direction. `bx` is horizontal: the azimuth
/// `atan2(z, x)` of the direction turned 90 degrees in the xz-plane.
/// `by = bz x bx` completes the right-handed frame. `direction` must be
/// non-zero.
pub fn orthonormal_basis(direction: Vec3) -> [Vec3; 3] {
    let theta = direction.z.atan2(direction.x);
    let bz = direction.normalize();
    let bx = Vec3::new(theta.sin(), 0.0, -theta.cos());
    let by = bz.cross(bx);
    [bx, by, bz]
}
