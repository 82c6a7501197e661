//! Textured triangle meshes and the procedural cuboid generator.

use crate::math::geometry::Triangle;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

pub const CUBOID_CORNERS: usize = 8;
pub const CUBOID_TRIANGLES: usize = 12;

/// An ordered list of triangles sharing one texture.
///
/// Polygons own their triangles and a (cheaply cloned) texture handle.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    triangles: Vec<Triangle>,
    texture: Texture,
}

impl Polygon {
    /// Creates a polygon with the default texture.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            texture: Texture::default(),
        }
    }

    pub fn with_texture(mut self, texture: impl Into<Texture>) -> Self {
        self.texture = texture.into();
        self
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: impl Into<Texture>) {
        self.texture = texture.into();
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Moves all of `other`'s triangles into this polygon. `other`'s texture is dropped.
    pub fn append(&mut self, other: Polygon) {
        self.triangles.extend(other.triangles);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Extend<Triangle> for Polygon {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl FromIterator<Triangle> for Polygon {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Polygon::new(iter.into_iter().collect())
    }
}

/// Corner `index` of the box spanned by `begin` and `end`.
///
/// Bit `i` of the index picks `end[i]` over `begin[i]`.
fn corner(begin: Vec3, end: Vec3, index: usize) -> Vec3 {
    let pick = |axis: usize| {
        if (index >> axis) & 1 == 1 {
            end[axis]
        } else {
            begin[axis]
        }
    };
    Vec3::new(pick(0), pick(1), pick(2))
}

/// Builds the axis-aligned box spanned by two opposite corners.
///
/// Each face is the set of corners sharing one bit value on one axis. The
/// other two axes walk the face's four corners in order, and the quad is
/// split along its diagonal into two triangles.
pub fn make_cuboid(begin: Vec3, end: Vec3) -> Polygon {
    let corners: Vec<Vec3> = (0..CUBOID_CORNERS)
        .map(|i| corner(begin, end, i))
        .collect();

    let mut triangles = Vec::with_capacity(CUBOID_TRIANGLES);
    for axis in 0..3 {
        let j = 1 << ((axis + 1) % 3);
        let k = 1 << ((axis + 2) % 3);
        for side in [0, 1 << axis] {
            let quad = [side, side | j, side | j | k, side | k];
            triangles.push(Triangle::new(
                corners[quad[0]],
                corners[quad[1]],
                corners[quad[2]],
            ));
            triangles.push(Triangle::new(
                corners[quad[0]],
                corners[quad[2]],
                corners[quad[3]],
            ));
        }
    }

    Polygon::new(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Cell, Color};

    fn unique_vertices(polygon: &Polygon) -> Vec<Vec3> {
        let mut out: Vec<Vec3> = Vec::new();
        for tri in polygon.triangles() {
            for v in tri.vertices {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        }
        out
    }

    #[test]
    fn cuboid_has_twelve_triangles_over_eight_corners() {
        let begin = Vec3::new(-0.5, 0.2, 1.0);
        let end = Vec3::new(0.5, 0.4, 3.0);
        let cuboid = make_cuboid(begin, end);
        assert_eq!(cuboid.len(), CUBOID_TRIANGLES);

        let vertices = unique_vertices(&cuboid);
        assert_eq!(vertices.len(), CUBOID_CORNERS);
        for i in 0..CUBOID_CORNERS {
            assert!(vertices.contains(&corner(begin, end, i)));
        }
    }

    #[test]
    fn cuboid_faces_lie_on_box_planes() {
        let cuboid = make_cuboid(Vec3::ZERO, Vec3::ONE);
        for tri in cuboid.triangles() {
            // Each triangle is flat on one axis at either 0 or 1.
            let flat = (0..3).any(|axis| {
                let [a, b, c] = tri.vertices;
                a[axis] == b[axis] && b[axis] == c[axis]
            });
            assert!(flat, "triangle not on a face: {tri:?}");
        }
    }

    #[test]
    fn cuboid_triangles_are_not_degenerate() {
        let cuboid = make_cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        for tri in cuboid.triangles() {
            assert!(tri.normal().is_finite());
        }
    }

    #[test]
    fn corner_bits_select_axes() {
        let begin = Vec3::ZERO;
        let end = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(corner(begin, end, 0b000), begin);
        assert_eq!(corner(begin, end, 0b111), end);
        assert_eq!(corner(begin, end, 0b101), Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn polygons_start_with_default_texture() {
        let polygon = make_cuboid(Vec3::ZERO, Vec3::ONE);
        assert_eq!(
            polygon.texture().sample(Vec3::ZERO),
            crate::texture::DEFAULT_CELL
        );
        let cell = Cell::solid(Color::Red);
        let polygon = polygon.with_texture(cell);
        assert_eq!(polygon.texture().sample(Vec3::ZERO), cell);
    }

    #[test]
    fn append_merges_triangles() {
        let mut block = make_cuboid(Vec3::ZERO, Vec3::ONE);
        block.append(make_cuboid(Vec3::ONE, Vec3::new(2.0, 2.0, 2.0)));
        assert_eq!(block.len(), 2 * CUBOID_TRIANGLES);
    }

    #[test]
    fn push_adds_one_triangle() {
        let mut polygon = Polygon::default();
        assert!(polygon.is_empty());
        let tri = Triangle::new(Vec3::ZERO, Vec3::RIGHT, Vec3::UP);
        polygon.push(tri);
        assert_eq!(polygon.len(), 1);
        assert_eq!(polygon.triangles()[0], tri);
    }
}
