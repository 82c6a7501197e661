//! Applying [`Mat4`] transforms to geometry.
//!
//! Transforms never mutate in place: every application returns a new value,
//! so the same source mesh can be posed several ways within one frame.
//!
//! ```ignore
//! let spun = cube.apply_transform(&(Mat4::translate_z(3.0) * Mat4::rotate_y(0.4)));
//! ```

use crate::math::geometry::Triangle;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Polygon;

/// Geometry that can be moved by a homogeneous transform.
pub trait Transformable: Sized {
    fn apply_transform(&self, transform: &Mat4) -> Self;
}

/// Points transform with `w = 1`, picking up translation.
impl Transformable for Vec3 {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        *transform * *self
    }
}

/// Each vertex is transformed independently.
impl Transformable for Triangle {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        let [a, b, c] = self.vertices;
        Triangle::new(
            a.apply_transform(transform),
            b.apply_transform(transform),
            c.apply_transform(transform),
        )
    }
}

/// Keeps the texture as-is. Plane-mapped textures stay anchored in world
/// space, so moving a mesh slides it under its texture; callers that want
/// the texture to follow must build a matching placement themselves.
impl Transformable for Polygon {
    fn apply_transform(&self, transform: &Mat4) -> Self {
        self.triangles()
            .iter()
            .map(|tri| tri.apply_transform(transform))
            .collect::<Polygon>()
            .with_texture(self.texture().clone())
    }
}

/// Free-function form of [`Transformable::apply_transform`].
pub fn apply_transform<T: Transformable>(value: &T, transform: &Mat4) -> T {
    value.apply_transform(transform)
}
