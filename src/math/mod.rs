//! Geometry kernel: vectors, homogeneous transforms and the intersection
//! primitives used by the rasterizer.

pub mod geometry;
pub mod mat4;
pub mod vec3;

pub use geometry::{orthonormal_basis, Line, Plane, Triangle};
pub use mat4::Mat4;
pub use vec3::Vec3;
