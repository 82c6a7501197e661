//! 4x4 homogeneous transformation matrix.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec3`
//! - Translation is stored in the **last column** (index 3)
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed: positive angles turn counter-clockwise when
//!   looking down the axis toward the origin
//!
//! Applying a matrix to a [`Vec3`] treats it as a point with an implicit
//! `w = 1` and keeps the first three rows. There is no perspective divide;
//! the rasterizer does its own projection against row view-planes.
//!
//! # Example
//! ```ignore
//! let transform = Mat4::translate_xyz(0.0, 1.0, 0.0) * Mat4::rotate_y(0.5);
//! let moved = transform * vertex; // rotate first, then lift
//! ```

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    // ============ Rotation ============

    /// Creates a rotation matrix around the X axis.
    pub fn rotate_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[1][1] = c;
        m.data[1][2] = -s;
        m.data[2][1] = s;
        m.data[2][2] = c;
        m
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotate_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[0][0] = c;
        m.data[0][2] = s;
        m.data[2][0] = -s;
        m.data[2][2] = c;
        m
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotate_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.data[0][0] = c;
        m.data[0][1] = -s;
        m.data[1][0] = s;
        m.data[1][1] = c;
        m
    }

    // ============ Scale ============

    pub fn scale_x(factor: f64) -> Self {
        Self::scale_xyz(factor, 1.0, 1.0)
    }

    pub fn scale_y(factor: f64) -> Self {
        Self::scale_xyz(1.0, factor, 1.0)
    }

    pub fn scale_z(factor: f64) -> Self {
        Self::scale_xyz(1.0, 1.0, factor)
    }

    /// Uniform scale on all three axes.
    pub fn scale_all(factor: f64) -> Self {
        Self::scale_xyz(factor, factor, factor)
    }

    pub fn scale_xyz(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::identity();
        m.data[0][0] = x;
        m.data[1][1] = y;
        m.data[2][2] = z;
        m
    }

    // ============ Translation ============

    pub fn translate_x(dx: f64) -> Self {
        Self::translate_xyz(dx, 0.0, 0.0)
    }

    pub fn translate_y(dy: f64) -> Self {
        Self::translate_xyz(0.0, dy, 0.0)
    }

    pub fn translate_z(dz: f64) -> Self {
        Self::translate_xyz(0.0, 0.0, dz)
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translate_xyz(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::identity();
        m.data[0][3] = x;
        m.data[1][3] = y;
        m.data[2][3] = z;
        m
    }

    /// Transforms a direction: the implicit `w` is 0, so translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.data;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let m = &self.data;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Mat4::default(), Mat4::identity());
    }

    #[test]
    fn opposite_translations_cancel() {
        let (x, y, z) = (1.5, -2.25, 40.0);
        let m = Mat4::translate_xyz(x, y, z) * Mat4::translate_xyz(-x, -y, -z);
        assert_mat_eq(m, Mat4::identity());
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let p = Vec3::new(0.3, -7.0, 2.5);
        assert_eq!(Mat4::identity() * p, p);
    }

    #[test]
    fn rotations_are_right_handed() {
        assert_relative_eq!(
            Mat4::rotate_z(FRAC_PI_2) * Vec3::RIGHT,
            Vec3::UP,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Mat4::rotate_x(FRAC_PI_2) * Vec3::UP,
            Vec3::FORWARD,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Mat4::rotate_y(FRAC_PI_2) * Vec3::FORWARD,
            Vec3::RIGHT,
            epsilon = 1e-12
        );
    }

    #[test]
    fn composition_applies_right_to_left() {
        let m = Mat4::translate_x(1.0) * Mat4::scale_all(2.0);
        assert_relative_eq!(m * Vec3::ONE, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn axis_scales_touch_only_their_axis() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(Mat4::scale_x(3.0) * p, Vec3::new(3.0, 1.0, 1.0));
        assert_eq!(Mat4::scale_y(3.0) * p, Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(Mat4::scale_z(3.0) * p, Vec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn set_writes_the_translation_column() {
        let mut m = Mat4::identity();
        m.set(0, 3, 5.0);
        assert_eq!(m.get(0, 3), 5.0);
        assert_eq!(m, Mat4::translate_x(5.0));
        assert_eq!(m * Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn vectors_ignore_translation() {
        let m = Mat4::translate_xyz(5.0, 5.0, 5.0);
        assert_eq!(m.transform_vector(Vec3::UP), Vec3::UP);
        assert_eq!(m * Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
    }
}
