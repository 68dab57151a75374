//! 4x4 transform matrices.
//!
//! [`Mat4`] represents affine and projective transforms for 3D graphics:
//! object placement, camera views and projections.
//!
//! # Layout
//!
//! Matrices are stored **row-major** and transform **row vectors**
//! (`v · M`). Rotation and scale occupy the top-left 3x3 block and the
//! translation occupies row 3:
//!
//! ```text
//! | r00 r01 r02 0 |
//! | r10 r11 r12 0 |
//! | r20 r21 r22 0 |
//! |  tx  ty  tz 1 |
//! ```
//!
//! The memory image is identical to a column-major, column-vector matrix,
//! so it can be uploaded to OpenGL as-is. Callers that need the
//! translation in the last column transpose explicitly.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Mat4, Vec3};
//!
//! let model = Mat4::from_scale([2.0, 2.0, 2.0])
//!     .multiply(&Mat4::from_translation([1.0, 0.0, 0.0]));
//!
//! let p = model.transform_point(Vec3::new(1.0, 1.0, 1.0));
//! assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));
//! ```

use crate::view::{Mat33View, Mat33ViewMut};
use crate::{
    linalg, Eulers, LinalgConfig, Mat3, MathError, MathResult, Quat, Transform, Vec3, Vec4, Vector,
};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Index, IndexMut, Mul};

/// A 4x4 row-major transform matrix.
///
/// # Example
///
/// ```rust
/// use xform_math::Mat4;
///
/// let m = Mat4::from_translation([1.0, 2.0, 3.0]);
/// assert_eq!(m.m[3], [1.0, 2.0, 3.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Matrix elements in row-major order: [row0, row1, row2, row3]
    pub m: [[f64; 4]; 4],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { m: rows }
    }

    /// Returns a new identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Embeds a 3x3 matrix in the top-left block of an identity matrix.
    ///
    /// The translation is zero.
    pub fn from_matrix33(mat: &Mat3) -> Self {
        let mut out = Self::IDENTITY;
        out.matrix33_view_mut().assign(mat);
        out
    }

    /// Read-only view of the top-left 3x3 block.
    ///
    /// The view borrows `self`; [`Mat33View::to_mat3`] makes an
    /// independent copy.
    #[inline]
    pub fn matrix33_view(&self) -> Mat33View<'_> {
        Mat33View::new(self)
    }

    /// Mutable view of the top-left 3x3 block.
    ///
    /// Writes through the view change this matrix.
    ///
    /// ```rust
    /// use xform_math::Mat4;
    ///
    /// let mut m = Mat4::IDENTITY;
    /// m.matrix33_view_mut()[(0, 0)] = 5.0;
    /// assert_eq!(m.m[0][0], 5.0);
    /// ```
    #[inline]
    pub fn matrix33_view_mut(&mut self) -> Mat33ViewMut<'_> {
        Mat33ViewMut::new(self)
    }

    /// Rotation from Euler angles. See [`Mat3::from_eulers`].
    #[inline]
    pub fn from_eulers(eulers: Eulers) -> Self {
        Self::from_matrix33(&Mat3::from_eulers(eulers))
    }

    /// Rotation from a unit quaternion.
    #[inline]
    pub fn from_quaternion(quat: Quat) -> Self {
        Self::from_matrix33(&Mat3::from_quaternion(quat))
    }

    /// Inverse rotation of a unit quaternion.
    ///
    /// This can be used to go from object space to inertial space.
    #[inline]
    pub fn from_inverse_of_quaternion(quat: Quat) -> Self {
        Self::from_matrix33(&Mat3::from_inverse_of_quaternion(quat))
    }

    /// Rotation of `theta` radians about the X axis.
    #[inline]
    pub fn from_x_rotation(theta: f64) -> Self {
        Self::from_matrix33(&Mat3::from_x_rotation(theta))
    }

    /// Rotation of `theta` radians about the Y axis.
    #[inline]
    pub fn from_y_rotation(theta: f64) -> Self {
        Self::from_matrix33(&Mat3::from_y_rotation(theta))
    }

    /// Rotation of `theta` radians about the Z axis.
    #[inline]
    pub fn from_z_rotation(theta: f64) -> Self {
        Self::from_matrix33(&Mat3::from_z_rotation(theta))
    }

    /// Rotation of `theta` radians about an arbitrary axis.
    #[inline]
    pub fn from_axis_rotation(axis: Vec3, theta: f64) -> Self {
        Self::from_matrix33(&Mat3::from_axis_rotation(axis, theta))
    }

    /// Identity matrix with the translation row set.
    ///
    /// Accepts anything convertible to [`Vec3`]; for 4-component inputs
    /// (`Vec4`, `[f64; 4]`) the fourth component is ignored.
    ///
    /// ```rust
    /// use xform_math::Mat4;
    ///
    /// let a = Mat4::from_translation([1.0, 2.0, 3.0]);
    /// let b = Mat4::from_translation([1.0, 2.0, 3.0, 999.0]);
    /// assert_eq!(a, b);
    /// ```
    pub fn from_translation(vec: impl Into<Vec3>) -> Self {
        let v = vec.into();
        let mut out = Self::IDENTITY;
        out.m[3][0] = v.x;
        out.m[3][1] = v.y;
        out.m[3][2] = v.z;
        out
    }

    /// [`Mat4::from_translation`] for a runtime-sized slice.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] unless `vec` has 3 or 4 components.
    pub fn from_translation_slice(vec: &[f64]) -> MathResult<Self> {
        match *vec {
            [x, y, z] | [x, y, z, _] => Ok(Self::from_translation([x, y, z])),
            _ => Err(MathError::invalid_argument(format!(
                "translation must have 3 or 4 components, got {}",
                vec.len()
            ))),
        }
    }

    /// Diagonal scale matrix `[s0, s1, s2, 1]`.
    pub fn from_scale(scale: impl Into<Vec3>) -> Self {
        let Vec3 { x, y, z } = scale.into();
        Self::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns a row as Vec4.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::from_array(self.m[i])
    }

    /// Returns a column as Vec4.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i])
    }

    /// The translation stored in row 3.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.row(3).truncate()
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows(linalg::transpose(&self.m))
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        linalg::determinant(&self.m)
    }

    /// Computes the inverse of this matrix.
    ///
    /// # Errors
    ///
    /// [`MathError::SingularMatrix`] if the matrix has no inverse.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xform_math::Mat4;
    ///
    /// let m = Mat4::from_translation([1.0, 2.0, 3.0]);
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(inv.translation().x, -1.0);
    /// assert!(Mat4::ZERO.inverse().is_err());
    /// ```
    #[inline]
    pub fn inverse(&self) -> MathResult<Self> {
        self.inverse_with(&LinalgConfig::default())
    }

    /// Computes the inverse with an explicit singularity tolerance.
    #[inline]
    pub fn inverse_with(&self, config: &LinalgConfig) -> MathResult<Self> {
        linalg::inverse_with(&self.m, config).map(Self::from_rows)
    }

    /// Matrix product `self · other`.
    ///
    /// With row vectors, `v · (a · b)` applies `a` first, then `b`.
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_rows(linalg::mat_mul(&self.m, &other.m))
    }

    /// Matrix product `self · other`, written into `out`.
    ///
    /// `out` can never be one of the inputs here; see
    /// [`Mat4Array::multiply_into`](crate::Mat4Array::multiply_into) for
    /// the slot-indexed form that checks this at runtime.
    #[inline]
    pub fn multiply_into(&self, other: &Self, out: &mut Self) {
        linalg::mat_mul_into(&self.m, &other.m, &mut out.m);
    }

    /// Applies the matrix to a vector of runtime length.
    ///
    /// - 3 components: treated as a point (`w = 1`), then divided by the
    ///   resulting `w` unless it is exactly zero; returns 3 components.
    /// - 4 components: multiplied as-is; returns 4 components.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] for any other length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xform_math::{Mat4, Vector, Vec3};
    ///
    /// let m = Mat4::from_translation([1.0, 0.0, 0.0]);
    /// let v = m.apply_to_vector(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(v, Vector::Three(Vec3::new(2.0, 2.0, 3.0)));
    /// assert!(m.apply_to_vector(&[1.0, 2.0]).is_err());
    /// ```
    pub fn apply_to_vector(&self, vec: &[f64]) -> MathResult<Vector> {
        Vector::try_from(vec).map(|v| v.transformed_by(self))
    }

    /// Transforms a point, including the homogeneous divide.
    ///
    /// If the transformed `w` is exactly zero the undivided components
    /// are returned.
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        self.transform_vec4(v.extend(1.0)).homogenize().truncate()
    }

    /// Transforms a homogeneous vector: `v · self`. No divide.
    #[inline]
    pub fn transform_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        let mut out = [0.0; 4];
        for (j, cell) in out.iter_mut().enumerate() {
            *cell = v.x * m[0][j] + v.y * m[1][j] + v.z * m[2][j] + v.w * m[3][j];
        }
        Vec4::from_array(out)
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam DMat4.
    ///
    /// glam uses column vectors and column-major storage, so our rows are
    /// passed as its columns. `glam_m * v` then equals `v · self`.
    #[inline]
    pub fn to_glam(&self) -> glam::DMat4 {
        glam::DMat4::from_cols_array_2d(&self.m)
    }

    /// Creates from glam DMat4.
    #[inline]
    pub fn from_glam(m: glam::DMat4) -> Self {
        Self::from_rows(m.to_cols_array_2d())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat3> for Mat4 {
    #[inline]
    fn from(m: Mat3) -> Self {
        Self::from_matrix33(&m)
    }
}

impl From<glam::DMat4> for Mat4 {
    #[inline]
    fn from(m: glam::DMat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat4> for glam::DMat4 {
    #[inline]
    fn from(m: Mat4) -> glam::DMat4 {
        m.to_glam()
    }
}

// Mat4 * Mat4
impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

// Vec3 * Mat4 (point, with homogeneous divide)
impl Mul<Mat4> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Mat4) -> Vec3 {
        rhs.transform_point(self)
    }
}

// Vec4 * Mat4
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Vec4 {
        rhs.transform_vec4(self)
    }
}

impl Index<usize> for Mat4 {
    type Output = [f64; 4];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 4] {
        &self.m[i]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut [f64; 4] {
        &mut self.m[i]
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (0..4).all(|i| self.row(i).abs_diff_eq(&other.row(i), epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        (0..4).all(|i| self.row(i).relative_eq(&other.row(i), epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    fn sample() -> Mat4 {
        Mat4::from_rows([
            [2.0, 0.5, 0.0, 0.1],
            [0.0, 1.5, -0.3, 0.0],
            [0.7, 0.0, 3.0, 0.2],
            [4.0, -1.0, 2.0, 1.0],
        ])
    }

    /// Rows 0..3 column 3 and row 3 must match the identity.
    fn assert_homogeneous_frame(m: &Mat4) {
        for i in 0..3 {
            assert_eq!(m.m[i][3], 0.0);
            assert_eq!(m.m[3][i], 0.0);
        }
        assert_eq!(m.m[3][3], 1.0);
    }

    #[test]
    fn test_identity() {
        assert_eq!(Mat4::identity(), Mat4::IDENTITY);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_constructors_embed_mat3() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.8);
        let e = Eulers::new(0.1, 0.2, 0.3);
        let cases = [
            (Mat4::from_eulers(e), Mat3::from_eulers(e)),
            (Mat4::from_quaternion(q), Mat3::from_quaternion(q)),
            (Mat4::from_inverse_of_quaternion(q), Mat3::from_inverse_of_quaternion(q)),
            (Mat4::from_x_rotation(0.4), Mat3::from_x_rotation(0.4)),
            (Mat4::from_y_rotation(0.4), Mat3::from_y_rotation(0.4)),
            (Mat4::from_z_rotation(0.4), Mat3::from_z_rotation(0.4)),
        ];
        for (m4, m3) in cases {
            assert_eq!(Mat3::from_matrix44(&m4), m3);
            assert_homogeneous_frame(&m4);
        }
    }

    #[test]
    fn test_from_translation() {
        let m = Mat4::from_translation([1.0, 2.0, 3.0]);
        let mut expected = Mat4::IDENTITY;
        expected.m[3] = [1.0, 2.0, 3.0, 1.0];
        assert_eq!(m, expected);

        // The 4th component is ignored
        assert_eq!(Mat4::from_translation(Vec4::new(1.0, 2.0, 3.0, 999.0)), expected);
        assert_eq!(Mat4::from_translation_slice(&[1.0, 2.0, 3.0, 999.0]).unwrap(), expected);
        assert!(Mat4::from_translation_slice(&[1.0]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_from_scale_diagonal() {
        let m = Mat4::from_scale([2.0, 3.0, 4.0]);
        for i in 0..4 {
            for j in 0..4 {
                let expected = match (i, j) {
                    (0, 0) => 2.0,
                    (1, 1) => 3.0,
                    (2, 2) => 4.0,
                    (3, 3) => 1.0,
                    _ => 0.0,
                };
                assert_eq!(m.m[i][j], expected, "element [{i}][{j}]");
            }
        }
    }

    #[test]
    fn test_apply_identity() {
        let v = Mat4::IDENTITY.apply_to_vector(&[1.5, -2.0, 3.25]).unwrap();
        assert_eq!(v, Vector::Three(Vec3::new(1.5, -2.0, 3.25)));
    }

    #[test]
    fn test_apply_translation() {
        let m = Mat4::from_translation([10.0, 20.0, 30.0]);
        let p = m.transform_point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vec3::new(11.0, 22.0, 33.0));

        // Directions (w = 0) ignore translation
        let d = m.transform_vec4(Vec4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(d, Vec4::new(1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_apply_homogeneous_divide() {
        // Column 3 doubles w: [x, y, z, 1] -> w = 2
        let mut m = Mat4::IDENTITY;
        m.m[3][3] = 2.0;
        let p = m.transform_point(Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_apply_zero_w_skips_divide() {
        let mut m = Mat4::IDENTITY;
        m.m[3][3] = 0.0;
        let p = m.transform_point(Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(p, Vec3::new(2.0, 4.0, 6.0));
        assert!(p.is_finite());
    }

    #[test]
    fn test_apply_vec4_no_divide() {
        let mut m = Mat4::IDENTITY;
        m.m[3][3] = 2.0;
        let v = m.apply_to_vector(&[2.0, 4.0, 6.0, 1.0]).unwrap();
        assert_eq!(v, Vector::Four(Vec4::new(2.0, 4.0, 6.0, 2.0)));
    }

    #[test]
    fn test_apply_invalid_length() {
        for bad in [&[][..], &[1.0][..], &[1.0, 2.0][..], &[1.0, 2.0, 3.0, 4.0, 5.0][..]] {
            let err = Mat4::IDENTITY.apply_to_vector(bad).unwrap_err();
            assert!(err.is_invalid_argument(), "length {}", bad.len());
        }
    }

    #[test]
    fn test_multiply_identity() {
        let a = sample();
        assert_eq!(a.multiply(&Mat4::IDENTITY), a);
        assert_eq!(Mat4::IDENTITY.multiply(&a), a);

        let mut out = Mat4::ZERO;
        a.multiply_into(&Mat4::IDENTITY, &mut out);
        assert_eq!(out, a);
    }

    #[test]
    fn test_multiply_applies_left_first() {
        let s = Mat4::from_scale([2.0, 2.0, 2.0]);
        let t = Mat4::from_translation([1.0, 0.0, 0.0]);
        let p = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!((s * t).transform_point(p), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!((t * s).transform_point(p), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let a = sample();
        let inv = a.inverse().unwrap();
        assert_relative_eq!(a * inv, Mat4::IDENTITY, epsilon = 1e-9);
        assert_relative_eq!(inv.inverse().unwrap(), a, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_singular() {
        assert!(Mat4::ZERO.inverse().unwrap_err().is_singular());
    }

    #[test]
    fn test_determinant_of_rotation() {
        let m = Mat4::from_axis_rotation(Vec3::new(0.3, -1.0, 0.2), 1.3);
        assert!((m.determinant() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_moves_point() {
        let m = Mat4::from_z_rotation(FRAC_PI_2);
        assert_relative_eq!(m.transform_point(Vec3::X), Vec3::Y, epsilon = EPS);
    }

    #[test]
    fn test_glam_interop() {
        let a = sample();
        let v = Vec4::new(1.0, -2.0, 0.5, 1.0);
        let ours = a.transform_vec4(v);
        let theirs = Vec4::from_glam(a.to_glam() * v.to_glam());
        assert_relative_eq!(ours, theirs, epsilon = EPS);
        assert_eq!(Mat4::from_glam(a.to_glam()), a);

        let inv = Mat4::from_glam(a.to_glam().inverse());
        assert_relative_eq!(a.inverse().unwrap(), inv, epsilon = 1e-9);
    }

    #[test]
    fn test_transpose_moves_translation_to_last_column() {
        let m = Mat4::from_translation([1.0, 2.0, 3.0]).transpose();
        assert_eq!(m.col(3), Vec4::new(1.0, 2.0, 3.0, 1.0));
    }
}
