//! 3x3 rotation matrices.
//!
//! [`Mat3`] builds the rotation blocks that [`Mat4`](crate::Mat4) embeds
//! in its top-left corner.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **row vectors**:
//!
//! ```text
//!                 | m00 m01 m02 |
//! | x y z |   *   | m10 m11 m12 |  =  | x*m00 + y*m10 + z*m20  ... |
//!                 | m20 m21 m22 |
//! ```
//!
//! Rotations are right-handed under this convention: a positive rotation
//! about Z carries +X toward +Y. The stored values are therefore the
//! transpose of the column-vector matrices found in most references.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Mat3, Vec3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let rot = Mat3::from_z_rotation(FRAC_PI_2);
//! let v = rot.apply_to_vector(Vec3::X);
//! assert!((v - Vec3::Y).length() < 1e-12);
//! ```

use crate::{linalg, Eulers, Mat4, MathResult, Quat, Vec3};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Index, Mul};

/// A 3x3 row-major matrix.
///
/// # Example
///
/// ```rust
/// use xform_math::{Mat3, Vec3};
///
/// let identity = Mat3::IDENTITY;
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(identity.apply_to_vector(v), v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Copies the top-left 3x3 block of a [`Mat4`].
    ///
    /// The result is independent of `mat`. Use
    /// [`Mat4::matrix33_view_mut`] to edit the block in place.
    #[inline]
    pub fn from_matrix44(mat: &Mat4) -> Self {
        let m = &mat.m;
        Self::from_rows([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    /// Rotation of `theta` radians about the X axis.
    ///
    /// See <http://en.wikipedia.org/wiki/Rotation_matrix#In_three_dimensions>.
    pub fn from_x_rotation(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Rotation of `theta` radians about the Y axis.
    pub fn from_y_rotation(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Rotation of `theta` radians about the Z axis.
    pub fn from_z_rotation(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation of `theta` radians about an arbitrary axis.
    ///
    /// The axis is normalized first.
    pub fn from_axis_rotation(axis: Vec3, theta: f64) -> Self {
        let Vec3 { x, y, z } = axis.normalize();
        let (s, c) = theta.sin_cos();
        let t = 1.0 - c;

        Self::from_rows([
            [c + x * x * t, x * y * t + z * s, x * z * t - y * s],
            [x * y * t - z * s, c + y * y * t, y * z * t + x * s],
            [x * z * t + y * s, y * z * t - x * s, c + z * z * t],
        ])
    }

    /// Rotation described by Euler angles.
    ///
    /// Equivalent to `X(roll) · Y(pitch) · Z(yaw)`: a row vector is rolled,
    /// then pitched, then yawed.
    pub fn from_eulers(eulers: Eulers) -> Self {
        Self::from_x_rotation(eulers.roll)
            .multiply(&Self::from_y_rotation(eulers.pitch))
            .multiply(&Self::from_z_rotation(eulers.yaw))
    }

    /// Rotation described by a unit quaternion.
    ///
    /// See <http://www.euclideanspace.com/maths/geometry/rotations/conversions/quaternionToMatrix/>.
    pub fn from_quaternion(quat: Quat) -> Self {
        let Quat { x, y, z, w } = quat;

        let (x2, y2, z2) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Self::from_rows([
            [1.0 - 2.0 * (y2 + z2), 2.0 * (xy + wz), 2.0 * (xz - wy)],
            [2.0 * (xy - wz), 1.0 - 2.0 * (x2 + z2), 2.0 * (yz + wx)],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (x2 + y2)],
        ])
    }

    /// The inverse rotation of a unit quaternion.
    ///
    /// Maps from object space back to inertial space.
    #[inline]
    pub fn from_inverse_of_quaternion(quat: Quat) -> Self {
        Self::from_quaternion(quat.conjugate())
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows(linalg::transpose(&self.m))
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse of this matrix.
    ///
    /// # Errors
    ///
    /// [`MathError::SingularMatrix`](crate::MathError::SingularMatrix) if
    /// the matrix has no inverse.
    pub fn inverse(&self) -> MathResult<Self> {
        linalg::inverse(&self.m).map(Self::from_rows)
    }

    /// Matrix product `self · other`.
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_rows(linalg::mat_mul(&self.m, &other.m))
    }

    /// Transforms a row vector: `v · self`.
    #[inline]
    pub fn apply_to_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
        )
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam DMat3.
    ///
    /// glam uses column vectors, so our rows become its columns and the
    /// two matrices transform vectors identically.
    #[inline]
    pub fn to_glam(&self) -> glam::DMat3 {
        glam::DMat3::from_cols_array_2d(&self.m)
    }

    /// Creates from glam DMat3.
    #[inline]
    pub fn from_glam(m: glam::DMat3) -> Self {
        Self::from_rows(m.to_cols_array_2d())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Vec3 * Mat3
impl Mul<Mat3> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Vec3 {
        rhs.apply_to_vector(self)
    }
}

// Mat3 * Mat3
impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}

impl AbsDiffEq for Mat3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        (0..3).all(|i| self.row(i).abs_diff_eq(&other.row(i), epsilon))
    }
}

impl RelativeEq for Mat3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        (0..3).all(|i| self.row(i).relative_eq(&other.row(i), epsilon, max_relative))
    }
}
