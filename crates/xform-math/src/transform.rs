//! Vector transformation by [`Mat4`].
//!
//! [`Transform`] is implemented for every vector shape a matrix can act
//! on. The batch functions in [`crate::batch`] are generic over it, so the
//! element type picks the semantics:
//!
//! - [`Vec3`] - a point: promoted with `w = 1`, then divided by the
//!   resulting `w` unless it is exactly zero
//! - [`Vec4`] - a homogeneous vector: multiplied as-is
//! - [`Vector`] - either of the above, chosen at runtime

use crate::simd::Rows4;
use crate::{Mat4, MathError, Vec3, Vec4};

/// A vector that can be transformed by a [`Mat4`].
pub trait Transform: Copy + Send + Sync {
    /// Returns `self · mat` with the semantics of the implementing type.
    fn transformed_by(self, mat: &Mat4) -> Self;

    /// Same as [`Transform::transformed_by`] using preloaded SIMD rows.
    fn transformed_by_rows(self, rows: &Rows4) -> Self;
}

impl Transform for Vec3 {
    #[inline]
    fn transformed_by(self, mat: &Mat4) -> Self {
        mat.transform_point(self)
    }

    #[inline]
    fn transformed_by_rows(self, rows: &Rows4) -> Self {
        rows.apply(self.extend(1.0)).homogenize().truncate()
    }
}

impl Transform for Vec4 {
    #[inline]
    fn transformed_by(self, mat: &Mat4) -> Self {
        mat.transform_vec4(self)
    }

    #[inline]
    fn transformed_by_rows(self, rows: &Rows4) -> Self {
        rows.apply(self)
    }
}

/// A 3- or 4-component vector whose length is only known at runtime.
///
/// # Example
///
/// ```rust
/// use xform_math::{Vector, Vec3};
///
/// let v = Vector::try_from(&[1.0_f64, 2.0, 3.0][..]).unwrap();
/// assert_eq!(v, Vector::Three(Vec3::new(1.0, 2.0, 3.0)));
/// assert_eq!(v.len(), 3);
/// assert!(Vector::try_from(&[1.0_f64, 2.0][..]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vector {
    /// A point, transformed with the homogeneous divide
    Three(Vec3),
    /// A homogeneous vector, transformed without divide
    Four(Vec4),
}

impl Vector {
    /// Number of components (3 or 4).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Three(_) => 3,
            Self::Four(_) => 4,
        }
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Copies the components into a `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Three(v) => v.to_array().to_vec(),
            Self::Four(v) => v.to_array().to_vec(),
        }
    }
}

impl Transform for Vector {
    #[inline]
    fn transformed_by(self, mat: &Mat4) -> Self {
        match self {
            Self::Three(v) => Self::Three(v.transformed_by(mat)),
            Self::Four(v) => Self::Four(v.transformed_by(mat)),
        }
    }

    #[inline]
    fn transformed_by_rows(self, rows: &Rows4) -> Self {
        match self {
            Self::Three(v) => Self::Three(v.transformed_by_rows(rows)),
            Self::Four(v) => Self::Four(v.transformed_by_rows(rows)),
        }
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = MathError;

    fn try_from(vec: &[f64]) -> Result<Self, MathError> {
        match *vec {
            [x, y, z] => Ok(Self::Three(Vec3::new(x, y, z))),
            [x, y, z, w] => Ok(Self::Four(Vec4::new(x, y, z, w))),
            _ => Err(MathError::invalid_argument(format!(
                "vector size {} unsupported, expected 3 or 4",
                vec.len()
            ))),
        }
    }
}

impl From<Vec3> for Vector {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::Three(v)
    }
}

impl From<Vec4> for Vector {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::Four(v)
    }
}
