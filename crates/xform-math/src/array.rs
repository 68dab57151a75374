//! Owned arrays of matrices with slot-indexed operations.
//!
//! [`Mat4Array`] is the one place where an output can alias an input:
//! slots are addressed by index, so `multiply_into(0, 1, 0)` is
//! expressible. Such calls are rejected instead of producing a product
//! computed from a half-overwritten operand.

use crate::{Mat4, MathError, MathResult};
use std::ops::{Index, IndexMut};

/// A contiguous array of [`Mat4`] slots.
///
/// # Example
///
/// ```rust
/// use xform_math::{Mat4, Mat4Array};
///
/// let mut arr = Mat4Array::from(vec![
///     Mat4::from_scale([2.0, 2.0, 2.0]),
///     Mat4::from_translation([1.0, 0.0, 0.0]),
///     Mat4::ZERO,
/// ]);
///
/// arr.multiply_into(0, 1, 2).unwrap();
/// assert_eq!(arr[2].translation().x, 1.0);
///
/// // The output slot may not be an input
/// assert!(arr.multiply_into(0, 1, 1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mat4Array {
    mats: Vec<Mat4>,
}

impl Mat4Array {
    /// Creates an empty array.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array of `len` identity matrices.
    pub fn identities(len: usize) -> Self {
        Self {
            mats: vec![Mat4::IDENTITY; len],
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.mats.len()
    }

    /// Returns `true` if there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mats.is_empty()
    }

    /// Appends a matrix and returns its slot index.
    pub fn push(&mut self, mat: Mat4) -> usize {
        self.mats.push(mat);
        self.mats.len() - 1
    }

    /// Matrix in slot `i`, if present.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&Mat4> {
        self.mats.get(i)
    }

    /// Mutable matrix in slot `i`, if present.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut Mat4> {
        self.mats.get_mut(i)
    }

    /// All slots as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Mat4] {
        &self.mats
    }

    /// Iterator over the slots.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Mat4> {
        self.mats.iter()
    }

    /// Consumes the array, returning the matrices.
    #[inline]
    pub fn into_vec(self) -> Vec<Mat4> {
        self.mats
    }

    fn slot(&self, i: usize) -> MathResult<&Mat4> {
        self.mats.get(i).ok_or_else(|| {
            MathError::invalid_argument(format!(
                "slot {i} out of range for array of {}",
                self.mats.len()
            ))
        })
    }

    /// Stores `self[lhs] · self[rhs]` in slot `out`.
    ///
    /// `lhs` and `rhs` may be the same slot.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] if `out` is `lhs` or `rhs`, or if any
    /// slot is out of range. The array is unchanged on error.
    pub fn multiply_into(&mut self, lhs: usize, rhs: usize, out: usize) -> MathResult<()> {
        if out == lhs || out == rhs {
            return Err(MathError::invalid_argument(
                "output must not be one of the inputs, use assignment instead",
            ));
        }
        self.slot(out)?;
        let product = self.slot(lhs)?.multiply(self.slot(rhs)?);
        self.mats[out] = product;
        Ok(())
    }
}

impl From<Vec<Mat4>> for Mat4Array {
    #[inline]
    fn from(mats: Vec<Mat4>) -> Self {
        Self { mats }
    }
}

impl FromIterator<Mat4> for Mat4Array {
    fn from_iter<I: IntoIterator<Item = Mat4>>(iter: I) -> Self {
        Self {
            mats: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Mat4Array {
    type Item = &'a Mat4;
    type IntoIter = std::slice::Iter<'a, Mat4>;

    fn into_iter(self) -> Self::IntoIter {
        self.mats.iter()
    }
}

impl Index<usize> for Mat4Array {
    type Output = Mat4;

    #[inline]
    fn index(&self, i: usize) -> &Mat4 {
        &self.mats[i]
    }
}

impl IndexMut<usize> for Mat4Array {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Mat4 {
        &mut self.mats[i]
    }
}
