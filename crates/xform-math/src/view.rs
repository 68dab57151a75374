//! Borrowed views of the rotation block of a [`Mat4`].
//!
//! A view shares storage with its parent matrix. Writes through
//! [`Mat33ViewMut`] are visible in the parent; the borrow checker keeps
//! the parent untouchable for as long as the view lives. Code that needs
//! an isolated 3x3 matrix copies it with [`Mat33View::to_mat3`] or
//! [`Mat3::from_matrix44`].
//!
//! ```rust
//! use xform_math::{Mat3, Mat4};
//!
//! let mut m = Mat4::from_translation([1.0, 2.0, 3.0]);
//! let copy = Mat3::from_matrix44(&m);
//!
//! m.matrix33_view_mut().assign(&Mat3::diagonal(2.0, 2.0, 2.0));
//!
//! assert_eq!(m.m[1][1], 2.0);
//! assert_eq!(copy, Mat3::IDENTITY);
//! // The translation row is untouched
//! assert_eq!(m.m[3], [1.0, 2.0, 3.0, 1.0]);
//! ```

use crate::{Mat3, Mat4};
use std::ops::{Index, IndexMut};

#[inline]
fn check_index(row: usize, col: usize) {
    assert!(
        row < 3 && col < 3,
        "3x3 view index ({row}, {col}) out of bounds"
    );
}

/// Read-only view of the top-left 3x3 block of a [`Mat4`].
#[derive(Debug, Clone, Copy)]
pub struct Mat33View<'a> {
    parent: &'a Mat4,
}

impl<'a> Mat33View<'a> {
    pub(crate) fn new(parent: &'a Mat4) -> Self {
        Self { parent }
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is 3 or more.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Copies the block into an independent [`Mat3`].
    #[inline]
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_matrix44(self.parent)
    }
}

impl Index<(usize, usize)> for Mat33View<'_> {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        check_index(row, col);
        &self.parent.m[row][col]
    }
}

/// Mutable view of the top-left 3x3 block of a [`Mat4`].
#[derive(Debug)]
pub struct Mat33ViewMut<'a> {
    parent: &'a mut Mat4,
}

impl<'a> Mat33ViewMut<'a> {
    pub(crate) fn new(parent: &'a mut Mat4) -> Self {
        Self { parent }
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Writes element `(row, col)` of the parent.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is 3 or more.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    /// Overwrites the whole block. Row 3 and column 3 are left alone.
    pub fn assign(&mut self, mat: &Mat3) {
        for (dst, src) in self.parent.m.iter_mut().zip(mat.m.iter()) {
            dst[..3].copy_from_slice(src);
        }
    }

    /// Copies the block into an independent [`Mat3`].
    #[inline]
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_matrix44(self.parent)
    }

    /// Reborrows as a read-only view.
    #[inline]
    pub fn as_view(&self) -> Mat33View<'_> {
        Mat33View::new(self.parent)
    }
}

impl Index<(usize, usize)> for Mat33ViewMut<'_> {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        check_index(row, col);
        &self.parent.m[row][col]
    }
}

impl IndexMut<(usize, usize)> for Mat33ViewMut<'_> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        check_index(row, col);
        &mut self.parent.m[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reads_parent() {
        let m = Mat4::from_z_rotation(0.5);
        let view = m.matrix33_view();
        assert_eq!(view.get(0, 1), m.m[0][1]);
        assert_eq!(view.to_mat3(), Mat3::from_z_rotation(0.5));
    }

    #[test]
    fn test_view_mut_aliases_parent() {
        let mut m = Mat4::IDENTITY;
        {
            let mut view = m.matrix33_view_mut();
            view.set(2, 0, 7.0);
            view[(1, 2)] = -3.0;
            assert_eq!(view.as_view().get(2, 0), 7.0);
        }
        assert_eq!(m.m[2][0], 7.0);
        assert_eq!(m.m[1][2], -3.0);
        assert_eq!(m.m[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_copy_is_isolated() {
        let mut m = Mat4::IDENTITY;
        let copy = m.matrix33_view().to_mat3();
        m.matrix33_view_mut().set(0, 0, 9.0);
        assert_eq!(copy.m[0][0], 1.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_view_rejects_row_3() {
        let m = Mat4::IDENTITY;
        let _ = m.matrix33_view()[(3, 0)];
    }
}
