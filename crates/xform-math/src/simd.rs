//! SIMD kernels for row-vector transforms.
//!
//! `v · M` is a linear combination of the rows of `M` weighted by the
//! components of `v`. Each row fits in one `f64x4`, so a transform is four
//! lane-wise multiply-adds.
//!
//! The kernels perform the same operations in the same order as the scalar
//! path in [`Mat4::transform_vec4`], so results are bit-identical.
//!
//! # Example
//!
//! ```rust
//! use xform_math::simd::transform_points;
//! use xform_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation([1.0, 0.0, 0.0]);
//! let out = transform_points(&m, &[Vec3::ZERO, Vec3::Y]);
//! assert_eq!(out, vec![Vec3::X, Vec3::new(1.0, 1.0, 0.0)]);
//! ```

use crate::{Mat4, Vec3, Vec4};
use wide::f64x4;

/// The rows of a [`Mat4`] loaded into SIMD registers.
#[derive(Debug, Clone, Copy)]
pub struct Rows4([f64x4; 4]);

impl Rows4 {
    /// Loads the rows of `mat`.
    #[inline]
    pub fn new(mat: &Mat4) -> Self {
        Self(mat.m.map(f64x4::from))
    }

    /// Computes `v · M`.
    #[inline]
    pub fn apply(&self, v: Vec4) -> Vec4 {
        let [r0, r1, r2, r3] = self.0;
        let out = f64x4::splat(v.x) * r0
            + f64x4::splat(v.y) * r1
            + f64x4::splat(v.z) * r2
            + f64x4::splat(v.w) * r3;
        Vec4::from_array(out.to_array())
    }
}

/// Transforms points (with homogeneous divide) by a single matrix.
pub fn transform_points(mat: &Mat4, points: &[Vec3]) -> Vec<Vec3> {
    let rows = Rows4::new(mat);
    points
        .iter()
        .map(|p| rows.apply(p.extend(1.0)).homogenize().truncate())
        .collect()
}

/// Transforms points in place.
pub fn transform_points_inplace(mat: &Mat4, points: &mut [Vec3]) {
    let rows = Rows4::new(mat);
    for p in points {
        *p = rows.apply(p.extend(1.0)).homogenize().truncate();
    }
}

/// Transforms homogeneous vectors (no divide) by a single matrix.
pub fn transform_vec4s(mat: &Mat4, vecs: &[Vec4]) -> Vec<Vec4> {
    let rows = Rows4::new(mat);
    vecs.iter().map(|&v| rows.apply(v)).collect()
}
