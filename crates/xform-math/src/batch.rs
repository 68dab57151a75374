//! Batched matrix and vector operations.
//!
//! Every function takes slices and pairs elements up with broadcasting:
//! equal lengths pair element-wise, and a side of length 1 is repeated
//! against the other. Any other combination is an
//! [`MathError::InvalidArgument`].
//!
//! Large batches run on the rayon thread pool (with the default `parallel`
//! feature). Results do not depend on which path was taken.
//!
//! # Example
//!
//! ```rust
//! use xform_math::{batch, Mat4, Vec3};
//!
//! let model = Mat4::from_translation([0.0, 1.0, 0.0]);
//! let points = [Vec3::ZERO, Vec3::X, Vec3::Z];
//!
//! let moved = batch::apply_to_vectors(&[model], &points).unwrap();
//! assert_eq!(moved[1], Vec3::new(1.0, 1.0, 0.0));
//! ```

use crate::simd::Rows4;
use crate::{BatchConfig, LinalgConfig, Mat4, MathError, MathResult, Transform};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Output length when broadcasting sides of length `a` and `b`.
fn broadcast_len(a: usize, b: usize) -> MathResult<usize> {
    match (a, b) {
        _ if a == b => Ok(a),
        (1, _) => Ok(b),
        (_, 1) => Ok(a),
        _ => Err(MathError::invalid_argument(format!(
            "batch lengths {a} and {b} cannot be broadcast together"
        ))),
    }
}

/// Index into a side of length `len` for output element `i`.
#[inline]
fn pick(len: usize, i: usize) -> usize {
    if len == 1 { 0 } else { i }
}

/// Builds `len` outputs, in parallel when the config asks for it.
fn map_indexed<T, F>(len: usize, config: &BatchConfig, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if config.use_parallel(len) {
            return (0..len).into_par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    (0..len).map(f).collect()
}

/// Applies matrices to vectors with default [`BatchConfig`].
///
/// See [`apply_to_vectors_with`].
#[inline]
pub fn apply_to_vectors<V: Transform>(mats: &[Mat4], vecs: &[V]) -> MathResult<Vec<V>> {
    apply_to_vectors_with(mats, vecs, &BatchConfig::default())
}

/// Applies matrices to vectors.
///
/// The vector type selects the semantics (see [`Transform`]): `Vec3`
/// inputs get the homogeneous divide, `Vec4` inputs do not.
///
/// # Errors
///
/// [`MathError::InvalidArgument`] if the lengths cannot be broadcast.
pub fn apply_to_vectors_with<V: Transform>(
    mats: &[Mat4],
    vecs: &[V],
    config: &BatchConfig,
) -> MathResult<Vec<V>> {
    let len = broadcast_len(mats.len(), vecs.len())?;
    trace!(matrices = mats.len(), vectors = vecs.len(), len, "apply_to_vectors");

    if let [mat] = mats {
        let rows = Rows4::new(mat);
        return Ok(map_indexed(len, config, |i| {
            vecs[pick(vecs.len(), i)].transformed_by_rows(&rows)
        }));
    }

    Ok(map_indexed(len, config, |i| {
        vecs[pick(vecs.len(), i)].transformed_by(&mats[i])
    }))
}

/// Multiplies matrices pairwise with default [`BatchConfig`].
#[inline]
pub fn multiply(lhs: &[Mat4], rhs: &[Mat4]) -> MathResult<Vec<Mat4>> {
    multiply_with(lhs, rhs, &BatchConfig::default())
}

/// Multiplies matrices pairwise: `out[i] = lhs[i] · rhs[i]`.
///
/// # Errors
///
/// [`MathError::InvalidArgument`] if the lengths cannot be broadcast.
pub fn multiply_with(
    lhs: &[Mat4],
    rhs: &[Mat4],
    config: &BatchConfig,
) -> MathResult<Vec<Mat4>> {
    let len = broadcast_len(lhs.len(), rhs.len())?;
    trace!(lhs = lhs.len(), rhs = rhs.len(), len, "multiply");

    Ok(map_indexed(len, config, |i| {
        lhs[pick(lhs.len(), i)].multiply(&rhs[pick(rhs.len(), i)])
    }))
}

/// Inverts every matrix with default configs.
#[inline]
pub fn inverse(mats: &[Mat4]) -> MathResult<Vec<Mat4>> {
    inverse_with(mats, &BatchConfig::default(), &LinalgConfig::default())
}

/// Inverts every matrix.
///
/// # Errors
///
/// [`MathError::Batch`] wrapping the [`MathError::SingularMatrix`] of the
/// lowest-indexed matrix that could not be inverted.
pub fn inverse_with(
    mats: &[Mat4],
    config: &BatchConfig,
    linalg: &LinalgConfig,
) -> MathResult<Vec<Mat4>> {
    trace!(len = mats.len(), "inverse");

    map_indexed(mats.len(), config, |i| mats[i].inverse_with(linalg))
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.map_err(|e| e.at_index(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec3, Vec4, Vector};

    fn mats(n: usize) -> Vec<Mat4> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Mat4::from_axis_rotation(Vec3::new(1.0, t, 0.5), 0.1 * t)
                    * Mat4::from_translation([t, -t, 2.0 * t])
            })
            .collect()
    }

    fn points(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| Vec3::new(i as f64, 1.0 - i as f64, 0.25 * i as f64))
            .collect()
    }

    #[test]
    fn test_broadcast_len() {
        assert_eq!(broadcast_len(4, 4).unwrap(), 4);
        assert_eq!(broadcast_len(1, 7).unwrap(), 7);
        assert_eq!(broadcast_len(7, 1).unwrap(), 7);
        assert_eq!(broadcast_len(0, 0).unwrap(), 0);
        assert_eq!(broadcast_len(1, 0).unwrap(), 0);
        assert!(broadcast_len(2, 3).unwrap_err().is_invalid_argument());
        assert!(broadcast_len(0, 3).is_err());
    }

    #[test]
    fn test_apply_one_matrix_many_vectors() {
        let m = mats(3)[2];
        let ps = points(5);
        let out = apply_to_vectors(&[m], &ps).unwrap();
        for (p, o) in ps.iter().zip(&out) {
            assert_eq!(*o, m.transform_point(*p));
        }
    }

    #[test]
    fn test_apply_many_matrices_one_vector() {
        let ms = mats(4);
        let v = Vec4::new(1.0, 2.0, 3.0, 0.0);
        let out = apply_to_vectors(&ms, &[v]).unwrap();
        assert_eq!(out.len(), 4);
        for (m, o) in ms.iter().zip(&out) {
            assert_eq!(*o, m.transform_vec4(v));
        }
    }

    #[test]
    fn test_apply_pairwise_and_mismatch() {
        let ms = mats(3);
        let ps = points(3);
        let out = apply_to_vectors(&ms, &ps).unwrap();
        for i in 0..3 {
            assert_eq!(out[i], ms[i].transform_point(ps[i]));
        }

        let err = apply_to_vectors(&ms, &points(2)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_apply_runtime_vectors() {
        let m = Mat4::from_translation([1.0, 1.0, 1.0]);
        let vs = [
            Vector::Three(Vec3::ZERO),
            Vector::Four(Vec4::new(0.0, 0.0, 0.0, 0.0)),
        ];
        let out = apply_to_vectors(&[m], &vs).unwrap();
        assert_eq!(out[0], Vector::Three(Vec3::ONE));
        assert_eq!(out[1], Vector::Four(Vec4::ZERO));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ms = mats(64);
        let ps = points(64);
        let eager = BatchConfig {
            parallel_threshold: 1,
        };

        let seq = apply_to_vectors_with(&ms, &ps, &BatchConfig::SEQUENTIAL).unwrap();
        let par = apply_to_vectors_with(&ms, &ps, &eager).unwrap();
        assert_eq!(seq, par);

        let seq = multiply_with(&ms, &ms[..1], &BatchConfig::SEQUENTIAL).unwrap();
        let par = multiply_with(&ms, &ms[..1], &eager).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_multiply_broadcast() {
        let ms = mats(3);
        let id = [Mat4::IDENTITY];
        assert_eq!(multiply(&ms, &id).unwrap(), ms);
        assert_eq!(multiply(&id, &ms).unwrap(), ms);
        assert!(multiply(&ms, &mats(2)).is_err());
    }

    #[test]
    fn test_inverse_batch() {
        let ms = mats(5);
        let invs = inverse(&ms).unwrap();
        for (m, inv) in ms.iter().zip(&invs) {
            approx::assert_relative_eq!(*m * *inv, Mat4::IDENTITY, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_batch_reports_first_singular() {
        let mut ms = mats(5);
        ms[2] = Mat4::ZERO;
        ms[4] = Mat4::ZERO;
        match inverse(&ms).unwrap_err() {
            MathError::Batch { index, source } => {
                assert_eq!(index, 2);
                assert!(source.is_singular());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
