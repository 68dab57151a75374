//! Dense linear algebra on fixed-size square matrices.
//!
//! These routines back both [`Mat3`](crate::Mat3) and [`Mat4`](crate::Mat4).
//! Matrices are row-major `[[f64; N]; N]` arrays.
//!
//! # Inverse
//!
//! [`inverse`] uses Gauss-Jordan elimination with partial pivoting. A
//! pivot column with no entry larger than
//! [`LinalgConfig::singular_epsilon`] is reported as
//! [`MathError::SingularMatrix`]. NaN entries are not trapped and
//! propagate into the result.
//!
//! ```rust
//! use xform_math::linalg;
//!
//! let m = [[2.0, 0.0], [0.0, 4.0]];
//! let inv = linalg::inverse(&m).unwrap();
//! assert_eq!(inv, [[0.5, 0.0], [0.0, 0.25]]);
//! ```

use crate::{LinalgConfig, MathError, MathResult};
use tracing::debug;

/// Returns the `N`x`N` identity.
#[inline]
pub fn identity<const N: usize>() -> [[f64; N]; N] {
    let mut m = [[0.0; N]; N];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

/// Returns the transpose of `m`.
#[inline]
pub fn transpose<const N: usize>(m: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut t = [[0.0; N]; N];
    for (i, row) in m.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            t[j][i] = v;
        }
    }
    t
}

/// Matrix product `a · b`.
#[inline]
pub fn mat_mul<const N: usize>(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    mat_mul_into(a, b, &mut out);
    out
}

/// Matrix product `a · b` written into `out`.
///
/// `out` is written element by element while `a` and `b` are still being
/// read, so it must not share storage with either input. With references
/// the borrow checker already guarantees this.
#[inline]
pub fn mat_mul_into<const N: usize>(
    a: &[[f64; N]; N],
    b: &[[f64; N]; N],
    out: &mut [[f64; N]; N],
) {
    for (i, out_row) in out.iter_mut().enumerate() {
        for (j, cell) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for k in 0..N {
                sum += a[i][k] * b[k][j];
            }
            *cell = sum;
        }
    }
}

/// Row index of the largest-magnitude entry in `col`, at or below `col`.
#[inline]
fn pivot_row<const N: usize>(a: &[[f64; N]; N], col: usize) -> usize {
    let mut best = col;
    for row in col + 1..N {
        if a[row][col].abs() > a[best][col].abs() {
            best = row;
        }
    }
    best
}

/// Determinant by Gaussian elimination with partial pivoting.
pub fn determinant<const N: usize>(m: &[[f64; N]; N]) -> f64 {
    let mut a = *m;
    let mut det = 1.0;

    for col in 0..N {
        let p = pivot_row(&a, col);
        if a[p][col] == 0.0 {
            return 0.0;
        }
        if p != col {
            a.swap(p, col);
            det = -det;
        }

        let prow = a[col];
        det *= prow[col];
        for row in a.iter_mut().skip(col + 1) {
            let f = row[col] / prow[col];
            for j in col..N {
                row[j] -= f * prow[j];
            }
        }
    }

    det
}

/// Inverse of `m` with the default [`LinalgConfig`].
///
/// # Errors
///
/// [`MathError::SingularMatrix`] if `m` has no inverse.
#[inline]
pub fn inverse<const N: usize>(m: &[[f64; N]; N]) -> MathResult<[[f64; N]; N]> {
    inverse_with(m, &LinalgConfig::default())
}

/// Inverse of `m` using Gauss-Jordan elimination.
///
/// # Errors
///
/// [`MathError::SingularMatrix`] if a pivot column has no entry whose
/// magnitude exceeds `config.singular_epsilon`.
pub fn inverse_with<const N: usize>(
    m: &[[f64; N]; N],
    config: &LinalgConfig,
) -> MathResult<[[f64; N]; N]> {
    let mut a = *m;
    let mut inv = identity::<N>();

    for col in 0..N {
        let p = pivot_row(&a, col);
        if a[p][col].abs() <= config.singular_epsilon {
            debug!(column = col, pivot = a[p][col], "singular matrix");
            return Err(MathError::singular(col));
        }
        a.swap(p, col);
        inv.swap(p, col);

        let scale = 1.0 / a[col][col];
        for j in 0..N {
            a[col][j] *= scale;
            inv[col][j] *= scale;
        }

        let (prow, pinv) = (a[col], inv[col]);
        for row in 0..N {
            if row == col {
                continue;
            }
            let f = a[row][col];
            if f == 0.0 {
                continue;
            }
            for j in 0..N {
                a[row][j] -= f * prow[j];
                inv[row][j] -= f * pinv[j];
            }
        }
    }

    Ok(inv)
}
