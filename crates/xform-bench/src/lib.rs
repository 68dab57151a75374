//! Deterministic inputs for the xform-rs benchmarks.
//!
//! Run the benchmarks with: `cargo bench -p xform-bench`

use xform_math::{Eulers, Mat4, Vec3};

/// `n` points spread over a cube centred on the origin.
pub fn points(n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n.max(1) as f64;
            Vec3::new(t * 2.0 - 1.0, (t * 7.0).sin(), (t * 3.0).cos())
        })
        .collect()
}

/// `n` invertible model matrices (rotation followed by translation).
pub fn models(n: usize) -> Vec<Mat4> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            Mat4::from_eulers(Eulers::new(t, 2.0 * t, -t)) * Mat4::from_translation([t, -t, 1.0])
        })
        .collect()
}

/// A typical camera: look-at followed by a 60 degree perspective.
pub fn view_projection() -> Mat4 {
    Mat4::look_at(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, Vec3::Y)
        * Mat4::perspective_projection(60.0, 16.0 / 9.0, 0.1, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_are_invertible() {
        for m in models(16) {
            assert!(m.inverse().is_ok());
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(points(10).len(), 10);
        assert!(points(0).is_empty());
        assert!(view_projection().is_finite());
    }
}
