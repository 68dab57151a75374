//! Camera matrices: perspective and orthogonal projections, look-at views.
//!
//! All matrices use the crate's row-major, row-vector layout. Clip-space
//! conventions follow OpenGL: a right-handed eye space looking down -Z,
//! projected into the `[-1, 1]` depth range.
//!
//! None of the constructors guard their divisors. Degenerate geometry
//! (`near == far`, `left == right`, `aspect == 0`, ...) yields infinities
//! or NaNs following IEEE 754 rules.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Mat4, Vec3};
//!
//! let proj = Mat4::perspective_projection(60.0, 16.0 / 9.0, 0.1, 100.0);
//! let view = Mat4::look_at(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y);
//! let view_proj = view * proj;
//!
//! // The look-at target lands in the centre of the screen
//! let ndc = view_proj.transform_point(Vec3::ZERO);
//! assert!(ndc.x.abs() < 1e-12 && ndc.y.abs() < 1e-12);
//! ```

use crate::{Mat4, Vec3};

impl Mat4 {
    /// Symmetric-frustum perspective projection.
    ///
    /// - `fovy` - field of view in the Y direction, in **degrees**
    /// - `aspect` - width / height of the view
    /// - `near`, `far` - positive distances to the clipping planes
    ///
    /// See <http://www.opengl.org/sdk/docs/man2/xhtml/gluPerspective.xml>.
    ///
    /// ```text
    /// | f/aspect 0  0  0 |     B = (near + far) / (near - far)
    /// | 0        f  0  0 |     C = 2 * near * far / (near - far)
    /// | 0        0  B -1 |     f = 1 / tan(fovy / 2)
    /// | 0        0  C  0 |
    /// ```
    pub fn perspective_projection(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy / 2.0).to_radians().tan();
        let a = f / aspect;
        let b = (near + far) / (near - far);
        let c = (2.0 * near * far) / (near - far);

        Self::from_rows([
            [a, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, b, -1.0],
            [0.0, 0.0, c, 0.0],
        ])
    }

    /// Perspective projection from the edges of the near plane.
    ///
    /// `left`, `right`, `top` and `bottom` are measured on the near plane
    /// relative to its centre, so the frustum may be asymmetric. A near
    /// plane at 1.0 or above avoids precision problems at close range.
    ///
    /// See <http://www.glprogramming.com/red/chapter03.html>.
    ///
    /// ```text
    /// | E 0 0  0 |     A = (right + left) / (right - left)
    /// | 0 F 0  0 |     B = (top + bottom) / (top - bottom)
    /// | A B C -1 |     C = -(far + near) / (far - near)
    /// | 0 0 D  0 |     D = -2 * far * near / (far - near)
    ///                  E = 2 * near / (right - left)
    ///                  F = 2 * near / (top - bottom)
    /// ```
    pub fn perspective_projection_from_bounds(
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);
        let e = 2.0 * near / (right - left);
        let f = 2.0 * near / (top - bottom);

        Self::from_rows([
            [e, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [a, b, c, -1.0],
            [0.0, 0.0, d, 0.0],
        ])
    }

    /// Orthogonal (parallel) projection.
    ///
    /// Only the scale terms are populated:
    ///
    /// ```text
    /// diag(2 / (right - left), 2 / (top - bottom), -2 / (far - near), 1)
    /// ```
    ///
    /// The translation row stays zero, so the box is always centred on the
    /// origin. A volume that is not symmetric about the origin must be
    /// pre-translated by the caller.
    ///
    /// See <http://msdn.microsoft.com/en-us/library/dd373965(v=vs.85).aspx>.
    pub fn orthogonal_projection(
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let a = 2.0 / (right - left);
        let b = 2.0 / (top - bottom);
        let c = -2.0 / (far - near);

        Self::from_rows([
            [a, 0.0, 0.0, 0.0],
            [0.0, b, 0.0, 0.0],
            [0.0, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// View matrix for a camera at `eye` looking at `target`.
    ///
    /// Maps `eye` to the origin and `target` onto the -Z axis. `up` only
    /// needs to be non-parallel to the view direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let side = forward.cross(up).normalize();
        let up = side.cross(forward);

        Self::from_rows([
            [side.x, up.x, -forward.x, 0.0],
            [side.y, up.y, -forward.y, 0.0],
            [side.z, up.z, -forward.z, 0.0],
            [-side.dot(eye), -up.dot(eye), forward.dot(eye), 1.0],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_layout() {
        let m = Mat4::perspective_projection(90.0, 1.0, 1.0, 10.0);
        assert_relative_eq!(m.m[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.m[1][1], 1.0, epsilon = 1e-12);
        assert_eq!(m.m[2][2], 11.0 / -9.0);
        assert_eq!(m.m[2][3], -1.0);
        assert_eq!(m.m[3][2], 20.0 / -9.0);
        assert_eq!(m.m[3][3], 0.0);
    }

    #[test]
    fn test_perspective_aspect_scales_x_only() {
        let m = Mat4::perspective_projection(60.0, 2.0, 0.5, 50.0);
        assert_relative_eq!(m.m[0][0] * 2.0, m.m[1][1], epsilon = 1e-12);
    }

    #[test]
    fn test_perspective_maps_planes_to_ndc() {
        let m = Mat4::perspective_projection(45.0, 1.5, 1.0, 100.0);
        let near = m.transform_point(Vec3::new(0.0, 0.0, -1.0));
        let far = m.transform_point(Vec3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-9);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_symmetric_matches_fovy() {
        // fovy = 90 at near = 1 gives a near plane spanning [-1, 1]
        let a = Mat4::perspective_projection_from_bounds(-1.0, 1.0, 1.0, -1.0, 1.0, 10.0);
        let b = Mat4::perspective_projection(90.0, 1.0, 1.0, 10.0);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_bounds_asymmetric_layout() {
        let m = Mat4::perspective_projection_from_bounds(-1.0, 3.0, 2.0, -1.0, 1.0, 9.0);
        assert_eq!(m.m[0][0], 2.0 / 4.0);
        assert_eq!(m.m[1][1], 2.0 / 3.0);
        assert_eq!(m.m[2], [2.0 / 4.0, 1.0 / 3.0, -10.0 / 8.0, -1.0]);
        assert_eq!(m.m[3], [0.0, 0.0, -18.0 / 8.0, 0.0]);
    }

    #[test]
    fn test_orthogonal_is_diagonal_without_centering() {
        let m = Mat4::orthogonal_projection(-1.0, 1.0, 1.0, -1.0, 1.0, 10.0);
        assert_eq!(
            m,
            Mat4::from_rows([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, -2.0 / 9.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ])
        );

        // An off-centre box still produces no translation terms
        let off = Mat4::orthogonal_projection(0.0, 4.0, 3.0, 1.0, 2.0, 6.0);
        assert_eq!(off.translation(), Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_geometry_propagates_ieee() {
        let m = Mat4::perspective_projection(90.0, 0.0, 1.0, 1.0);
        assert!(m.m[0][0].is_infinite());
        assert!(m.m[2][2].is_infinite());
        assert!(!m.is_finite());

        let o = Mat4::orthogonal_projection(1.0, 1.0, 1.0, -1.0, 1.0, 2.0);
        assert!(o.m[0][0].is_infinite());
    }

    #[test]
    fn test_look_at() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(4.0, 2.0, -1.0);
        let view = Mat4::look_at(eye, target, Vec3::Y);

        assert_relative_eq!(view.transform_point(eye), Vec3::ZERO, epsilon = 1e-12);

        let t = view.transform_point(target);
        assert_relative_eq!(t, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-12);

        // Rotation block is orthonormal
        let r = view.matrix33_view().to_mat3();
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }
}
