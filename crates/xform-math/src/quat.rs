//! Rotation representations consumed by the matrix constructors.
//!
//! - [`Quat`] - quaternion stored as `[x, y, z, w]` (scalar last)
//! - [`Eulers`] - roll/pitch/yaw angles in radians
//!
//! Neither type is normalized implicitly. Matrix constructors assume a
//! unit quaternion; a non-unit one yields a scaled, skewed block.

use crate::Vec3;

/// A rotation quaternion, scalar (`w`) last.
///
/// # Example
///
/// ```rust
/// use xform_math::{Quat, Vec3};
///
/// let q = Quat::from_axis_angle(Vec3::Z, std::f64::consts::FRAC_PI_2);
/// assert!((q.length() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Quat {
    /// Vector part, X
    pub x: f64,
    /// Vector part, Y
    pub y: f64,
    /// Vector part, Z
    pub z: f64,
    /// Scalar part
    pub w: f64,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from raw components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Rotation of `theta` radians about `axis`.
    ///
    /// The axis is normalized first; a zero axis gives the identity.
    pub fn from_axis_angle(axis: Vec3, theta: f64) -> Self {
        let axis = axis.normalize();
        let (s, c) = (theta * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// The conjugate, which is the inverse rotation for unit quaternions.
    #[inline]
    pub const fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Euclidean length of the four components.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Scales to unit length. Returns the identity for a zero quaternion.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    /// Converts to glam DQuat.
    #[inline]
    pub fn to_glam(self) -> glam::DQuat {
        glam::DQuat::from_array(self.to_array())
    }

    /// Creates from glam DQuat.
    #[inline]
    pub fn from_glam(q: glam::DQuat) -> Self {
        Self::from_array(q.to_array())
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 4]> for Quat {
    #[inline]
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<glam::DQuat> for Quat {
    #[inline]
    fn from(q: glam::DQuat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quat> for glam::DQuat {
    #[inline]
    fn from(q: Quat) -> glam::DQuat {
        q.to_glam()
    }
}

/// Euler angles in radians.
///
/// `roll` rotates about X, `pitch` about Y and `yaw` about Z. A row
/// vector is rolled first, then pitched, then yawed (extrinsic X-Y-Z).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Eulers {
    /// Rotation about the X axis
    pub roll: f64,
    /// Rotation about the Y axis
    pub pitch: f64,
    /// Rotation about the Z axis
    pub yaw: f64,
}

impl Eulers {
    /// Creates a set of Euler angles.
    #[inline]
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Creates from `[roll, pitch, yaw]`.
    #[inline]
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to `[roll, pitch, yaw]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.roll, self.pitch, self.yaw]
    }
}

impl From<[f64; 3]> for Eulers {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_axis_angle_normalizes_axis() {
        let a = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 5.0), PI / 3.0);
        let b = Quat::from_axis_angle(Vec3::Z, PI / 3.0);
        assert!((a.x - b.x).abs() < 1e-12);
        assert!((a.z - b.z).abs() < 1e-12);
        assert!((a.w - b.w).abs() < 1e-12);
    }

    #[test]
    fn test_glam_round_trip_preserves_layout() {
        let q = Quat::new(0.1, 0.2, 0.3, 0.9);
        let g = q.to_glam();
        assert_eq!(g.w, 0.9);
        assert_eq!(Quat::from_glam(g), q);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::IDENTITY);
    }
}
