//! Homogeneous 4D vector type.

use crate::Vec3;
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Index, IndexMut};

/// A homogeneous 4D vector of `f64` components.
///
/// `w = 1.0` marks a point, `w = 0.0` a direction (point at infinity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec4 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// Homogeneous component
    pub w: f64,
}

impl Vec4 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Drops the `w` component without dividing.
    #[inline]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divides all four components by `w` unless `w` is exactly zero.
    ///
    /// ```rust
    /// use xform_math::Vec4;
    ///
    /// assert_eq!(Vec4::new(2.0, 4.0, 6.0, 2.0).homogenize(), Vec4::new(1.0, 2.0, 3.0, 1.0));
    /// assert_eq!(Vec4::new(2.0, 4.0, 6.0, 0.0).homogenize(), Vec4::new(2.0, 4.0, 6.0, 0.0));
    /// ```
    #[inline]
    pub fn homogenize(self) -> Self {
        if self.w != 0.0 {
            let w = self.w;
            Self::new(self.x / w, self.y / w, self.z / w, self.w / w)
        } else {
            self
        }
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Converts to glam DVec4.
    #[inline]
    pub fn to_glam(self) -> glam::DVec4 {
        glam::DVec4::new(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam DVec4.
    #[inline]
    pub fn from_glam(v: glam::DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl Index<usize> for Vec4 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vec4 index out of bounds: {}", i),
        }
    }
}

impl From<[f64; 4]> for Vec4 {
    #[inline]
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec4> for [f64; 4] {
    #[inline]
    fn from(v: Vec4) -> [f64; 4] {
        v.to_array()
    }
}

impl From<glam::DVec4> for Vec4 {
    #[inline]
    fn from(v: glam::DVec4) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec4> for glam::DVec4 {
    #[inline]
    fn from(v: Vec4) -> glam::DVec4 {
        v.to_glam()
    }
}

impl AbsDiffEq for Vec4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.truncate().abs_diff_eq(&other.truncate(), epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl RelativeEq for Vec4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.truncate()
            .relative_eq(&other.truncate(), epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
