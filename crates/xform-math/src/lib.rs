//! # xform-math
//!
//! 4x4 transform matrices for 3D graphics pipelines.
//!
//! This crate builds the matrices a renderer needs for object transforms
//! and cameras:
//!
//! - [`Mat4`] - construction from rotations, translation and scale;
//!   vector transforms with homogeneous divide; multiply and inverse
//! - Projections - [`Mat4::perspective_projection`],
//!   [`Mat4::perspective_projection_from_bounds`],
//!   [`Mat4::orthogonal_projection`], [`Mat4::look_at`]
//! - [`Mat3`] - rotation blocks from Euler angles, quaternions and axes
//! - [`batch`] - the same operations over slices of matrices and vectors
//!
//! # Design
//!
//! All matrices are **row-major** and transform **row vectors**:
//!
//! ```text
//! result = vector * matrix
//! ```
//!
//! Translation lives in row 3, not in the last column. The memory layout
//! matches a column-major, column-vector matrix, so it uploads to OpenGL
//! without a transpose.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Mat4, Quat, Vec3};
//!
//! let model = Mat4::from_quaternion(Quat::from_axis_angle(Vec3::Y, 0.5))
//!     * Mat4::from_translation([0.0, 0.0, -5.0]);
//! let proj = Mat4::perspective_projection(60.0, 1.0, 0.1, 100.0);
//!
//! let clip = (model * proj).transform_point(Vec3::ZERO);
//! assert!(clip.is_finite());
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop with the wider graphics ecosystem
//! - [`wide`] - portable SIMD for batched transforms
//! - [`approx`] - approximate equality for all value types
//! - `rayon` - parallel batches (`parallel` feature, on by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod array;
mod config;
mod error;
mod mat3;
mod mat4;
mod projection;
mod quat;
mod transform;
mod vec3;
mod vec4;
mod view;

pub mod batch;
pub mod linalg;
pub mod simd;

pub use array::Mat4Array;
pub use config::{BatchConfig, LinalgConfig};
pub use error::{MathError, MathResult};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::{Eulers, Quat};
pub use transform::{Transform, Vector};
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use view::{Mat33View, Mat33ViewMut};

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DMat4, DQuat, DVec3, DVec4};
}
