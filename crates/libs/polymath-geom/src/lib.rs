//! Fixed-shape 3D math types built on the `polymath-array` core.
//!
//! Every type in this crate has a compile-time shape: [`Vec3`] and
//! [`Point`] are 3- and 4-component vectors, [`Color`] is an RGBA
//! quadruple, [`Mat4`] is a 4x4 matrix, and [`Transform`],
//! [`Quaternion`] and [`EulerRotation`] describe affine transformations
//! and rotations. Components are `f64` and the types are plain `Copy`
//! values.
//!
//! Arithmetic between fixed-shape types follows a fixed coercion table
//! rather than elementwise broadcasting: adding a [`Vec3`] to a
//! [`Point`] translates the point, subtracting two points yields the
//! displacement [`Vec3`], `^` between two [`Vec3`] is the cross product
//! and `*` the dot product, and `v * m` is the row-vector product. All
//! operators between fixed-shape operands are statically conformable
//! and never fail; size-changing conversions go through
//! [`array::VecN`]/[`array::MatN`] or `TryFrom` instead.
//!
//! The [`units`] module wraps raw `f64` quantities in unit-tagged
//! angle, length, and time types that convert explicitly.

mod color;
mod euler;
mod macros;
pub mod math;
mod mat4;
mod point;
mod quat;
mod transform;
pub mod units;
mod vec3;

pub use color::{hsv_to_rgb, rgb_to_hsv, Color};
pub use euler::{EulerRotation, RotateOrder};
pub use mat4::Mat4;
pub use point::Point;
pub use quat::Quaternion;
pub use transform::Transform;
pub use vec3::Vec3;

pub use array::{ulp_eq, Error, MatN, VecN, TOLERANCE};
