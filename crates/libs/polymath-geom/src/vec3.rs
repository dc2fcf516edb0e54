//! 3-component direction/displacement vector.

use crate::{
    macros::{impl_components, impl_scalar_ops},
    point::Point,
    quat::Quaternion,
    units::{Angle, Radians, URadian},
    Error, Mat4, VecN, TOLERANCE,
};
use core::ops::{Add, AddAssign, BitXor, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A 3-component vector representing a direction or displacement.
///
/// Adding a `Vec3` to a [`Point`] translates the point; `*` between two
/// vectors is the dot product and `^` the cross product. Multiplying by
/// a [`Mat4`] on the right transforms the vector as a direction (the
/// translation row is ignored); `^` with a [`Mat4`] transforms it as a
/// normal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3(pub(crate) [f64; 3]);

impl_components!(Vec3, size: 3, shape: [3], cnames: { x: 0, y: 1, z: 2 });
impl_scalar_ops!(Vec3);

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// The all-ones vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The x axis.
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);
    /// The y axis.
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);
    /// The z axis.
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self { Vec3([x, y, z]) }

    /// Creates a vector with all components set to `value`.
    pub const fn splat(value: f64) -> Self { Vec3([value; 3]) }

    /// Dot product.
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
    }

    /// Cross product.
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.0[1] * other.0[2] - self.0[2] * other.0[1],
            self.0[2] * other.0[0] - self.0[0] * other.0[2],
            self.0[0] * other.0[1] - self.0[1] * other.0[0],
        )
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 { self.sqlength().sqrt() }

    /// Squared Euclidean length.
    pub fn sqlength(&self) -> f64 { self.dot(self) }

    /// Returns a unit-length copy; the zero vector is returned unchanged.
    pub fn normal(&self) -> Vec3 {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            *self / len
        }
    }

    /// Normalizes in place; the zero vector is left unchanged.
    pub fn normalize(&mut self) { *self = self.normal(); }

    /// Distance between the two vectors taken as positions.
    pub fn dist(&self, other: &Vec3) -> f64 { (*other - *self).length() }

    /// Unsigned angle with `other`. The cosine is clamped, so
    /// near-parallel inputs never produce NaN; either operand being zero
    /// yields a zero angle.
    pub fn angle(&self, other: &Vec3) -> Radians {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return Angle::ZERO;
        }
        Angle::<URadian>::new((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }

    /// Axis of the rotation taking `self` toward `other`, optionally
    /// normalized.
    pub fn axis(&self, other: &Vec3, normalize: bool) -> Vec3 {
        let n = self.cross(other);
        if normalize {
            n.normal()
        } else {
            n
        }
    }

    /// Cotangent of the angle with `other`: dot over cross length.
    pub fn cotan(&self, other: &Vec3) -> f64 { self.dot(other) / self.cross(other).length() }

    /// True when `other` is parallel (or anti-parallel) to `self` within
    /// `tol`, tested on the squared cross length relative to both
    /// operand lengths.
    pub fn is_parallel(&self, other: &Vec3, tol: f64) -> bool {
        self.cross(other).sqlength() <= tol * self.sqlength() * other.sqlength()
    }

    /// Linear blend toward `other` by `weight` (0 keeps `self`).
    pub fn blend(&self, other: &Vec3, weight: f64) -> Vec3 {
        *self + (*other - *self) * weight
    }

    /// Rotates the vector by the given quaternion.
    pub fn rotate_by(&self, q: &Quaternion) -> Vec3 {
        let m = q.as_matrix();
        self.transform_direction(&m)
    }

    /// The quaternion rotating `self` onto `other` along the shortest
    /// arc. Opposite vectors rotate by pi around an arbitrary
    /// perpendicular axis; a zero operand yields the identity.
    pub fn rotate_to(&self, other: &Vec3) -> Quaternion {
        let angle = self.angle(other);
        let axis = self.axis(other, true);
        if axis.sqlength() <= TOLERANCE {
            if self.dot(other) >= 0.0 {
                return Quaternion::IDENTITY;
            }
            // Anti-parallel: any axis perpendicular to self works.
            let pick = if self.x().abs() < 0.9 {
                Vec3::X_AXIS
            } else {
                Vec3::Y_AXIS
            };
            return Quaternion::from_axis_angle(&self.axis(&pick, true), angle);
        }
        Quaternion::from_axis_angle(&axis, angle)
    }

    /// Row-vector product with the upper-left 3x3 of `m`: transforms the
    /// vector as a direction, ignoring translation.
    pub fn transform_direction(&self, m: &Mat4) -> Vec3 {
        let mut out = [0.0; 3];
        for (j, o) in out.iter_mut().enumerate() {
            *o = (0..3).map(|i| self.0[i] * m.entry(i, j)).sum();
        }
        Vec3(out)
    }

    /// Transforms the vector as a surface normal: the row-vector product
    /// with the inverse transpose of the upper-left 3x3 of `m`. The
    /// result is not normalized. A singular matrix is an error.
    pub fn transform_as_normal(&self, m: &Mat4) -> Result<Vec3, Error> {
        let inv = m.upper3x3().inverse()?;
        // n * inv^T: component j is the dot of n with row j of inv.
        let mut out = [0.0; 3];
        for (j, o) in out.iter_mut().enumerate() {
            *o = (0..3).map(|i| self.0[i] * inv.get(j, i)).sum();
        }
        Ok(Vec3(out))
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}

impl From<Vec3> for VecN {
    fn from(v: Vec3) -> VecN { VecN::from(v.0.as_slice()) }
}

impl TryFrom<&VecN> for Vec3 {
    type Error = Error;

    fn try_from(v: &VecN) -> Result<Self, Error> { Vec3::try_from(v.as_slice()) }
}

impl From<Point> for Vec3 {
    /// Cartesianizes: the point's coordinates divided by its weight
    /// (taken as-is when the weight is zero).
    fn from(p: Point) -> Vec3 {
        let w = p.w();
        if w == 0.0 || w == 1.0 {
            Vec3::new(p.x(), p.y(), p.z())
        } else {
            Vec3::new(p.x() / w, p.y() / w, p.z() / w)
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        )
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
        )
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) { *self = *self + rhs; }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) { *self = *self - rhs; }
}

/// Translating a point: the point's weight is kept.
impl Add<Point> for Vec3 {
    type Output = Point;

    fn add(self, rhs: Point) -> Point { rhs + self }
}

/// Dot product.
impl Mul for Vec3 {
    type Output = f64;

    fn mul(self, rhs: Vec3) -> f64 { self.dot(&rhs) }
}

/// Cross product.
impl BitXor for Vec3 {
    type Output = Vec3;

    fn bitxor(self, rhs: Vec3) -> Vec3 { self.cross(&rhs) }
}

/// Direction transform by the upper-left 3x3.
impl Mul<Mat4> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Mat4) -> Vec3 { self.transform_direction(&rhs) }
}

/// Normal transform; panics when the matrix is singular (see
/// [`Vec3::transform_as_normal`] for the recoverable form).
impl BitXor<Mat4> for Vec3 {
    type Output = Vec3;

    fn bitxor(self, rhs: Mat4) -> Vec3 {
        self.transform_as_normal(&rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn components_and_constants() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v[2], 3.0);
        assert_eq!(Vec3::CNAMES, &["x", "y", "z"]);
        assert_eq!(Vec3::SIZE, 3);
        assert_eq!(v.get(), [1.0, 2.0, 3.0]);
        let mut v = v;
        v.set_y(5.0);
        assert_eq!(v, Vec3::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn flat_sequence_contract() {
        // Shorter input pads with the default (zero) components.
        assert_eq!(Vec3::try_from(&[1.0, 2.0][..]).unwrap(), Vec3::new(1.0, 2.0, 0.0));
        // Longer input refuses to drop data.
        assert!(matches!(
            Vec3::try_from(&[1.0, 2.0, 3.0, 4.0][..]),
            Err(Error::DataLoss { target: "Vec3", size: 3, provided: 4 })
        ));
    }

    #[test]
    fn dot_and_cross() {
        let u = Vec3::new(1.0, 2.0, 3.0);
        let v = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(u * v, 2.0);
        assert_eq!(u ^ v, Vec3::new(-3.0, 0.0, 1.0));
        assert_eq!(u.cross(&v), -v.cross(&u));
        assert_abs_diff_eq!(u.dot(&u.cross(&v)), 0.0);
    }

    #[test]
    fn angle_and_parallel() {
        let u = Vec3::X_AXIS;
        assert_abs_diff_eq!(u.angle(&Vec3::Y_AXIS).value(), FRAC_PI_2);
        assert_abs_diff_eq!(u.angle(&Vec3::new(-2.0, 0.0, 0.0)).value(), PI);
        assert_eq!(u.angle(&Vec3::ZERO).value(), 0.0);
        assert!(u.is_parallel(&Vec3::new(-3.0, 0.0, 0.0), 1.0e-12));
        assert!(!u.is_parallel(&Vec3::Y_AXIS, 1.0e-12));
    }

    #[test]
    fn normalization() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert_abs_diff_eq!(v.normal().length(), 1.0);
        assert_eq!(Vec3::ZERO.normal(), Vec3::ZERO);
        let mut w = v;
        w.normalize();
        assert_eq!(w, v.normal());
    }

    #[test]
    fn blending_and_scalars() {
        let u = Vec3::new(0.0, 0.0, 0.0);
        let v = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(u.blend(&v, 0.5), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(2.0 * v / 4.0, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(-v, Vec3::new(-2.0, -4.0, -6.0));
    }

    #[test]
    fn rotate_to_round_trip() {
        let u = Vec3::new(1.0, 0.5, -0.25).normal();
        let v = Vec3::new(-0.5, 1.0, 2.0).normal();
        let q = u.rotate_to(&v);
        assert!(u.rotate_by(&q).is_equivalent(&v, 1.0e-9));
        // Anti-parallel still lands on the target.
        let q = u.rotate_to(&-u);
        assert!(u.rotate_by(&q).is_equivalent(&-u, 1.0e-9));
    }

    #[test]
    fn direction_transform_ignores_translation() {
        let mut m = Mat4::IDENTITY;
        m.set_entry(3, 0, 10.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v * m, v);
    }

    #[test]
    fn normal_transform_uses_inverse_transpose() {
        // Non-uniform scale: the normal of a plane squashed in y must
        // stay perpendicular to the transformed tangent.
        let mut m = Mat4::IDENTITY;
        m.set_entry(1, 1, 0.5);
        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let normal = Vec3::new(1.0, -1.0, 0.0);
        let t = tangent * m;
        let n = normal ^ m;
        assert_abs_diff_eq!(t.dot(&n), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn generic_round_trip() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let n = VecN::from(v);
        assert_eq!(n.size(), 3);
        assert_eq!(Vec3::try_from(&n).unwrap(), v);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn vec3() -> impl Strategy<Value = Vec3> {
            [-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0]
                .prop_map(|[x, y, z]| Vec3::new(x, y, z))
        }

        proptest! {
            #[test]
            fn cross_is_antisymmetric(u in vec3(), v in vec3()) {
                prop_assert_eq!(u.cross(&v), -v.cross(&u));
            }

            #[test]
            fn cross_is_orthogonal_to_operands(u in vec3(), v in vec3()) {
                let n = u.cross(&v);
                let scale = u.length() * v.length();
                prop_assert!(u.dot(&n).abs() <= 1.0e-9 * scale.max(1.0) * n.length().max(1.0));
                prop_assert!(v.dot(&n).abs() <= 1.0e-9 * scale.max(1.0) * n.length().max(1.0));
            }

            #[test]
            fn rotation_preserves_length(u in vec3(), angle in -3.0f64..3.0) {
                let q = Quaternion::from_axis_angle(&Vec3::new(1.0, -2.0, 0.5), crate::units::radians!(angle));
                prop_assert!((u.rotate_by(&q).length() - u.length()).abs() <= 1.0e-9 * u.length().max(1.0));
            }
        }
    }
}
