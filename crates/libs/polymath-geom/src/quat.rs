//! Rotation quaternion.

use crate::{
    euler::{EulerRotation, RotateOrder},
    macros::{impl_components, impl_scalar_ops},
    units::{Angle, Radians, URadian},
    vec3::Vec3,
    Error, Mat4,
};
use core::ops::{Add, Mul, MulAssign, Sub};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A rotation quaternion `(x, y, z, w)` with the scalar part last.
///
/// Composition reads left to right, matching the row-vector matrix
/// convention: `(p * q).as_matrix()` equals
/// `p.as_matrix() * q.as_matrix()`, i.e. `p * q` rotates by `p` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion(pub(crate) [f64; 4]);

impl_components!(Quaternion, size: 4, shape: [4], cnames: { x: 0, y: 1, z: 2, w: 3 });
impl_scalar_ops!(Quaternion);

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Quaternion([0.0, 0.0, 0.0, 1.0]);

    /// Creates a quaternion from its components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self { Quaternion([x, y, z, w]) }

    /// The rotation of `angle` around `axis` (normalized internally; a
    /// zero axis yields the identity).
    pub fn from_axis_angle(axis: &Vec3, angle: Radians) -> Self {
        let n = axis.normal();
        if n.sqlength() == 0.0 {
            return Self::IDENTITY;
        }
        let half = angle.value() / 2.0;
        let s = half.sin();
        Quaternion([n.x() * s, n.y() * s, n.z() * s, half.cos()])
    }

    /// The rotation axis and angle. The identity (or any rotation with
    /// a vanishing vector part) reports the x axis and a zero angle.
    pub fn axis_angle(&self) -> (Vec3, Radians) {
        let v = self.vector();
        let s = v.length();
        if s == 0.0 {
            return (Vec3::X_AXIS, Angle::ZERO);
        }
        let angle = 2.0 * s.atan2(self.0[3]);
        (v / s, Angle::<URadian>::new(angle))
    }

    /// The vector (imaginary) part.
    pub const fn vector(&self) -> Vec3 { Vec3::new(self.0[0], self.0[1], self.0[2]) }

    /// The conjugate: negated vector part.
    pub fn conjugate(&self) -> Quaternion {
        Quaternion([-self.0[0], -self.0[1], -self.0[2], self.0[3]])
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Quaternion norm.
    pub fn length(&self) -> f64 { self.dot(self).sqrt() }

    /// Squared norm.
    pub fn sqlength(&self) -> f64 { self.dot(self) }

    /// Returns a unit copy; the zero quaternion is returned unchanged.
    pub fn normal(&self) -> Quaternion {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            *self / len
        }
    }

    /// Normalizes in place; the zero quaternion is left unchanged.
    pub fn normalize(&mut self) { *self = self.normal(); }

    /// The inverse: conjugate over squared norm. The zero quaternion
    /// has no inverse and is a degenerate-input error.
    pub fn inverse(&self) -> Result<Quaternion, Error> {
        let sq = self.sqlength();
        if sq == 0.0 {
            return Err(Error::DegenerateInput(
                "the zero quaternion has no inverse".to_string(),
            ));
        }
        Ok(self.conjugate() / sq)
    }

    /// The equivalent row-vector rotation matrix.
    pub fn as_matrix(&self) -> Mat4 {
        let [x, y, z, w] = self.0;
        let (x2, y2, z2) = (x * x, y * y, z * z);
        Mat4::from_rows([
            [1.0 - 2.0 * (y2 + z2), 2.0 * (x * y + w * z), 2.0 * (x * z - w * y), 0.0],
            [2.0 * (x * y - w * z), 1.0 - 2.0 * (x2 + z2), 2.0 * (y * z + w * x), 0.0],
            [2.0 * (x * z + w * y), 2.0 * (y * z - w * x), 1.0 - 2.0 * (x2 + y2), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Extracts the rotation from a row-vector rotation matrix
    /// (Shepperd's method). The matrix is assumed orthonormal.
    pub fn from_matrix(m: &Mat4) -> Quaternion {
        let trace = m.entry(0, 0) + m.entry(1, 1) + m.entry(2, 2);
        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion([
                (m.entry(1, 2) - m.entry(2, 1)) / s,
                (m.entry(2, 0) - m.entry(0, 2)) / s,
                (m.entry(0, 1) - m.entry(1, 0)) / s,
                s / 4.0,
            ])
        } else if m.entry(0, 0) > m.entry(1, 1) && m.entry(0, 0) > m.entry(2, 2) {
            let s = (1.0 + m.entry(0, 0) - m.entry(1, 1) - m.entry(2, 2)).sqrt() * 2.0;
            Quaternion([
                s / 4.0,
                (m.entry(0, 1) + m.entry(1, 0)) / s,
                (m.entry(0, 2) + m.entry(2, 0)) / s,
                (m.entry(1, 2) - m.entry(2, 1)) / s,
            ])
        } else if m.entry(1, 1) > m.entry(2, 2) {
            let s = (1.0 + m.entry(1, 1) - m.entry(0, 0) - m.entry(2, 2)).sqrt() * 2.0;
            Quaternion([
                (m.entry(0, 1) + m.entry(1, 0)) / s,
                s / 4.0,
                (m.entry(1, 2) + m.entry(2, 1)) / s,
                (m.entry(2, 0) - m.entry(0, 2)) / s,
            ])
        } else {
            let s = (1.0 + m.entry(2, 2) - m.entry(0, 0) - m.entry(1, 1)).sqrt() * 2.0;
            Quaternion([
                (m.entry(0, 2) + m.entry(2, 0)) / s,
                (m.entry(1, 2) + m.entry(2, 1)) / s,
                s / 4.0,
                (m.entry(0, 1) - m.entry(1, 0)) / s,
            ])
        }
    }

    /// The rotation as Euler angles in the given order.
    pub fn as_euler(&self, order: RotateOrder) -> EulerRotation {
        EulerRotation::from_quaternion(self, order)
    }

    /// Spherical linear interpolation toward `other` by `t`, along the
    /// shorter arc. Falls back to a normalized linear blend for nearly
    /// identical rotations.
    pub fn slerp(&self, other: &Quaternion, t: f64) -> Quaternion {
        let mut to = *other;
        let mut cos = self.dot(other);
        if cos < 0.0 {
            to = -to;
            cos = -cos;
        }
        if cos > 1.0 - 1.0e-9 {
            let lerped = *self + (to - *self) * t;
            return lerped.normal();
        }
        let theta = cos.clamp(-1.0, 1.0).acos();
        let sin = theta.sin();
        let wa = ((1.0 - t) * theta).sin() / sin;
        let wb = (t * theta).sin() / sin;
        *self * wa + to * wb
    }
}

impl Default for Quaternion {
    fn default() -> Self { Self::IDENTITY }
}

impl Display for Quaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Composition in application order: rotate by `self`, then by `rhs`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        let pv = self.vector();
        let qv = rhs.vector();
        let (pw, qw) = (self.0[3], rhs.0[3]);
        let v = qv.cross(&pv) + pv * qw + qv * pw;
        Quaternion([v.x(), v.y(), v.z(), pw * qw - pv.dot(&qv)])
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Quaternion) { *self = *self * rhs; }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, rhs: Quaternion) -> Quaternion {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o += r;
        }
        Quaternion(out)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;

    fn sub(self, rhs: Quaternion) -> Quaternion {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o -= r;
        }
        Quaternion(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::radians;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    #[test]
    fn axis_angle_round_trip() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normal();
        let q = Quaternion::from_axis_angle(&axis, radians!(FRAC_PI_3));
        let (a, angle) = q.axis_angle();
        assert!(a.is_equivalent(&axis, 1.0e-12));
        assert_abs_diff_eq!(angle.value(), FRAC_PI_3, epsilon = 1.0e-12);
        assert_eq!(Quaternion::from_axis_angle(&Vec3::ZERO, radians!(1.0)), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.axis_angle(), (Vec3::X_AXIS, radians!(0.0)));
    }

    #[test]
    fn unit_length() {
        let q = Quaternion::from_axis_angle(&Vec3::new(3.0, -1.0, 2.0), radians!(1.2));
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1.0e-12);
        let stretched = q * 3.0;
        assert!(stretched.normal().is_equivalent(&q, 1.0e-12));
    }

    #[test]
    fn conjugate_inverts_unit_rotation() {
        let q = Quaternion::from_axis_angle(&Vec3::new(1.0, 1.0, 0.0), radians!(0.7));
        assert!((q * q.conjugate()).is_equivalent(&Quaternion::IDENTITY, 1.0e-12));
        assert!(q.inverse().unwrap().is_equivalent(&q.conjugate(), 1.0e-12));
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).inverse().is_err());
    }

    #[test]
    fn composition_matches_matrix_product() {
        let p = Quaternion::from_axis_angle(&Vec3::X_AXIS, radians!(0.4));
        let q = Quaternion::from_axis_angle(&Vec3::Y_AXIS, radians!(-1.1));
        let lhs = (p * q).as_matrix();
        let rhs = p.as_matrix() * q.as_matrix();
        assert!(lhs.is_equivalent(&rhs, 1.0e-12));
    }

    #[test]
    fn rotation_direction() {
        // +90 degrees around z takes x to y under the row convention.
        let q = Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(FRAC_PI_2));
        let v = Vec3::X_AXIS * q.as_matrix();
        assert!(v.is_equivalent(&Vec3::Y_AXIS, 1.0e-12));
    }

    #[test]
    fn matrix_round_trip() {
        for q in [
            Quaternion::from_axis_angle(&Vec3::new(1.0, 2.0, 3.0), radians!(2.5)),
            Quaternion::from_axis_angle(&Vec3::X_AXIS, radians!(PI - 1.0e-3)),
            Quaternion::from_axis_angle(&Vec3::new(-1.0, 0.5, 0.2), radians!(3.0)),
            Quaternion::IDENTITY,
        ] {
            let rt = Quaternion::from_matrix(&q.as_matrix());
            // q and -q encode the same rotation.
            let same = rt.is_equivalent(&q, 1.0e-9) || rt.is_equivalent(&-q, 1.0e-9);
            assert!(same, "round trip failed for {q}");
        }
    }

    #[test]
    fn slerp_behaviour() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(FRAC_PI_2));
        assert!(a.slerp(&b, 0.0).is_equivalent(&a, 1.0e-12));
        assert!(a.slerp(&b, 1.0).is_equivalent(&b, 1.0e-12));
        let half = a.slerp(&b, 0.5);
        let expected = Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(FRAC_PI_2 / 2.0));
        assert!(half.is_equivalent(&expected, 1.0e-12));
        // Interpolation always takes the shorter arc.
        let c = Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(3.0));
        let d = Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(-3.0));
        let mid = c.slerp(&d, 0.5);
        // Halfway between 3.0 and -3.0 the short way is through pi.
        assert_abs_diff_eq!(mid.axis_angle().1.value(), PI, epsilon = 1.0e-9);
    }
}
