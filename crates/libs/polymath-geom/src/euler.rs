//! Euler-angle rotation with an explicit rotation order.

use crate::{quat::Quaternion, Error, Mat4};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The order in which the three axis rotations are applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateOrder {
    /// Rotate about x, then y, then z.
    #[default]
    XYZ,
    /// Rotate about y, then z, then x.
    YZX,
    /// Rotate about z, then x, then y.
    ZXY,
    /// Rotate about x, then z, then y.
    XZY,
    /// Rotate about y, then x, then z.
    YXZ,
    /// Rotate about z, then y, then x.
    ZYX,
}

impl RotateOrder {
    /// The axis indices in application order, plus the permutation sign
    /// (+1 for cyclic orders, -1 for anti-cyclic).
    const fn axes(self) -> (usize, usize, usize, f64) {
        match self {
            RotateOrder::XYZ => (0, 1, 2, 1.0),
            RotateOrder::YZX => (1, 2, 0, 1.0),
            RotateOrder::ZXY => (2, 0, 1, 1.0),
            RotateOrder::XZY => (0, 2, 1, -1.0),
            RotateOrder::YXZ => (1, 0, 2, -1.0),
            RotateOrder::ZYX => (2, 1, 0, -1.0),
        }
    }
}

impl Display for RotateOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RotateOrder::XYZ => "xyz",
            RotateOrder::YZX => "yzx",
            RotateOrder::ZXY => "zxy",
            RotateOrder::XZY => "xzy",
            RotateOrder::YXZ => "yxz",
            RotateOrder::ZYX => "zyx",
        };
        f.write_str(s)
    }
}

/// A rotation described by three axis angles (radians) and the order in
/// which they apply.
///
/// Angles are stored by axis: `x()` is always the rotation about the x
/// axis regardless of the order. Conversions to and from matrices and
/// quaternions follow the row-vector convention shared with [`Mat4`]
/// and [`Quaternion`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerRotation {
    angles: [f64; 3],
    order: RotateOrder,
}

/// The row-vector rotation matrix about a single coordinate axis.
fn axis_matrix(axis: usize, angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    match axis {
        0 => Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        1 => Mat4::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        _ => Mat4::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
    }
}

fn axis_quaternion(axis: usize, angle: f64) -> Quaternion {
    let (s, c) = (angle / 2.0).sin_cos();
    let mut q = [0.0, 0.0, 0.0, c];
    q[axis] = s;
    Quaternion(q)
}

impl EulerRotation {
    /// Row-major dimensions of the angle part, fixed at compile time.
    pub const SHAPE: &'static [usize] = &[3];
    /// Number of dimensions of the angle part.
    pub const NDIM: usize = Self::SHAPE.len();
    /// Component names, in storage order. The rotation order rides along
    /// as an enum, not a numeric component.
    pub const CNAMES: &'static [&'static str] = &["x", "y", "z"];
    /// Number of angle components.
    pub const SIZE: usize = 3;

    /// The zero rotation in the default order.
    pub const IDENTITY: Self = EulerRotation { angles: [0.0; 3], order: RotateOrder::XYZ };

    /// Creates a rotation from the three axis angles in radians.
    pub const fn new(x: f64, y: f64, z: f64, order: RotateOrder) -> Self {
        EulerRotation { angles: [x, y, z], order }
    }

    /// Rotation about the x axis, in radians.
    pub const fn x(&self) -> f64 { self.angles[0] }

    /// Rotation about the y axis, in radians.
    pub const fn y(&self) -> f64 { self.angles[1] }

    /// Rotation about the z axis, in radians.
    pub const fn z(&self) -> f64 { self.angles[2] }

    /// Sets the rotation about the x axis.
    pub fn set_x(&mut self, value: f64) { self.angles[0] = value; }

    /// Sets the rotation about the y axis.
    pub fn set_y(&mut self, value: f64) { self.angles[1] = value; }

    /// Sets the rotation about the z axis.
    pub fn set_z(&mut self, value: f64) { self.angles[2] = value; }

    /// The rotation order.
    pub const fn order(&self) -> RotateOrder { self.order }

    /// The angles as a flat array, in storage order.
    pub const fn get(&self) -> [f64; 3] { self.angles }

    /// The equivalent row-vector rotation matrix.
    pub fn as_matrix(&self) -> Mat4 {
        let (i, j, k, _) = self.order.axes();
        axis_matrix(i, self.angles[i])
            * axis_matrix(j, self.angles[j])
            * axis_matrix(k, self.angles[k])
    }

    /// The equivalent quaternion.
    pub fn to_quaternion(&self) -> Quaternion {
        let (i, j, k, _) = self.order.axes();
        axis_quaternion(i, self.angles[i])
            * axis_quaternion(j, self.angles[j])
            * axis_quaternion(k, self.angles[k])
    }

    /// Extracts the Euler angles of a row-vector rotation matrix for
    /// the given order. The middle angle lands in `[-pi/2, pi/2]`; at
    /// gimbal lock the last-applied rotation is folded into the first.
    pub fn from_matrix(m: &Mat4, order: RotateOrder) -> Self {
        let (i, j, k, e) = order.axes();
        let mut angles = [0.0; 3];
        let cy = (m.entry(i, i).powi(2) + m.entry(i, j).powi(2)).sqrt();
        angles[j] = (-e * m.entry(i, k)).atan2(cy);
        if cy > 1.0e-12 {
            angles[i] = (e * m.entry(j, k)).atan2(m.entry(k, k));
            angles[k] = (e * m.entry(i, j)).atan2(m.entry(i, i));
        } else {
            angles[i] = (-e * m.entry(k, j)).atan2(m.entry(j, j));
            angles[k] = 0.0;
        }
        EulerRotation { angles, order }
    }

    /// The rotation of a quaternion as Euler angles in the given order.
    pub fn from_quaternion(q: &Quaternion, order: RotateOrder) -> Self {
        Self::from_matrix(&q.as_matrix(), order)
    }

    /// Re-expresses the same rotation in another order.
    pub fn reorder(&self, order: RotateOrder) -> Self {
        if order == self.order {
            return *self;
        }
        Self::from_matrix(&self.as_matrix(), order)
    }

    /// Rounds every angle to `digits` decimal digits; the order is
    /// kept.
    pub fn round_to(&self, digits: u32) -> Self {
        let factor = 10f64.powi(digits as i32);
        let mut out = *self;
        for a in out.angles.iter_mut() {
            *a = (*a * factor).round() / factor;
        }
        out
    }

    /// Anglewise comparison within `tol`; rotations in different orders
    /// are never equivalent.
    pub fn is_equivalent(&self, other: &Self, tol: f64) -> bool {
        self.order == other.order
            && self
                .angles
                .iter()
                .zip(other.angles.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl Display for EulerRotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}] {}",
            self.angles[0], self.angles[1], self.angles[2], self.order
        )
    }
}

impl From<[f64; 3]> for EulerRotation {
    /// Three axis angles in the default order.
    fn from(angles: [f64; 3]) -> Self {
        EulerRotation { angles, order: RotateOrder::default() }
    }
}

impl TryFrom<&[f64]> for EulerRotation {
    type Error = Error;

    /// Up to three axis angles, missing ones zero, in the default order.
    fn try_from(s: &[f64]) -> Result<Self, Error> {
        if s.len() > Self::SIZE {
            return Err(Error::DataLoss {
                target: "EulerRotation",
                size: Self::SIZE,
                provided: s.len(),
            });
        }
        let mut out = Self::default();
        out.angles[..s.len()].copy_from_slice(s);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Vec3;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const ORDERS: [RotateOrder; 6] = [
        RotateOrder::XYZ,
        RotateOrder::YZX,
        RotateOrder::ZXY,
        RotateOrder::XZY,
        RotateOrder::YXZ,
        RotateOrder::ZYX,
    ];

    #[test]
    fn rotation_direction() {
        let e = EulerRotation::new(0.0, 0.0, FRAC_PI_2, RotateOrder::XYZ);
        let v = Vec3::X_AXIS * e.as_matrix();
        assert!(v.is_equivalent(&Vec3::Y_AXIS, 1.0e-12));
    }

    #[test]
    fn matrix_round_trip_all_orders() {
        for order in ORDERS {
            for angles in [
                (0.3, -0.8, 1.2),
                (-1.4, 0.9, -0.1),
                (0.0, 0.0, 0.0),
                (2.0, 0.4, -2.8),
            ] {
                let e = EulerRotation::new(angles.0, angles.1, angles.2, order);
                let rt = EulerRotation::from_matrix(&e.as_matrix(), order);
                // Angles may re-wrap, but the rotation must match.
                assert!(
                    rt.as_matrix().is_equivalent(&e.as_matrix(), 1.0e-9),
                    "round trip failed for {e}"
                );
                assert_eq!(rt.order(), order);
            }
        }
    }

    #[test]
    fn principal_angles_recovered_exactly() {
        for order in ORDERS {
            let e = EulerRotation::new(0.3, -0.4, 0.5, order);
            let rt = EulerRotation::from_matrix(&e.as_matrix(), order);
            assert!(rt.is_equivalent(&e, 1.0e-12), "extraction drifted for {e}");
        }
    }

    #[test]
    fn quaternion_round_trip() {
        for order in ORDERS {
            let e = EulerRotation::new(0.7, 0.2, -1.1, order);
            let q = e.to_quaternion();
            assert!(q.as_matrix().is_equivalent(&e.as_matrix(), 1.0e-12));
            let back = EulerRotation::from_quaternion(&q, order);
            assert!(back.is_equivalent(&e, 1.0e-9));
        }
    }

    #[test]
    fn reorder_preserves_rotation() {
        let e = EulerRotation::new(0.4, FRAC_PI_4, -0.9, RotateOrder::XYZ);
        let r = e.reorder(RotateOrder::ZYX);
        assert_eq!(r.order(), RotateOrder::ZYX);
        assert!(r.as_matrix().is_equivalent(&e.as_matrix(), 1.0e-9));
        assert_eq!(e.reorder(RotateOrder::XYZ), e);
    }

    #[test]
    fn gimbal_lock_folds_into_first_axis() {
        let e = EulerRotation::new(0.3, FRAC_PI_2, 0.4, RotateOrder::XYZ);
        let rt = EulerRotation::from_matrix(&e.as_matrix(), RotateOrder::XYZ);
        assert_eq!(rt.z(), 0.0);
        assert!(rt.as_matrix().is_equivalent(&e.as_matrix(), 1.0e-9));
        assert_abs_diff_eq!(rt.y(), FRAC_PI_2, epsilon = 1.0e-9);
    }

    #[test]
    fn component_access() {
        let mut e = EulerRotation::IDENTITY;
        e.set_y(0.5);
        assert_eq!(e.get(), [0.0, 0.5, 0.0]);
        assert_eq!(e.y(), 0.5);
        assert_eq!(EulerRotation::CNAMES, &["x", "y", "z"]);
        assert_eq!(EulerRotation::SHAPE, &[3]);
        assert_eq!(EulerRotation::NDIM, 1);
    }

    #[test]
    fn flat_sequence_contract() {
        let e = EulerRotation::try_from([0.1, 0.2].as_slice()).unwrap();
        assert_eq!(e.get(), [0.1, 0.2, 0.0]);
        assert_eq!(e.order(), RotateOrder::XYZ);

        let err = EulerRotation::try_from([0.1, 0.2, 0.3, 0.4].as_slice()).unwrap_err();
        assert!(matches!(err, Error::DataLoss { provided: 4, .. }));

        assert_eq!(EulerRotation::from([0.1, 0.2, 0.3]).z(), 0.3);
    }
}
