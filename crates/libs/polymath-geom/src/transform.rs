//! Decomposed affine transformation.

use crate::{
    euler::{EulerRotation, RotateOrder},
    quat::Quaternion,
    vec3::Vec3,
    Mat4,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An affine transformation held in decomposed form: scale, then
/// rotation, then translation.
///
/// [`as_matrix`](Transform::as_matrix) recomposes the product
/// `S * R * T` in the row-vector convention;
/// [`from_matrix`](Transform::from_matrix) decomposes any matrix built
/// from those three parts. Matrices carrying shear have no exact
/// decomposition here and round-trip lossily.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    scale: Vec3,
    rotation: Quaternion,
    translation: Vec3,
}

impl Transform {
    /// The identity transformation.
    pub const IDENTITY: Self = Transform {
        scale: Vec3::ONE,
        rotation: Quaternion::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Creates a transformation from its three components.
    pub const fn new(scale: Vec3, rotation: Quaternion, translation: Vec3) -> Self {
        Transform { scale, rotation, translation }
    }

    /// The scale component.
    pub const fn scale(&self) -> Vec3 { self.scale }

    /// Replaces the scale component.
    pub fn set_scale(&mut self, scale: Vec3) { self.scale = scale; }

    /// The rotation component.
    pub const fn rotation(&self) -> Quaternion { self.rotation }

    /// Replaces the rotation component.
    pub fn set_rotation(&mut self, rotation: Quaternion) { self.rotation = rotation; }

    /// The rotation component as Euler angles in the given order.
    pub fn rotation_euler(&self, order: RotateOrder) -> EulerRotation {
        EulerRotation::from_quaternion(&self.rotation, order)
    }

    /// Replaces the rotation component from Euler angles.
    pub fn set_rotation_euler(&mut self, e: &EulerRotation) {
        self.rotation = e.to_quaternion();
    }

    /// The translation component.
    pub const fn translation(&self) -> Vec3 { self.translation }

    /// Replaces the translation component.
    pub fn set_translation(&mut self, translation: Vec3) { self.translation = translation; }

    /// Recomposes the scale-rotate-translate matrix.
    pub fn as_matrix(&self) -> Mat4 {
        let mut m = self.rotation.as_matrix();
        // Scale the rotation rows, then drop the translation into the
        // fourth row: diag(s) * R * T.
        for r in 0..3 {
            let s = self.scale[r];
            for c in 0..3 {
                m.set_entry(r, c, m.entry(r, c) * s);
            }
        }
        m.set_row(3, [self.translation.x(), self.translation.y(), self.translation.z(), 1.0]);
        m
    }

    /// Decomposes a scale-rotate-translate matrix.
    ///
    /// The scale components are the lengths of the upper 3x3 rows, the
    /// x scale negated when the matrix is mirroring; the rotation is
    /// read from the normalized rows.
    pub fn from_matrix(m: &Mat4) -> Transform {
        let translation = m.translate();
        let mut rows = [
            Vec3::new(m.entry(0, 0), m.entry(0, 1), m.entry(0, 2)),
            Vec3::new(m.entry(1, 0), m.entry(1, 1), m.entry(1, 2)),
            Vec3::new(m.entry(2, 0), m.entry(2, 1), m.entry(2, 2)),
        ];
        let mut scale = Vec3::new(rows[0].length(), rows[1].length(), rows[2].length());
        if m.det3x3() < 0.0 {
            scale.set_x(-scale.x());
            rows[0] = -rows[0];
        }
        let mut rot = Mat4::IDENTITY;
        for (r, row) in rows.iter().enumerate() {
            // A zero-scale axis carries no rotation information; fall
            // back to the coordinate axis.
            let unit = if row.sqlength() == 0.0 {
                let mut axis = Vec3::ZERO;
                axis[r] = 1.0;
                axis
            } else {
                row.normal()
            };
            rot.set_row(r, [unit.x(), unit.y(), unit.z(), 0.0]);
        }
        Transform {
            scale,
            rotation: Quaternion::from_matrix(&rot),
            translation,
        }
    }

    /// Interpolates between the identity and `self` by `weight`: the
    /// scale and translation linearly, the rotation spherically.
    pub fn weighted(&self, weight: f64) -> Transform {
        Transform {
            scale: Vec3::ONE.blend(&self.scale, weight),
            rotation: Quaternion::IDENTITY.slerp(&self.rotation, weight),
            translation: self.translation * weight,
        }
    }
}

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

impl Display for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scale {} rotate {} translate {}",
            self.scale, self.rotation, self.translation
        )
    }
}

impl From<Transform> for Mat4 {
    fn from(t: Transform) -> Mat4 { t.as_matrix() }
}

impl From<&Mat4> for Transform {
    fn from(m: &Mat4) -> Transform { Transform::from_matrix(m) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::radians;
    use approx::assert_abs_diff_eq;

    fn sample() -> Transform {
        Transform::new(
            Vec3::new(2.0, 0.5, 3.0),
            Quaternion::from_axis_angle(&Vec3::new(1.0, 2.0, 0.5), radians!(0.8)),
            Vec3::new(-4.0, 10.0, 0.25),
        )
    }

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.as_matrix(), Mat4::IDENTITY);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn decompose_recompose_round_trip() {
        let t = sample();
        let m = t.as_matrix();
        let d = Transform::from_matrix(&m);
        assert!(d.scale().is_equivalent(&t.scale(), 1.0e-9));
        assert!(d.translation().is_equivalent(&t.translation(), 1.0e-12));
        assert!(d.as_matrix().is_equivalent(&m, 1.0e-9));
    }

    #[test]
    fn mirroring_matrix_negates_x_scale() {
        let t = Transform::new(
            Vec3::new(-2.0, 1.0, 1.0),
            Quaternion::IDENTITY,
            Vec3::ZERO,
        );
        let d = Transform::from_matrix(&t.as_matrix());
        assert!(d.scale().x() < 0.0);
        assert!(d.as_matrix().is_equivalent(&t.as_matrix(), 1.0e-9));
    }

    #[test]
    fn order_is_scale_rotate_translate() {
        // Row vectors hit the scale first: the point (1, 0, 0) under
        // scale 2 then a +90 degree z rotation must land on (0, 2, 0)
        // before translating.
        let t = Transform::new(
            Vec3::splat(2.0),
            Quaternion::from_axis_angle(&Vec3::Z_AXIS, radians!(std::f64::consts::FRAC_PI_2)),
            Vec3::new(0.0, 0.0, 5.0),
        );
        let p = crate::Point::new(1.0, 0.0, 0.0) * t.as_matrix();
        assert!(p.is_equivalent(&crate::Point::new(0.0, 2.0, 5.0), 1.0e-12));
    }

    #[test]
    fn euler_accessors() {
        let mut t = Transform::IDENTITY;
        let e = EulerRotation::new(0.2, -0.3, 0.9, RotateOrder::ZXY);
        t.set_rotation_euler(&e);
        let back = t.rotation_euler(RotateOrder::ZXY);
        assert!(back.is_equivalent(&e, 1.0e-9));
    }

    #[test]
    fn weighted_midpoint() {
        let t = sample();
        let half = t.weighted(0.5);
        assert!(half.translation().is_equivalent(&(t.translation() * 0.5), 1.0e-12));
        assert_abs_diff_eq!(half.scale().x(), 1.5, epsilon = 1.0e-12);
        let (_, full) = t.rotation().axis_angle();
        let (_, mid) = half.rotation().axis_angle();
        assert_abs_diff_eq!(mid.value(), full.value() / 2.0, epsilon = 1.0e-9);
    }
}
