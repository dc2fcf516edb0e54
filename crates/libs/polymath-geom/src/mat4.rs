//! 4x4 transformation matrix.

use crate::{
    macros::{impl_components, impl_scalar_ops},
    quat::Quaternion,
    transform::Transform,
    vec3::Vec3,
    Error, MatN, TOLERANCE,
};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A row-major 4x4 matrix acting on row vectors (`v * m`), with the
/// translation in the fourth row.
///
/// The [`translate`](Mat4::translate), [`rotation`](Mat4::rotation) and
/// [`scale`](Mat4::scale) accessors and their setters go through the
/// scale-rotate-translate decomposition of [`Transform`]; for matrices
/// carrying shear the decomposition, and therefore the
/// replace-one-component round trip, is lossy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4(pub(crate) [f64; 16]);

impl_components!(Mat4, size: 16, shape: [4, 4], cnames: {
    a00: 0,  a01: 1,  a02: 2,  a03: 3,
    a10: 4,  a11: 5,  a12: 6,  a13: 7,
    a20: 8,  a21: 9,  a22: 10, a23: 11,
    a30: 12, a31: 13, a32: 14, a33: 15,
});
impl_scalar_ops!(Mat4);

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Creates a matrix from its rows.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut out = [0.0; 16];
        for (i, row) in rows.iter().enumerate() {
            out[i * 4..(i + 1) * 4].copy_from_slice(row);
        }
        Mat4(out)
    }

    /// Component at `(row, col)`.
    pub const fn entry(&self, row: usize, col: usize) -> f64 { self.0[row * 4 + col] }

    /// Sets the component at `(row, col)`.
    pub fn set_entry(&mut self, row: usize, col: usize, value: f64) {
        self.0[row * 4 + col] = value;
    }

    /// Row `i` as an array.
    pub fn row(&self, i: usize) -> [f64; 4] {
        [self.0[i * 4], self.0[i * 4 + 1], self.0[i * 4 + 2], self.0[i * 4 + 3]]
    }

    /// Replaces row `i`.
    pub fn set_row(&mut self, i: usize, row: [f64; 4]) {
        self.0[i * 4..(i + 1) * 4].copy_from_slice(&row);
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Mat4 {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[c * 4 + r] = self.0[r * 4 + c];
            }
        }
        Mat4(out)
    }

    /// Determinant of the 3x3 submatrix left after deleting `row` and
    /// `col`.
    fn minor_det(&self, row: usize, col: usize) -> f64 {
        let mut m = [0.0; 9];
        let mut k = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            for c in 0..4 {
                if c == col {
                    continue;
                }
                m[k] = self.entry(r, c);
                k += 1;
            }
        }
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// The 4x4 determinant.
    pub fn det(&self) -> f64 {
        (0..4).fold(0.0, |acc, j| {
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            acc + sign * self.entry(0, j) * self.minor_det(0, j)
        })
    }

    /// Determinant of the upper-left 3x3 submatrix.
    pub fn det3x3(&self) -> f64 {
        self.entry(0, 0) * (self.entry(1, 1) * self.entry(2, 2) - self.entry(1, 2) * self.entry(2, 1))
            - self.entry(0, 1)
                * (self.entry(1, 0) * self.entry(2, 2) - self.entry(1, 2) * self.entry(2, 0))
            + self.entry(0, 2)
                * (self.entry(1, 0) * self.entry(2, 1) - self.entry(1, 1) * self.entry(2, 0))
    }

    /// The adjoint (classical adjugate): the transposed cofactor matrix.
    pub fn adjoint(&self) -> Mat4 {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
                // Transposed placement.
                out[c * 4 + r] = sign * self.minor_det(r, c);
            }
        }
        Mat4(out)
    }

    /// The inverse matrix; a determinant of zero within tolerance is a
    /// singular-matrix error.
    pub fn inverse(&self) -> Result<Mat4, Error> {
        let det = self.det();
        if det.abs() <= TOLERANCE {
            return Err(Error::SingularMatrix { det });
        }
        Ok(self.adjoint() / det)
    }

    /// True when the determinant is zero within tolerance.
    pub fn is_singular(&self) -> bool { self.det().abs() <= TOLERANCE }

    /// Every component divided by `a33`; a zero `a33` is a
    /// degenerate-input error.
    pub fn homogenized(&self) -> Result<Mat4, Error> {
        let w = self.entry(3, 3);
        if w == 0.0 {
            return Err(Error::DegenerateInput(
                "cannot homogenize a matrix with a33 = 0".to_string(),
            ));
        }
        Ok(*self / w)
    }

    /// The upper-left 3x3 as a generic matrix.
    pub fn upper3x3(&self) -> MatN {
        let mut m = MatN::zeros(3, 3);
        for r in 0..3 {
            for c in 0..3 {
                m.set(r, c, self.entry(r, c));
            }
        }
        m
    }

    /// The translation component (fourth row).
    pub fn translate(&self) -> Vec3 {
        Vec3::new(self.entry(3, 0), self.entry(3, 1), self.entry(3, 2))
    }

    /// Replaces the translation, leaving rotation and scale untouched.
    pub fn set_translate(&mut self, t: Vec3) {
        let mut d = Transform::from_matrix(self);
        d.set_translation(t);
        *self = d.as_matrix();
    }

    /// The rotation component as a quaternion.
    pub fn rotation(&self) -> Quaternion { Transform::from_matrix(self).rotation() }

    /// Replaces the rotation, leaving translation and scale untouched.
    pub fn set_rotate(&mut self, q: Quaternion) {
        let mut d = Transform::from_matrix(self);
        d.set_rotation(q);
        *self = d.as_matrix();
    }

    /// The scale component.
    pub fn scale(&self) -> Vec3 { Transform::from_matrix(self).scale() }

    /// Replaces the scale, leaving translation and rotation untouched.
    pub fn set_scale(&mut self, s: Vec3) {
        let mut d = Transform::from_matrix(self);
        d.set_scale(s);
        *self = d.as_matrix();
    }

    /// Interpolates between the identity and `self` taken as a
    /// transformation, by `weight` in `[0, 1]`.
    pub fn weighted(&self, weight: f64) -> Mat4 {
        Transform::from_matrix(self).weighted(weight).as_matrix()
    }

    /// Blends two transformation matrices: the product of `self`
    /// weighted by `1 - weight` and `other` weighted by `weight`.
    pub fn blend(&self, other: &Mat4, weight: f64) -> Mat4 {
        self.weighted(1.0 - weight) * other.weighted(weight)
    }

    /// The generic-matrix view.
    pub fn as_matn(&self) -> MatN {
        let mut m = MatN::zeros(4, 4);
        for r in 0..4 {
            for c in 0..4 {
                m.set(r, c, self.entry(r, c));
            }
        }
        m
    }
}

impl Default for Mat4 {
    fn default() -> Self { Self::IDENTITY }
}

impl Display for Mat4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in 0..4 {
            let [a, b, c, d] = self.row(i);
            writeln!(f, "[{a}, {b}, {c}, {d}]")?;
        }
        Ok(())
    }
}

impl From<[[f64; 4]; 4]> for Mat4 {
    fn from(rows: [[f64; 4]; 4]) -> Self { Mat4::from_rows(rows) }
}

impl TryFrom<&MatN> for Mat4 {
    type Error = Error;

    /// Only an exact 4x4 converts; no fill or trim for matrices.
    fn try_from(m: &MatN) -> Result<Self, Error> {
        if m.shape() != [4, 4] {
            return Err(if m.rows() * m.cols() > 16 {
                Error::DataLoss {
                    target: "Mat4",
                    size: 16,
                    provided: m.rows() * m.cols(),
                }
            } else {
                Error::IncompatibleShapes {
                    op: "as Mat4",
                    lhs: m.shape().to_vec(),
                    rhs: vec![4, 4],
                }
            });
        }
        let mut out = [0.0; 16];
        out.copy_from_slice(m.as_slice());
        Ok(Mat4(out))
    }
}

/// Matrix product.
impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = (0..4).map(|k| self.entry(r, k) * rhs.entry(k, c)).sum();
            }
        }
        Mat4(out)
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Mat4) { *self = *self * rhs; }
}

macro_rules! impl_mat4_cw_ops {
    ($($trait:ident, $op:ident, $sym:tt;)*) => {
        $(
            impl $trait for Mat4 {
                type Output = Mat4;

                fn $op(self, rhs: Mat4) -> Mat4 {
                    let mut out = [0.0; 16];
                    for (i, o) in out.iter_mut().enumerate() {
                        *o = self.0[i] $sym rhs.0[i];
                    }
                    Mat4(out)
                }
            }
        )*
    };
}

impl_mat4_cw_ops! {
    Add, add, +;
    Sub, sub, -;
}

impl AddAssign for Mat4 {
    fn add_assign(&mut self, rhs: Mat4) { *self = *self + rhs; }
}

impl SubAssign for Mat4 {
    fn sub_assign(&mut self, rhs: Mat4) { *self = *self - rhs; }
}
