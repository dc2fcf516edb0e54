//! The 1-D array specialization.

use crate::{array::Array, error::Error, matrix::MatN, TOLERANCE};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A vector of arbitrary fixed size: an [`Array`] constrained to one
/// dimension.
///
/// `VecN` adds the vector geometry operations (dot, cross, length, angle)
/// on top of the generic elementwise arithmetic it shares with [`Array`].
/// It carries no state beyond its components.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct VecN(pub(crate) Array);

impl VecN {
    /// Creates a vector of the given size with every component set to
    /// `value`.
    pub fn splat(value: f64, size: usize) -> Self { VecN(Array::splat(value, &[size])) }

    /// Creates a zero vector of the given size.
    pub fn zeros(size: usize) -> Self { Self::splat(0.0, size) }

    /// Creates a vector of the requested size from another vector's
    /// components, padding with `fill` or truncating (fill/trim policy).
    pub fn resized_from(other: &VecN, size: usize, fill: f64) -> Self {
        VecN(Array::resized_from(&other.0, &[size], fill))
    }

    /// Returns a copy with `tail` appended.
    pub fn stacked(&self, tail: &[f64]) -> VecN {
        let mut data = self.0.as_slice().to_vec();
        data.extend_from_slice(tail);
        VecN(Array::from(data))
    }

    /// Number of components.
    pub fn size(&self) -> usize { self.0.size() }

    /// The components as a slice.
    pub fn as_slice(&self) -> &[f64] { self.0.as_slice() }

    /// The components as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f64] { self.0.as_mut_slice() }

    /// The backing generic array.
    pub fn as_array(&self) -> &Array { &self.0 }

    /// Consumes the vector, returning the backing array.
    pub fn into_array(self) -> Array { self.0 }

    /// Iterates over the components.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.0.iter() }

    /// Gets component `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<f64, Error> { self.0.get(index) }

    /// Sets component `index`; negative indices count from the end.
    pub fn set(&mut self, index: isize, value: f64) -> Result<(), Error> {
        self.0.set(index, value)
    }

    /// Dot product. The sizes must match.
    pub fn dot(&self, other: &VecN) -> Result<f64, Error> {
        if self.size() != other.size() {
            return Err(Error::incompatible("dot", self.0.shape(), other.0.shape()));
        }
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Cross product, defined for two vectors of size 3 only.
    pub fn cross(&self, other: &VecN) -> Result<VecN, Error> {
        if self.size() != 3 || other.size() != 3 {
            return Err(Error::incompatible("cross", self.0.shape(), other.0.shape()));
        }
        let (a, b) = (self.as_slice(), other.as_slice());
        Ok(VecN::from(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Euclidean length.
    ///
    /// The optional `axis` argument exists for symmetry with batched
    /// arrays; any axis other than 0 is an error on a plain vector.
    pub fn length_along(&self, axis: usize) -> Result<f64, Error> {
        if axis != 0 {
            return Err(Error::IndexOutOfBounds {
                index: axis as isize,
                size: 1,
            });
        }
        Ok(self.0.length())
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 { self.0.length() }

    /// Squared Euclidean length.
    pub fn sqlength(&self) -> f64 { self.iter().map(|x| x * x).sum() }

    /// Returns a normalized copy. A zero-length vector is returned
    /// unchanged.
    pub fn normal(&self) -> VecN {
        let n = self.length();
        if n == 0.0 {
            self.clone()
        } else {
            VecN(self.0.map(|x| x / n))
        }
    }

    /// Normalizes in place.
    pub fn normalize(&mut self) { *self = self.normal(); }

    /// Distance to another vector of the same size.
    pub fn dist(&self, other: &VecN) -> Result<f64, Error> {
        let diff = self.0.try_sub(&other.0)?;
        Ok(diff.length())
    }

    /// Unsigned angle in radians between the two vectors.
    ///
    /// The cosine is clamped to `[-1, 1]` before the arccosine to tolerate
    /// floating point overshoot.
    pub fn angle(&self, other: &VecN) -> Result<f64, Error> {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return Ok(0.0);
        }
        Ok((self.dot(other)? / denom).clamp(-1.0, 1.0).acos())
    }

    /// Rotation axis from `self` to `other`, i.e. `self × other`,
    /// optionally normalized.
    pub fn axis(&self, other: &VecN, normalize: bool) -> Result<VecN, Error> {
        let c = self.cross(other)?;
        Ok(if normalize { c.normal() } else { c })
    }

    /// Cotangent of the angle between the two vectors:
    /// `dot(u, v) / |u × v|`.
    pub fn cotan(&self, other: &VecN) -> Result<f64, Error> {
        Ok(self.dot(other)? / self.cross(other)?.length())
    }

    /// True when the vectors are parallel within `tol`, judged on the
    /// squared length of their cross product relative to their lengths.
    pub fn is_parallel(&self, other: &VecN, tol: f64) -> Result<bool, Error> {
        Ok(self.cross(other)?.sqlength() <= tol * self.sqlength() * other.sqlength())
    }

    /// Linear interpolation towards `other` by `weight` (0 gives `self`,
    /// 1 gives `other`).
    pub fn blend(&self, other: &VecN, weight: f64) -> Result<VecN, Error> {
        if self.size() != other.size() {
            return Err(Error::incompatible("blend", self.0.shape(), other.0.shape()));
        }
        Ok(VecN::from(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a + (b - a) * weight)
                .collect::<Vec<_>>(),
        ))
    }

    /// Row-vector by matrix product; requires `self.size() == m.rows()`.
    pub fn try_mul_matrix(&self, m: &MatN) -> Result<VecN, Error> {
        if self.size() != m.rows() {
            return Err(Error::incompatible("*", self.0.shape(), m.shape()));
        }
        let mut out = vec![0.0; m.cols()];
        for (i, x) in self.iter().enumerate() {
            for (j, o) in out.iter_mut().enumerate() {
                *o += x * m.get(i, j);
            }
        }
        Ok(VecN::from(out))
    }

    /// Rounds every component to `digits` decimal digits.
    pub fn round_to(&self, digits: u32) -> VecN { VecN(self.0.round_to(digits)) }

    /// Componentwise comparison within `tol`.
    pub fn is_equivalent(&self, other: &VecN, tol: f64) -> bool {
        self.0.is_equivalent(&other.0, tol)
    }
}

impl Debug for VecN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "VecN({:?})", self.0.as_slice())
    }
}

impl Display for VecN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Display::fmt(&self.0, f) }
}

impl From<Vec<f64>> for VecN {
    fn from(data: Vec<f64>) -> Self { VecN(Array::from(data)) }
}

impl From<&[f64]> for VecN {
    fn from(data: &[f64]) -> Self { VecN(Array::from(data)) }
}

impl TryFrom<Array> for VecN {
    type Error = Error;

    /// A 1-D array converts directly; anything else is a shape error.
    fn try_from(a: Array) -> Result<Self, Error> {
        if a.ndim() != 1 {
            return Err(Error::incompatible("as vector", a.shape(), &[]));
        }
        Ok(VecN(a))
    }
}

macro_rules! impl_vecn_ops {
    ($($trait:ident, $op:ident;)*) => {
        $(
            impl $trait for &VecN {
                type Output = VecN;

                fn $op(self, rhs: &VecN) -> VecN { VecN((&self.0).$op(&rhs.0)) }
            }

            impl $trait for VecN {
                type Output = VecN;

                fn $op(self, rhs: VecN) -> VecN { (&self).$op(&rhs) }
            }

            impl $trait<f64> for &VecN {
                type Output = VecN;

                fn $op(self, rhs: f64) -> VecN { VecN((&self.0).$op(rhs)) }
            }

            impl $trait<f64> for VecN {
                type Output = VecN;

                fn $op(self, rhs: f64) -> VecN { (&self).$op(rhs) }
            }
        )*
    };
}

impl_vecn_ops! {
    Add, add;
    Sub, sub;
    Div, div;
}

/// `*` between two vectors is the dot product, panicking on size mismatch
/// the way the elementwise operators do; use [`VecN::dot`] to recover.
impl Mul for &VecN {
    type Output = f64;

    fn mul(self, rhs: &VecN) -> f64 { self.dot(rhs).unwrap_or_else(|e| panic!("{e}")) }
}

impl Mul for VecN {
    type Output = f64;

    fn mul(self, rhs: VecN) -> f64 { (&self).mul(&rhs) }
}

impl Mul<f64> for &VecN {
    type Output = VecN;

    fn mul(self, rhs: f64) -> VecN { VecN(&self.0 * rhs) }
}

impl Mul<f64> for VecN {
    type Output = VecN;

    fn mul(self, rhs: f64) -> VecN { (&self).mul(rhs) }
}

/// Row-vector by matrix product.
impl Mul<&MatN> for &VecN {
    type Output = VecN;

    fn mul(self, rhs: &MatN) -> VecN {
        self.try_mul_matrix(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Mul<MatN> for VecN {
    type Output = VecN;

    fn mul(self, rhs: MatN) -> VecN { (&self).mul(&rhs) }
}

macro_rules! impl_vecn_ops_assign {
    ($($trait:ident, $op:ident, $base:ident;)*) => {
        $(
            impl $trait<&VecN> for VecN {
                fn $op(&mut self, rhs: &VecN) { self.0.$op(&rhs.0); }
            }

            impl $trait for VecN {
                fn $op(&mut self, rhs: VecN) { self.$op(&rhs); }
            }

            impl $trait<f64> for VecN {
                fn $op(&mut self, rhs: f64) { self.0.$op(rhs); }
            }
        )*
    };
}

impl_vecn_ops_assign! {
    AddAssign, add_assign, add;
    SubAssign, sub_assign, sub;
    MulAssign, mul_assign, mul;
    DivAssign, div_assign, div;
}

impl Neg for &VecN {
    type Output = VecN;

    fn neg(self) -> VecN { VecN(-&self.0) }
}

impl Neg for VecN {
    type Output = VecN;

    fn neg(self) -> VecN { VecN(-self.0) }
}

impl approx::AbsDiffEq for VecN {
    type Epsilon = f64;

    fn default_epsilon() -> f64 { TOLERANCE }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.is_equivalent(other, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(data: &[f64]) -> VecN { VecN::from(data) }

    #[test]
    fn dot_and_cross() {
        let u = v(&[1.0, 2.0, 3.0]);
        let w = v(&[0.0, 1.0, 0.0]);
        assert_eq!(u.dot(&w).unwrap(), 2.0);
        assert_eq!(u.cross(&w).unwrap().as_slice(), &[-3.0, 0.0, 1.0]);
        assert_eq!(&u * &w, 2.0);

        assert!(v(&[1.0, 2.0]).cross(&w).is_err());
    }

    #[test]
    fn cross_antisymmetry() {
        let u = v(&[1.0, 2.0, 3.0]);
        let w = v(&[-2.0, 0.5, 4.0]);
        let uw = u.cross(&w).unwrap();
        assert!(uw.is_equivalent(&-w.cross(&u).unwrap(), 1.0e-12));
        assert!(u.dot(&uw).unwrap().abs() < 1.0e-12);
    }

    #[test]
    fn length_and_normal() {
        let u = v(&[3.0, 4.0]);
        assert_eq!(u.length(), 5.0);
        assert_eq!(u.length_along(0).unwrap(), 5.0);
        assert!(u.length_along(1).is_err());
        assert!(u.normal().is_equivalent(&v(&[0.6, 0.8]), 1.0e-12));
        assert_eq!(u.sqlength(), 25.0);
    }

    #[test]
    fn angle_is_clamped() {
        let u = v(&[1.0, 0.0, 0.0]);
        // Parallel vectors can push the cosine just above 1.0.
        assert_eq!(u.angle(&v(&[1.0, 0.0, 0.0])).unwrap(), 0.0);
        let a = u.angle(&v(&[0.0, 1.0, 0.0])).unwrap();
        assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1.0e-12);
    }

    #[test]
    fn axis_and_cotan() {
        let u = v(&[1.0, 0.0, 0.0]);
        let w = v(&[1.0, 1.0, 0.0]);
        let n = u.axis(&w, true).unwrap();
        assert!(n.is_equivalent(&v(&[0.0, 0.0, 1.0]), 1.0e-12));
        // 45 degree angle: cotangent 1.
        assert!((u.cotan(&w).unwrap() - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn parallel() {
        let u = v(&[1.0, 2.0, 3.0]);
        assert!(u.is_parallel(&(&u * -4.0), 1.0e-10).unwrap());
        assert!(!u.is_parallel(&v(&[1.0, 0.0, 0.0]), 1.0e-10).unwrap());
    }

    #[test]
    fn blending() {
        let u = v(&[0.0, 10.0]);
        let w = v(&[10.0, 20.0]);
        assert!(u
            .blend(&w, 0.5)
            .unwrap()
            .is_equivalent(&v(&[5.0, 15.0]), 1.0e-12));
    }

    #[test]
    fn vector_matrix_product() {
        let m = MatN::identity(3);
        let u = v(&[1.0, 2.0, 3.0]);
        assert_eq!((&u * &m).as_slice(), u.as_slice());

        let m = MatN::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(u.try_mul_matrix(&m).unwrap().as_slice(), &[2.0, 1.0]);
        assert!(v(&[1.0, 2.0]).try_mul_matrix(&m).is_err());
    }

    #[test]
    fn fill_trim_and_stack() {
        let u = v(&[1.0, 2.0]);
        assert_eq!(VecN::resized_from(&u, 4, 0.0).as_slice(), &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(u.stacked(&[7.0]).as_slice(), &[1.0, 2.0, 7.0]);
    }
}
