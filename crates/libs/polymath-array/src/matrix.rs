//! The 2-D array specialization.

use crate::{array::Array, error::Error, vector::VecN, TOLERANCE};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A matrix of arbitrary fixed shape: an [`Array`] constrained to two
/// dimensions.
///
/// Rows are contiguous in the row-major backing storage, so [`row`] and
/// [`row_mut`] hand out slices that are true views — writing through
/// [`row_mut`] mutates the matrix. Columns are strided and iterate by
/// copy.
///
/// [`row`]: MatN::row
/// [`row_mut`]: MatN::row_mut
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct MatN(pub(crate) Array);

impl MatN {
    /// Creates a matrix with every component set to `value`.
    pub fn splat(value: f64, rows: usize, cols: usize) -> Self {
        MatN(Array::splat(value, &[rows, cols]))
    }

    /// Creates a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self { Self::splat(0.0, rows, cols) }

    /// Creates the n-by-n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Creates a matrix from nested rows; rows of unequal length are a
    /// ragged-data error.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, Error> {
        Array::from_nested(rows).map(MatN)
    }

    /// Creates a matrix from flat row-major data.
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, Error> {
        Array::from_flat(data, &[rows, cols]).map(MatN)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize { self.0.shape()[0] }

    /// Number of columns.
    pub fn cols(&self) -> usize { self.0.shape()[1] }

    /// The shape as `[rows, cols]`.
    pub fn shape(&self) -> &[usize] { self.0.shape() }

    /// True when the matrix is square.
    pub fn is_square(&self) -> bool { self.rows() == self.cols() }

    /// The flat row-major components.
    pub fn as_slice(&self) -> &[f64] { self.0.as_slice() }

    /// The backing generic array.
    pub fn as_array(&self) -> &Array { &self.0 }

    /// Consumes the matrix, returning the backing array.
    pub fn into_array(self) -> Array { self.0 }

    /// Component at `(row, col)`.
    ///
    /// Panics when out of range; use [`Array::get_at`] through
    /// [`as_array`](MatN::as_array) for a checked access.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.as_slice()[row * self.cols() + col]
    }

    /// Sets the component at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let cols = self.cols();
        self.0.as_mut_slice()[row * cols + col] = value;
    }

    /// Row `i` as a slice view into the backing storage.
    pub fn row(&self, i: usize) -> &[f64] {
        let cols = self.cols();
        &self.0.as_slice()[i * cols..(i + 1) * cols]
    }

    /// Row `i` as a mutable slice view; writes go straight to the matrix.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let cols = self.cols();
        &mut self.0.as_mut_slice()[i * cols..(i + 1) * cols]
    }

    /// Iterates over the rows as slice views.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.0.as_slice().chunks(self.cols())
    }

    /// Column `j`, copied out of the strided storage.
    pub fn col(&self, j: usize) -> VecN {
        VecN::from((0..self.rows()).map(|i| self.get(i, j)).collect::<Vec<_>>())
    }

    /// Iterates over the columns by copy.
    pub fn cols_iter(&self) -> impl Iterator<Item = VecN> + '_ {
        (0..self.cols()).map(|j| self.col(j))
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> MatN {
        let (r, c) = (self.rows(), self.cols());
        let mut out = MatN::zeros(c, r);
        for i in 0..r {
            for j in 0..c {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    /// Matrix product; requires `self.cols() == rhs.rows()`.
    pub fn try_matmul(&self, rhs: &MatN) -> Result<MatN, Error> {
        if self.cols() != rhs.rows() {
            return Err(Error::incompatible("*", self.shape(), rhs.shape()));
        }
        let (r, k, c) = (self.rows(), self.cols(), rhs.cols());
        let mut out = MatN::zeros(r, c);
        for i in 0..r {
            for j in 0..c {
                let mut acc = 0.0;
                for t in 0..k {
                    acc += self.get(i, t) * rhs.get(t, j);
                }
                out.set(i, j, acc);
            }
        }
        Ok(out)
    }

    /// Matrix by column-vector product; requires `self.cols() == v.size()`.
    pub fn try_mul_vector(&self, v: &VecN) -> Result<VecN, Error> {
        if self.cols() != v.size() {
            return Err(Error::incompatible("*", self.shape(), &[v.size()]));
        }
        Ok(VecN::from(
            self.rows_iter()
                .map(|row| row.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
                .collect::<Vec<f64>>(),
        ))
    }

    fn require_square(&self, op: &'static str) -> Result<usize, Error> {
        if !self.is_square() {
            return Err(Error::incompatible(op, self.shape(), self.shape()));
        }
        Ok(self.rows())
    }

    /// Determinant of the submatrix left after deleting row 0 and the
    /// columns in `skip` (a bitmask), by cofactor expansion.
    fn det_rec(&self, row: usize, skip: u64, n: usize) -> f64 {
        if row == n {
            return 1.0;
        }
        let mut acc = 0.0;
        let mut sign = 1.0;
        for col in 0..n {
            if skip & (1 << col) != 0 {
                continue;
            }
            let x = self.get(row, col);
            if x != 0.0 {
                acc += sign * x * self.det_rec(row + 1, skip | (1 << col), n);
            }
            sign = -sign;
        }
        acc
    }

    /// Determinant by cofactor expansion. Fails on a non-square matrix.
    pub fn det(&self) -> Result<f64, Error> {
        let n = self.require_square("det")?;
        Ok(self.det_rec(0, 0, n))
    }

    /// True when the determinant is zero within the default tolerance.
    /// A non-square matrix has no inverse and counts as singular.
    pub fn is_singular(&self) -> bool {
        self.det().map_or(true, |d| d.abs() <= TOLERANCE)
    }

    fn minor(&self, row: usize, col: usize) -> MatN {
        let n = self.rows();
        let mut out = MatN::zeros(n - 1, n - 1);
        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let si = if i < row { i } else { i + 1 };
                let sj = if j < col { j } else { j + 1 };
                out.set(i, j, self.get(si, sj));
            }
        }
        out
    }

    /// Adjugate (classical adjoint): the transposed cofactor matrix.
    pub fn adjugate(&self) -> Result<MatN, Error> {
        let n = self.require_square("adjugate")?;
        if n == 1 {
            return Ok(MatN::identity(1));
        }
        let mut out = MatN::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                let cof = sign * self.minor(i, j).det_rec(0, 0, n - 1);
                // Transposed placement.
                out.set(j, i, cof);
            }
        }
        Ok(out)
    }

    /// Inverse via adjugate over determinant.
    ///
    /// Fails with a singular-matrix error when the determinant is zero
    /// within the default tolerance.
    pub fn inverse(&self) -> Result<MatN, Error> {
        let det = self.det()?;
        if det.abs() <= TOLERANCE {
            return Err(Error::SingularMatrix { det });
        }
        Ok(MatN(self.adjugate()?.0 / det))
    }

    /// Returns a matrix of the given shape, preserving the upper-left
    /// overlap with `self` and filling new cells with `fill`.
    pub fn trimmed(&self, rows: usize, cols: usize, fill: f64) -> MatN {
        let mut out = MatN::splat(fill, rows, cols);
        for i in 0..rows.min(self.rows()) {
            for j in 0..cols.min(self.cols()) {
                out.set(i, j, self.get(i, j));
            }
        }
        out
    }

    /// Rounds every component to `digits` decimal digits.
    pub fn round_to(&self, digits: u32) -> MatN { MatN(self.0.round_to(digits)) }

    /// Componentwise comparison within `tol`.
    pub fn is_equivalent(&self, other: &MatN, tol: f64) -> bool {
        self.0.is_equivalent(&other.0, tol)
    }
}

impl Debug for MatN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MatN {{ shape: {:?}, data: {:?} }}",
            self.0.shape(),
            self.0.as_slice()
        )
    }
}

impl Display for MatN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Display::fmt(&self.0, f) }
}

impl TryFrom<Array> for MatN {
    type Error = Error;

    /// A 2-D array converts directly; anything else is a shape error.
    fn try_from(a: Array) -> Result<Self, Error> {
        if a.ndim() != 2 {
            return Err(Error::incompatible("as matrix", a.shape(), &[]));
        }
        Ok(MatN(a))
    }
}

macro_rules! impl_matn_ops {
    ($($trait:ident, $op:ident;)*) => {
        $(
            impl $trait for &MatN {
                type Output = MatN;

                fn $op(self, rhs: &MatN) -> MatN { MatN((&self.0).$op(&rhs.0)) }
            }

            impl $trait for MatN {
                type Output = MatN;

                fn $op(self, rhs: MatN) -> MatN { (&self).$op(&rhs) }
            }

            impl $trait<f64> for &MatN {
                type Output = MatN;

                fn $op(self, rhs: f64) -> MatN { MatN((&self.0).$op(rhs)) }
            }

            impl $trait<f64> for MatN {
                type Output = MatN;

                fn $op(self, rhs: f64) -> MatN { (&self).$op(rhs) }
            }
        )*
    };
}

impl_matn_ops! {
    Add, add;
    Sub, sub;
    Div, div;
}

/// `*` between two matrices is the matrix product when the inner
/// dimensions agree, elementwise multiplication when the shapes match
/// exactly, and a panic otherwise (see [`MatN::try_matmul`] and
/// [`Array::try_mul`] for the recoverable forms).
impl Mul for &MatN {
    type Output = MatN;

    fn mul(self, rhs: &MatN) -> MatN {
        if self.cols() == rhs.rows() {
            self.try_matmul(rhs).unwrap_or_else(|e| panic!("{e}"))
        } else {
            MatN(self.0.try_mul(&rhs.0).unwrap_or_else(|e| panic!("{e}")))
        }
    }
}

impl Mul for MatN {
    type Output = MatN;

    fn mul(self, rhs: MatN) -> MatN { (&self).mul(&rhs) }
}

impl Mul<f64> for &MatN {
    type Output = MatN;

    fn mul(self, rhs: f64) -> MatN { MatN(&self.0 * rhs) }
}

impl Mul<f64> for MatN {
    type Output = MatN;

    fn mul(self, rhs: f64) -> MatN { (&self).mul(rhs) }
}

impl Mul<&VecN> for &MatN {
    type Output = VecN;

    fn mul(self, rhs: &VecN) -> VecN {
        self.try_mul_vector(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Mul<VecN> for MatN {
    type Output = VecN;

    fn mul(self, rhs: VecN) -> VecN { (&self).mul(&rhs) }
}

macro_rules! impl_matn_ops_assign {
    ($($trait:ident, $op:ident;)*) => {
        $(
            impl $trait<&MatN> for MatN {
                fn $op(&mut self, rhs: &MatN) { self.0.$op(&rhs.0); }
            }

            impl $trait for MatN {
                fn $op(&mut self, rhs: MatN) { self.$op(&rhs); }
            }

            impl $trait<f64> for MatN {
                fn $op(&mut self, rhs: f64) { self.0.$op(rhs); }
            }
        )*
    };
}

impl_matn_ops_assign! {
    AddAssign, add_assign;
    SubAssign, sub_assign;
    MulAssign, mul_assign;
    DivAssign, div_assign;
}

impl Neg for &MatN {
    type Output = MatN;

    fn neg(self) -> MatN { MatN(-&self.0) }
}

impl Neg for MatN {
    type Output = MatN;

    fn neg(self) -> MatN { MatN(-self.0) }
}

impl approx::AbsDiffEq for MatN {
    type Epsilon = f64;

    fn default_epsilon() -> f64 { TOLERANCE }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.is_equivalent(other, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_properties() {
        let id = MatN::identity(4);
        assert_eq!(id.det().unwrap(), 1.0);
        assert!(id.inverse().unwrap().is_equivalent(&id, 1.0e-12));
        assert!(!id.is_singular());
    }

    #[test]
    fn row_views_share_storage() {
        let mut m = MatN::zeros(2, 2);
        m.row_mut(1)[0] = 7.0;
        assert_eq!(m.get(1, 0), 7.0);
        assert_eq!(m.row(1), &[7.0, 0.0]);
    }

    #[test]
    fn columns() {
        let m = MatN::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.col(1).as_slice(), &[2.0, 4.0]);
        let cols: Vec<_> = m.cols_iter().collect();
        assert_eq!(cols[0].as_slice(), &[1.0, 3.0]);
    }

    #[test]
    fn transpose_round_trip() {
        let m = MatN::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn matmul_vs_elementwise() {
        let a = MatN::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = MatN::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        // Same shape and conformable: matrix product wins.
        assert_eq!((&a * &b).as_slice(), &[2.0, 1.0, 4.0, 3.0]);
        assert_eq!(a.try_matmul(&b).unwrap().as_slice(), &[2.0, 1.0, 4.0, 3.0]);
        // Elementwise is reachable through the generic array.
        assert_eq!(
            a.as_array().try_mul(b.as_array()).unwrap().as_slice(),
            &[0.0, 2.0, 3.0, 0.0]
        );
    }

    #[test]
    fn determinant_and_inverse() {
        let m = MatN::from_rows(&[
            vec![2.0, 0.0, 0.0],
            vec![0.0, 4.0, 0.0],
            vec![0.0, 0.0, 8.0],
        ])
        .unwrap();
        assert_eq!(m.det().unwrap(), 64.0);
        let inv = m.inverse().unwrap();
        assert!(m.try_matmul(&inv).unwrap().is_equivalent(&MatN::identity(3), 1.0e-12));

        let shear = MatN::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![0.0, 1.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        let det = shear.det().unwrap();
        assert_eq!(det, 1.0);
        let inv = shear.inverse().unwrap();
        assert!(shear
            .try_matmul(&inv)
            .unwrap()
            .is_equivalent(&MatN::identity(3), 1.0e-9));
    }

    #[test]
    fn singular_matrix_rejected() {
        let m = MatN::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert!(m.is_singular());
        assert!(matches!(m.inverse(), Err(Error::SingularMatrix { .. })));
        // Non-square matrices have no determinant at all.
        assert!(MatN::zeros(2, 3).det().is_err());
        assert!(MatN::zeros(2, 3).is_singular());
    }

    #[test]
    fn trim_preserves_overlap() {
        let m = MatN::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let grown = m.trimmed(3, 3, 9.0);
        assert_eq!(grown.row(0), &[1.0, 2.0, 9.0]);
        assert_eq!(grown.row(2), &[9.0, 9.0, 9.0]);
        let shrunk = m.trimmed(1, 2, 0.0);
        assert_eq!(shrunk.as_slice(), &[1.0, 2.0]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn inverse_of_invertible_is_right_inverse(
                diag in proptest::collection::vec(0.5f64..10.0, 2..5),
                off in -0.4f64..0.4,
            ) {
                let n = diag.len();
                let mut m = MatN::identity(n);
                for i in 0..n {
                    for j in 0..n {
                        m.set(i, j, if i == j { diag[i] } else { off });
                    }
                }
                // Diagonally dominant, hence invertible.
                let inv = m.inverse().unwrap();
                prop_assert!(m.try_matmul(&inv).unwrap().is_equivalent(&MatN::identity(n), 1.0e-8));
                prop_assert!(!m.is_singular());
            }
        }
    }
}
