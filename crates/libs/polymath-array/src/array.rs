//! The generic N-dimensional array.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An N-dimensional numeric container with fixed shape and mutable content.
///
/// Components are stored flat in row-major (last-axis-fastest) order; the
/// invariant `size == product(shape)` holds for every constructed value.
/// Cloning is a deep copy.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Array {
    pub(crate) data: Box<[f64]>,
    pub(crate) shape: Box<[usize]>,
}

/// Validates a (shape, ndim, size) triple, filling in the omitted parts.
///
/// Returns the expanded shape or a [`Error::ShapeMismatch`] when the three
/// are mutually inconsistent.
pub fn expand_shape(
    shape: Option<&[usize]>,
    ndim: Option<usize>,
    size: Option<usize>,
) -> Result<Vec<usize>, Error> {
    match shape {
        Some(shape) => {
            let product: usize = shape.iter().product();
            if ndim.is_some_and(|n| n != shape.len()) || size.is_some_and(|s| s != product) {
                return Err(Error::ShapeMismatch {
                    shape: shape.to_vec(),
                    expected: product,
                    actual: size.unwrap_or(product),
                });
            }
            Ok(shape.to_vec())
        }
        None => match (ndim, size) {
            // A flat shape can be recovered from size alone.
            (None | Some(1), Some(size)) => Ok(vec![size]),
            _ => Err(Error::ShapeMismatch {
                shape: Vec::new(),
                expected: 0,
                actual: size.unwrap_or(0),
            }),
        },
    }
}

impl Array {
    /// Creates an array of the given shape with every component set to
    /// `value` (scalar broadcast).
    pub fn splat(value: f64, shape: &[usize]) -> Self {
        let size = shape.iter().product();
        Array {
            data: vec![value; size].into_boxed_slice(),
            shape: shape.into(),
        }
    }

    /// Creates an array of the given shape filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self { Self::splat(0.0, shape) }

    /// Creates an array from flat row-major data and an explicit shape.
    ///
    /// Fails with a shape error when `data.len() != product(shape)`.
    pub fn from_flat(data: Vec<f64>, shape: &[usize]) -> Result<Self, Error> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Array {
            data: data.into_boxed_slice(),
            shape: shape.into(),
        })
    }

    /// Creates an array from flat data and any combination of `shape`,
    /// `ndim` and `size` hints, validated against each other by
    /// [`expand_shape`].
    ///
    /// With no shape hint the data length alone fixes a flat shape.
    pub fn new(
        data: Vec<f64>,
        shape: Option<&[usize]>,
        ndim: Option<usize>,
        size: Option<usize>,
    ) -> Result<Self, Error> {
        let shape = expand_shape(shape, ndim, size.or(Some(data.len())))?;
        Self::from_flat(data, &shape)
    }

    /// Creates a 2-D array from nested rows, inferring the shape.
    ///
    /// Fails with a ragged-data error when the rows have unequal lengths.
    pub fn from_nested(rows: &[Vec<f64>]) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, |r| r.len());
        for (i, r) in rows.iter().enumerate() {
            if r.len() != cols {
                return Err(Error::RaggedNested {
                    row: i,
                    expected: cols,
                    actual: r.len(),
                });
            }
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Ok(Array {
            data: data.into_boxed_slice(),
            shape: vec![rows.len(), cols].into_boxed_slice(),
        })
    }

    /// Creates an array of the requested shape from another array's
    /// components, padding missing trailing slots with `fill` and dropping
    /// trailing data when the target is smaller.
    ///
    /// This is the generic fill/trim policy; fixed-shape wrapped types
    /// forbid the dropping half and must go through their own fallible
    /// constructors instead.
    pub fn resized_from(other: &Array, shape: &[usize], fill: f64) -> Self {
        let size = shape.iter().product();
        let mut data = vec![fill; size];
        let n = other.data.len().min(size);
        data[..n].copy_from_slice(&other.data[..n]);
        Array {
            data: data.into_boxed_slice(),
            shape: shape.into(),
        }
    }

    /// The shape of the array.
    pub fn shape(&self) -> &[usize] { &self.shape }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize { self.shape.len() }

    /// Total number of components.
    pub fn size(&self) -> usize { self.data.len() }

    /// The flat row-major components.
    pub fn as_slice(&self) -> &[f64] { &self.data }

    /// The flat row-major components, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

    /// Iterates over the flat components.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.data.iter().copied() }

    fn resolve(&self, index: isize) -> Result<usize, Error> {
        let size = self.data.len();
        let i = if index < 0 { index + size as isize } else { index };
        if i < 0 || i as usize >= size {
            Err(Error::IndexOutOfBounds { index, size })
        } else {
            Ok(i as usize)
        }
    }

    fn offset_of(&self, index: &[usize]) -> Result<usize, Error> {
        if index.len() != self.shape.len() {
            return Err(Error::incompatible("index", index, &self.shape));
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return Err(Error::IndexOutOfBounds {
                    index: i as isize,
                    size: dim,
                });
            }
            offset = offset * dim + i;
        }
        Ok(offset)
    }

    /// Gets the component at a flat index; negative indices count from the
    /// end.
    pub fn get(&self, index: isize) -> Result<f64, Error> {
        self.resolve(index).map(|i| self.data[i])
    }

    /// Sets the component at a flat index; negative indices count from the
    /// end.
    pub fn set(&mut self, index: isize, value: f64) -> Result<(), Error> {
        let i = self.resolve(index)?;
        self.data[i] = value;
        Ok(())
    }

    /// Gets the component at a per-axis index.
    pub fn get_at(&self, index: &[usize]) -> Result<f64, Error> {
        self.offset_of(index).map(|i| self.data[i])
    }

    /// Sets the component at a per-axis index.
    pub fn set_at(&mut self, index: &[usize], value: f64) -> Result<(), Error> {
        let i = self.offset_of(index)?;
        self.data[i] = value;
        Ok(())
    }

    /// Returns the subarray at `index` along the first axis, e.g. a row of
    /// a 2-D array. The result is itself an [`Array`] of shape
    /// `shape[1..]`, copied out of the backing storage.
    pub fn subarray(&self, index: isize) -> Result<Array, Error> {
        if self.shape.is_empty() {
            return Err(Error::incompatible("subarray", &[], &self.shape));
        }
        let outer = self.shape[0] as isize;
        let i = if index < 0 { index + outer } else { index };
        if i < 0 || i >= outer {
            return Err(Error::IndexOutOfBounds {
                index,
                size: outer as usize,
            });
        }
        let stride: usize = self.shape[1..].iter().product();
        let start = i as usize * stride;
        Ok(Array {
            data: self.data[start..start + stride].into(),
            shape: self.shape[1..].into(),
        })
    }

    /// Returns the slice `range` along the first axis as a new array of
    /// the sliced shape.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<Array, Error> {
        if self.shape.is_empty() || range.end > self.shape[0] || range.start > range.end {
            return Err(Error::IndexOutOfBounds {
                index: range.end as isize,
                size: self.shape.first().copied().unwrap_or(0),
            });
        }
        let stride: usize = self.shape[1..].iter().product();
        let mut shape = self.shape.to_vec();
        shape[0] = range.len();
        Ok(Array {
            data: self.data[range.start * stride..range.end * stride].into(),
            shape: shape.into_boxed_slice(),
        })
    }

    /// Returns the sub-block selected by one index range per axis as a new
    /// array of the sliced shape, e.g. rows 1..3 by columns 0..2 of a 2-D
    /// array. One range must be given for every axis; an empty range
    /// yields an empty array.
    pub fn slice_at(&self, ranges: &[std::ops::Range<usize>]) -> Result<Array, Error> {
        if ranges.len() != self.shape.len() {
            let lens: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
            return Err(Error::incompatible("slice", &lens, &self.shape));
        }
        for (r, &dim) in ranges.iter().zip(self.shape.iter()) {
            if r.end > dim || r.start > r.end {
                return Err(Error::IndexOutOfBounds {
                    index: r.end as isize,
                    size: dim,
                });
            }
        }
        let shape: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        let size: usize = shape.iter().product();
        let mut data = Vec::with_capacity(size);
        let mut index: Vec<usize> = ranges.iter().map(|r| r.start).collect();
        for _ in 0..size {
            let mut offset = 0;
            for (&i, &dim) in index.iter().zip(self.shape.iter()) {
                offset = offset * dim + i;
            }
            data.push(self.data[offset]);
            // Advance the per-axis index, last axis fastest.
            for axis in (0..index.len()).rev() {
                index[axis] += 1;
                if index[axis] < ranges[axis].end {
                    break;
                }
                index[axis] = ranges[axis].start;
            }
        }
        Ok(Array {
            data: data.into_boxed_slice(),
            shape: shape.into_boxed_slice(),
        })
    }

    /// Replaces the content with `other`'s, which must have the same size.
    /// The shape is kept.
    pub fn assign(&mut self, other: &Array) -> Result<(), Error> {
        if other.size() != self.size() {
            return Err(Error::ShapeMismatch {
                shape: self.shape.to_vec(),
                expected: self.size(),
                actual: other.size(),
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Applies `f` to every component, returning a new array of the same
    /// shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Array {
        Array {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    fn zip(&self, rhs: &Array, op: &'static str, f: impl Fn(f64, f64) -> f64) -> Result<Array, Error> {
        if self.shape != rhs.shape {
            return Err(Error::incompatible(op, &self.shape, &rhs.shape));
        }
        Ok(Array {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        })
    }

    /// Elementwise addition; the shapes must be identical.
    pub fn try_add(&self, rhs: &Array) -> Result<Array, Error> { self.zip(rhs, "+", |a, b| a + b) }

    /// Elementwise subtraction; the shapes must be identical.
    pub fn try_sub(&self, rhs: &Array) -> Result<Array, Error> { self.zip(rhs, "-", |a, b| a - b) }

    /// Elementwise multiplication; the shapes must be identical.
    pub fn try_mul(&self, rhs: &Array) -> Result<Array, Error> { self.zip(rhs, "*", |a, b| a * b) }

    /// Elementwise division; the shapes must be identical.
    pub fn try_div(&self, rhs: &Array) -> Result<Array, Error> { self.zip(rhs, "/", |a, b| a / b) }

    /// Sum of all components.
    pub fn sum(&self) -> f64 { self.data.iter().sum() }

    /// Product of all components.
    pub fn prod(&self) -> f64 { self.data.iter().product() }

    /// Smallest component, or NaN for an empty array.
    pub fn min(&self) -> f64 { self.data.iter().copied().fold(f64::NAN, f64::min) }

    /// Largest component, or NaN for an empty array.
    pub fn max(&self) -> f64 { self.data.iter().copied().fold(f64::NAN, f64::max) }

    /// Reduces along `axis` with the given fold, producing an array whose
    /// shape is the input shape with `axis` removed.
    pub fn reduce_axis(
        &self,
        axis: usize,
        init: f64,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Array, Error> {
        if axis >= self.ndim() {
            return Err(Error::IndexOutOfBounds {
                index: axis as isize,
                size: self.ndim(),
            });
        }
        let mut shape: Vec<usize> = self.shape.to_vec();
        let dim = shape.remove(axis);
        if shape.is_empty() {
            shape.push(1);
        }
        let inner: usize = self.shape[axis + 1..].iter().product();
        let outer: usize = self.shape[..axis].iter().product();
        let mut out = vec![init; outer * inner];
        for o in 0..outer {
            for d in 0..dim {
                for i in 0..inner {
                    let v = self.data[(o * dim + d) * inner + i];
                    let acc = &mut out[o * inner + i];
                    *acc = f(*acc, v);
                }
            }
        }
        Array::from_flat(out, &shape)
    }

    /// Sum along `axis`.
    pub fn sum_axis(&self, axis: usize) -> Result<Array, Error> {
        self.reduce_axis(axis, 0.0, |a, b| a + b)
    }

    /// Product along `axis`.
    pub fn prod_axis(&self, axis: usize) -> Result<Array, Error> {
        self.reduce_axis(axis, 1.0, |a, b| a * b)
    }

    /// Minimum along `axis`.
    pub fn min_axis(&self, axis: usize) -> Result<Array, Error> {
        self.reduce_axis(axis, f64::INFINITY, f64::min)
    }

    /// Maximum along `axis`.
    pub fn max_axis(&self, axis: usize) -> Result<Array, Error> {
        self.reduce_axis(axis, f64::NEG_INFINITY, f64::max)
    }

    /// Euclidean norm over all components, i.e. along the trailing axis of
    /// a 1-D array.
    pub fn length(&self) -> f64 { self.data.iter().map(|x| x * x).sum::<f64>().sqrt() }

    /// Euclidean norm reduced along `axis` for batched data.
    pub fn length_axis(&self, axis: usize) -> Result<Array, Error> {
        let squared = self.map(|x| x * x).sum_axis(axis)?;
        Ok(squared.map(f64::sqrt))
    }

    /// Rounds every component to `digits` decimal digits, returning an
    /// array of the same shape.
    pub fn round_to(&self, digits: u32) -> Array {
        let factor = 10f64.powi(digits as i32);
        self.map(|x| (x * factor).round() / factor)
    }

    /// True when both arrays have the same shape and every pair of
    /// components differs by at most `tol`.
    pub fn is_equivalent(&self, other: &Array, tol: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl Debug for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Array {{ shape: {:?}, data: {:?} }}", self.shape, self.data)
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ndim() == 2 {
            writeln!(f, "[")?;
            for r in 0..self.shape[0] {
                let cols = self.shape[1];
                write!(f, "  [")?;
                for c in 0..cols {
                    if c > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.data[r * cols + c])?;
                }
                writeln!(f, "]")?;
            }
            write!(f, "]")
        } else {
            write!(f, "[")?;
            for (i, x) in self.data.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            write!(f, "]")
        }
    }
}

impl From<&[f64]> for Array {
    fn from(data: &[f64]) -> Self {
        Array {
            data: data.into(),
            shape: vec![data.len()].into_boxed_slice(),
        }
    }
}

impl From<Vec<f64>> for Array {
    fn from(data: Vec<f64>) -> Self {
        let shape = vec![data.len()].into_boxed_slice();
        Array {
            data: data.into_boxed_slice(),
            shape,
        }
    }
}

macro_rules! impl_array_ops {
    ($($trait:ident, $op:ident, $try:ident;)*) => {
        $(
            impl $trait for &Array {
                type Output = Array;

                fn $op(self, rhs: &Array) -> Array {
                    self.$try(rhs).unwrap_or_else(|e| panic!("{e}"))
                }
            }

            impl $trait for Array {
                type Output = Array;

                fn $op(self, rhs: Array) -> Array { (&self).$op(&rhs) }
            }

            impl $trait<&Array> for Array {
                type Output = Array;

                fn $op(self, rhs: &Array) -> Array { (&self).$op(rhs) }
            }

            impl $trait<Array> for &Array {
                type Output = Array;

                fn $op(self, rhs: Array) -> Array { self.$op(&rhs) }
            }

            impl $trait<f64> for &Array {
                type Output = Array;

                fn $op(self, rhs: f64) -> Array { self.map(|x| x.$op(rhs)) }
            }

            impl $trait<f64> for Array {
                type Output = Array;

                fn $op(self, rhs: f64) -> Array { self.map(|x| x.$op(rhs)) }
            }
        )*
    };
}

impl_array_ops! {
    Add, add, try_add;
    Sub, sub, try_sub;
    Mul, mul, try_mul;
    Div, div, try_div;
}

macro_rules! impl_array_ops_assign {
    ($($trait:ident, $op:ident, $base:ident;)*) => {
        $(
            impl $trait<&Array> for Array {
                fn $op(&mut self, rhs: &Array) {
                    *self = (&*self).$base(rhs);
                }
            }

            impl $trait for Array {
                fn $op(&mut self, rhs: Array) { self.$op(&rhs); }
            }

            impl $trait<f64> for Array {
                fn $op(&mut self, rhs: f64) {
                    for x in self.data.iter_mut() {
                        x.$op(rhs);
                    }
                }
            }
        )*
    };
}

impl_array_ops_assign! {
    AddAssign, add_assign, add;
    SubAssign, sub_assign, sub;
    MulAssign, mul_assign, mul;
    DivAssign, div_assign, div;
}

impl Neg for &Array {
    type Output = Array;

    fn neg(self) -> Array { self.map(|x| -x) }
}

impl Neg for Array {
    type Output = Array;

    fn neg(self) -> Array { self.map(|x| -x) }
}

impl approx::AbsDiffEq for Array {
    type Epsilon = f64;

    fn default_epsilon() -> f64 { crate::TOLERANCE }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.is_equivalent(other, epsilon)
    }
}

impl approx::RelativeEq for Array {
    fn default_max_relative() -> f64 { f64::EPSILON }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| f64::relative_eq(a, b, epsilon, max_relative))
    }
}
