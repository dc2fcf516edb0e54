//! # polymath-array
//!
//! Generic N-dimensional numeric containers for polymath: the [`Array`]
//! core plus its 1-D ([`VecN`]) and 2-D ([`MatN`]) specializations.
//!
//! All storage is a flat, row-major (last-axis-fastest) `f64` buffer owned
//! by the container; `Clone` is always a deep copy. Shapes are fixed at
//! construction and only change through the explicit resize/trim
//! operations, which produce new values.
//!
//! Binary `std::ops` operators between two containers require
//! broadcast-compatible shapes (identical shapes, or one scalar operand)
//! and panic otherwise, mirroring how mainstream array libraries treat
//! shape mismatch as a programming error. Every panicking operator has a
//! `try_*` counterpart returning [`Error`] for callers that need to
//! recover.

pub mod error;

mod array;
mod matrix;
mod vector;

pub use array::*;
pub use error::Error;
pub use matrix::*;
pub use vector::*;

/// Default absolute tolerance for the `is_equivalent` family of
/// comparisons and for singularity checks.
pub const TOLERANCE: f64 = 1.0e-10;

/// Relative equality test of two double precision floating point numbers.
pub fn ulp_eq(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    let a_abs = a.abs();
    let b_abs = b.abs();
    if a == b {
        true
    } else if a == 0.0 || b == 0.0 || a_abs < f64::MIN_POSITIVE || b_abs < f64::MIN_POSITIVE {
        diff < (f64::MIN_POSITIVE * f64::EPSILON)
    } else {
        (diff / f64::min(a_abs + b_abs, f64::MAX)) < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::ulp_eq;

    #[test]
    fn test_ulp_eq() {
        assert!(ulp_eq(0.0, 0.0));
        assert!(ulp_eq(1.0, 1.0 + f64::EPSILON * 0.5));
        assert!(!ulp_eq(1.0, 1.0 + 1.0e-9));
        assert!(!ulp_eq(1.0, 1.0 - 1.0e-9));
    }
}
