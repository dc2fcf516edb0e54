//! Small generic float helpers shared across the fixed-shape types.

use num_traits::Float;

/// Returns the square of the given value.
#[inline(always)]
pub fn sqr<F: Float>(x: F) -> F { x * x }

/// Linearly interpolates between `a` and `b` by `t`.
#[inline(always)]
pub fn lerp<F: Float>(a: F, b: F, t: F) -> F { a + (b - a) * t }

/// Clamps `x` into `[0, 1]`.
#[inline(always)]
pub fn clamp01<F: Float>(x: F) -> F { x.max(F::zero()).min(F::one()) }
