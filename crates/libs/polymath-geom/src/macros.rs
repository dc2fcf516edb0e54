//! Macro generating the shared component surface of the fixed-shape types.

/// Expands, for a tuple struct wrapping `[f64; SIZE]`, the associated
/// shape constants, the named component accessors listed in `cnames`,
/// the flat-sequence conversions, indexing, `round_to`, `is_equivalent`
/// and the `approx` comparison impl.
///
/// `TryFrom<&[f64]>` pads missing trailing components from the type's
/// `Default` value and refuses longer input with a data-loss error.
macro_rules! impl_components {
    ($t:ident, size: $size:literal, shape: [$($dim:literal),+],
     cnames: { $($name:ident: $idx:literal),+ $(,)? }) => {
        impl $t {
            /// Row-major dimensions, fixed at compile time.
            pub const SHAPE: &'static [usize] = &[$($dim),+];
            /// Number of dimensions.
            pub const NDIM: usize = Self::SHAPE.len();
            /// Total number of components.
            pub const SIZE: usize = $size;
            /// Component names, in storage order.
            pub const CNAMES: &'static [&'static str] = &[$(stringify!($name)),+];

            /// The components as a flat array, in storage order.
            pub const fn get(&self) -> [f64; $size] { self.0 }

            /// The components as a flat slice.
            pub const fn as_slice(&self) -> &[f64] { &self.0 }

            /// The components as a mutable flat slice.
            pub fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.0 }

            $(
                #[doc = concat!("Component `", stringify!($name), "`.")]
                pub const fn $name(&self) -> f64 { self.0[$idx] }
            )+

            paste::paste! {
                $(
                    #[doc = concat!("Sets component `", stringify!($name), "`.")]
                    pub fn [<set_ $name>](&mut self, value: f64) { self.0[$idx] = value; }
                )+
            }

            /// Rounds every component to `digits` decimal digits.
            pub fn round_to(&self, digits: u32) -> Self {
                let factor = 10f64.powi(digits as i32);
                let mut out = *self;
                for c in out.0.iter_mut() {
                    *c = (*c * factor).round() / factor;
                }
                out
            }

            /// Componentwise comparison within `tol`.
            pub fn is_equivalent(&self, other: &Self, tol: f64) -> bool {
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .all(|(a, b)| (a - b).abs() <= tol)
            }
        }

        static_assertions::const_assert_eq!($t::SIZE, 1 $(* $dim)+);

        impl From<[f64; $size]> for $t {
            fn from(components: [f64; $size]) -> Self { $t(components) }
        }

        impl TryFrom<&[f64]> for $t {
            type Error = $crate::Error;

            fn try_from(s: &[f64]) -> Result<Self, $crate::Error> {
                if s.len() > $size {
                    return Err($crate::Error::DataLoss {
                        target: stringify!($t),
                        size: $size,
                        provided: s.len(),
                    });
                }
                let mut out = Self::default();
                out.0[..s.len()].copy_from_slice(s);
                Ok(out)
            }
        }

        impl core::ops::Index<usize> for $t {
            type Output = f64;

            fn index(&self, i: usize) -> &f64 { &self.0[i] }
        }

        impl core::ops::IndexMut<usize> for $t {
            fn index_mut(&mut self, i: usize) -> &mut f64 { &mut self.0[i] }
        }

        impl approx::AbsDiffEq for $t {
            type Epsilon = f64;

            fn default_epsilon() -> f64 { $crate::TOLERANCE }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.is_equivalent(other, epsilon)
            }
        }
    };
}

/// Componentwise scalar `Mul`/`Div` (both orders for `Mul`), `Neg`, and
/// the matching assign operators for a fixed-shape tuple struct.
macro_rules! impl_scalar_ops {
    ($t:ident) => {
        impl core::ops::Mul<f64> for $t {
            type Output = $t;

            fn mul(self, rhs: f64) -> $t {
                let mut out = self;
                for c in out.0.iter_mut() {
                    *c *= rhs;
                }
                out
            }
        }

        impl core::ops::Mul<$t> for f64 {
            type Output = $t;

            fn mul(self, rhs: $t) -> $t { rhs * self }
        }

        impl core::ops::Div<f64> for $t {
            type Output = $t;

            fn div(self, rhs: f64) -> $t {
                let mut out = self;
                for c in out.0.iter_mut() {
                    *c /= rhs;
                }
                out
            }
        }

        impl core::ops::MulAssign<f64> for $t {
            fn mul_assign(&mut self, rhs: f64) { *self = *self * rhs; }
        }

        impl core::ops::DivAssign<f64> for $t {
            fn div_assign(&mut self, rhs: f64) { *self = *self / rhs; }
        }

        impl core::ops::Neg for $t {
            type Output = $t;

            fn neg(self) -> $t { self * -1.0 }
        }
    };
}

pub(crate) use impl_components;
pub(crate) use impl_scalar_ops;
