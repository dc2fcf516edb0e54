//! Unit-tagged numeric wrappers for angles, lengths and durations.
//!
//! Each quantity is a plain `f64` tagged at the type level with its
//! unit; conversions are explicit and comparisons across units go
//! through the canonical unit (radians, metres, seconds). Values
//! serialize as human-readable strings such as `"180 deg"` or
//! `"2.5 cm"` and deserialize from any symbol of the same dimension.

/// Serialization to the `"{value} {symbol}"` string form.
macro_rules! impl_unit_serialization {
    ($t:ident, $unit_trait:ident) => {
        impl<A: $unit_trait> serde::Serialize for $t<A> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&format!("{}", self))
            }
        }

        impl<'de, A: $unit_trait> serde::Deserialize<'de> for $t<A> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct UnitVisitor<T>(core::marker::PhantomData<T>);

                impl<'de, T: $unit_trait> serde::de::Visitor<'de> for UnitVisitor<T> {
                    type Value = $t<T>;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        write!(
                            formatter,
                            "a string containing a number followed by a unit symbol"
                        )
                    }

                    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        $t::<T>::try_from(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(UnitVisitor::<A>(core::marker::PhantomData))
            }
        }
    };
}

/// Cross-unit `Add`/`Sub` (+ assign forms), comparison through the
/// canonical unit, scalar `Mul`/`Div`, unit-cancelling `Div`, and
/// `Neg`. `$to_canon` names the associated conversion constant.
macro_rules! impl_unit_arith {
    ($t:ident, $unit_trait:ident, $to_canon:ident) => {
        impl<A: $unit_trait, B: $unit_trait> core::ops::Add<$t<B>> for $t<A> {
            type Output = $t<A>;

            fn add(self, rhs: $t<B>) -> $t<A> {
                $t::new(self.value + rhs.value * B::$to_canon / A::$to_canon)
            }
        }

        impl<A: $unit_trait, B: $unit_trait> core::ops::Sub<$t<B>> for $t<A> {
            type Output = $t<A>;

            fn sub(self, rhs: $t<B>) -> $t<A> {
                $t::new(self.value - rhs.value * B::$to_canon / A::$to_canon)
            }
        }

        impl<A: $unit_trait, B: $unit_trait> core::ops::AddAssign<$t<B>> for $t<A> {
            fn add_assign(&mut self, rhs: $t<B>) { *self = *self + rhs; }
        }

        impl<A: $unit_trait, B: $unit_trait> core::ops::SubAssign<$t<B>> for $t<A> {
            fn sub_assign(&mut self, rhs: $t<B>) { *self = *self - rhs; }
        }

        impl<A: $unit_trait, B: $unit_trait> PartialEq<$t<B>> for $t<A> {
            fn eq(&self, other: &$t<B>) -> bool {
                crate::ulp_eq(self.value * A::$to_canon, other.value * B::$to_canon)
            }
        }

        impl<A: $unit_trait, B: $unit_trait> PartialOrd<$t<B>> for $t<A> {
            fn partial_cmp(&self, other: &$t<B>) -> Option<core::cmp::Ordering> {
                (self.value * A::$to_canon).partial_cmp(&(other.value * B::$to_canon))
            }
        }

        impl<A: $unit_trait> core::ops::Mul<f64> for $t<A> {
            type Output = $t<A>;

            fn mul(self, rhs: f64) -> $t<A> { $t::new(self.value * rhs) }
        }

        impl<A: $unit_trait> core::ops::Mul<$t<A>> for f64 {
            type Output = $t<A>;

            fn mul(self, rhs: $t<A>) -> $t<A> { $t::new(self * rhs.value) }
        }

        impl<A: $unit_trait> core::ops::Div<f64> for $t<A> {
            type Output = $t<A>;

            fn div(self, rhs: f64) -> $t<A> { $t::new(self.value / rhs) }
        }

        impl<A: $unit_trait> core::ops::MulAssign<f64> for $t<A> {
            fn mul_assign(&mut self, rhs: f64) { self.value *= rhs; }
        }

        impl<A: $unit_trait> core::ops::DivAssign<f64> for $t<A> {
            fn div_assign(&mut self, rhs: f64) { self.value /= rhs; }
        }

        /// The ratio of two quantities of the same dimension.
        impl<A: $unit_trait, B: $unit_trait> core::ops::Div<$t<B>> for $t<A> {
            type Output = f64;

            fn div(self, rhs: $t<B>) -> f64 {
                (self.value * A::$to_canon) / (rhs.value * B::$to_canon)
            }
        }

        impl<A: $unit_trait> core::ops::Neg for $t<A> {
            type Output = $t<A>;

            fn neg(self) -> $t<A> { $t::new(-self.value) }
        }

        impl<A: $unit_trait> From<f64> for $t<A> {
            fn from(value: f64) -> Self { $t::new(value) }
        }

        impl<A: $unit_trait> core::str::FromStr for $t<A> {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> { Self::try_from(s) }
        }
    };
}

/// Forwards unary `f64` methods on the wrapped value.
macro_rules! forward_f64_methods {
    ($($name:ident, #[$doc:meta];)+) => {
        $(
            #[$doc]
            #[inline(always)]
            pub fn $name(self) -> Self {
                Self { value: self.value.$name(), unit: core::marker::PhantomData }
            }
        )+
    };
}

mod angle;
mod length;
mod time;

pub use angle::*;
pub use length::*;
pub use time::*;

pub use crate::{degrees, radians};

pub(crate) use forward_f64_methods;
pub(crate) use impl_unit_arith;
pub(crate) use impl_unit_serialization;

/// Splits `"12.5 cm"`-style input at the start of the trailing
/// alphabetic unit, scanning from the right.
fn findr_first_non_ascii_alphabetic(s: &[u8]) -> Option<usize> {
    let mut i = s.len();
    while i > 0 {
        if s[i - 1].is_ascii_alphabetic() {
            i -= 1;
        } else {
            return Some(i);
        }
    }
    None
}

/// Parses a `"{number}{symbol}"` string into the numeric value and the
/// trimmed unit symbol.
fn split_value_and_unit(s: &str) -> Result<(f64, &str), &'static str> {
    let trimmed = s.trim();
    let i = findr_first_non_ascii_alphabetic(trimmed.as_bytes()).ok_or("no unit in string")?;
    let value = trimmed[..i]
        .trim()
        .parse::<f64>()
        .map_err(|_| "invalid numeric value")?;
    Ok((value, trimmed[i..].trim()))
}
