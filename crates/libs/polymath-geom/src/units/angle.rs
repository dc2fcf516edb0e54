//! Angle with a compile-time unit.

use super::{forward_f64_methods, impl_unit_arith, impl_unit_serialization};
use core::fmt::{Debug, Display};

/// Radian unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct URadian;

/// Degree unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UDegree;

/// Unit trait for angle units.
pub trait AngleUnit: Debug + Copy + Clone {
    /// The name of the unit.
    const NAME: &'static str;

    /// The symbols of the unit.
    const SYMBOLS: &'static [&'static str];

    /// The conversion factor to radians.
    const FACTOR_TO_RAD: f64;

    /// The conversion factor from radians.
    const FACTOR_FROM_RAD: f64 = 1.0 / Self::FACTOR_TO_RAD;

    /// The conversion factor to degrees.
    const FACTOR_TO_DEG: f64 = Self::FACTOR_TO_RAD * UDegree::FACTOR_FROM_RAD_;

    /// The conversion factor from degrees.
    const FACTOR_FROM_DEG: f64 = 1.0 / Self::FACTOR_TO_DEG;
}

impl UDegree {
    // Break the cycle in the AngleUnit defaults.
    const FACTOR_FROM_RAD_: f64 = 180.0 / std::f64::consts::PI;
}

impl AngleUnit for URadian {
    const NAME: &'static str = "radian";
    const SYMBOLS: &'static [&'static str] = &["rad"];
    const FACTOR_TO_RAD: f64 = 1.0;
}

impl AngleUnit for UDegree {
    const NAME: &'static str = "degree";
    const SYMBOLS: &'static [&'static str] = &["deg", "°"];
    const FACTOR_TO_RAD: f64 = std::f64::consts::PI / 180.0;
}

/// Angle with unit.
#[derive(Copy, Clone)]
pub struct Angle<A: AngleUnit> {
    pub(crate) value: f64,
    pub(crate) unit: core::marker::PhantomData<A>,
}

impl<A: AngleUnit> Debug for Angle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Angle {{ value: {}, unit: {} }}", self.value, A::SYMBOLS[0])
    }
}

impl<A: AngleUnit> Display for Angle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, A::SYMBOLS[0])
    }
}

impl<A: AngleUnit> Angle<A> {
    /// Zero angle.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new angle with unit.
    pub const fn new(value: f64) -> Self {
        Angle { value, unit: core::marker::PhantomData }
    }

    /// The value of the angle.
    pub const fn value(&self) -> f64 { self.value }

    /// Determines whether the angle is greater than zero.
    #[inline(always)]
    pub fn is_positive(&self) -> bool { self.value > 0.0 }

    /// Returns the smaller of the two same-unit angles.
    pub fn min(&self, other: Self) -> Self { Self::new(self.value.min(other.value)) }

    /// Returns the larger of the two same-unit angles.
    pub fn max(&self, other: Self) -> Self { Self::new(self.value.max(other.value)) }

    /// Clamps the angle between two same-unit bounds.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.value.clamp(min.value, max.value))
    }

    /// Prints the angle in human readable format in degrees.
    #[inline]
    pub fn prettified(&self) -> String {
        format!("{}{}", self.value * A::FACTOR_TO_DEG, UDegree::SYMBOLS[1])
    }

    /// Converts the angle to radians.
    #[inline]
    pub fn to_radians(&self) -> Angle<URadian> { Angle::new(self.value * A::FACTOR_TO_RAD) }

    /// Converts the angle to degrees.
    #[inline]
    pub fn to_degrees(&self) -> Angle<UDegree> { Angle::new(self.value * A::FACTOR_TO_DEG) }

    forward_f64_methods!(
        abs, #[doc = "Returns the absolute value of the angle."];
        ceil, #[doc = "Returns the smallest angle greater than or equal to `self`."];
        round, #[doc = "Returns the nearest value to `self`, half-way cases away from zero."];
        trunc, #[doc = "Returns the integer part of `self`, truncated towards zero."];
        fract, #[doc = "Returns the fractional part of `self`."];
    );

    /// Computes the sine of the angle.
    pub fn sin(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).sin() }

    /// Computes the cosine of the angle.
    pub fn cos(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).cos() }

    /// Computes the tangent of the angle.
    pub fn tan(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).tan() }

    /// Computes the hyperbolic sine of the angle.
    pub fn sinh(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).sinh() }

    /// Computes the hyperbolic cosine of the angle.
    pub fn cosh(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).cosh() }

    /// Computes the hyperbolic tangent of the angle.
    pub fn tanh(&self) -> f64 { (self.value * A::FACTOR_TO_RAD).tanh() }
}

impl Angle<URadian> {
    /// PI in radians.
    pub const PI: Self = Self::new(std::f64::consts::PI);
    /// PI/2 in radians.
    pub const HALF_PI: Self = Self::new(std::f64::consts::FRAC_PI_2);
    /// 2 * PI in radians.
    pub const TWO_PI: Self = Self::new(std::f64::consts::PI * 2.0);

    /// Converts to degrees.
    pub fn in_degrees(&self) -> Angle<UDegree> {
        Angle::new(self.value * UDegree::FACTOR_FROM_RAD_)
    }
}

impl Angle<UDegree> {
    /// PI in degrees.
    pub const PI: Self = Self::new(180.0);
    /// PI/2 in degrees.
    pub const HALF_PI: Self = Self::new(90.0);
    /// 2 * PI in degrees.
    pub const TWO_PI: Self = Self::new(360.0);

    /// Converts to radians.
    pub fn in_radians(&self) -> Angle<URadian> {
        Angle::new(self.value * UDegree::FACTOR_TO_RAD)
    }
}

impl From<Angle<UDegree>> for Angle<URadian> {
    fn from(angle: Angle<UDegree>) -> Self { angle.in_radians() }
}

impl From<Angle<URadian>> for Angle<UDegree> {
    fn from(angle: Angle<URadian>) -> Self { angle.in_degrees() }
}

impl<'a, A: AngleUnit> TryFrom<&'a str> for Angle<A> {
    type Error = &'static str;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        let (value, unit) = super::split_value_and_unit(s)?;
        match unit {
            "rad" | "rads" | "radians" => Ok(Self::new(value * A::FACTOR_FROM_RAD)),
            "deg" | "degs" | "degrees" => Ok(Self::new(value * A::FACTOR_FROM_DEG)),
            _ => Err("invalid angle unit"),
        }
    }
}

impl_unit_serialization!(Angle, AngleUnit);
impl_unit_arith!(Angle, AngleUnit, FACTOR_TO_RAD);

/// Type alias for `Angle<URadian>`.
pub type Radians = Angle<URadian>;

/// Type alias for `Angle<UDegree>`.
pub type Degrees = Angle<UDegree>;

/// Helper creating a new `Angle<URadian>`.
#[macro_export]
macro_rules! radians {
    ($value:expr) => {
        $crate::units::Angle::<$crate::units::URadian>::new($value)
    };
}

/// Helper creating a new `Angle<UDegree>`.
#[macro_export]
macro_rules! degrees {
    ($value:expr) => {
        $crate::units::Angle::<$crate::units::UDegree>::new($value)
    };
}
