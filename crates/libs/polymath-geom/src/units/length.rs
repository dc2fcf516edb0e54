//! Length with a compile-time unit.

use super::{impl_unit_arith, impl_unit_serialization};
use core::fmt::{Debug, Display};

/// Metre unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UMetre;

/// Centimetre unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UCentimetre;

/// Millimetre unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UMillimetre;

/// Inch unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UInch;

/// Foot unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UFoot;

/// Unit trait for length units.
pub trait LengthUnit: Debug + Copy + Clone {
    /// The name of the unit.
    const NAME: &'static str;

    /// The symbols of the unit.
    const SYMBOLS: &'static [&'static str];

    /// The conversion factor to metres.
    const FACTOR_TO_METRE: f64;
}

impl LengthUnit for UMetre {
    const NAME: &'static str = "metre";
    const SYMBOLS: &'static [&'static str] = &["m"];
    const FACTOR_TO_METRE: f64 = 1.0;
}

impl LengthUnit for UCentimetre {
    const NAME: &'static str = "centimetre";
    const SYMBOLS: &'static [&'static str] = &["cm"];
    const FACTOR_TO_METRE: f64 = 0.01;
}

impl LengthUnit for UMillimetre {
    const NAME: &'static str = "millimetre";
    const SYMBOLS: &'static [&'static str] = &["mm"];
    const FACTOR_TO_METRE: f64 = 0.001;
}

impl LengthUnit for UInch {
    const NAME: &'static str = "inch";
    const SYMBOLS: &'static [&'static str] = &["in"];
    const FACTOR_TO_METRE: f64 = 0.0254;
}

impl LengthUnit for UFoot {
    const NAME: &'static str = "foot";
    const SYMBOLS: &'static [&'static str] = &["ft"];
    const FACTOR_TO_METRE: f64 = 0.3048;
}

/// Length with unit.
#[derive(Copy, Clone)]
pub struct Length<A: LengthUnit> {
    pub(crate) value: f64,
    pub(crate) unit: core::marker::PhantomData<A>,
}

impl<A: LengthUnit> Debug for Length<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Length {{ value: {}, unit: {} }}", self.value, A::SYMBOLS[0])
    }
}

impl<A: LengthUnit> Display for Length<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, A::SYMBOLS[0])
    }
}

impl<A: LengthUnit> Length<A> {
    /// Zero length.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new length with unit.
    pub const fn new(value: f64) -> Self {
        Length { value, unit: core::marker::PhantomData }
    }

    /// The value of the length.
    pub const fn value(&self) -> f64 { self.value }

    /// Converts into another length unit.
    pub fn converted<B: LengthUnit>(&self) -> Length<B> {
        Length::new(self.value * A::FACTOR_TO_METRE / B::FACTOR_TO_METRE)
    }

    /// Converts to metres.
    pub fn in_metres(&self) -> Length<UMetre> { self.converted() }

    /// Returns the absolute value of the length.
    pub fn abs(self) -> Self { Self::new(self.value.abs()) }
}

impl<'a, A: LengthUnit> TryFrom<&'a str> for Length<A> {
    type Error = &'static str;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        let (value, unit) = super::split_value_and_unit(s)?;
        let to_metre = match unit {
            "m" => UMetre::FACTOR_TO_METRE,
            "cm" => UCentimetre::FACTOR_TO_METRE,
            "mm" => UMillimetre::FACTOR_TO_METRE,
            "in" => UInch::FACTOR_TO_METRE,
            "ft" => UFoot::FACTOR_TO_METRE,
            _ => return Err("invalid length unit"),
        };
        Ok(Self::new(value * to_metre / A::FACTOR_TO_METRE))
    }
}

impl_unit_serialization!(Length, LengthUnit);
impl_unit_arith!(Length, LengthUnit, FACTOR_TO_METRE);

/// Type alias for `Length<UMetre>`.
pub type Metres = Length<UMetre>;

/// Type alias for `Length<UCentimetre>`.
pub type Centimetres = Length<UCentimetre>;

/// Type alias for `Length<UMillimetre>`.
pub type Millimetres = Length<UMillimetre>;
