//! Duration with a compile-time unit.

use super::{impl_unit_arith, impl_unit_serialization};
use core::fmt::{Debug, Display};

/// Second unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct USecond;

/// Millisecond unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UMillisecond;

/// Minute unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UMinute;

/// Unit trait for time units.
pub trait TimeUnit: Debug + Copy + Clone {
    /// The name of the unit.
    const NAME: &'static str;

    /// The symbols of the unit.
    const SYMBOLS: &'static [&'static str];

    /// The conversion factor to seconds.
    const FACTOR_TO_SEC: f64;
}

impl TimeUnit for USecond {
    const NAME: &'static str = "second";
    const SYMBOLS: &'static [&'static str] = &["s", "sec"];
    const FACTOR_TO_SEC: f64 = 1.0;
}

impl TimeUnit for UMillisecond {
    const NAME: &'static str = "millisecond";
    const SYMBOLS: &'static [&'static str] = &["ms"];
    const FACTOR_TO_SEC: f64 = 0.001;
}

impl TimeUnit for UMinute {
    const NAME: &'static str = "minute";
    const SYMBOLS: &'static [&'static str] = &["min"];
    const FACTOR_TO_SEC: f64 = 60.0;
}

/// Duration with unit.
#[derive(Copy, Clone)]
pub struct Time<A: TimeUnit> {
    pub(crate) value: f64,
    pub(crate) unit: core::marker::PhantomData<A>,
}

impl<A: TimeUnit> Debug for Time<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time {{ value: {}, unit: {} }}", self.value, A::SYMBOLS[0])
    }
}

impl<A: TimeUnit> Display for Time<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, A::SYMBOLS[0])
    }
}

impl<A: TimeUnit> Time<A> {
    /// Zero duration.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new duration with unit.
    pub const fn new(value: f64) -> Self {
        Time { value, unit: core::marker::PhantomData }
    }

    /// The value of the duration.
    pub const fn value(&self) -> f64 { self.value }

    /// Converts into another time unit.
    pub fn converted<B: TimeUnit>(&self) -> Time<B> {
        Time::new(self.value * A::FACTOR_TO_SEC / B::FACTOR_TO_SEC)
    }

    /// Converts to seconds.
    pub fn in_seconds(&self) -> Time<USecond> { self.converted() }
}

impl<'a, A: TimeUnit> TryFrom<&'a str> for Time<A> {
    type Error = &'static str;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        let (value, unit) = super::split_value_and_unit(s)?;
        let to_sec = match unit {
            "s" | "sec" => USecond::FACTOR_TO_SEC,
            "ms" => UMillisecond::FACTOR_TO_SEC,
            "min" => UMinute::FACTOR_TO_SEC,
            _ => return Err("invalid time unit"),
        };
        Ok(Self::new(value * to_sec / A::FACTOR_TO_SEC))
    }
}

impl_unit_serialization!(Time, TimeUnit);
impl_unit_arith!(Time, TimeUnit, FACTOR_TO_SEC);

/// Type alias for `Time<USecond>`.
pub type Seconds = Time<USecond>;

/// Type alias for `Time<UMillisecond>`.
pub type Milliseconds = Time<UMillisecond>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ulp_eq;

    #[test]
    fn conversion_and_comparison() {
        let t = Seconds::new(1.5);
        assert!(ulp_eq(t.converted::<UMillisecond>().value(), 1500.0));
        assert_eq!(t, Milliseconds::new(1500.0));
        assert!(Time::<UMinute>::new(1.0) > Seconds::new(59.0));
    }

    #[test]
    fn arithmetic_across_units() {
        let sum = Seconds::new(30.0) + Time::<UMinute>::new(0.5);
        assert!(ulp_eq(sum.value(), 60.0));
        assert!(ulp_eq(Time::<UMinute>::new(2.0) / Seconds::new(60.0), 2.0));
    }

    #[test]
    fn de_serialization() {
        let t = Milliseconds::new(250.0);
        let serialized = serde_yaml::to_string(&t).unwrap();
        assert_eq!(serialized, "250 ms\n");
        let back: Seconds = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(t, back);
        let m: Seconds = serde_yaml::from_str("2 min").unwrap();
        assert!(ulp_eq(m.value(), 120.0));
    }
}
