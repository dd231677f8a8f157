//! Numeric helpers: clamping, decimal rounding and reciprocal units

use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

/// Ranges a value can be clamped to
pub trait ClampRange<T> {
    /// `value` moved into the range
    fn clamp_value(&self, value: T) -> T;
}

fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

// True for values unordered against themselves, such as NaN.
fn is_unordered<T: PartialOrd>(value: &T) -> bool {
    value.partial_cmp(value).is_none()
}

impl<T: PartialOrd + Copy> ClampRange<T> for RangeInclusive<T> {
    fn clamp_value(&self, value: T) -> T {
        if is_unordered(&value) {
            return *self.start();
        }
        max_of(min_of(value, *self.end()), *self.start())
    }
}

impl<T: PartialOrd + Copy> ClampRange<T> for RangeFrom<T> {
    fn clamp_value(&self, value: T) -> T {
        if is_unordered(&value) {
            return self.start;
        }
        max_of(value, self.start)
    }
}

impl<T: PartialOrd + Copy> ClampRange<T> for RangeToInclusive<T> {
    fn clamp_value(&self, value: T) -> T {
        if is_unordered(&value) {
            return self.end;
        }
        min_of(value, self.end)
    }
}

impl<T> ClampRange<T> for RangeFull {
    fn clamp_value(&self, value: T) -> T {
        value
    }
}

/// Clamping for any ordered copyable value
///
/// ```rust
/// use foundationkit_common::numeric::Clamp;
///
/// assert_eq!((-45_i32).clamped(100..), 100);
/// assert_eq!(3.45_f64.clamped(..=2.0), 2.0);
/// assert_eq!(7_u8.clamped(1..=10), 7);
/// ```
pub trait Clamp: PartialOrd + Copy {
    /// The value moved into `range`
    ///
    /// A reversed closed range returns its lower bound. NaN becomes the
    /// lower bound, or the upper bound of `..=b`; `..` passes it through.
    #[must_use]
    fn clamped<R: ClampRange<Self>>(self, range: R) -> Self {
        range.clamp_value(self)
    }

    /// Clamp in place
    fn clamp_to<R: ClampRange<Self>>(&mut self, range: R) {
        *self = (*self).clamped(range);
    }
}

impl<T: PartialOrd + Copy> Clamp for T {}

/// Decimal rounding on `f64`
pub trait DecimalRounding {
    /// Rounded to `places` decimal places, halves away from zero
    #[must_use]
    fn rounded_to_places(self, places: i32) -> f64;

    /// The value as a percentage rounded to `places` decimal places
    #[must_use]
    fn percentage(self, places: i32) -> f64;
}

/// Decimal places used by percentage displays when none are given
pub const DEFAULT_PERCENTAGE_PLACES: i32 = 2;

impl DecimalRounding for f64 {
    fn rounded_to_places(self, places: i32) -> f64 {
        let divisor = 10f64.powi(places);
        (self * divisor).round() / divisor
    }

    fn percentage(self, places: i32) -> f64 {
        (self * 100.0).rounded_to_places(places)
    }
}

/// Converts between a unit and its reciprocal: `value = numerator / base`
///
/// The conversion is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalConverter {
    numerator: f64,
}

impl ReciprocalConverter {
    /// Micro reciprocal degrees (mired) against kelvin
    pub const MIRED: Self = Self { numerator: 1_000_000.0 };

    /// Converter with a custom numerator
    #[must_use]
    pub const fn new(numerator: f64) -> Self {
        Self { numerator }
    }

    /// Value in the base unit
    #[must_use]
    pub fn base_unit_value(&self, value: f64) -> f64 {
        self.numerator / value
    }

    /// Value in the reciprocal unit
    #[must_use]
    pub fn value(&self, base_unit_value: f64) -> f64 {
        self.numerator / base_unit_value
    }
}

/// Colour temperature in kelvin for a mired value
#[must_use]
pub fn mired_to_kelvin(mired: f64) -> f64 {
    ReciprocalConverter::MIRED.base_unit_value(mired)
}

/// Mired value for a colour temperature in kelvin
#[must_use]
pub fn kelvin_to_mired(kelvin: f64) -> f64 {
    ReciprocalConverter::MIRED.value(kelvin)
}
