//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. It parses user input that may or
//! may not include a leading currency sign and thousands separators, and it is stored in JSON as a
//! plain number.
//!
//! Amounts are limited to `MAX_SIGNIFICANT_DIGITS` significant digits and to a magnitude below
//! `AMOUNT_LIMIT`. Within those limits a JSON number reads back as exactly the amount that was
//! written, and no realistic number of records can overflow a total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Currency signs that may precede an amount typed by the user.
const CURRENCY_SIGNS: [char; 4] = ['$', '€', '£', '₹'];

/// The most significant digits an amount may have. Any decimal with this many digits survives a
/// round trip through an `f64`.
pub const MAX_SIGNIFICANT_DIGITS: usize = 15;

/// Amounts must be strictly smaller than this (10^15) in absolute value.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Represents a monetary amount. Negative values are allowed.
///
/// Equality and ordering are numeric, so `10`, `10.0` and `10.00` are all equal.
///
/// # Examples
///
/// Parsing with a currency sign and commas:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-$1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "-1250.50");
/// ```
///
/// Scientific notation is accepted:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1.5e2").unwrap();
/// assert_eq!(amount.to_string(), "150.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AmountError {
    /// The text is not a number.
    NotANumber(String),
    /// The number is too large in absolute value.
    OutOfRange(String),
    /// The number has more significant digits than can be stored exactly.
    TooPrecise(String),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::NotANumber(s) => write!(f, "'{s}' is not a number"),
            AmountError::OutOfRange(s) => {
                write!(f, "'{s}' is too large, amounts must be below {AMOUNT_LIMIT}")
            }
            AmountError::TooPrecise(s) => write!(
                f,
                "'{s}' has too many digits, at most {MAX_SIGNIFICANT_DIGITS} significant digits \
                are allowed"
            ),
        }
    }
}

impl std::error::Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AmountError::NotANumber(s.to_string());
        let trimmed = s.trim();

        // Strip a currency sign, which may come after a minus: "-$50.00" or "$50.00"
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let unsigned = unsigned
            .strip_prefix(CURRENCY_SIGNS.as_slice())
            .unwrap_or(unsigned);

        // Remove commas (thousand separators)
        let digits = unsigned.replace(',', "");
        if digits.is_empty() || digits.starts_with(&['-', '+'][..]) {
            return Err(err());
        }

        let value = Decimal::from_str(&digits)
            .or_else(|_| Decimal::from_scientific(&digits))
            .map_err(|_| err())?;
        Amount::checked(if negative { -value } else { value }, s)
    }
}

impl Amount {
    /// Accepts `value` if it is within the amount limits. `input` is only used in the error.
    fn checked(value: Decimal, input: &str) -> Result<Self, AmountError> {
        if value.abs() >= AMOUNT_LIMIT {
            return Err(AmountError::OutOfRange(input.to_string()));
        }
        let digits = value.normalize().mantissa().unsigned_abs().to_string().len();
        if digits > MAX_SIGNIFICANT_DIGITS {
            return Err(AmountError::TooPrecise(input.to_string()));
        }
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(2);
        write!(f, "{:.*}", places, self.0.round_dp(places as u32))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Whole amounts are written as integers, everything else as a float.
        if self.0.fract().is_zero() {
            if let Some(i) = self.0.to_i64() {
                return serializer.serialize_i64(i);
            }
        }
        // The nearest f64 to a decimal of at most 15 significant digits formats back to it.
        match self.0.normalize().to_string().parse::<f64>() {
            Ok(f) => serializer.serialize_f64(f),
            Err(_) => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Amount::checked(Decimal::from(v), &v.to_string()).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Amount::checked(Decimal::from(v), &v.to_string()).map_err(E::custom)
    }

    // f64 Display prints the shortest digits that read back as `v`, never an exponent.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("{v} is not an amount")));
        }
        Amount::from_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
