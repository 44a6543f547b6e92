//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so every sum, difference and
//! comparison is exact at a fixed scale of two fractional digits. Decimal
//! text only appears at the boundary: parsing, display and serde.
//!
//! The range is symmetric, `-i64::MAX..=i64::MAX` cents, so negation and
//! `abs` never overflow. Arithmetic is checked: there are no `+`/`-`
//! operators, only `checked_*` methods that return `None` when a result
//! leaves the range.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of fractional digits carried by every amount
pub const SCALE: u32 = 2;

const CENTS_PER_UNIT: i64 = 100;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// No currency is attached: the ledger never converts between currencies,
/// so every amount handled together is assumed to share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount, `-MAX`
    pub const MIN: Money = Money(-i64::MAX);

    /// Create a Money amount from cents
    ///
    /// `i64::MIN` is outside the range and is clamped to [`Money::MIN`].
    ///
    /// # Examples
    /// ```
    /// use splitbook::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        if cents == i64::MIN {
            Self::MIN
        } else {
            Self(cents)
        }
    }

    fn from_checked(cents: Option<i64>) -> Option<Self> {
        cents.filter(|c| *c != i64::MIN).map(Self)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Negate; always in range
    pub const fn negate(&self) -> Self {
        Self(self.0.saturating_neg())
    }

    /// Addition, `None` when the result leaves the range
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Self::from_checked(self.0.checked_add(other.0))
    }

    /// Subtraction, `None` when the result leaves the range
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        Self::from_checked(self.0.checked_sub(other.0))
    }

    /// Exact sum of any number of amounts
    ///
    /// Accumulates in `i128`, so the result does not depend on the order
    /// of the terms: intermediate sums may leave the range as long as the
    /// final one does not.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        let mut total: i128 = 0;
        for amount in amounts {
            total = total.checked_add(i128::from(amount.0))?;
        }
        Self::from_checked(i64::try_from(total).ok())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "10.5", ".5".
    /// More than two fractional digits is rejected rather than rounded.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        // Remove currency symbol if present
        let s = s.strip_prefix('$').unwrap_or(s);

        let (units_str, cents_str) = match s.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (s, ""),
        };

        if units_str.is_empty() && cents_str.is_empty() {
            return Err(invalid());
        }
        if !units_str.bytes().all(|b| b.is_ascii_digit())
            || !cents_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if cents_str.len() > SCALE as usize {
            return Err(MoneyParseError::TooManyDecimals(original.to_string()));
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(original.to_string()))?
        };

        // Pad cents to 2 digits: "5" means 50 cents
        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(original.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(""))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string with at most two fractional digits, or a whole number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(CENTS_PER_UNIT)
            .map(Money)
            .ok_or_else(|| E::custom(MoneyParseError::OutOfRange(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v)
            .map_err(|_| E::custom(MoneyParseError::OutOfRange(v.to_string())))?;
        self.visit_i64(v)
    }

    // A fractional JSON number has already been rounded to binary floating
    // point by the time it gets here. Only the decimal string form is exact.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Err(E::custom(MoneyParseError::NotDecimalText(v.to_string())))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooManyDecimals(String),
    OutOfRange(String),
    NotDecimalText(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooManyDecimals(s) => {
                write!(f, "Money amount has more than {} decimal places: {}", SCALE, s)
            }
            MoneyParseError::OutOfRange(s) => write!(f, "Money amount out of range: {}", s),
            MoneyParseError::NotDecimalText(s) => write!(
                f,
                "Fractional amount {} must be written as a decimal string, e.g. \"12.30\"",
                s
            ),
        }
    }
}

impl std::error::Error for MoneyParseError {}
