//! Fixed-point amount type
//!
//! Amounts are stored as a signed count of cents so that running totals never
//! drift. Ledger files use the convention that a value is negative unless it
//! carries an explicit `+` prefix.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude, in cents, that [`Amount::parse`] accepts
///
/// Leaves room to sum a million amounts without leaving `i64`.
pub const MAX_CENTS: i64 = i64::MAX / 1_000_000;

/// A monetary amount in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount the way ledger records and the `add` command write them
    ///
    /// - surrounding spaces and tabs are ignored, an empty string is zero
    /// - the amount is positive only when the first character is `+`
    /// - the last `.` or `,` is the decimal separator
    /// - one decimal digit counts as tenths, extra digits past the second are
    ///   truncated
    /// - magnitudes above [`MAX_CENTS`] are rejected
    ///
    /// # Examples
    /// ```
    /// use deben::models::Amount;
    /// assert_eq!(Amount::parse("+12.5").unwrap().cents(), 1250);
    /// assert_eq!(Amount::parse("-3").unwrap().cents(), -300);
    /// assert_eq!(Amount::parse("7.999").unwrap().cents(), -799);
    /// ```
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim_matches(|c: char| c == ' ' || c == '\t');
        if s.is_empty() {
            return Ok(Self::zero());
        }

        let sign = if s.starts_with('+') { 1 } else { -1 };
        let invalid = || AmountParseError::InvalidFormat(s.to_string());

        let (units_str, decimals_str) = match s.rfind(|c: char| c == '.' || c == ',') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        // The sign was already captured, only the magnitude is kept.
        let units_str = units_str
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(units_str);
        let units = parse_digits(units_str).ok_or_else(invalid)?;

        let decimals = match decimals_str.len() {
            0 => 0,
            1 => parse_digits(decimals_str).ok_or_else(invalid)? * 10,
            _ => {
                if !decimals_str.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                parse_digits(&decimals_str[..2]).ok_or_else(invalid)?
            }
        };

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(decimals))
            .filter(|&cents| cents <= MAX_CENTS)
            .map(|cents| Self(sign * cents))
            .ok_or_else(|| AmountParseError::Overflow(s.to_string()))
    }

    /// Format as `[sign]units.cc`
    ///
    /// Negative amounts always carry a `-`; non-negative ones get a `+` only
    /// when `show_plus_sign` is set.
    pub fn format(&self, show_plus_sign: bool) -> String {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.0 < 0 {
            "-"
        } else if show_plus_sign {
            "+"
        } else {
            ""
        };
        format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }

    /// Number of characters taken by the sign, the digits and the decimal point
    ///
    /// Used to size label columns. Zero is given a width of 1.
    pub fn display_width(&self) -> usize {
        if self.0 == 0 {
            return 1;
        }
        // Amounts under one unit still print a leading "0" and two decimals.
        let digits = digit_count(self.0.unsigned_abs()).max(3);
        digits + 1 + usize::from(self.0 < 0)
    }
}

/// Number of decimal digits needed to print `value`
pub fn digit_count(value: u64) -> usize {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        return Some(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    Overflow(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::Overflow(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
