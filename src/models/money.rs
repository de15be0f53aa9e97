//! Money type for representing currency amounts
//!
//! Amounts are whole numbers of the currency's smallest unit (won, cents, ...)
//! stored as i64. Every division goes through [`Money::div_round`], which rounds
//! half away from zero on the exact rational value. Arithmetic saturates at the
//! i64 bounds instead of wrapping or panicking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from smallest-unit value
    ///
    /// # Examples
    /// ```
    /// use subkeep::models::Money;
    /// let amount = Money::from_minor(17_000);
    /// assert_eq!(amount.minor(), 17_000);
    /// ```
    pub const fn from_minor(units: i64) -> Self {
        Self(units)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in smallest units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a whole factor (e.g. monthly × 12)
    pub const fn times(&self, factor: i64) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    /// Divide, rounding half away from zero
    ///
    /// A zero divisor leaves the amount unchanged.
    ///
    /// # Examples
    /// ```
    /// use subkeep::models::Money;
    /// assert_eq!(Money::from_minor(10_000).div_round(12).minor(), 833);
    /// assert_eq!(Money::from_minor(18).div_round(12).minor(), 2);
    /// ```
    pub fn div_round(&self, divisor: i64) -> Self {
        Self(round_div(self.0, divisor))
    }

    /// `round(self × numerator / denominator)` with exact intermediate arithmetic
    ///
    /// A zero denominator leaves the amount unchanged.
    pub fn scale_round(&self, numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return *self;
        }
        let product = i128::from(self.0) * i128::from(numerator);
        Self(saturate(round_div_wide(product, i128::from(denominator))))
    }

    /// `round(self × ratio)` for fractional shares
    pub fn mul_ratio_round(&self, ratio: f64) -> Self {
        Self((self.0 as f64 * ratio).round() as i64)
    }

    /// Parse an amount in smallest units
    ///
    /// Accepts an optional leading `-`, an optional currency symbol and `,` or
    /// `_` digit-group separators: "17000", "17,000", "₩17,000", "-500".
    /// Letters are never skipped, so "abc12" is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let digits: String = rest
            .trim_start_matches(is_currency_symbol)
            .trim_start()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol and digit grouping
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_digits(self.0.unsigned_abs()))
    }
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '₩' | '€' | '£' | '¥')
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn round_div(numerator: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return numerator;
    }
    saturate(round_div_wide(i128::from(numerator), i128::from(divisor)))
}

/// Nonzero divisor only
fn round_div_wide(numerator: i128, divisor: i128) -> i128 {
    let (numerator, divisor) = if divisor < 0 {
        (-numerator, -divisor)
    } else {
        (numerator, divisor)
    };
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if 2 * remainder.abs() >= divisor {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

fn group_digits(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_half_away_from_zero() {
        assert_eq!(Money::from_minor(10_000).div_round(12).minor(), 833);
        assert_eq!(Money::from_minor(6).div_round(12).minor(), 1);
        assert_eq!(Money::from_minor(5).div_round(12).minor(), 0);
        assert_eq!(Money::from_minor(-6).div_round(12).minor(), -1);
        assert_eq!(Money::from_minor(20_000).div_round(4).minor(), 5_000);
    }

    #[test]
    fn test_scale_round() {
        // 5000 × 52 / 12 = 21666.67
        assert_eq!(Money::from_minor(5_000).scale_round(52, 12).minor(), 21_667);
        // 3 × 52 / 12 = 13.0
        assert_eq!(Money::from_minor(3).scale_round(52, 12).minor(), 13);
    }

    #[test]
    fn test_mul_ratio_round() {
        assert_eq!(Money::from_minor(10_000).mul_ratio_round(0.3).minor(), 3_000);
        assert_eq!(Money::from_minor(5).mul_ratio_round(0.5).minor(), 3);
        assert_eq!(Money::from_minor(9_999).mul_ratio_round(0.0).minor(), 0);
    }

    #[test]
    fn test_display_groups_digits() {
        assert_eq!(Money::from_minor(17_000).to_string(), "17,000");
        assert_eq!(Money::from_minor(999).to_string(), "999");
        assert_eq!(Money::from_minor(1_234_567).to_string(), "1,234,567");
        assert_eq!(Money::from_minor(-10_000).to_string(), "-10,000");
        assert_eq!(Money::from_minor(0).format_with_symbol("₩"), "₩0");
        assert_eq!(Money::from_minor(-2_500).format_with_symbol("$"), "-$2,500");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("17000").unwrap().minor(), 17_000);
        assert_eq!(Money::parse("17,000").unwrap().minor(), 17_000);
        assert_eq!(Money::parse("₩17,000").unwrap().minor(), 17_000);
        assert_eq!(Money::parse("-500").unwrap().minor(), -500);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("12.5").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("abc12").is_err());
        assert!(Money::parse("12abc").is_err());
        assert_eq!(Money::parse("$ 1,200").unwrap().minor(), 1_200);
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.times(12).minor(), i64::MAX);
        assert_eq!((max + Money::from_minor(1)).minor(), i64::MAX);
        assert_eq!((-max - Money::from_minor(10)).minor(), i64::MIN);
        assert_eq!(Money::from_minor(i64::MIN).times(2).minor(), i64::MIN);
        assert_eq!((-Money::from_minor(i64::MIN)).minor(), i64::MAX);

        let mut total = Money::from_minor(i64::MAX - 1);
        total += Money::from_minor(5);
        assert_eq!(total.minor(), i64::MAX);
    }

    #[test]
    fn test_scale_round_saturates_instead_of_truncating() {
        assert_eq!(Money::from_minor(i64::MAX / 4).scale_round(52, 12).minor(), i64::MAX);
        assert_eq!(Money::from_minor(i64::MIN / 4).scale_round(52, 12).minor(), i64::MIN);
        // Exact when the result fits
        assert_eq!(
            Money::from_minor(177_372_539_170_284_150).scale_round(52, 12).minor(),
            768_614_336_404_564_650
        );
    }

    #[test]
    fn test_zero_and_negative_divisors() {
        assert_eq!(Money::from_minor(1_234).div_round(0).minor(), 1_234);
        assert_eq!(Money::from_minor(1_234).scale_round(5, 0).minor(), 1_234);
        assert_eq!(Money::from_minor(10).div_round(-4).minor(), -3);
        assert_eq!(Money::from_minor(10).scale_round(1, -4).minor(), -3);
        assert_eq!(Money::from_minor(i64::MAX).div_round(1).minor(), i64::MAX);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_minor(1_000);
        let b = Money::from_minor(400);
        assert_eq!((a - b).minor(), 600);
        assert_eq!((-a).minor(), -1_000);
        assert_eq!(a.times(12).minor(), 12_000);

        let total: Money = vec![a, b, Money::from_minor(100)].into_iter().sum();
        assert_eq!(total.minor(), 1_500);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1_050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
