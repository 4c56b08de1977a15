//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues in price and fee arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
    ARS,
    CLP,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::ARS => "ARS",
            Currency::CLP => "CLP",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::ARS => "AR$",
            Currency::CLP => "CLP$",
            Currency::MXN => "MX$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::CLP => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "ARS" => Some(Currency::ARS),
            "CLP" => Some(Currency::CLP),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use vitrine_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.90, Currency::BRL);
    /// assert_eq!(price.amount_cents, 4990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "R$49.90").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Format as a display string without symbol (e.g., "49.90").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }

    /// Add another Money value.
    ///
    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    pub fn add(&self, other: &Money) -> Money {
        self.try_add(other).expect("Currency mismatch in addition")
    }

    /// Try to add another Money value.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Subtract another Money value.
    ///
    /// # Panics
    /// Panics if currencies don't match.
    pub fn subtract(&self, other: &Money) -> Money {
        self.try_subtract(other)
            .expect("Currency mismatch in subtraction")
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a decimal factor (e.g., for percentages).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Clamp a negative amount to zero.
    pub fn floor_at_zero(&self) -> Money {
        Money::new(self.amount_cents.max(0), self.currency)
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::add(&self, &other)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::subtract(&self, &other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("Overflow in money multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4990, Currency::BRL);
        assert_eq!(m.amount_cents, 4990);
        assert_eq!(m.currency, Currency::BRL);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.90, Currency::BRL);
        assert_eq!(m.amount_cents, 4990);

        let m = Money::from_decimal(1500.0, Currency::CLP);
        assert_eq!(m.amount_cents, 1500); // CLP has no decimals
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4990, Currency::BRL);
        assert_eq!(m.display(), "R$49.90");

        let m = Money::new(1500, Currency::CLP);
        assert_eq!(m.display(), "CLP$1500");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::BRL);
        let b = Money::new(500, Currency::BRL);
        let c = a + b;
        assert_eq!(c.amount_cents, 1500);
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(1000, Currency::BRL);
        let b = Money::new(300, Currency::BRL);
        let c = a.subtract(&b);
        assert_eq!(c.amount_cents, 700);
    }

    #[test]
    fn test_money_try_multiply() {
        let m = Money::new(1000, Currency::BRL);
        assert_eq!(m.try_multiply(3).unwrap().amount_cents, 3000);
        assert!(Money::new(i64::MAX, Currency::BRL).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(10000, Currency::BRL); // R$100.00
        let discount = m.percentage(5.0);
        assert_eq!(discount.amount_cents, 500); // R$5.00
    }

    #[test]
    fn test_money_floor_at_zero() {
        let m = Money::new(-250, Currency::BRL);
        assert_eq!(m.floor_at_zero().amount_cents, 0);
        let m = Money::new(250, Currency::BRL);
        assert_eq!(m.floor_at_zero().amount_cents, 250);
    }

    #[test]
    fn test_money_try_sum() {
        let values = [
            Money::new(1000, Currency::BRL),
            Money::new(2500, Currency::BRL),
        ];
        let total = Money::try_sum(values.iter(), Currency::BRL).unwrap();
        assert_eq!(total.amount_cents, 3500);

        let mixed = [
            Money::new(1000, Currency::BRL),
            Money::new(1000, Currency::USD),
        ];
        assert!(Money::try_sum(mixed.iter(), Currency::BRL).is_none());
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let brl = Money::new(1000, Currency::BRL);
        let usd = Money::new(1000, Currency::USD);
        let _ = brl + usd;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BRL"), Some(Currency::BRL));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
