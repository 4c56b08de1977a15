//! Checkout totals composer.

use crate::checkout::PaymentMethod;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete totals breakdown for a checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CheckoutTotals {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Coupon discount.
    pub coupon_discount: Money,
    /// Payment-method discount (instant-transfer incentive).
    pub payment_discount: Money,
    /// Shipping fee.
    pub shipping_fee: Money,
    /// Final total, never negative.
    pub total: Money,
}

impl CheckoutTotals {
    /// Total savings from discounts.
    pub fn savings(&self) -> Money {
        Money::new(
            self.coupon_discount.amount_cents + self.payment_discount.amount_cents,
            self.subtotal.currency,
        )
    }

    /// Check if any discount applies.
    pub fn has_discounts(&self) -> bool {
        self.coupon_discount.is_positive() || self.payment_discount.is_positive()
    }
}

/// Compose the final checkout total.
///
/// The payment-method discount applies to `(subtotal - coupon_discount)`,
/// never to the shipping fee, and only for instant-transfer payments.
/// The total is floored at zero.
pub fn compose_totals(
    subtotal: Money,
    coupon_discount: Money,
    payment_method: PaymentMethod,
    payment_discount_percent: Option<f64>,
    shipping_fee: Money,
) -> Result<CheckoutTotals, CommerceError> {
    let currency = subtotal.currency;
    for m in [&coupon_discount, &shipping_fee] {
        if m.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: m.currency.code().to_string(),
            });
        }
    }

    let discounted_base = subtotal
        .try_subtract(&coupon_discount)
        .ok_or(CommerceError::Overflow)?
        .floor_at_zero();

    let payment_discount = match (payment_method, payment_discount_percent) {
        (PaymentMethod::InstantTransfer, Some(percent)) if percent > 0.0 => {
            discounted_base.percentage(percent)
        }
        _ => Money::zero(currency),
    };

    let total = discounted_base
        .try_subtract(&payment_discount)
        .ok_or(CommerceError::Overflow)?
        .try_add(&shipping_fee)
        .ok_or(CommerceError::Overflow)?
        .floor_at_zero();

    Ok(CheckoutTotals {
        subtotal,
        coupon_discount,
        payment_discount,
        shipping_fee,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn brl(cents: i64) -> Money {
        Money::new(cents, Currency::BRL)
    }

    #[test]
    fn test_instant_transfer_discount_scenario() {
        // Subtotal R$100, no coupon, 5% instant-transfer discount, R$10 shipping
        let totals = compose_totals(
            brl(10000),
            brl(0),
            PaymentMethod::InstantTransfer,
            Some(5.0),
            brl(1000),
        )
        .unwrap();

        assert_eq!(totals.payment_discount.amount_cents, 500);
        assert_eq!(totals.total.amount_cents, 10500);
    }

    #[test]
    fn test_fixed_coupon_with_pickup_scenario() {
        // Subtotal R$50, fixed R$20 coupon, free pickup
        let totals =
            compose_totals(brl(5000), brl(2000), PaymentMethod::OnDelivery, None, brl(0))
                .unwrap();
        assert_eq!(totals.total.amount_cents, 3000);
    }

    #[test]
    fn test_payment_discount_ignores_shipping() {
        let totals = compose_totals(
            brl(10000),
            brl(2000),
            PaymentMethod::InstantTransfer,
            Some(10.0),
            brl(3000),
        )
        .unwrap();

        // 10% of (100 - 20), not of (100 - 20 + 30)
        assert_eq!(totals.payment_discount.amount_cents, 800);
        assert_eq!(totals.total.amount_cents, 10000 - 2000 - 800 + 3000);
    }

    #[test]
    fn test_discount_only_for_instant_transfer() {
        let totals =
            compose_totals(brl(10000), brl(0), PaymentMethod::Card, Some(5.0), brl(0)).unwrap();
        assert!(totals.payment_discount.is_zero());
        assert_eq!(totals.total.amount_cents, 10000);
    }

    #[test]
    fn test_total_floors_at_zero() {
        // Discounts exceed the subtotal
        let totals =
            compose_totals(brl(1000), brl(5000), PaymentMethod::OnDelivery, None, brl(0))
                .unwrap();
        assert_eq!(totals.total.amount_cents, 0);
        assert!(!totals.total.is_negative());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let result = compose_totals(
            brl(10000),
            Money::new(500, Currency::USD),
            PaymentMethod::Card,
            None,
            brl(0),
        );
        assert!(result.is_err());
    }
}
