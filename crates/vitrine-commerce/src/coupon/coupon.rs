//! Coupon and usage types.

use crate::ids::{CouponId, CouponUsageId, OrderId, StoreId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Value of a coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CouponValue {
    /// Percentage off (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off.
    Fixed(Money),
}

impl CouponValue {
    /// Calculate the discount amount for a given subtotal.
    ///
    /// Fixed discounts never exceed the subtotal.
    pub fn calculate(&self, subtotal: &Money) -> Money {
        match self {
            CouponValue::Percentage(percent) => subtotal.percentage(*percent),
            CouponValue::Fixed(amount) => {
                if amount.amount_cents > subtotal.amount_cents {
                    *subtotal
                } else {
                    *amount
                }
            }
        }
    }
}

/// A coupon definition, owned by a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Unique coupon identifier.
    pub id: CouponId,
    /// Owning store.
    pub store_id: StoreId,
    /// Coupon code, unique per store (e.g., "BEMVINDA10").
    pub code: String,
    /// Value of the coupon.
    pub value: CouponValue,
    /// Minimum order subtotal required.
    pub minimum_order: Option<Money>,
    /// One use per customer.
    pub single_use: bool,
    /// Whether the coupon is active.
    pub active: bool,
    /// Expiry (Unix timestamp), None = no expiry.
    pub expires_at: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Coupon {
    /// Create a new percentage coupon.
    pub fn percentage(store_id: StoreId, code: impl Into<String>, percent: f64) -> Self {
        Self {
            id: CouponId::generate(),
            store_id,
            code: code.into(),
            value: CouponValue::Percentage(percent),
            minimum_order: None,
            single_use: false,
            active: true,
            expires_at: None,
            created_at: current_timestamp(),
        }
    }

    /// Create a new fixed amount coupon.
    pub fn fixed(store_id: StoreId, code: impl Into<String>, amount: Money) -> Self {
        Self {
            id: CouponId::generate(),
            store_id,
            code: code.into(),
            value: CouponValue::Fixed(amount),
            minimum_order: None,
            single_use: false,
            active: true,
            expires_at: None,
            created_at: current_timestamp(),
        }
    }

    /// Require a minimum order subtotal.
    pub fn with_minimum_order(mut self, minimum: Money) -> Self {
        self.minimum_order = Some(minimum);
        self
    }

    /// Restrict to one use per customer.
    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    /// Set an expiry timestamp.
    pub fn expires_at(mut self, timestamp: i64) -> Self {
        self.expires_at = Some(timestamp);
        self
    }

    /// Check if the coupon is usable at the given instant.
    pub fn is_valid_at(&self, now: i64) -> bool {
        if !self.active {
            return false;
        }
        if let Some(expires) = self.expires_at {
            if now > expires {
                return false;
            }
        }
        true
    }

    /// Case-insensitive code match.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.trim().eq_ignore_ascii_case(code.trim())
    }
}

/// A recorded coupon usage, appended at order confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponUsage {
    /// Unique usage identifier.
    pub id: CouponUsageId,
    /// Coupon that was used.
    pub coupon_id: CouponId,
    /// Customer email that used it.
    pub customer_email: String,
    /// Order the usage belongs to.
    pub order_id: OrderId,
    /// Unix timestamp of usage.
    pub used_at: i64,
}

impl CouponUsage {
    /// Record a usage for an order.
    pub fn new(coupon_id: CouponId, customer_email: impl Into<String>, order_id: OrderId) -> Self {
        Self {
            id: CouponUsageId::generate(),
            coupon_id,
            customer_email: customer_email.into(),
            order_id,
            used_at: current_timestamp(),
        }
    }

    /// Case-insensitive email match.
    pub fn is_by(&self, customer_email: &str) -> bool {
        self.customer_email
            .trim()
            .eq_ignore_ascii_case(customer_email.trim())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
