//! Dry-run coupon evaluation.
//!
//! `apply` never writes anything: usage rows are recorded by the checkout
//! orchestrator only after the order is persisted.

use crate::coupon::{Coupon, CouponUsage};
use crate::ids::CouponId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Why a coupon was rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CouponRejection {
    /// No active coupon with that code.
    NotFound,
    /// Subtotal below the coupon's minimum order value.
    BelowMinimum {
        /// The required minimum.
        minimum: Money,
    },
    /// Single-use coupon already used by this customer.
    AlreadyUsed,
}

impl CouponRejection {
    /// Shopper-facing message.
    pub fn message(&self) -> String {
        match self {
            CouponRejection::NotFound => "Coupon not found or no longer active".to_string(),
            CouponRejection::BelowMinimum { minimum } => {
                format!("Order must be at least {} to use this coupon", minimum)
            }
            CouponRejection::AlreadyUsed => "This coupon has already been used".to_string(),
        }
    }
}

/// A coupon accepted for the current cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// The coupon ID.
    pub coupon_id: CouponId,
    /// The code as defined by the store.
    pub code: String,
    /// Discount amount for the evaluated subtotal.
    pub discount: Money,
}

/// Outcome of a coupon evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CouponDecision {
    /// Coupon accepted; discount computed for the given subtotal.
    Accepted(AppliedCoupon),
    /// Coupon rejected.
    Rejected(CouponRejection),
}

impl CouponDecision {
    /// Whether the coupon was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, CouponDecision::Accepted(_))
    }

    /// The discount, when accepted.
    pub fn discount(&self) -> Option<Money> {
        match self {
            CouponDecision::Accepted(applied) => Some(applied.discount),
            CouponDecision::Rejected(_) => None,
        }
    }
}

/// Evaluates coupon codes against a store's coupons and recorded usages.
#[derive(Debug)]
pub struct CouponEvaluator<'a> {
    coupons: &'a [Coupon],
    usages: &'a [CouponUsage],
    now: i64,
}

impl<'a> CouponEvaluator<'a> {
    /// Create an evaluator over the store's coupons and usage history.
    pub fn new(coupons: &'a [Coupon], usages: &'a [CouponUsage]) -> Self {
        Self {
            coupons,
            usages,
            now: current_timestamp(),
        }
    }

    /// Pin the evaluation instant.
    pub fn at(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Evaluate a code against a subtotal for a customer.
    pub fn apply(&self, code: &str, subtotal: Money, customer_email: &str) -> CouponDecision {
        let coupon = match self
            .coupons
            .iter()
            .find(|c| c.matches_code(code) && c.is_valid_at(self.now))
        {
            Some(c) => c,
            None => return CouponDecision::Rejected(CouponRejection::NotFound),
        };

        if let Some(minimum) = coupon.minimum_order {
            if subtotal.amount_cents < minimum.amount_cents {
                return CouponDecision::Rejected(CouponRejection::BelowMinimum { minimum });
            }
        }

        if coupon.single_use {
            let used = self
                .usages
                .iter()
                .any(|u| u.coupon_id == coupon.id && u.is_by(customer_email));
            if used {
                return CouponDecision::Rejected(CouponRejection::AlreadyUsed);
            }
        }

        CouponDecision::Accepted(AppliedCoupon {
            coupon_id: coupon.id.clone(),
            code: coupon.code.clone(),
            discount: coupon.value.calculate(&subtotal),
        })
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
