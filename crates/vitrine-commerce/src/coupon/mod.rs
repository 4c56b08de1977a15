//! Coupon module.
//!
//! Coupon definitions, recorded usages, and the dry-run evaluator used by
//! checkout. Usage rows are written only at order confirmation.

mod coupon;
mod evaluator;

pub use coupon::{Coupon, CouponUsage, CouponValue};
pub use evaluator::{AppliedCoupon, CouponDecision, CouponEvaluator, CouponRejection};
