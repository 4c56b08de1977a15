//! Shipping module.
//!
//! Delivery-method eligibility and fee calculation: store shipping rules,
//! carrier quotes, compact-parcel validation, the free-shipping override,
//! and the engine that ties them together.

mod engine;
mod parcel;
mod quotes;
mod rules;

pub use engine::{
    DeliveryMethod, FreeShippingPolicy, FreeShippingScope, ShippingAssessment, ShippingEngine,
    ShippingOption, ShippingSettings,
};
pub use parcel::{
    validate_compact, PackageProfile, ParcelViolation, COMPACT_HEIGHT_MAX_CM,
    COMPACT_HEIGHT_MIN_CM, COMPACT_LENGTH_MAX_CM, COMPACT_LENGTH_MIN_CM, COMPACT_MAX_WEIGHT_G,
    COMPACT_WIDTH_MAX_CM, COMPACT_WIDTH_MIN_CM,
};
pub use quotes::{CarrierQuote, DeliveryRange};
pub use rules::{match_rule, RuleScope, ShippingRule};

/// Normalize free text for comparisons: trimmed, ASCII-lowercased.
pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Keep only digits; used for CEP comparisons.
pub(crate) fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
