//! Carrier rate quotes.
//!
//! Quotes are ephemeral: fetched per address change and never persisted.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Estimated delivery window in business days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRange {
    /// Minimum business days.
    pub min_days: i32,
    /// Maximum business days.
    pub max_days: i32,
}

impl DeliveryRange {
    /// Shopper-facing estimate string.
    pub fn display(&self) -> String {
        if self.min_days == self.max_days {
            format!("{} business days", self.min_days)
        } else {
            format!("{}-{} business days", self.min_days, self.max_days)
        }
    }
}

/// A rate quote returned by the carrier service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarrierQuote {
    /// Carrier service identifier.
    pub service_id: i64,
    /// Service name (e.g., "Expresso", "Econômico").
    pub name: String,
    /// Quoted price.
    pub price: Money,
    /// Store-owner override; takes precedence over `price` when present.
    pub custom_price: Option<Money>,
    /// Delivery estimate.
    pub delivery_range: Option<DeliveryRange>,
}

impl CarrierQuote {
    /// The price actually charged to the shopper.
    pub fn effective_price(&self) -> Money {
        self.custom_price.unwrap_or(self.price)
    }

    /// Find the quote for a carrier service, if any.
    pub fn for_service(quotes: &[CarrierQuote], service_id: i64) -> Option<&CarrierQuote> {
        quotes.iter().find(|q| q.service_id == service_id)
    }
}
