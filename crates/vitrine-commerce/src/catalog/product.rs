//! Product types.

use crate::ids::{ProductId, StoreId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Physical dimensions of a single product unit.
///
/// Stores rarely fill these in, so absent values fall back to the largest
/// package the compact shipping tier accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    /// Weight in grams.
    pub weight_g: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Width in centimeters.
    pub width_cm: f64,
    /// Length in centimeters.
    pub length_cm: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            weight_g: 300.0,
            height_cm: 4.0,
            width_cm: 16.0,
            length_cm: 24.0,
        }
    }
}

impl Dimensions {
    /// Create dimensions from explicit values.
    pub fn new(weight_g: f64, height_cm: f64, width_cm: f64, length_cm: f64) -> Self {
        Self {
            weight_g,
            height_cm,
            width_cm,
            length_cm,
        }
    }
}

/// A product in a store's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Owning store.
    pub store_id: StoreId,
    /// Reference code shown to the store owner (SKU-like).
    pub reference: String,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// List price.
    pub price: Money,
    /// Promotional price; overrides `price` when present.
    pub promotional_price: Option<Money>,
    /// Whether the product is visible to shoppers.
    pub active: bool,
    /// Parcel dimensions for shipping quotes.
    pub dimensions: Dimensions,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new active product.
    pub fn new(
        store_id: StoreId,
        reference: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            store_id,
            reference: reference.into(),
            name: name.into(),
            description: None,
            price,
            promotional_price: None,
            active: true,
            dimensions: Dimensions::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The price a shopper actually pays.
    pub fn effective_price(&self) -> Money {
        self.promotional_price.unwrap_or(self.price)
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.active
    }

    /// Set a promotional price.
    pub fn with_promotional_price(mut self, price: Money) -> Self {
        self.promotional_price = Some(price);
        self
    }

    /// Set parcel dimensions.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
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
