//! Cart and line item types.

use crate::catalog::{Dimensions, Product};
use crate::error::CommerceError;
use crate::ids::{CartId, CartLineId, ProductId, StoreId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A shopper's cart for a single store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Store this cart belongs to.
    pub store_id: StoreId,
    /// Lines in the cart.
    pub lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(store_id: StoreId) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            store_id,
            lines: Vec::new(),
            currency: Currency::BRL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a catalog product to the cart.
    ///
    /// Adding the same product again increases the existing line's quantity.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<CartLineId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id.as_ref() == Some(&product.id))
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_LINE {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_LINE,
                ));
            }

            existing.quantity = new_quantity;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        let line = CartLine {
            id: CartLineId::generate(),
            product_id: Some(product.id.clone()),
            name: product.name.clone(),
            unit_price: product.price,
            promotional_price: product.promotional_price,
            quantity,
            dimensions: product.dimensions,
        };
        let id = line.id.clone();
        self.lines.push(line);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Add a free-text line not backed by a catalog product.
    ///
    /// Used by store owners taking manual orders.
    pub fn add_manual_line(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<CartLineId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        let line = CartLine {
            id: CartLineId::generate(),
            product_id: None,
            name: name.into(),
            unit_price,
            promotional_price: None,
            quantity,
            dimensions: Dimensions::default(),
        };
        let id = line.id.clone();
        self.lines.push(line);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Update line quantity.
    ///
    /// If quantity is <= 0, removes the line.
    pub fn update_quantity(
        &mut self,
        line_id: &CartLineId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_line(line_id));
        }

        if quantity > MAX_QUANTITY_PER_LINE {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_LINE,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == line_id) {
            line.quantity = quantity;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a line from the cart.
    pub fn remove_line(&mut self, line_id: &CartLineId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.updated_at = current_timestamp();
    }

    /// Sum of effective line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut acc = Money::zero(self.currency);
        for line in &self.lines {
            let total = line.line_total()?;
            acc = acc.try_add(&total).ok_or(CommerceError::Overflow)?;
        }
        Ok(acc)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by ID.
    pub fn get_line(&self, line_id: &CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: CartLineId,
    /// Catalog product, or None for a free-text/manual line.
    pub product_id: Option<ProductId>,
    /// Display name (denormalized).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Promotional price; overrides `unit_price` when present.
    pub promotional_price: Option<Money>,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Per-unit parcel dimensions.
    pub dimensions: Dimensions,
}

impl CartLine {
    /// The unit price a shopper actually pays.
    pub fn effective_unit_price(&self) -> Money {
        self.promotional_price.unwrap_or(self.unit_price)
    }

    /// Total for this line (effective unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.effective_unit_price()
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
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
