//! Order types.
//!
//! The order row and its item rows are persisted separately by the
//! orchestrator; see `vitrine-checkout`.

use crate::cart::CartLine;
use crate::checkout::{CheckoutTotals, DeliveryAddress, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId, ProductId, StoreId};
use crate::money::Money;
use crate::shipping::DeliveryMethod;
use serde::{Deserialize, Serialize};

/// Order status at creation time, derived from the payment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Payment captured or authorized (card approved).
    Confirmed,
    /// Waiting on an asynchronous payment (instant transfer, bank slip,
    /// card still processing).
    #[default]
    Pending,
    /// Settled outside the gateway (on delivery, messenger).
    PendingManual,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Pending => "pending",
            OrderStatus::PendingManual => "pending_manual",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Pending => "Pending payment",
            OrderStatus::PendingManual => "To arrange with the store",
        }
    }
}

/// The shopper placing the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Email, used for coupon usage tracking.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
}

impl CustomerInfo {
    /// Create customer info from name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub number: String,
    /// Store the order belongs to.
    pub store_id: StoreId,
    /// Customer details.
    pub customer: CustomerInfo,
    /// Delivery address; None for pickup.
    pub delivery_address: Option<DeliveryAddress>,
    /// Chosen delivery method.
    pub delivery_method: DeliveryMethod,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Status derived from the payment outcome.
    pub status: OrderStatus,
    /// Totals snapshot at submission time.
    pub totals: CheckoutTotals,
    /// Coupon code snapshot, when one was applied.
    pub coupon_code: Option<String>,
    /// Customer note.
    pub note: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Generate a new order number.
    pub fn generate_number() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("PED-{}", ts)
    }
}

/// A line in an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique item identifier.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Catalog product, or None for a free-text/manual item.
    pub product_id: Option<ProductId>,
    /// Name at time of order.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Effective unit price at time of order.
    pub unit_price: Money,
    /// Total for this item.
    pub total: Money,
}

impl OrderItem {
    /// Snapshot a cart line into an order item.
    pub fn from_line(order_id: OrderId, line: &CartLine) -> Result<Self, CommerceError> {
        Ok(Self {
            id: OrderItemId::generate(),
            order_id,
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.effective_unit_price(),
            total: line.line_total()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;
    use crate::money::Currency;

    #[test]
    fn test_order_number_prefix() {
        assert!(Order::generate_number().starts_with("PED-"));
    }

    #[test]
    fn test_item_snapshot_uses_effective_price() {
        let mut cart = Cart::new(StoreId::new("store-1"));
        let product = Product::new(
            StoreId::new("store-1"),
            "REF-1",
            "Camiseta",
            Money::new(5000, Currency::BRL),
        )
        .with_promotional_price(Money::new(4000, Currency::BRL));
        cart.add_product(&product, 2).unwrap();

        let order_id = OrderId::generate();
        let item = OrderItem::from_line(order_id.clone(), &cart.lines[0]).unwrap();

        assert_eq!(item.order_id, order_id);
        assert_eq!(item.unit_price.amount_cents, 4000);
        assert_eq!(item.total.amount_cents, 8000);
    }
}
