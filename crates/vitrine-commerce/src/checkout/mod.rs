//! Checkout module.
//!
//! Contains the delivery address, payment methods, the totals composer,
//! and the order model.

mod address;
mod order;
mod payment;
mod totals;

pub use address::DeliveryAddress;
pub use order::{CustomerInfo, Order, OrderItem, OrderStatus};
pub use payment::PaymentMethod;
pub use totals::{compose_totals, CheckoutTotals};
