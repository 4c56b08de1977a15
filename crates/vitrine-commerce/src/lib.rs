//! Storefront domain types and checkout pricing logic for Vitrine.
//!
//! This crate holds the pure domain layer of the Vitrine storefront builder:
//!
//! - **Catalog**: products with prices, promotional prices, and parcel dimensions
//! - **Cart**: shopping cart with line items and subtotal arithmetic
//! - **Coupon**: coupon definitions and the dry-run evaluator
//! - **Shipping**: delivery-method eligibility, shipping rules, carrier quotes,
//!   compact-parcel validation, and the free-shipping override
//! - **Checkout**: the totals composer, payment methods, and the order model
//! - **Search**: fuzzy product matching for the public storefront
//!
//! Everything here is synchronous and side-effect free; persistence and
//! payment gateways live behind the service traits in `vitrine-checkout`.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_commerce::prelude::*;
//!
//! let mut cart = Cart::new(StoreId::new("store-1"));
//! cart.add_manual_line("Brigadeiro box", Money::new(2500, Currency::BRL), 2)?;
//!
//! let subtotal = cart.subtotal()?;
//! let totals = compose_totals(
//!     subtotal,
//!     Money::zero(Currency::BRL),
//!     PaymentMethod::InstantTransfer,
//!     Some(5.0),
//!     Money::new(1000, Currency::BRL),
//! )?;
//! println!("Total: {}", totals.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod coupon;
pub mod search;
pub mod shipping;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Dimensions, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};

    // Coupon
    pub use crate::coupon::{
        AppliedCoupon, Coupon, CouponDecision, CouponEvaluator, CouponRejection, CouponUsage,
        CouponValue,
    };

    // Shipping
    pub use crate::shipping::{
        CarrierQuote, DeliveryRange, DeliveryMethod, FreeShippingPolicy, FreeShippingScope,
        PackageProfile, ParcelViolation, RuleScope, ShippingAssessment, ShippingEngine,
        ShippingOption, ShippingRule, ShippingSettings,
    };

    // Checkout
    pub use crate::checkout::{
        compose_totals, CheckoutTotals, CustomerInfo, DeliveryAddress, Order, OrderItem,
        OrderStatus, PaymentMethod,
    };

    // Search
    pub use crate::search::{search_products, SearchHit};
}
