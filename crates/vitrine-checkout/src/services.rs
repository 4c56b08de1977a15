//! External-service seams.
//!
//! The hosted backend is consumed through these traits: a typed query
//! client for orders, serverless functions for payments and carrier rates,
//! and the deep-link launcher. Every function call is attempted once; any
//! failure maps to a [`CheckoutError`] with no retry.

use crate::error::CheckoutError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrine_commerce::checkout::{Order, OrderItem};
use vitrine_commerce::coupon::CouponUsage;
use vitrine_commerce::money::Money;
use vitrine_commerce::shipping::{CarrierQuote, PackageProfile};

/// The JSON envelope every serverless payment function returns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayResponse {
    /// Whether the function itself succeeded.
    pub success: bool,
    /// Payment status reported by the processor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Error message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Payment-specific fields (charge id, barcode, QR payload, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl GatewayResponse {
    /// A successful response with a status.
    pub fn ok(status: impl Into<String>) -> Self {
        Self {
            success: true,
            status: Some(status.into()),
            error: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A failed response with an error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            error: Some(error.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach a payment-specific field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Interpret the processor status.
    pub fn payment_status(&self) -> PaymentStatus {
        if !self.success {
            return PaymentStatus::Declined;
        }
        match self.status.as_deref() {
            Some("approved") | Some("paid") | Some("authorized") => PaymentStatus::Approved,
            Some("pending") | Some("processing") | Some("in_process") | None => {
                PaymentStatus::Pending
            }
            Some(_) => PaymentStatus::Declined,
        }
    }
}

/// Normalized payment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Captured or authorized.
    Approved,
    /// Still processing; order proceeds as pending.
    Pending,
    /// Refused; checkout halts before persistence.
    Declined,
}

/// Card data handed to the gateway for tokenization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    /// Name on the card.
    pub holder_name: String,
    /// Card number.
    pub number: String,
    /// Expiry month (1-12).
    pub expiry_month: u8,
    /// Expiry year (four digits).
    pub expiry_year: u16,
    /// Security code.
    pub cvv: String,
    /// Number of installments.
    pub installments: u8,
}

/// Common fields for a charge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Order number the charge belongs to.
    pub order_number: String,
    /// Amount to charge.
    pub amount: Money,
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
}

/// A card authorization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCharge {
    /// The card.
    pub card: CardDetails,
    /// The charge.
    pub charge: ChargeRequest,
}

/// A carrier rate request for the consolidated cart package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateRequest {
    /// Store origin CEP.
    pub origin_zipcode: String,
    /// Shopper destination CEP.
    pub destination_zipcode: String,
    /// Consolidated package.
    pub package: PackageProfile,
}

/// Payment-processing serverless functions.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Tokenize and authorize a card charge.
    async fn authorize_card(&self, charge: &CardCharge) -> Result<GatewayResponse, CheckoutError>;

    /// Create an instant-transfer charge (QR payload in the response).
    async fn create_instant_charge(
        &self,
        charge: &ChargeRequest,
    ) -> Result<GatewayResponse, CheckoutError>;

    /// Generate a bank slip for the charge.
    async fn generate_bank_slip(
        &self,
        charge: &ChargeRequest,
    ) -> Result<GatewayResponse, CheckoutError>;

    /// Check the status of a previously created charge.
    async fn charge_status(&self, charge_id: &str) -> Result<GatewayResponse, CheckoutError>;
}

/// The typed query client for order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order row.
    async fn create_order(&self, order: &Order) -> Result<(), CheckoutError>;

    /// Insert the order-item rows.
    async fn create_order_items(&self, items: &[OrderItem]) -> Result<(), CheckoutError>;

    /// Append a coupon usage row.
    async fn record_coupon_usage(&self, usage: &CouponUsage) -> Result<(), CheckoutError>;
}

/// The carrier-rate serverless function.
#[async_trait]
pub trait CarrierRateService: Send + Sync {
    /// Quote all carrier services for a package.
    async fn fetch_quotes(&self, request: &RateRequest)
        -> Result<Vec<CarrierQuote>, CheckoutError>;
}

/// Opens a messaging deep link in the shopper's browser.
pub trait MessengerLauncher: Send + Sync {
    /// Open the URL. Must happen within the submit user gesture.
    fn open(&self, url: &str) -> Result<(), CheckoutError>;
}
