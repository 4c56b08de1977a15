//! Payment method types.

use serde::{Deserialize, Serialize};

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit card, authorized through the gateway before the order exists.
    Card,
    /// Real-time bank transfer (PIX-style); may carry a store discount.
    InstantTransfer,
    /// Bank slip (boleto-style) generated by the gateway.
    BankSlip,
    /// Cash or card machine on delivery/pickup.
    OnDelivery,
    /// Order arranged over a messaging app.
    Messenger,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::InstantTransfer => "instant_transfer",
            PaymentMethod::BankSlip => "bank_slip",
            PaymentMethod::OnDelivery => "on_delivery",
            PaymentMethod::Messenger => "messenger",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit card",
            PaymentMethod::InstantTransfer => "Instant transfer",
            PaymentMethod::BankSlip => "Bank slip",
            PaymentMethod::OnDelivery => "Pay on delivery",
            PaymentMethod::Messenger => "Arrange via messenger",
        }
    }

    /// Whether this method goes through the payment gateway before the
    /// order is persisted.
    pub fn uses_gateway(&self) -> bool {
        matches!(
            self,
            PaymentMethod::Card | PaymentMethod::InstantTransfer | PaymentMethod::BankSlip
        )
    }
}
