//! Store configuration.
//!
//! Configuration is passed explicitly into every component that needs it;
//! nothing reads ambient state.

use serde::{Deserialize, Serialize};
use vitrine_commerce::checkout::PaymentMethod;
use vitrine_commerce::ids::StoreId;
use vitrine_commerce::money::Currency;
use vitrine_commerce::shipping::ShippingSettings;

/// Everything the checkout flow needs to know about a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// The store.
    pub store_id: StoreId,
    /// Display name.
    pub name: String,
    /// Store currency.
    pub currency: Currency,
    /// Shipping configuration for the eligibility engine.
    pub shipping: ShippingSettings,
    /// Payment methods the store accepts.
    pub accepted_payments: Vec<PaymentMethod>,
    /// Discount offered for instant-transfer payments, as a percentage.
    pub instant_transfer_discount_percent: Option<f64>,
    /// Phone number for messenger-arranged orders.
    pub messenger_phone: Option<String>,
}

impl StoreConfig {
    /// Whether the store accepts a payment method.
    pub fn accepts(&self, method: PaymentMethod) -> bool {
        self.accepted_payments.contains(&method)
    }

    /// The discount percentage for a payment method, if the store offers one.
    ///
    /// Only instant transfer carries a discount.
    pub fn payment_discount_percent(&self, method: PaymentMethod) -> Option<f64> {
        match method {
            PaymentMethod::InstantTransfer => self.instant_transfer_discount_percent,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_commerce::shipping::{FreeShippingPolicy, FreeShippingScope};

    fn config() -> StoreConfig {
        StoreConfig {
            store_id: StoreId::new("store-1"),
            name: "Loja da Ana".to_string(),
            currency: Currency::BRL,
            shipping: ShippingSettings {
                store_city: "Campinas".to_string(),
                store_state: "SP".to_string(),
                origin_zipcode: "13010-000".to_string(),
                pickup_enabled: true,
                carrier_enabled: true,
                rules: Vec::new(),
                free_shipping: Some(FreeShippingPolicy {
                    minimum: vitrine_commerce::Money::new(10000, Currency::BRL),
                    scope: FreeShippingScope::All,
                }),
                express_service_id: 1,
                economy_service_id: 2,
                compact_service_id: 3,
            },
            accepted_payments: vec![PaymentMethod::Card, PaymentMethod::InstantTransfer],
            instant_transfer_discount_percent: Some(5.0),
            messenger_phone: Some("(19) 99888-7766".to_string()),
        }
    }

    #[test]
    fn test_accepts() {
        let config = config();
        assert!(config.accepts(PaymentMethod::Card));
        assert!(!config.accepts(PaymentMethod::BankSlip));
    }

    #[test]
    fn test_discount_only_for_instant_transfer() {
        let config = config();
        assert_eq!(
            config.payment_discount_percent(PaymentMethod::InstantTransfer),
            Some(5.0)
        );
        assert_eq!(config.payment_discount_percent(PaymentMethod::Card), None);
    }
}
