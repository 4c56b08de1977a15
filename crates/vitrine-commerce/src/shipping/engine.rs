//! Delivery-method eligibility and fee engine.
//!
//! Every relevant input change (address fields, cart contents, fetched
//! quotes) re-runs `evaluate`; eligibility is computed independently per
//! method and an ineligible selection falls back deterministically.

use crate::cart::Cart;
use crate::checkout::DeliveryAddress;
use crate::error::CommerceError;
use crate::money::Money;
use crate::shipping::{
    match_rule, normalize, validate_compact, CarrierQuote, PackageProfile, ShippingRule,
};
use serde::{Deserialize, Serialize};

/// A way of getting the order to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMethod {
    /// Shopper picks up at the store.
    Pickup,
    /// Store's own courier, same city only.
    Courier,
    /// Carrier express tier.
    CarrierExpress,
    /// Carrier economy tier.
    CarrierEconomy,
    /// Reduced-rate tier with strict dimensional caps.
    CompactParcel,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Courier => "courier",
            DeliveryMethod::CarrierExpress => "carrier_express",
            DeliveryMethod::CarrierEconomy => "carrier_economy",
            DeliveryMethod::CompactParcel => "compact_parcel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "Pick up at the store",
            DeliveryMethod::Courier => "Local delivery",
            DeliveryMethod::CarrierExpress => "Express",
            DeliveryMethod::CarrierEconomy => "Economy",
            DeliveryMethod::CompactParcel => "Compact parcel",
        }
    }

    /// All methods, in display order.
    pub const ALL: [DeliveryMethod; 5] = [
        DeliveryMethod::Pickup,
        DeliveryMethod::Courier,
        DeliveryMethod::CarrierExpress,
        DeliveryMethod::CarrierEconomy,
        DeliveryMethod::CompactParcel,
    ];

    /// Fallback priority when the selected method becomes ineligible.
    const FALLBACK: [DeliveryMethod; 3] = [
        DeliveryMethod::CarrierEconomy,
        DeliveryMethod::Courier,
        DeliveryMethod::Pickup,
    ];
}

/// Geographic scope of the free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FreeShippingScope {
    /// Any destination.
    #[default]
    All,
    /// Only destinations in the store's city.
    SameCity,
    /// Only destinations in the store's state.
    SameState,
}

/// Free shipping above a subtotal, within a geographic scope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreeShippingPolicy {
    /// Minimum subtotal to qualify.
    pub minimum: Money,
    /// Where the offer applies.
    pub scope: FreeShippingScope,
}

/// Store shipping configuration, passed explicitly to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingSettings {
    /// Store city (courier and free-shipping scope checks).
    pub store_city: String,
    /// Store state (free-shipping scope checks).
    pub store_state: String,
    /// Origin CEP for carrier quotes.
    pub origin_zipcode: String,
    /// Store offers pickup.
    pub pickup_enabled: bool,
    /// Store offers carrier shipping.
    pub carrier_enabled: bool,
    /// Courier fee rules.
    pub rules: Vec<ShippingRule>,
    /// Free shipping offer, if any.
    pub free_shipping: Option<FreeShippingPolicy>,
    /// Carrier service id for the express tier.
    pub express_service_id: i64,
    /// Carrier service id for the economy tier.
    pub economy_service_id: i64,
    /// Carrier service id for the compact tier.
    pub compact_service_id: i64,
}

impl ShippingSettings {
    /// Whether the store ships exclusively via pickup.
    pub fn pickup_only(&self) -> bool {
        self.pickup_enabled && !self.carrier_enabled && self.rules.is_empty()
    }
}

/// One delivery method's eligibility and fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingOption {
    /// The method.
    pub method: DeliveryMethod,
    /// Whether the shopper can select it.
    pub eligible: bool,
    /// Fee when eligible; None otherwise, never zero as a fallback.
    pub fee: Option<Money>,
    /// Why the method is unavailable, for diagnostics.
    pub reason: Option<String>,
}

impl ShippingOption {
    fn eligible(method: DeliveryMethod, fee: Money) -> Self {
        Self {
            method,
            eligible: true,
            fee: Some(fee),
            reason: None,
        }
    }

    fn ineligible(method: DeliveryMethod, reason: impl Into<String>) -> Self {
        Self {
            method,
            eligible: false,
            fee: None,
            reason: Some(reason.into()),
        }
    }
}

/// Result of evaluating all delivery methods for the current inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAssessment {
    /// Per-method breakdown, in display order.
    pub options: Vec<ShippingOption>,
    /// The resolved selection after fallback, if any method is eligible.
    pub selected: Option<DeliveryMethod>,
    /// Fee of the resolved selection.
    pub fee: Option<Money>,
    /// Whether the free-shipping override zeroed the fees.
    pub free_shipping_applied: bool,
}

impl ShippingAssessment {
    /// Find the option for a method.
    pub fn option(&self, method: DeliveryMethod) -> Option<&ShippingOption> {
        self.options.iter().find(|o| o.method == method)
    }
}

/// Evaluates delivery-method eligibility against store settings.
#[derive(Debug)]
pub struct ShippingEngine<'a> {
    settings: &'a ShippingSettings,
}

impl<'a> ShippingEngine<'a> {
    /// Create an engine over the store's settings.
    pub fn new(settings: &'a ShippingSettings) -> Self {
        Self { settings }
    }

    /// Evaluate all methods for the current cart, address, and quotes.
    ///
    /// `selected` is the shopper's current choice; when it is ineligible
    /// (or None) the selection falls back to economy, then courier, then
    /// pickup. Pickup-only stores always resolve to pickup.
    pub fn evaluate(
        &self,
        cart: &Cart,
        address: Option<&DeliveryAddress>,
        quotes: &[CarrierQuote],
        selected: Option<DeliveryMethod>,
    ) -> Result<ShippingAssessment, CommerceError> {
        let subtotal = cart.subtotal()?;
        let zero = Money::zero(cart.currency);

        let mut options: Vec<ShippingOption> = DeliveryMethod::ALL
            .iter()
            .map(|&method| self.assess_method(method, cart, address, quotes))
            .collect();

        let free_shipping_applied = self.free_shipping_applies(subtotal, address);
        if free_shipping_applied {
            for option in options.iter_mut() {
                // Pickup is already zero
                if option.eligible && option.method != DeliveryMethod::Pickup {
                    option.fee = Some(zero);
                }
            }
        }

        let selected = self.resolve_selection(&options, selected);
        let fee = selected
            .and_then(|m| options.iter().find(|o| o.method == m))
            .and_then(|o| o.fee);

        Ok(ShippingAssessment {
            options,
            selected,
            fee,
            free_shipping_applied,
        })
    }

    fn assess_method(
        &self,
        method: DeliveryMethod,
        cart: &Cart,
        address: Option<&DeliveryAddress>,
        quotes: &[CarrierQuote],
    ) -> ShippingOption {
        match method {
            DeliveryMethod::Pickup => {
                if self.settings.pickup_enabled {
                    ShippingOption::eligible(method, Money::zero(cart.currency))
                } else {
                    ShippingOption::ineligible(method, "store does not offer pickup")
                }
            }
            DeliveryMethod::Courier => self.assess_courier(address, cart),
            DeliveryMethod::CarrierExpress => {
                self.assess_carrier(method, self.settings.express_service_id, quotes)
            }
            DeliveryMethod::CarrierEconomy => {
                self.assess_carrier(method, self.settings.economy_service_id, quotes)
            }
            DeliveryMethod::CompactParcel => self.assess_compact(cart, quotes),
        }
    }

    fn assess_courier(&self, address: Option<&DeliveryAddress>, _cart: &Cart) -> ShippingOption {
        let method = DeliveryMethod::Courier;
        let address = match address {
            Some(a) => a,
            None => return ShippingOption::ineligible(method, "no delivery address"),
        };

        if normalize(&address.city) != normalize(&self.settings.store_city) {
            return ShippingOption::ineligible(method, "outside the store's city");
        }

        match match_rule(&self.settings.rules, address) {
            Some(rule) => ShippingOption::eligible(method, rule.fee),
            None => ShippingOption::ineligible(method, "no delivery rule for this area"),
        }
    }

    fn assess_carrier(
        &self,
        method: DeliveryMethod,
        service_id: i64,
        quotes: &[CarrierQuote],
    ) -> ShippingOption {
        if !self.settings.carrier_enabled {
            return ShippingOption::ineligible(method, "store does not offer carrier shipping");
        }
        match CarrierQuote::for_service(quotes, service_id) {
            Some(quote) => ShippingOption::eligible(method, quote.effective_price()),
            None => ShippingOption::ineligible(method, "no quote for this destination"),
        }
    }

    fn assess_compact(&self, cart: &Cart, quotes: &[CarrierQuote]) -> ShippingOption {
        let method = DeliveryMethod::CompactParcel;
        if !self.settings.carrier_enabled {
            return ShippingOption::ineligible(method, "store does not offer carrier shipping");
        }

        let profile = PackageProfile::from_lines(&cart.lines);
        if let Err(violation) = validate_compact(&profile) {
            return ShippingOption::ineligible(method, violation.to_string());
        }

        match CarrierQuote::for_service(quotes, self.settings.compact_service_id) {
            Some(quote) => ShippingOption::eligible(method, quote.effective_price()),
            None => ShippingOption::ineligible(method, "no quote for this destination"),
        }
    }

    fn free_shipping_applies(&self, subtotal: Money, address: Option<&DeliveryAddress>) -> bool {
        let policy = match &self.settings.free_shipping {
            Some(p) => p,
            None => return false,
        };
        if subtotal.amount_cents < policy.minimum.amount_cents {
            return false;
        }
        match policy.scope {
            FreeShippingScope::All => true,
            FreeShippingScope::SameCity => address
                .map(|a| normalize(&a.city) == normalize(&self.settings.store_city))
                .unwrap_or(false),
            FreeShippingScope::SameState => address
                .map(|a| normalize(&a.state) == normalize(&self.settings.store_state))
                .unwrap_or(false),
        }
    }

    fn resolve_selection(
        &self,
        options: &[ShippingOption],
        selected: Option<DeliveryMethod>,
    ) -> Option<DeliveryMethod> {
        let is_eligible = |method: DeliveryMethod| {
            options
                .iter()
                .any(|o| o.method == method && o.eligible)
        };

        // Pickup-only stores force pickup
        if self.settings.pickup_only() && is_eligible(DeliveryMethod::Pickup) {
            return Some(DeliveryMethod::Pickup);
        }

        if let Some(method) = selected {
            if is_eligible(method) {
                return Some(method);
            }
        }

        for method in DeliveryMethod::FALLBACK {
            if is_eligible(method) {
                return Some(method);
            }
        }

        // Last resort: anything still selectable
        options.iter().find(|o| o.eligible).map(|o| o.method)
    }
}
