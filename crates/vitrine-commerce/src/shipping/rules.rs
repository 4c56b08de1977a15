//! Store shipping rules for the local courier method.

use crate::checkout::DeliveryAddress;
use crate::ids::{ShippingRuleId, StoreId};
use crate::money::Money;
use crate::shipping::{digits, normalize};
use serde::{Deserialize, Serialize};

/// What part of the address a rule matches on.
///
/// Ordered from most to least specific; rule matching walks this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleScope {
    /// Matches the neighborhood (bairro).
    Neighborhood,
    /// Matches the city.
    City,
    /// Matches the postal code (CEP).
    Zipcode,
}

impl RuleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleScope::Neighborhood => "neighborhood",
            RuleScope::City => "city",
            RuleScope::Zipcode => "zipcode",
        }
    }
}

/// A courier fee rule configured by the store owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingRule {
    /// Unique rule identifier.
    pub id: ShippingRuleId,
    /// Owning store.
    pub store_id: StoreId,
    /// What the rule matches on.
    pub scope: RuleScope,
    /// The matched value (neighborhood name, city name, or CEP).
    pub scope_value: String,
    /// Courier fee for this area.
    pub fee: Money,
    /// Whether the rule is active.
    pub active: bool,
}

impl ShippingRule {
    /// Create a new active rule.
    pub fn new(
        store_id: StoreId,
        scope: RuleScope,
        scope_value: impl Into<String>,
        fee: Money,
    ) -> Self {
        Self {
            id: ShippingRuleId::generate(),
            store_id,
            scope,
            scope_value: scope_value.into(),
            fee,
            active: true,
        }
    }

    /// Check whether this rule matches the address.
    pub fn matches(&self, address: &DeliveryAddress) -> bool {
        if !self.active {
            return false;
        }
        match self.scope {
            RuleScope::Neighborhood => {
                normalize(&self.scope_value) == normalize(&address.neighborhood)
            }
            RuleScope::City => normalize(&self.scope_value) == normalize(&address.city),
            RuleScope::Zipcode => {
                let rule = digits(&self.scope_value);
                !rule.is_empty() && rule == digits(&address.zipcode)
            }
        }
    }
}

/// Pick the most specific active rule matching the address.
///
/// Specificity order is neighborhood, then city, then zipcode; within one
/// level the first matching rule wins.
pub fn match_rule<'a>(
    rules: &'a [ShippingRule],
    address: &DeliveryAddress,
) -> Option<&'a ShippingRule> {
    for scope in [RuleScope::Neighborhood, RuleScope::City, RuleScope::Zipcode] {
        if let Some(rule) = rules
            .iter()
            .find(|r| r.scope == scope && r.matches(address))
        {
            return Some(rule);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn store() -> StoreId {
        StoreId::new("store-1")
    }

    fn brl(cents: i64) -> Money {
        Money::new(cents, Currency::BRL)
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress::new(
            "Rua das Flores",
            "123",
            "Centro",
            "Campinas",
            "SP",
            "13010-000",
        )
    }

    #[test]
    fn test_neighborhood_beats_city() {
        let rules = vec![
            ShippingRule::new(store(), RuleScope::City, "Campinas", brl(1500)),
            ShippingRule::new(store(), RuleScope::Neighborhood, "Centro", brl(800)),
        ];

        let matched = match_rule(&rules, &address()).unwrap();
        assert_eq!(matched.scope, RuleScope::Neighborhood);
        assert_eq!(matched.fee.amount_cents, 800);
    }

    #[test]
    fn test_city_beats_zipcode() {
        let rules = vec![
            ShippingRule::new(store(), RuleScope::Zipcode, "13010-000", brl(500)),
            ShippingRule::new(store(), RuleScope::City, "Campinas", brl(1500)),
        ];

        let matched = match_rule(&rules, &address()).unwrap();
        assert_eq!(matched.scope, RuleScope::City);
    }

    #[test]
    fn test_match_is_normalized() {
        let rules = vec![ShippingRule::new(
            store(),
            RuleScope::Neighborhood,
            "  CENTRO ",
            brl(800),
        )];
        assert!(match_rule(&rules, &address()).is_some());
    }

    #[test]
    fn test_zipcode_compares_digits_only() {
        let rules = vec![ShippingRule::new(
            store(),
            RuleScope::Zipcode,
            "13010000",
            brl(500),
        )];
        // Address zipcode has a dash
        assert!(match_rule(&rules, &address()).is_some());
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let mut rule = ShippingRule::new(store(), RuleScope::City, "Campinas", brl(1500));
        rule.active = false;
        assert!(match_rule(&[rule], &address()).is_none());
    }

    #[test]
    fn test_no_match() {
        let rules = vec![ShippingRule::new(
            store(),
            RuleScope::City,
            "Valinhos",
            brl(1500),
        )];
        assert!(match_rule(&rules, &address()).is_none());
    }
}
