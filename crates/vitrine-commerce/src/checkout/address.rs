//! Delivery address types.

use serde::{Deserialize, Serialize};

/// A delivery address as filled in by the shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeliveryAddress {
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Apartment, block, etc.
    pub complement: Option<String>,
    /// Neighborhood (bairro).
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// State (UF), e.g. "SP".
    pub state: String,
    /// Postal code (CEP).
    pub zipcode: String,
}

impl DeliveryAddress {
    /// Create an address from the required fields.
    pub fn new(
        street: impl Into<String>,
        number: impl Into<String>,
        neighborhood: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            number: number.into(),
            complement: None,
            neighborhood: neighborhood.into(),
            city: city.into(),
            state: state.into(),
            zipcode: zipcode.into(),
        }
    }

    /// Check if all required fields are filled.
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty()
            && !self.number.trim().is_empty()
            && !self.neighborhood.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.state.trim().is_empty()
            && !self.zipcode.trim().is_empty()
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![format!("{}, {}", self.street, self.number)];
        if let Some(ref complement) = self.complement {
            parts.push(complement.clone());
        }
        parts.push(self.neighborhood.clone());
        parts.push(format!("{} - {}", self.city, self.state));
        parts.push(self.zipcode.clone());
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_completeness() {
        let addr = DeliveryAddress::new(
            "Rua das Flores",
            "123",
            "Centro",
            "Campinas",
            "SP",
            "13010-000",
        );
        assert!(addr.is_complete());

        let mut missing = addr.clone();
        missing.city = "  ".to_string();
        assert!(!missing.is_complete());
    }

    #[test]
    fn test_one_line() {
        let addr = DeliveryAddress::new(
            "Rua das Flores",
            "123",
            "Centro",
            "Campinas",
            "SP",
            "13010-000",
        );
        let line = addr.one_line();
        assert!(line.contains("Rua das Flores, 123"));
        assert!(line.contains("Campinas - SP"));
    }
}
