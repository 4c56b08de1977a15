//! Compact-parcel dimensional validation.
//!
//! The compact shipping tier only takes small, light packages; the cart is
//! consolidated into a single package profile and checked against the
//! carrier's bounds.

use crate::cart::CartLine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum total weight for the compact tier, in grams.
pub const COMPACT_MAX_WEIGHT_G: f64 = 300.0;
/// Consolidated height bounds, in centimeters.
pub const COMPACT_HEIGHT_MIN_CM: f64 = 1.0;
pub const COMPACT_HEIGHT_MAX_CM: f64 = 4.0;
/// Single-item width bounds, in centimeters.
pub const COMPACT_WIDTH_MIN_CM: f64 = 8.0;
pub const COMPACT_WIDTH_MAX_CM: f64 = 16.0;
/// Single-item length bounds, in centimeters.
pub const COMPACT_LENGTH_MIN_CM: f64 = 13.0;
pub const COMPACT_LENGTH_MAX_CM: f64 = 24.0;

/// The cart consolidated into a single package.
///
/// Height stacks (per-item height times quantity); width and length take
/// the largest single item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PackageProfile {
    /// Total weight in grams.
    pub total_weight_g: f64,
    /// Summed height in centimeters.
    pub total_height_cm: f64,
    /// Widest single item in centimeters.
    pub max_width_cm: f64,
    /// Longest single item in centimeters.
    pub max_length_cm: f64,
}

impl PackageProfile {
    /// Consolidate cart lines into one package.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let mut profile = PackageProfile::default();
        for line in lines {
            let qty = line.quantity as f64;
            profile.total_weight_g += line.dimensions.weight_g * qty;
            profile.total_height_cm += line.dimensions.height_cm * qty;
            profile.max_width_cm = profile.max_width_cm.max(line.dimensions.width_cm);
            profile.max_length_cm = profile.max_length_cm.max(line.dimensions.length_cm);
        }
        profile
    }
}

/// The specific bound a package violates.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ParcelViolation {
    #[error("package weighs {weight_g}g, above the {max}g limit", max = COMPACT_MAX_WEIGHT_G)]
    Overweight { weight_g: f64 },

    #[error(
        "stacked height {height_cm}cm outside the {min}-{max}cm range",
        min = COMPACT_HEIGHT_MIN_CM,
        max = COMPACT_HEIGHT_MAX_CM
    )]
    HeightOutOfRange { height_cm: f64 },

    #[error(
        "item width {width_cm}cm outside the {min}-{max}cm range",
        min = COMPACT_WIDTH_MIN_CM,
        max = COMPACT_WIDTH_MAX_CM
    )]
    WidthOutOfRange { width_cm: f64 },

    #[error(
        "item length {length_cm}cm outside the {min}-{max}cm range",
        min = COMPACT_LENGTH_MIN_CM,
        max = COMPACT_LENGTH_MAX_CM
    )]
    LengthOutOfRange { length_cm: f64 },
}

/// Check a package against the compact-tier bounds.
///
/// Bounds are checked in a fixed order (weight, height, width, length) so
/// the reported violation is deterministic.
pub fn validate_compact(profile: &PackageProfile) -> Result<(), ParcelViolation> {
    if profile.total_weight_g > COMPACT_MAX_WEIGHT_G {
        return Err(ParcelViolation::Overweight {
            weight_g: profile.total_weight_g,
        });
    }
    if profile.total_height_cm < COMPACT_HEIGHT_MIN_CM
        || profile.total_height_cm > COMPACT_HEIGHT_MAX_CM
    {
        return Err(ParcelViolation::HeightOutOfRange {
            height_cm: profile.total_height_cm,
        });
    }
    if profile.max_width_cm < COMPACT_WIDTH_MIN_CM || profile.max_width_cm > COMPACT_WIDTH_MAX_CM
    {
        return Err(ParcelViolation::WidthOutOfRange {
            width_cm: profile.max_width_cm,
        });
    }
    if profile.max_length_cm < COMPACT_LENGTH_MIN_CM
        || profile.max_length_cm > COMPACT_LENGTH_MAX_CM
    {
        return Err(ParcelViolation::LengthOutOfRange {
            length_cm: profile.max_length_cm,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::{Dimensions, Product};
    use crate::ids::StoreId;
    use crate::money::{Currency, Money};

    fn cart_with(dimensions: Dimensions, quantity: i64) -> Cart {
        let mut cart = Cart::new(StoreId::new("store-1"));
        let product = Product::new(
            StoreId::new("store-1"),
            "REF-1",
            "Adesivo",
            Money::new(500, Currency::BRL),
        )
        .with_dimensions(dimensions);
        cart.add_product(&product, quantity).unwrap();
        cart
    }

    #[test]
    fn test_small_package_passes() {
        let cart = cart_with(Dimensions::new(50.0, 1.0, 12.0, 18.0), 2);
        let profile = PackageProfile::from_lines(&cart.lines);

        assert_eq!(profile.total_weight_g, 100.0);
        assert_eq!(profile.total_height_cm, 2.0);
        assert!(validate_compact(&profile).is_ok());
    }

    #[test]
    fn test_overweight_package() {
        // Consolidated weight 350g
        let cart = cart_with(Dimensions::new(175.0, 1.0, 12.0, 18.0), 2);
        let profile = PackageProfile::from_lines(&cart.lines);

        assert_eq!(
            validate_compact(&profile),
            Err(ParcelViolation::Overweight { weight_g: 350.0 })
        );
    }

    #[test]
    fn test_stacked_height_exceeds() {
        // 1.5cm each, five of them: 7.5cm stacked
        let cart = cart_with(Dimensions::new(20.0, 1.5, 12.0, 18.0), 5);
        let profile = PackageProfile::from_lines(&cart.lines);

        assert!(matches!(
            validate_compact(&profile),
            Err(ParcelViolation::HeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_width_and_length_bounds() {
        let narrow = PackageProfile {
            total_weight_g: 100.0,
            total_height_cm: 2.0,
            max_width_cm: 5.0,
            max_length_cm: 18.0,
        };
        assert!(matches!(
            validate_compact(&narrow),
            Err(ParcelViolation::WidthOutOfRange { .. })
        ));

        let long = PackageProfile {
            total_weight_g: 100.0,
            total_height_cm: 2.0,
            max_width_cm: 12.0,
            max_length_cm: 30.0,
        };
        assert!(matches!(
            validate_compact(&long),
            Err(ParcelViolation::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_cart_is_below_height_minimum() {
        let profile = PackageProfile::from_lines(&[]);
        assert!(matches!(
            validate_compact(&profile),
            Err(ParcelViolation::HeightOutOfRange { .. })
        ));
    }
}
