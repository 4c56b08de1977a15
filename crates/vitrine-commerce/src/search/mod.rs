//! Product search module.
//!
//! Fuzzy matching over the store catalog for the public storefront.

mod fuzzy;

pub use fuzzy::{search_products, SearchHit, SCORE_THRESHOLD};
