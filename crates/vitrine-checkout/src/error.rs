//! Checkout error types.
//!
//! Eligibility is not an error: unavailable shipping methods surface as
//! disabled options in the shipping assessment, never through this enum.

use thiserror::Error;
use vitrine_commerce::CommerceError;

/// Errors that can occur while submitting an order.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Missing or invalid required field, caught before submission.
    #[error("Missing or invalid field: {0}")]
    Validation(String),

    /// Payment refused; nothing was persisted.
    #[error("Payment refused: {0}")]
    Payment(String),

    /// A persistence step failed. No automatic retry.
    #[error("Could not save {0}")]
    Persistence(String),

    /// Transport-level failure talking to a serverless function.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Domain arithmetic or validation failure.
    #[error(transparent)]
    Domain(#[from] CommerceError),
}
