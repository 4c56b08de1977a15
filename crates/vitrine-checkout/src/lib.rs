//! Order submission orchestration and external-service seams for Vitrine.
//!
//! This crate drives checkout against the hosted backend: the sequential
//! order-submission flow, the payment gateway and order repository traits,
//! debounced carrier-quote fetching with a stale-response guard, cancellable
//! payment-status polling, and the messaging deep link.
//!
//! Persistence, payment capture, and carrier rating are opaque services
//! behind the traits in [`services`]; this crate only sequences requests and
//! translates failures. Consistency across the order/item/coupon-usage
//! writes is the backing store's concern.

pub mod config;
pub mod deeplink;
pub mod error;
pub mod orchestrator;
pub mod polling;
pub mod quotes;
pub mod services;

pub use config::StoreConfig;
pub use error::CheckoutError;
pub use orchestrator::{CheckoutOrchestrator, SubmitOutcome, SubmitRequest};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::deeplink::{messenger_link, normalize_phone, order_summary};
    pub use crate::error::CheckoutError;
    pub use crate::orchestrator::{CheckoutOrchestrator, SubmitOutcome, SubmitRequest};
    pub use crate::polling::{PaymentPoller, PollState};
    pub use crate::quotes::{QuoteFetcher, QuoteState};
    pub use crate::services::{
        CardCharge, CardDetails, CarrierRateService, ChargeRequest, GatewayResponse,
        MessengerLauncher, OrderRepository, PaymentGateway, PaymentStatus, RateRequest,
    };
}
