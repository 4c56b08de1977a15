//! Debounced carrier-quote fetching.
//!
//! Address fields change on every keystroke; a fetch is only issued after
//! the debounce window passes without a newer request. Each request gets a
//! monotonically increasing sequence number, and a response whose sequence
//! is no longer the latest is discarded instead of overwriting fresher
//! state. Transport failures degrade to an empty quote list so checkout is
//! never blocked.

use crate::services::{CarrierRateService, RateRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};
use vitrine_commerce::shipping::CarrierQuote;

/// Default debounce window for address changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// The latest published quotes, tagged with the sequence that produced them.
#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    /// Sequence number of the request these quotes answer.
    pub seq: u64,
    /// The quotes; empty when the fetch failed or none are available.
    pub quotes: Vec<CarrierQuote>,
}

/// Debounced, sequence-guarded quote fetcher.
pub struct QuoteFetcher<S> {
    service: Arc<S>,
    debounce: Duration,
    seq: Arc<AtomicU64>,
    tx: watch::Sender<QuoteState>,
}

impl<S: CarrierRateService + 'static> QuoteFetcher<S> {
    /// Create a fetcher with the default debounce window.
    pub fn new(service: Arc<S>) -> Self {
        Self::with_debounce(service, DEFAULT_DEBOUNCE)
    }

    /// Create a fetcher with a custom debounce window.
    pub fn with_debounce(service: Arc<S>, debounce: Duration) -> Self {
        let (tx, _rx) = watch::channel(QuoteState::default());
        Self {
            service,
            debounce,
            seq: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    /// Schedule a fetch for the given request.
    ///
    /// Supersedes any request still inside its debounce window; the
    /// superseded request never reaches the network.
    pub fn request(&self, request: RateRequest) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let service = Arc::clone(&self.service);
        let latest = Arc::clone(&self.seq);
        let tx = self.tx.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != seq {
                // Superseded while debouncing; skip the fetch entirely
                return;
            }

            let quotes = match service.fetch_quotes(&request).await {
                Ok(quotes) => quotes,
                Err(e) => {
                    warn!(error = %e, "quote fetch failed; continuing without quotes");
                    Vec::new()
                }
            };

            if latest.load(Ordering::SeqCst) != seq {
                debug!(seq, "discarding stale quote response");
                return;
            }
            tx.send_replace(QuoteState { seq, quotes });
        });
    }

    /// Watch for published quote states.
    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.tx.subscribe()
    }

    /// The latest published quotes.
    pub fn latest(&self) -> Vec<CarrierQuote> {
        self.tx.borrow().quotes.clone()
    }
}
