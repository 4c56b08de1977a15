//! Payment confirmation polling.
//!
//! Instant-transfer and bank-slip payments confirm asynchronously; the
//! confirmation view polls the gateway at a fixed interval. The poll loop
//! is an explicit task bound to the poller's lifetime: it stops on a
//! terminal status, on `cancel`, or when the poller is dropped.

use crate::services::{PaymentGateway, PaymentStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default interval between status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Observed payment state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Not confirmed yet.
    Waiting,
    /// Payment confirmed.
    Paid,
    /// Payment failed or expired.
    Failed(String),
}

impl PollState {
    /// Terminal states stop the poll loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Waiting)
    }
}

/// A cancellable polling task for one charge.
pub struct PaymentPoller {
    handle: JoinHandle<()>,
    rx: watch::Receiver<PollState>,
}

impl PaymentPoller {
    /// Start polling a charge.
    pub fn start<G: PaymentGateway + 'static>(
        gateway: Arc<G>,
        charge_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let charge_id = charge_id.into();
        let (tx, rx) = watch::channel(PollState::Waiting);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                debug!(charge_id = %charge_id, "checking payment status");

                // Attempted once per tick; a failed check waits for the next
                let response = match gateway.charge_status(&charge_id).await {
                    Ok(response) => response,
                    Err(e) => {
                        debug!(charge_id = %charge_id, error = %e, "status check failed");
                        continue;
                    }
                };

                let state = match response.payment_status() {
                    PaymentStatus::Approved => PollState::Paid,
                    PaymentStatus::Pending => PollState::Waiting,
                    PaymentStatus::Declined => PollState::Failed(
                        response
                            .error
                            .unwrap_or_else(|| "payment failed".to_string()),
                    ),
                };

                let terminal = state.is_terminal();
                let _ = tx.send(state);
                if terminal {
                    break;
                }
            }
        });

        Self { handle, rx }
    }

    /// The last observed state.
    pub fn state(&self) -> PollState {
        self.rx.borrow().clone()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.rx.clone()
    }

    /// Whether the poll loop has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for PaymentPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::services::{CardCharge, ChargeRequest, GatewayResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reports "pending" until the configured number of checks, then "paid".
    struct FakeGateway {
        checks: AtomicUsize,
        paid_after: usize,
    }

    impl FakeGateway {
        fn paid_after(n: usize) -> Arc<Self> {
            Arc::new(Self {
                checks: AtomicUsize::new(0),
                paid_after: n,
            })
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn authorize_card(
            &self,
            _charge: &CardCharge,
        ) -> Result<GatewayResponse, CheckoutError> {
            unimplemented!("not used by the poller")
        }

        async fn create_instant_charge(
            &self,
            _charge: &ChargeRequest,
        ) -> Result<GatewayResponse, CheckoutError> {
            unimplemented!("not used by the poller")
        }

        async fn generate_bank_slip(
            &self,
            _charge: &ChargeRequest,
        ) -> Result<GatewayResponse, CheckoutError> {
            unimplemented!("not used by the poller")
        }

        async fn charge_status(&self, _charge_id: &str) -> Result<GatewayResponse, CheckoutError> {
            let check = self.checks.fetch_add(1, Ordering::SeqCst) + 1;
            if check >= self.paid_after {
                Ok(GatewayResponse::ok("paid"))
            } else {
                Ok(GatewayResponse::ok("pending"))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_paid_then_stops() {
        let gateway = FakeGateway::paid_after(3);
        let poller = PaymentPoller::start(Arc::clone(&gateway), "ch_1", Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(poller.state(), PollState::Paid);
        assert!(poller.is_finished());
        // Loop stopped at the terminal status; no further checks
        assert_eq!(gateway.checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_polling() {
        let gateway = FakeGateway::paid_after(usize::MAX);
        let poller = PaymentPoller::start(Arc::clone(&gateway), "ch_1", Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(12)).await;
        poller.cancel();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let checks_at_cancel = gateway.checks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.checks.load(Ordering::SeqCst), checks_at_cancel);
        assert_eq!(poller.state(), PollState::Waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_the_task() {
        let gateway = FakeGateway::paid_after(usize::MAX);
        {
            let _poller =
                PaymentPoller::start(Arc::clone(&gateway), "ch_1", Duration::from_secs(5));
            tokio::time::sleep(Duration::from_secs(12)).await;
        }

        let checks_after_drop = gateway.checks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.checks.load(Ordering::SeqCst), checks_after_drop);
    }
}
