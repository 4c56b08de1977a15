//! Order submission orchestration.
//!
//! Submission runs a fixed sequence: validate, authorize payment when
//! card-based, persist the order row, persist item rows, record coupon
//! usage, clear the cart. Each step can fail independently; failures after
//! the order row exists are surfaced without compensation.

use crate::config::StoreConfig;
use crate::deeplink::{messenger_link, order_summary};
use crate::error::CheckoutError;
use crate::services::{
    CardCharge, CardDetails, ChargeRequest, GatewayResponse, MessengerLauncher, OrderRepository,
    PaymentGateway, PaymentStatus,
};
use tracing::{info, warn};
use vitrine_commerce::cart::Cart;
use vitrine_commerce::checkout::{
    compose_totals, CustomerInfo, DeliveryAddress, Order, OrderItem, OrderStatus, PaymentMethod,
};
use vitrine_commerce::coupon::{
    AppliedCoupon, Coupon, CouponDecision, CouponEvaluator, CouponUsage,
};
use vitrine_commerce::ids::OrderId;
use vitrine_commerce::shipping::{CarrierQuote, DeliveryMethod, ShippingEngine};

/// Everything the shopper chose, ready for submission.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Customer details.
    pub customer: CustomerInfo,
    /// Delivery address; optional for pickup.
    pub address: Option<DeliveryAddress>,
    /// Chosen delivery method.
    pub delivery_method: DeliveryMethod,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Card details, required for card payments.
    pub card: Option<CardDetails>,
    /// Coupon code, if one was entered.
    pub coupon_code: Option<String>,
    /// Customer note.
    pub note: Option<String>,
}

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The persisted order.
    pub order: Order,
    /// Its persisted items.
    pub items: Vec<OrderItem>,
    /// Gateway response for gateway-backed payments (charge id, QR
    /// payload, barcode).
    pub payment: Option<GatewayResponse>,
    /// The deep link opened for messenger-arranged orders.
    pub messenger_url: Option<String>,
}

/// Drives order submission against the external services.
pub struct CheckoutOrchestrator<R, G, M> {
    config: StoreConfig,
    repository: R,
    gateway: G,
    messenger: M,
}

impl<R, G, M> CheckoutOrchestrator<R, G, M>
where
    R: OrderRepository,
    G: PaymentGateway,
    M: MessengerLauncher,
{
    /// Create an orchestrator for a store.
    pub fn new(config: StoreConfig, repository: R, gateway: G, messenger: M) -> Self {
        Self {
            config,
            repository,
            gateway,
            messenger,
        }
    }

    /// Submit the cart as an order.
    ///
    /// The cart is cleared only after every persistence step ran.
    pub async fn submit(
        &self,
        cart: &mut Cart,
        coupons: &[Coupon],
        usages: &[CouponUsage],
        quotes: &[CarrierQuote],
        request: SubmitRequest,
    ) -> Result<SubmitOutcome, CheckoutError> {
        // Step 1: field validation
        self.validate(cart, &request)?;

        let subtotal = cart.subtotal()?;
        let shipping_fee = self.shipping_fee(cart, quotes, &request)?;
        let applied = self.evaluate_coupon(coupons, usages, subtotal, &request)?;

        let coupon_discount = applied
            .as_ref()
            .map(|a| a.discount)
            .unwrap_or_else(|| vitrine_commerce::Money::zero(cart.currency));

        let totals = compose_totals(
            subtotal,
            coupon_discount,
            request.payment_method,
            self.config.payment_discount_percent(request.payment_method),
            shipping_fee,
        )?;

        let order_id = OrderId::generate();
        let items: Vec<OrderItem> = cart
            .lines
            .iter()
            .map(|line| OrderItem::from_line(order_id.clone(), line))
            .collect::<Result<_, _>>()?;

        let mut order = Order {
            id: order_id,
            number: Order::generate_number(),
            store_id: self.config.store_id.clone(),
            customer: request.customer.clone(),
            delivery_address: request.address.clone(),
            delivery_method: request.delivery_method,
            payment_method: request.payment_method,
            status: OrderStatus::Pending,
            totals,
            coupon_code: applied.as_ref().map(|a| a.code.clone()),
            note: request.note.clone(),
            created_at: current_timestamp(),
        };

        // The deep link must open while the submit gesture is still live,
        // so it fires before persistence for messenger-arranged orders.
        let messenger_url = if request.payment_method == PaymentMethod::Messenger {
            let phone = self.config.messenger_phone.as_deref().ok_or_else(|| {
                CheckoutError::Validation("store has no messenger number".to_string())
            })?;
            let url = messenger_link(phone, &order_summary(&order, &items));
            self.messenger.open(&url)?;
            Some(url)
        } else {
            None
        };

        // Step 2: payment, before any persistence
        let payment = self.process_payment(&mut order, &request).await?;

        // Step 3: order row
        info!(order = %order.number, total = %order.totals.total, "creating order");
        self.repository.create_order(&order).await?;

        // Step 4: item rows. A failure here leaves the order row behind;
        // there is no compensating delete.
        if let Err(e) = self.repository.create_order_items(&items).await {
            warn!(
                order = %order.number,
                error = %e,
                "order row saved but item rows failed; order left without items"
            );
            return Err(e);
        }

        // Step 5: coupon usage
        if let Some(applied) = &applied {
            let usage = CouponUsage::new(
                applied.coupon_id.clone(),
                request.customer.email.clone(),
                order.id.clone(),
            );
            if let Err(e) = self.repository.record_coupon_usage(&usage).await {
                warn!(order = %order.number, error = %e, "coupon usage not recorded");
            }
        }

        // Step 6: clear cart
        cart.clear();
        info!(order = %order.number, status = order.status.as_str(), "order placed");

        Ok(SubmitOutcome {
            order,
            items,
            payment,
            messenger_url,
        })
    }

    fn validate(&self, cart: &Cart, request: &SubmitRequest) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::Validation("cart is empty".to_string()));
        }
        if request.customer.name.trim().is_empty() {
            return Err(CheckoutError::Validation("customer name".to_string()));
        }
        if request.customer.email.trim().is_empty() {
            return Err(CheckoutError::Validation("customer email".to_string()));
        }
        if request.delivery_method != DeliveryMethod::Pickup {
            match &request.address {
                Some(address) if address.is_complete() => {}
                _ => {
                    return Err(CheckoutError::Validation(
                        "delivery address".to_string(),
                    ))
                }
            }
        }
        if !self.config.accepts(request.payment_method) {
            return Err(CheckoutError::Validation(format!(
                "payment method {} not accepted",
                request.payment_method.as_str()
            )));
        }
        if request.payment_method == PaymentMethod::Card && request.card.is_none() {
            return Err(CheckoutError::Validation("card details".to_string()));
        }
        Ok(())
    }

    fn shipping_fee(
        &self,
        cart: &Cart,
        quotes: &[CarrierQuote],
        request: &SubmitRequest,
    ) -> Result<vitrine_commerce::Money, CheckoutError> {
        let engine = ShippingEngine::new(&self.config.shipping);
        let assessment = engine.evaluate(
            cart,
            request.address.as_ref(),
            quotes,
            Some(request.delivery_method),
        )?;

        let option = assessment
            .option(request.delivery_method)
            .filter(|o| o.eligible)
            .ok_or_else(|| {
                CheckoutError::Validation("selected delivery method is not available".to_string())
            })?;

        option.fee.ok_or_else(|| {
            CheckoutError::Validation("selected delivery method has no fee".to_string())
        })
    }

    fn evaluate_coupon(
        &self,
        coupons: &[Coupon],
        usages: &[CouponUsage],
        subtotal: vitrine_commerce::Money,
        request: &SubmitRequest,
    ) -> Result<Option<AppliedCoupon>, CheckoutError> {
        let code = match &request.coupon_code {
            Some(code) if !code.trim().is_empty() => code,
            _ => return Ok(None),
        };

        let evaluator = CouponEvaluator::new(coupons, usages);
        match evaluator.apply(code, subtotal, &request.customer.email) {
            CouponDecision::Accepted(applied) => Ok(Some(applied)),
            CouponDecision::Rejected(rejection) => {
                Err(CheckoutError::Validation(rejection.message()))
            }
        }
    }

    async fn process_payment(
        &self,
        order: &mut Order,
        request: &SubmitRequest,
    ) -> Result<Option<GatewayResponse>, CheckoutError> {
        let charge = ChargeRequest {
            order_number: order.number.clone(),
            amount: order.totals.total,
            customer_name: request.customer.name.clone(),
            customer_email: request.customer.email.clone(),
        };

        match request.payment_method {
            PaymentMethod::Card => {
                // `validate` guarantees the card is present
                let card = request.card.clone().ok_or_else(|| {
                    CheckoutError::Validation("card details".to_string())
                })?;
                let response = self
                    .gateway
                    .authorize_card(&CardCharge { card, charge })
                    .await?;
                match response.payment_status() {
                    PaymentStatus::Approved => order.status = OrderStatus::Confirmed,
                    PaymentStatus::Pending => order.status = OrderStatus::Pending,
                    PaymentStatus::Declined => {
                        return Err(CheckoutError::Payment(
                            response
                                .error
                                .unwrap_or_else(|| "card declined".to_string()),
                        ))
                    }
                }
                Ok(Some(response))
            }
            PaymentMethod::InstantTransfer => {
                let response = self.gateway.create_instant_charge(&charge).await?;
                if !response.success {
                    return Err(CheckoutError::Payment(
                        response
                            .error
                            .unwrap_or_else(|| "could not create charge".to_string()),
                    ));
                }
                order.status = OrderStatus::Pending;
                Ok(Some(response))
            }
            PaymentMethod::BankSlip => {
                let response = self.gateway.generate_bank_slip(&charge).await?;
                if !response.success {
                    return Err(CheckoutError::Payment(
                        response
                            .error
                            .unwrap_or_else(|| "could not generate bank slip".to_string()),
                    ));
                }
                order.status = OrderStatus::Pending;
                Ok(Some(response))
            }
            PaymentMethod::OnDelivery | PaymentMethod::Messenger => {
                order.status = OrderStatus::PendingManual;
                Ok(None)
            }
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
