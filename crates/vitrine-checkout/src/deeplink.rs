//! Messaging deep links.
//!
//! Messenger-arranged orders hand the shopper off to an external messaging
//! app through a `wa.me` URL carrying the formatted order summary. Pure
//! string code, no network.

use vitrine_commerce::checkout::{Order, OrderItem};

/// Country code prepended to local numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Build the deep link for a phone number and message.
pub fn messenger_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone, DEFAULT_COUNTRY_CODE),
        percent_encode(message)
    )
}

/// Normalize a phone number to international digits.
///
/// Strips formatting and trunk zeros; local numbers get the country code
/// prepended. Numbers already in international format (longer than a local
/// number and starting with the country code) pass through.
pub fn normalize_phone(phone: &str, country_code: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');
    if digits.starts_with(country_code) && digits.len() > 11 {
        digits.to_string()
    } else {
        format!("{country_code}{digits}")
    }
}

/// Format an order for the messenger handoff.
pub fn order_summary(order: &Order, items: &[OrderItem]) -> String {
    let mut lines = vec![format!("*Order {}*", order.number), String::new()];

    for item in items {
        lines.push(format!(
            "{}x {} - {}",
            item.quantity,
            item.name,
            item.total.display()
        ));
    }

    lines.push(String::new());
    lines.push(format!("Subtotal: {}", order.totals.subtotal.display()));
    if order.totals.has_discounts() {
        lines.push(format!("Discounts: -{}", order.totals.savings().display()));
    }
    lines.push(format!(
        "Delivery: {} - {}",
        order.delivery_method.display_name(),
        order.totals.shipping_fee.display()
    ));
    lines.push(format!("*Total: {}*", order.totals.total.display()));
    lines.push(format!("Payment: {}", order.payment_method.display_name()));

    lines.join("\n")
}

/// Percent-encode everything outside the unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_commerce::checkout::{
        compose_totals, CustomerInfo, OrderStatus, PaymentMethod,
    };
    use vitrine_commerce::ids::{OrderId, OrderItemId, StoreId};
    use vitrine_commerce::money::{Currency, Money};
    use vitrine_commerce::shipping::DeliveryMethod;

    #[test]
    fn test_normalize_local_number() {
        assert_eq!(
            normalize_phone("(19) 99888-7766", DEFAULT_COUNTRY_CODE),
            "5519998887766"
        );
    }

    #[test]
    fn test_normalize_international_number() {
        assert_eq!(
            normalize_phone("+55 19 99888-7766", DEFAULT_COUNTRY_CODE),
            "5519998887766"
        );
    }

    #[test]
    fn test_local_number_with_55_area_code() {
        // Area code 55 on an 11-digit local number still gets the country code
        assert_eq!(
            normalize_phone("55 99988-7766", DEFAULT_COUNTRY_CODE),
            "5555999887766"
        );
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("ola mundo"), "ola%20mundo");
        assert_eq!(percent_encode("R$10,00"), "R%2410%2C00");
        assert_eq!(percent_encode("abc-123_~."), "abc-123_~.");
    }

    #[test]
    fn test_messenger_link_for_order() {
        let totals = compose_totals(
            Money::new(5000, Currency::BRL),
            Money::zero(Currency::BRL),
            PaymentMethod::Messenger,
            None,
            Money::zero(Currency::BRL),
        )
        .unwrap();

        let order_id = OrderId::new("order-1");
        let order = Order {
            id: order_id.clone(),
            number: "PED-1700000000".to_string(),
            store_id: StoreId::new("store-1"),
            customer: CustomerInfo::new("Ana", "ana@example.com"),
            delivery_address: None,
            delivery_method: DeliveryMethod::Pickup,
            payment_method: PaymentMethod::Messenger,
            status: OrderStatus::PendingManual,
            totals,
            coupon_code: None,
            note: None,
            created_at: 1_700_000_000,
        };
        let items = vec![OrderItem {
            id: OrderItemId::new("item-1"),
            order_id,
            product_id: None,
            name: "Caneca esmaltada".to_string(),
            quantity: 2,
            unit_price: Money::new(2500, Currency::BRL),
            total: Money::new(5000, Currency::BRL),
        }];

        let url = messenger_link("(19) 99888-7766", &order_summary(&order, &items));
        assert!(url.starts_with("https://wa.me/5519998887766?text="));
        assert!(url.contains("PED-1700000000"));
        // The summary itself is fully encoded
        assert!(!url.contains(' '));
    }
}
