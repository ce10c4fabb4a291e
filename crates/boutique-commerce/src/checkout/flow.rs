//! Simulated checkout.
//!
//! There is no payment provider: placing an order validates the request,
//! waits out a configured processing delay, snapshots the cart into an
//! [`Order`] and empties the cart.

use crate::cart::CartStore;
use crate::checkout::{Address, Order, OrderItem, OrderStatus, PaymentMethod};
use crate::config::CheckoutConfig;
use crate::ids::OrderId;
use crate::CommerceError;
use boutique_kv::KeyValueStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the customer submitted on the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub email: String,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
}

/// Places orders against a cart.
#[derive(Debug, Clone)]
pub struct Checkout {
    delay: Duration,
}

impl Checkout {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            delay: config.delay(),
        }
    }

    /// Place an order for everything in `cart`.
    ///
    /// On success the cart is cleared (and the empty list persisted). On
    /// error the cart is left untouched.
    pub fn place_order<B: KeyValueStore>(
        &self,
        cart: &mut CartStore<B>,
        request: CheckoutRequest,
    ) -> Result<Order, CommerceError> {
        validate(cart, &request)?;

        if !self.delay.is_zero() {
            let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
            tracing::info!(delay_ms, "processing payment");
            std::thread::sleep(self.delay);
        }

        let now = Utc::now();
        let order = Order {
            id: OrderId::generate(),
            email: request.email,
            items: cart.items().iter().map(OrderItem::from).collect(),
            status: OrderStatus::Confirmed,
            summary: cart.summary(),
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            created_at: now,
            updated_at: now,
        };
        cart.clear_cart();

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            total = %order.total(),
            "order placed"
        );
        Ok(order)
    }
}

fn validate<B: KeyValueStore>(
    cart: &CartStore<B>,
    request: &CheckoutRequest,
) -> Result<(), CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::CheckoutIncomplete("items".to_string()));
    }
    if !is_plausible_email(&request.email) {
        return Err(CommerceError::CheckoutIncomplete("email".to_string()));
    }
    if let Some(field) = request.shipping_address.missing_field() {
        return Err(CommerceError::CheckoutIncomplete(field.to_string()));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && matches!(domain.rsplit_once('.'), Some((name, tld)) if !name.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
