//! Order types.

use crate::cart::{LineItem, OrderSummary};
use crate::checkout::Address;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Payment accepted.
    Confirmed,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// How the customer chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer email.
    pub email: String,
    /// Items snapshotted from the cart.
    pub items: Vec<OrderItem>,
    /// Order status.
    pub status: OrderStatus,
    /// Subtotal, shipping, tax and total at the time of the order.
    pub summary: OrderSummary,
    /// Shipping address.
    pub shipping_address: Address,
    /// Payment method.
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Amount charged.
    pub fn total(&self) -> Money {
        self.summary.total
    }
}

/// One line of an order, detached from the live product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Thumbnail, if the product had images.
    pub product_image: Option<String>,
    pub quantity: i64,
    /// Unit price when ordered.
    pub price: Money,
    pub selected_size: Option<String>,
    /// Selected color name.
    pub selected_color: Option<String>,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            product_image: item.product.primary_image().map(str::to_string),
            quantity: item.quantity,
            price: item.product.price,
            selected_size: item.selected_size.clone(),
            selected_color: item.selected_color.as_ref().map(|c| c.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, ProductColor};
    use crate::money::Currency;

    #[test]
    fn test_order_item_from_line() {
        let product = Product::new("p1", "Tee", Money::new(2500, Currency::USD), "tops")
            .with_image("/img/tee-front.jpg")
            .with_image("/img/tee-back.jpg");
        let line = LineItem::new(
            product,
            2,
            Some("M".to_string()),
            Some(ProductColor::new("Black", "#000")),
        );

        let item = OrderItem::from(&line);
        assert_eq!(item.product_id.as_str(), "p1");
        assert_eq!(item.product_image.as_deref(), Some("/img/tee-front.jpg"));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price.amount_cents, 2500);
        assert_eq!(item.selected_color.as_deref(), Some("Black"));
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(OrderStatus::default().as_str(), "pending");
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PayPal).unwrap(),
            r#""paypal""#
        );
    }
}
