//! Line items and their identity keys.

use crate::catalog::{Product, ProductColor};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stand-in for an absent size or color in a [`LineKey`].
pub const NO_SELECTION: &str = "none";

/// Identity of a cart line: product, selected size and selected color name.
///
/// Absent and empty selections normalize to [`NO_SELECTION`], so a line
/// added without a size and one added with `Some("none")` share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    product_id: ProductId,
    size: String,
    color: String,
}

impl LineKey {
    /// Build the key for a product and optional size/color selection.
    pub fn new(
        product_id: impl Into<ProductId>,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: normalize(size),
            color: normalize(color.map(|c| c.name.as_str())),
        }
    }

    /// The product this key refers to.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Selected size, `None` when nothing was selected.
    pub fn size(&self) -> Option<&str> {
        selection(&self.size)
    }

    /// Selected color name, `None` when nothing was selected.
    pub fn color_name(&self) -> Option<&str> {
        selection(&self.color)
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.product_id, self.size, self.color)
    }
}

fn normalize(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NO_SELECTION.to_string(),
    }
}

fn same_selection(value: Option<&str>, normalized: &str) -> bool {
    match value {
        Some(v) if !v.is_empty() => v == normalized,
        _ => normalized == NO_SELECTION,
    }
}

fn selection(value: &str) -> Option<&str> {
    (value != NO_SELECTION).then_some(value)
}

/// A line item in the cart.
///
/// Serialized with camelCase keys; absent selections are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Full product, as handed over when the line was added.
    pub product: Product,
    /// Quantity.
    pub quantity: i64,
    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    /// Selected color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<ProductColor>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product: Product,
        quantity: i64,
        selected_size: Option<String>,
        selected_color: Option<ProductColor>,
    ) -> Self {
        Self {
            product,
            quantity,
            selected_size,
            selected_color,
        }
    }

    /// Identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id.clone(),
            self.selected_size.as_deref(),
            self.selected_color.as_ref(),
        )
    }

    /// Check if this line has the given identity key.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && same_selection(self.selected_size.as_deref(), &key.size)
            && same_selection(
                self.selected_color.as_ref().map(|c| c.name.as_str()),
                &key.color,
            )
    }

    /// Current product price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn tee() -> Product {
        Product::new("prod-1", "Tee", Money::new(2500, Currency::USD), "tops")
    }

    #[test]
    fn test_key_display_uses_sentinel() {
        let black = ProductColor::new("Black", "#000000");
        assert_eq!(
            LineKey::new("prod-1", Some("M"), Some(&black)).to_string(),
            "prod-1-M-Black"
        );
        assert_eq!(LineKey::new("prod-1", None, None).to_string(), "prod-1-none-none");
    }

    #[test]
    fn test_key_normalizes_empty_and_sentinel() {
        let absent = LineKey::new("prod-1", None, None);
        assert_eq!(absent, LineKey::new("prod-1", Some(""), None));
        assert_eq!(absent, LineKey::new("prod-1", Some(NO_SELECTION), None));
        assert_eq!(absent.size(), None);
        assert_eq!(absent.color_name(), None);
    }

    #[test]
    fn test_key_compares_color_by_name() {
        let a = LineKey::new("prod-1", None, Some(&ProductColor::new("Black", "#000")));
        let b = LineKey::new("prod-1", None, Some(&ProductColor::new("Black", "#111")));
        assert_eq!(a, b);
        assert_eq!(a.color_name(), Some("Black"));
    }

    #[test]
    fn test_matches() {
        let line = LineItem::new(tee(), 1, Some("M".to_string()), None);
        assert!(line.matches(&LineKey::new("prod-1", Some("M"), None)));
        assert!(!line.matches(&LineKey::new("prod-1", Some("L"), None)));
        assert!(!line.matches(&LineKey::new("prod-2", Some("M"), None)));
        assert!(line.matches(&line.key()));
    }

    #[test]
    fn test_line_total() {
        let line = LineItem::new(tee(), 3, None, None);
        assert_eq!(line.line_total().amount_cents, 7500);
    }

    #[test]
    fn test_serialized_layout() {
        let line = LineItem::new(
            tee(),
            2,
            Some("M".to_string()),
            Some(ProductColor::new("Black", "#000000")),
        );
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["selectedSize"], "M");
        assert_eq!(json["selectedColor"]["name"], "Black");
        assert_eq!(json["selectedColor"]["hex"], "#000000");
        assert_eq!(json["product"]["id"], "prod-1");

        let bare = serde_json::to_value(LineItem::new(tee(), 1, None, None)).unwrap();
        assert!(bare.get("selectedSize").is_none());
        assert!(bare.get("selectedColor").is_none());
    }
}
