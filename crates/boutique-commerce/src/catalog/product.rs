//! Product and color types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A product in the catalog.
///
/// Products are handed to the cart by the UI layer and never mutated by it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Current selling price.
    pub price: Money,
    /// Price before discount, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Image references, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Review metadata.
    #[serde(default)]
    pub rating: Rating,
    /// Shown in featured listings.
    #[serde(default)]
    pub featured: bool,
    /// Shown with a "new" badge.
    #[serde(default)]
    pub is_new: bool,
    /// Selectable sizes, if the product comes in sizes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    /// Selectable colors, if the product comes in colors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ProductColor>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with the required fields; everything else empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: String::new(),
            description: String::new(),
            price,
            original_price: None,
            images: Vec::new(),
            category_id: category_id.into(),
            stock: 0,
            rating: Rating::default(),
            featured: false,
            is_new: false,
            sizes: Vec::new(),
            colors: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the stock count.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the pre-discount price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Set the selectable sizes.
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the selectable colors.
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = ProductColor>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Add an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// First image, used for thumbnails.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if the product is discounted against its original price.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage().is_some()
    }

    /// Whole-percent discount off the original price.
    ///
    /// `None` unless the original price is higher than the current price.
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount_cents <= self.price.amount_cents {
            return None;
        }
        let saved = original.try_subtract(&self.price)?;
        original.percent_of(&saved)
    }

    /// Look up a color option by name.
    pub fn color(&self, name: &str) -> Option<&ProductColor> {
        self.colors.iter().find(|c| c.name == name)
    }
}

/// A color option: a name plus the swatch color to render.
///
/// Two colors are the same option when their names match, whatever the
/// swatch value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductColor {
    /// Color name (e.g., "Black").
    pub name: String,
    /// Display color (e.g., "#000000").
    pub hex: String,
}

impl ProductColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

impl PartialEq for ProductColor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ProductColor {}

impl Hash for ProductColor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Average review score and number of reviews.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Average score, 0.0 to 5.0.
    pub average: f32,
    /// Number of reviews.
    pub review_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::USD)
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new("prod-1", "Wool Coat", usd(189.0), "outerwear");
        assert_eq!(product.id.as_str(), "prod-1");
        assert_eq!(product.price.amount_cents, 18900);
        assert!(!product.is_in_stock());
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn test_discount_percentage() {
        let product = Product::new("prod-1", "Wool Coat", usd(150.0), "outerwear")
            .with_original_price(usd(200.0));
        assert!(product.is_on_sale());
        assert_eq!(product.discount_percentage(), Some(25));

        let not_discounted = Product::new("prod-2", "Scarf", usd(40.0), "accessories")
            .with_original_price(usd(40.0));
        assert_eq!(not_discounted.discount_percentage(), None);
    }

    #[test]
    fn test_color_equality_by_name() {
        let a = ProductColor::new("Black", "#000000");
        let b = ProductColor::new("Black", "#111111");
        let c = ProductColor::new("Navy", "#000080");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_color_lookup() {
        let product = Product::new("prod-1", "Tee", usd(25.0), "tops")
            .with_colors([ProductColor::new("Black", "#000"), ProductColor::new("White", "#fff")]);
        assert_eq!(product.color("White").map(|c| c.hex.as_str()), Some("#fff"));
        assert!(product.color("Red").is_none());
    }

    #[test]
    fn test_serializes_camel_case_and_omits_empty_variants() {
        let product = Product::new("prod-1", "Tee", usd(25.0), "tops");
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("sizes").is_none());
        assert!(json.get("originalPrice").is_none());
    }
}
