//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
    /// Category image reference.
    #[serde(default)]
    pub image: String,
    /// Number of products in this category.
    #[serde(default)]
    pub product_count: u32,
}

impl Category {
    /// Create a category whose id is its slug.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: CategoryId::new(slug.clone()),
            name: name.into(),
            slug,
            description: String::new(),
            image: String::new(),
            product_count: 0,
        }
    }

    /// Check if this category is the one a product points at.
    pub fn contains(&self, product: &crate::catalog::Product) -> bool {
        product.category_id == self.id
    }
}
