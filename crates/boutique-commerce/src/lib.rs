//! Storefront domain types and shopping-cart store for Boutique.
//!
//! - **Catalog**: Products, colors, categories
//! - **Cart**: Line items, the cart state machine, persistence, totals
//! - **Checkout**: Addresses, orders, simulated checkout
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_commerce::prelude::*;
//! use boutique_kv::LocalStorage;
//!
//! let config = CartConfig::load("boutique.toml")?;
//! let mut cart = CartStore::open(LocalStorage::open_dir(data_dir)?, &config);
//!
//! let coat = Product::new("coat-01", "Wool Coat", Money::from_decimal(189.0, Currency::USD), "outerwear")
//!     .with_sizes(["S", "M", "L"]);
//! cart.add_item(&coat, 1, Some("M"), None);
//!
//! let summary = cart.summary();
//! println!("Total: {}", summary.total);
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use config::CartConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CartConfig, CheckoutConfig, PricingConfig};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, ProductColor, Rating};

    // Cart
    pub use crate::cart::{
        CartCommand, CartHandle, CartState, CartStore, LineItem, LineKey, OrderSummary,
    };

    // Checkout
    pub use crate::checkout::{
        Address, Checkout, CheckoutRequest, Order, OrderItem, OrderStatus, PaymentMethod,
    };
}
