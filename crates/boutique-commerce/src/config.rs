//! Cart configuration.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! storage_key = "cart"
//! namespace = "guest"
//! currency = "USD"
//!
//! [pricing]
//! free_shipping_threshold = 250.0
//! flat_shipping = 15.0
//! tax_rate = 0.08
//!
//! [checkout]
//! delay_ms = 2000
//! ```

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use boutique_kv::storage_key;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Configuration for a cart store and checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the item list is persisted under.
    pub storage_key: String,
    /// Optional prefix, giving `"{namespace}:{storage_key}"`.
    pub namespace: Option<String>,
    /// Currency totals are computed in.
    pub currency: Currency,
    /// Shipping and tax rules.
    pub pricing: PricingConfig,
    /// Simulated checkout settings.
    pub checkout: CheckoutConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            namespace: None,
            currency: Currency::USD,
            pricing: PricingConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl CartConfig {
    /// Load config from a file, TOML unless the extension is `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;

        tracing::debug!(path = %path.display(), key = %config.resolved_storage_key(), "loaded cart config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that values are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.storage_key.trim().is_empty() {
            return Err(CommerceError::Config("storage_key must not be empty".to_string()));
        }
        self.pricing.validate()
    }

    /// Storage key with the namespace applied.
    pub fn resolved_storage_key(&self) -> String {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => storage_key!(namespace, self.storage_key),
            _ => self.storage_key.clone(),
        }
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the shipping and tax rules.
    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Set the simulated checkout delay.
    pub fn with_checkout_delay(mut self, delay: Duration) -> Self {
        self.checkout.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

/// Shipping and tax rules. Amounts are decimals in the currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: f64,
    /// Shipping charged at or below the threshold.
    pub flat_shipping: f64,
    /// Tax as a fraction of the subtotal (0.08 = 8%).
    pub tax_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 250.0,
            flat_shipping: 15.0,
            tax_rate: 0.08,
        }
    }
}

impl PricingConfig {
    /// Free-shipping threshold in `currency`.
    pub fn free_shipping_threshold(&self, currency: Currency) -> Money {
        Money::from_decimal(self.free_shipping_threshold, currency)
    }

    /// Flat shipping charge in `currency`.
    pub fn flat_shipping(&self, currency: Currency) -> Money {
        Money::from_decimal(self.flat_shipping, currency)
    }

    fn validate(&self) -> Result<(), CommerceError> {
        if !(self.free_shipping_threshold >= 0.0) || !(self.flat_shipping >= 0.0) {
            return Err(CommerceError::Config(
                "shipping amounts must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CommerceError::Config(format!(
                "tax_rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }
}

/// Simulated checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Simulated payment processing time.
    pub delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

impl CheckoutConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.resolved_storage_key(), "cart");
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.checkout.delay(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = CartConfig::from_toml_str("").unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = CartConfig::from_toml_str(
            r#"
            namespace = "guest"
            currency = "EUR"

            [pricing]
            tax_rate = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.resolved_storage_key(), "guest:cart");
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.pricing.tax_rate, 0.2);
        assert_eq!(config.pricing.flat_shipping, 15.0);
    }

    #[test]
    fn test_invalid_tax_rate() {
        let result = CartConfig::from_toml_str("[pricing]\ntax_rate = 8.0\n");
        assert!(matches!(result, Err(CommerceError::Config(_))));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let config = CartConfig::default().with_storage_key(" ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_toml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "storage_key = \"bag\"\n[checkout]\ndelay_ms = 0\n").unwrap();
        let config = CartConfig::load(&toml_path).unwrap();
        assert_eq!(config.storage_key, "bag");
        assert_eq!(config.checkout.delay_ms, 0);

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"currency": "GBP"}"#).unwrap();
        let config = CartConfig::load(&json_path).unwrap();
        assert_eq!(config.currency, Currency::GBP);
    }

    #[test]
    fn test_load_missing_file() {
        let result = CartConfig::load("/nonexistent/boutique/cart.toml");
        assert!(matches!(result, Err(CommerceError::Config(_))));
    }

    #[test]
    fn test_builders() {
        let config = CartConfig::default()
            .with_storage_key("bag")
            .with_namespace("user-42")
            .with_currency(Currency::CAD)
            .with_checkout_delay(Duration::from_millis(10));
        assert_eq!(config.resolved_storage_key(), "user-42:bag");
        assert_eq!(config.checkout.delay_ms, 10);
    }

    #[test]
    fn test_huge_checkout_delay_saturates() {
        let config = CartConfig::default().with_checkout_delay(Duration::MAX);
        assert_eq!(config.checkout.delay_ms, u64::MAX);
    }
}
