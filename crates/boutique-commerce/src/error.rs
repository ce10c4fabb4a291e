//! Commerce error types.

use boutique_kv::KvError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart operations themselves never fail; these cover configuration
/// loading, storage access and checkout.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}
