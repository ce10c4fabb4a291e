//! Local on-device key-value storage for Boutique.
//!
//! Provides a small, synchronous storage API with automatic JSON
//! serialization, modelled on a browser's `localStorage`: string keys,
//! whole-value reads and writes, no transactions.
//!
//! # Example
//!
//! ```rust,ignore
//! use boutique_kv::{LocalStorage, MemoryStore};
//!
//! let storage = LocalStorage::new(MemoryStore::new());
//!
//! // Store a value
//! storage.set("cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<LineItem>> = storage.get("cart")?;
//!
//! // Delete a value
//! storage.delete("cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::KvError;
pub use kv::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, KvError, LocalStorage, MemoryStore};
}
