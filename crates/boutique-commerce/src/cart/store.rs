//! The cart store: cart state plus its persistence.

use crate::cart::{reduce, CartCommand, CartState, LineItem, LineKey, OrderSummary};
use crate::catalog::{Product, ProductColor};
use crate::config::{CartConfig, PricingConfig};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CommerceError;
use boutique_kv::{FileStore, KeyValueStore, LocalStorage};
use std::path::Path;

/// Single source of truth for what is in the shopping bag.
///
/// Construct one with [`CartStore::open`] at startup and hand it (or a
/// [`CartHandle`](crate::cart::CartHandle)) to every consumer. The item list
/// is written back to storage after every change to it; panel visibility is
/// never persisted.
///
/// # Example
///
/// ```rust,ignore
/// let mut cart = CartStore::open(LocalStorage::open_dir(data_dir)?, &config);
/// cart.add_item(&product, 1, Some("M"), product.color("Black"));
/// println!("{} items, {}", cart.item_count(), cart.subtotal());
/// ```
#[derive(Debug)]
pub struct CartStore<B = FileStore> {
    state: CartState,
    storage: LocalStorage<B>,
    storage_key: String,
    pricing: PricingConfig,
}

impl CartStore<FileStore> {
    /// Open a cart persisted as files under `dir`.
    pub fn open_dir(dir: impl AsRef<Path>, config: &CartConfig) -> Result<Self, CommerceError> {
        let storage = LocalStorage::open_dir(dir)?;
        Ok(Self::open(storage, config))
    }
}

impl<B: KeyValueStore> CartStore<B> {
    /// Create the store and hydrate it from `storage`.
    ///
    /// A missing entry leaves the cart empty. An unreadable or malformed
    /// entry is logged and also leaves the cart empty.
    pub fn open(storage: LocalStorage<B>, config: &CartConfig) -> Self {
        let mut store = Self {
            state: CartState::with_currency(config.currency),
            storage,
            storage_key: config.resolved_storage_key(),
            pricing: config.pricing.clone(),
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        match self.storage.get::<Vec<LineItem>>(&self.storage_key) {
            Ok(Some(items)) => {
                tracing::debug!(key = %self.storage_key, lines = items.len(), "restored cart");
                self.dispatch(CartCommand::Load(items));
            }
            Ok(None) => {
                tracing::debug!(key = %self.storage_key, "no saved cart");
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.storage_key,
                    error = %e,
                    "failed to load cart from storage, starting empty"
                );
            }
        }
    }

    /// Apply a command and persist the item list if it changed.
    pub fn dispatch(&mut self, command: CartCommand) {
        let persist = command.touches_items() && self.state.accepts(&command);
        tracing::debug!(command = command.name(), "cart command");

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, command);

        if persist {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.storage.set(&self.storage_key, self.state.items()) {
            tracing::error!(key = %self.storage_key, error = %e, "failed to save cart");
        }
    }

    /// Add `quantity` of a product with an optional size and color.
    ///
    /// Merges into an existing line with the same product, size and color
    /// name, and opens the cart panel. Non-positive quantities and products
    /// priced in another currency than the cart's are ignored.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.dispatch(CartCommand::AddItem {
            product: product.clone(),
            quantity,
            size: size.map(str::to_string),
            color: color.cloned(),
        });
    }

    /// Add a single unit with no size or color selected.
    pub fn add_one(&mut self, product: &Product) {
        self.add_item(product, 1, None, None);
    }

    /// Remove the matching line, if any.
    pub fn remove_item(
        &mut self,
        product_id: &ProductId,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.dispatch(CartCommand::RemoveItem {
            key: LineKey::new(product_id.clone(), size, color),
        });
    }

    /// Set the matching line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.dispatch(CartCommand::UpdateQuantity {
            key: LineKey::new(product_id.clone(), size, color),
            quantity,
        });
    }

    /// Remove every line. Visibility is unchanged.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartCommand::Clear);
    }

    /// Flip the cart panel's visibility.
    pub fn toggle_cart(&mut self) {
        self.dispatch(CartCommand::ToggleOpen);
    }

    /// Show or hide the cart panel.
    pub fn set_cart_open(&mut self, open: bool) {
        self.dispatch(CartCommand::SetOpen(open));
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// Sum of current price times quantity across all lines.
    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    /// Subtotal with shipping and tax applied.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.subtotal(), &self.pricing)
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Find the line with the given key.
    pub fn get_item(&self, key: &LineKey) -> Option<&LineItem> {
        self.state.get(key)
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.state.line_count()
    }

    /// Currency totals are computed in.
    pub fn currency(&self) -> Currency {
        self.state.currency()
    }

    /// Key the item list is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> LocalStorage<B> {
        self.storage
    }
}
