//! Shared handle onto a single cart store.

use crate::cart::{CartState, CartStore, OrderSummary};
use crate::catalog::{Product, ProductColor};
use crate::ids::ProductId;
use crate::money::Money;
use boutique_kv::KeyValueStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Cheaply clonable handle onto one [`CartStore`].
///
/// Every clone sees the same cart. Single-threaded: the handle is `!Send`,
/// and a borrow must not be held across another call on the same cart.
#[derive(Debug)]
pub struct CartHandle<B> {
    inner: Rc<RefCell<CartStore<B>>>,
}

impl<B> Clone for CartHandle<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: KeyValueStore> CartHandle<B> {
    /// Wrap a store for sharing.
    pub fn new(store: CartStore<B>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    pub fn add_item(
        &self,
        product: &Product,
        quantity: i64,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.inner
            .borrow_mut()
            .add_item(product, quantity, size, color);
    }

    pub fn remove_item(
        &self,
        product_id: &ProductId,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.inner.borrow_mut().remove_item(product_id, size, color);
    }

    pub fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&ProductColor>,
    ) {
        self.inner
            .borrow_mut()
            .update_quantity(product_id, quantity, size, color);
    }

    pub fn clear_cart(&self) {
        self.inner.borrow_mut().clear_cart();
    }

    pub fn toggle_cart(&self) {
        self.inner.borrow_mut().toggle_cart();
    }

    pub fn set_cart_open(&self, open: bool) {
        self.inner.borrow_mut().set_cart_open(open);
    }

    pub fn item_count(&self) -> i64 {
        self.inner.borrow().item_count()
    }

    pub fn subtotal(&self) -> Money {
        self.inner.borrow().subtotal()
    }

    pub fn summary(&self) -> OrderSummary {
        self.inner.borrow().summary()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open()
    }

    /// Read the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&CartState) -> R) -> R {
        f(self.inner.borrow().state())
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CartStore<B>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use crate::money::Currency;
    use boutique_kv::{LocalStorage, MemoryStore};

    #[test]
    fn test_clones_share_one_cart() {
        let store = CartStore::open(LocalStorage::new(MemoryStore::new()), &CartConfig::default());
        let header = CartHandle::new(store);
        let drawer = header.clone();

        let tee = Product::new("p1", "Tee", Money::new(2500, Currency::USD), "tops");
        drawer.add_item(&tee, 2, Some("M"), None);

        assert_eq!(header.item_count(), 2);
        assert!(header.is_open());
        header.set_cart_open(false);
        assert!(!drawer.is_open());

        drawer.update_quantity(&tee.id, 5, Some("M"), None);
        assert_eq!(header.subtotal().amount_cents, 12500);
        assert_eq!(header.with_state(|state| state.line_count()), 1);

        header.remove_item(&tee.id, Some("M"), None);
        assert!(drawer.with_store(|store| store.is_empty()));
    }
}
