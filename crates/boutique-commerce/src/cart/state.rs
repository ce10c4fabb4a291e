//! Cart state and its transition function.
//!
//! Every change to a cart goes through [`reduce`], a pure function from
//! the current [`CartState`] and a [`CartCommand`] to the next state.

use crate::cart::{LineItem, LineKey};
use crate::catalog::{Product, ProductColor};
use crate::money::{Currency, Money};

/// Items in the cart plus whether the cart panel is shown.
///
/// Items keep insertion order, never share a [`LineKey`], and are all
/// priced in the cart's currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<LineItem>,
    is_open: bool,
    currency: Currency,
}

impl CartState {
    /// An empty, closed cart in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty, closed cart that only accepts products priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of price times quantity across all lines.
    pub fn subtotal(&self) -> Money {
        let cents = self.items.iter().fold(0_i64, |total, item| {
            total.saturating_add(item.line_total().amount_cents)
        });
        Money::new(cents, self.currency)
    }

    /// Whether `command` would be applied rather than ignored.
    ///
    /// Only `AddItem` can be refused: for a non-positive quantity or a
    /// product priced in another currency.
    pub fn accepts(&self, command: &CartCommand) -> bool {
        match command {
            CartCommand::AddItem {
                product, quantity, ..
            } => *quantity > 0 && product.price.currency == self.currency,
            _ => true,
        }
    }

    /// Find the line with the given key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    fn remove(&mut self, key: &LineKey) {
        self.items.retain(|item| !item.matches(key));
    }
}

/// A change to apply to a [`CartState`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add `quantity` of a product, merging into an existing line with the
    /// same key. Opens the cart panel.
    AddItem {
        product: Product,
        quantity: i64,
        size: Option<String>,
        color: Option<ProductColor>,
    },
    /// Remove the line with this key, if present.
    RemoveItem { key: LineKey },
    /// Set the quantity of the line with this key; `<= 0` removes it.
    UpdateQuantity { key: LineKey, quantity: i64 },
    /// Remove every line.
    Clear,
    /// Flip the panel's visibility.
    ToggleOpen,
    /// Show or hide the panel.
    SetOpen(bool),
    /// Replace the items with a previously persisted list.
    Load(Vec<LineItem>),
}

impl CartCommand {
    /// Add one unit of a product with no size or color selected.
    pub fn add(product: Product) -> Self {
        CartCommand::AddItem {
            product,
            quantity: 1,
            size: None,
            color: None,
        }
    }

    /// Whether applying this command changes what must be persisted.
    ///
    /// `Load` is excluded: it restores what storage already holds.
    pub fn touches_items(&self) -> bool {
        match self {
            CartCommand::AddItem { quantity, .. } => *quantity > 0,
            CartCommand::RemoveItem { .. }
            | CartCommand::UpdateQuantity { .. }
            | CartCommand::Clear => true,
            CartCommand::ToggleOpen | CartCommand::SetOpen(_) | CartCommand::Load(_) => false,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem { .. } => "add_item",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::Clear => "clear",
            CartCommand::ToggleOpen => "toggle_open",
            CartCommand::SetOpen(_) => "set_open",
            CartCommand::Load(_) => "load",
        }
    }
}

/// Apply `command` to `state`, producing the next state.
///
/// An `AddItem` with a non-positive quantity, or for a product priced in
/// another currency than the cart's, is rejected: the state comes back
/// unchanged and the panel stays as it was.
pub fn reduce(mut state: CartState, command: CartCommand) -> CartState {
    match command {
        CartCommand::AddItem {
            product,
            quantity,
            size,
            color,
        } => {
            if quantity <= 0 {
                tracing::warn!(
                    product_id = %product.id,
                    quantity,
                    "ignoring add with non-positive quantity"
                );
                return state;
            }
            if product.price.currency != state.currency {
                tracing::warn!(
                    product_id = %product.id,
                    expected = %state.currency,
                    got = %product.price.currency,
                    "ignoring add priced in another currency"
                );
                return state;
            }

            let key = LineKey::new(product.id.clone(), size.as_deref(), color.as_ref());
            match state.items.iter_mut().find(|item| item.matches(&key)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(quantity);
                }
                None => state
                    .items
                    .push(LineItem::new(product, quantity, size, color)),
            }
            state.is_open = true;
        }
        CartCommand::RemoveItem { key } => state.remove(&key),
        CartCommand::UpdateQuantity { key, quantity } => {
            if quantity <= 0 {
                state.remove(&key);
            } else if let Some(item) = state.items.iter_mut().find(|item| item.matches(&key)) {
                item.quantity = quantity;
            }
        }
        CartCommand::Clear => state.items.clear(),
        CartCommand::ToggleOpen => state.is_open = !state.is_open,
        CartCommand::SetOpen(open) => state.is_open = open,
        CartCommand::Load(items) => state.items = normalize_loaded(items, state.currency),
    }
    state
}

/// Drop non-positive lines and lines priced in another currency, and merge
/// lines sharing a key, keeping the position of each key's first occurrence.
fn normalize_loaded(items: Vec<LineItem>, currency: Currency) -> Vec<LineItem> {
    let loaded = items.len();
    let mut normalized: Vec<LineItem> = Vec::with_capacity(loaded);

    let valid = items
        .into_iter()
        .filter(|item| item.quantity > 0 && item.product.price.currency == currency);
    for item in valid {
        let key = item.key();
        match normalized.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => normalized.push(item),
        }
    }

    if normalized.len() != loaded {
        tracing::warn!(
            loaded,
            kept = normalized.len(),
            "normalized persisted cart lines"
        );
    }
    normalized
}
