//! Shopping cart module.
//!
//! Contains line items and their identity keys, the cart state machine,
//! the persisted cart store and the order summary.

mod handle;
mod line_item;
mod state;
mod store;
mod summary;

pub use handle::CartHandle;
pub use line_item::{LineItem, LineKey, NO_SELECTION};
pub use state::{reduce, CartCommand, CartState};
pub use store::CartStore;
pub use summary::OrderSummary;
