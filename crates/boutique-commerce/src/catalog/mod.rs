//! Product catalog module.
//!
//! Read-only product and category types supplied to the cart by the UI layer.

mod category;
mod product;

pub use category::Category;
pub use product::{Product, ProductColor, Rating};
