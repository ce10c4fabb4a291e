//! Checkout module.
//!
//! Contains types for addresses, orders and the simulated checkout.

mod address;
mod flow;
mod order;

pub use address::Address;
pub use flow::{Checkout, CheckoutRequest};
pub use order::{Order, OrderItem, OrderStatus, PaymentMethod};
