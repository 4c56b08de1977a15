//! Shopping cart module.
//!
//! Contains the cart aggregate and its line items.

mod cart;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_LINE};
